use glam::IVec2;

use super::collision::{Axis, Bounds};
use crate::core::Size;

/// Identifies a body for its whole lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub(crate) u64);

impl std::fmt::Display for BodyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A moving rectangle
///
/// Positions and velocities are whole pixels; the velocity is applied once
/// per tick. The size never changes after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    id: BodyId,
    size: Size,

    /// Top-left corner
    pub position: IVec2,

    /// Pixels per tick
    pub velocity: IVec2,
}

impl Body {
    /// Create a new body
    pub fn new(id: BodyId, size: Size, position: IVec2, velocity: IVec2) -> Self {
        Self {
            id,
            size,
            position,
            velocity,
        }
    }

    /// Get the body's identifier
    pub fn id(&self) -> BodyId {
        self.id
    }

    /// Get the body's size
    pub fn size(&self) -> Size {
        self.size
    }

    /// Where the body will be after one more tick
    pub fn future_position(&self) -> IVec2 {
        self.position + self.velocity
    }

    /// Bounds at `position`, or at the current position if `None`
    pub fn bounds_at(&self, position: Option<IVec2>) -> Bounds {
        Bounds::at(position.unwrap_or(self.position), self.size)
    }

    /// Bounds at the current position
    pub fn bounds(&self) -> Bounds {
        self.bounds_at(None)
    }

    /// Check whether any part of the current rectangle lies outside the viewport
    pub fn is_outside_borders(&self, viewport: Size) -> bool {
        self.bounds().exceeds(viewport).is_some()
    }

    /// Reflect the velocity if the next step would leave the viewport
    ///
    /// Only one axis is reflected per call, X before Y. Returns `true` when
    /// the velocity changed. The position is left untouched.
    pub fn handle_wall_collision(&mut self, viewport: Size) -> bool {
        let future = self.bounds_at(Some(self.future_position()));

        match future.exceeds(viewport) {
            Some(Axis::X) => {
                self.velocity.x = -self.velocity.x;
                true
            }
            Some(Axis::Y) => {
                self.velocity.y = -self.velocity.y;
                true
            }
            None => false,
        }
    }

    /// AABB test of this body (optionally moved to `position`) against
    /// `other` at its current position
    pub fn overlaps(&self, other: &Body, position: Option<IVec2>) -> bool {
        self.bounds_at(position).overlaps(&other.bounds())
    }

    /// Exchange velocities with another body
    pub fn swap_velocity(&mut self, other: &mut Body) {
        std::mem::swap(&mut self.velocity, &mut other.velocity);
    }

    /// Move one step along the velocity
    pub fn advance(&mut self) {
        self.position = self.future_position();
    }
}
