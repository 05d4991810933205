use glam::IVec2;

use crate::core::Size;

/// Axis-aligned bounding box of a body, in pixels
///
/// Edges are inclusive: two boxes whose edges touch are considered
/// overlapping. A box with zero width or height never overlaps anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

/// Which axis of a rectangle left the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Bounds {
    /// Bounds of a rectangle with its top-left corner at `position`
    pub fn at(position: IVec2, size: Size) -> Self {
        Self {
            left: position.x,
            top: position.y,
            right: position.x + size.width,
            bottom: position.y + size.height,
        }
    }

    /// Zero-width or zero-height box
    pub fn is_degenerate(&self) -> bool {
        self.left == self.right || self.top == self.bottom
    }

    /// AABB overlap test
    pub fn overlaps(&self, other: &Bounds) -> bool {
        if self.is_degenerate() || other.is_degenerate() {
            return false;
        }

        // One box is below the other
        if self.top > other.bottom || other.top > self.bottom {
            return false;
        }

        // One box is left of the other
        if self.right < other.left || other.right < self.left {
            return false;
        }

        true
    }

    /// First axis on which this box sticks out of `[0, 0]..[width, height]`
    ///
    /// X is checked before Y, so a box out on both axes reports `Axis::X`.
    pub fn exceeds(&self, viewport: Size) -> Option<Axis> {
        if self.left < 0 || self.right > viewport.width {
            Some(Axis::X)
        } else if self.top < 0 || self.bottom > viewport.height {
            Some(Axis::Y)
        } else {
            None
        }
    }
}
