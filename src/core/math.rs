// Math utilities shared by the simulation, input and renderer

use glam::{IVec2, Vec2};

/// Integer width/height pair, in pixels
///
/// Used both for body sizes and for the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    /// Create a new size
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// A size with zero width or height covers no area
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// The size as a vector (width, height)
    pub fn as_ivec2(&self) -> IVec2 {
        IVec2::new(self.width, self.height)
    }

    /// The size as a float vector, for the renderer
    pub fn as_vec2(&self) -> Vec2 {
        self.as_ivec2().as_vec2()
    }
}

impl From<winit::dpi::PhysicalSize<u32>> for Size {
    fn from(size: winit::dpi::PhysicalSize<u32>) -> Self {
        Self::new(
            i32::try_from(size.width).unwrap_or(i32::MAX),
            i32::try_from(size.height).unwrap_or(i32::MAX),
        )
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
