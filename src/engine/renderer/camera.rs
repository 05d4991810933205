// Camera for 2D rendering in window pixel coordinates

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

/// Orthographic camera mapping window pixels to clip space
///
/// The origin is the top-left corner of the window and y grows downward,
/// matching the coordinates the simulation works in.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Viewport width
    viewport_width: f32,
    /// Viewport height
    viewport_height: f32,
    /// View-projection matrix
    view_proj: Mat4,
}

impl Camera {
    /// Create a new camera
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        let mut camera = Self {
            viewport_width,
            viewport_height,
            view_proj: Mat4::IDENTITY,
        };
        camera.update_view_proj();
        camera
    }

    /// Update the view-projection matrix
    fn update_view_proj(&mut self) {
        // Avoid a degenerate projection while minimized
        let width = self.viewport_width.max(1.0);
        let height = self.viewport_height.max(1.0);

        // top = 0, bottom = height flips y so it grows downward
        self.view_proj = Mat4::orthographic_rh(0.0, width, height, 0.0, -1.0, 1.0);
    }

    /// Resize the viewport
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport_width = width;
        self.viewport_height = height;
        self.update_view_proj();
    }

    /// Get the view-projection matrix
    pub fn view_proj_matrix(&self) -> Mat4 {
        self.view_proj
    }
}

/// Camera uniform for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    /// Create a new camera uniform from a camera
    pub fn new(camera: &Camera) -> Self {
        Self {
            view_proj: camera.view_proj_matrix().to_cols_array_2d(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::Vec3;

    #[test]
    fn test_top_left_maps_to_clip_corner() {
        let camera = Camera::new(800.0, 600.0);
        let p = camera.view_proj_matrix().project_point3(Vec3::ZERO);
        assert_relative_eq!(p.x, -1.0);
        assert_relative_eq!(p.y, 1.0);
    }

    #[test]
    fn test_bottom_right_maps_to_clip_corner() {
        let camera = Camera::new(800.0, 600.0);
        let p = camera
            .view_proj_matrix()
            .project_point3(Vec3::new(800.0, 600.0, 0.0));
        assert_relative_eq!(p.x, 1.0);
        assert_relative_eq!(p.y, -1.0);
    }

    #[test]
    fn test_resize_updates_projection() {
        let mut camera = Camera::new(800.0, 600.0);
        camera.resize(400.0, 300.0);
        let p = camera
            .view_proj_matrix()
            .project_point3(Vec3::new(200.0, 150.0, 0.0));
        assert_relative_eq!(p.x, 0.0);
        assert_relative_eq!(p.y, 0.0);
    }

    #[test]
    fn test_zero_size_stays_finite() {
        let camera = Camera::new(0.0, 0.0);
        assert!(camera.view_proj_matrix().is_finite());
    }
}
