use cubeview_common::CameraConfig;
use glam::{Mat4, Vec3};

/// Perspective camera looking down -Z from a fixed distance.
///
/// Only the aspect ratio changes after construction, following the viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub eye_distance: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

impl Camera {
    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            fov_y: config.fov_y_degrees.to_radians(),
            aspect: 4.0 / 3.0,
            near: config.near,
            far: config.far,
            eye_distance: config.eye_distance,
        }
    }

    /// Recompute the aspect ratio from a viewport size.
    ///
    /// A zero-width or zero-height viewport leaves the aspect untouched and
    /// returns `false`.
    pub fn set_viewport(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            tracing::warn!("ignoring degenerate viewport {width}x{height}");
            return false;
        }
        self.aspect = width as f32 / height as f32;
        true
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, 0.0, -self.eye_distance))
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera() {
        let cam = Camera::default();
        assert_eq!(cam.eye_distance, 10.0);
        let p = cam.projection_matrix();
        assert!(!p.col(0).x.is_nan());
        assert_eq!(
            cam.view_matrix().transform_point3(Vec3::ZERO),
            Vec3::new(0.0, 0.0, -10.0)
        );
    }

    #[test]
    fn same_aspect_same_projection() {
        let mut cam = Camera::default();
        assert!(cam.set_viewport(800, 600));
        let before = cam.projection_matrix();
        assert!(cam.set_viewport(400, 300));
        assert_eq!(cam.projection_matrix(), before);
    }

    #[test]
    fn horizontal_scale_follows_aspect() {
        let mut cam = Camera::default();
        cam.set_viewport(800, 600);
        let wide = cam.projection_matrix();
        cam.set_viewport(400, 600);
        let narrow = cam.projection_matrix();

        // Halving the width doubles the x scale term.
        assert!((narrow.col(0).x - 2.0 * wide.col(0).x).abs() < 1e-5);
        // The y scale term is set by the field of view alone.
        let focal = 1.0 / (cam.fov_y / 2.0).tan();
        assert!((wide.col(1).y - focal).abs() < 1e-5);
        assert!((narrow.col(1).y - focal).abs() < 1e-5);
    }

    #[test]
    fn zero_viewport_keeps_aspect() {
        let mut cam = Camera::default();
        cam.set_viewport(800, 600);
        let before = cam.projection_matrix();
        assert!(!cam.set_viewport(800, 0));
        assert!(!cam.set_viewport(0, 600));
        assert_eq!(cam.aspect, 800.0 / 600.0);
        assert_eq!(cam.projection_matrix(), before);
        assert!(!cam.projection_matrix().col(0).x.is_nan());
    }
}
