use glam::{Mat4, Vec3};

use crate::config::{
    CAMERA_FAR, CAMERA_FOVY, CAMERA_NEAR, DEFAULT_CAMERA_DISTANCE,
};

/// Orbit camera around the origin: azimuth/elevation on a sphere of
/// `distance`, driven by the keyboard.
pub struct Camera {
    pub azimuth: f32,
    pub elevation: f32,
    pub distance: f32,
    aspect: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            azimuth: 0.0,
            elevation: 0.0,
            distance: DEFAULT_CAMERA_DISTANCE,
            aspect: 1.0,
        }
    }
}

impl Camera {
    /// Eye position on the orbit sphere
    pub fn eye(&self) -> Vec3 {
        let (sin_az, cos_az) = self.azimuth.sin_cos();
        let (sin_el, cos_el) = self.elevation.sin_cos();
        Vec3::new(
            self.distance * cos_el * sin_az,
            self.distance * sin_el,
            self.distance * cos_el * cos_az,
        )
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    /// Clamp elevation short of the poles so the up vector stays valid
    pub fn orbit(&mut self, d_azimuth: f32, d_elevation: f32) {
        self.azimuth += d_azimuth;
        self.elevation = (self.elevation + d_elevation)
            .clamp(-std::f32::consts::FRAC_PI_2 + 0.05, std::f32::consts::FRAC_PI_2 - 0.05);
    }

    pub fn zoom(&mut self, factor: f32) {
        self.distance = (self.distance * factor).clamp(CAMERA_NEAR * 4.0, CAMERA_FAR * 0.5);
    }

    pub fn view_proj(&self) -> Mat4 {
        let proj = Mat4::perspective_rh(CAMERA_FOVY, self.aspect, CAMERA_NEAR, CAMERA_FAR);
        let view = Mat4::look_at_rh(self.eye(), Vec3::ZERO, Vec3::Y);
        proj * view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_eye_on_z_axis() {
        let camera = Camera::default();
        let eye = camera.eye();
        assert!((eye - Vec3::new(0.0, 0.0, DEFAULT_CAMERA_DISTANCE)).length() < 1e-5);
    }

    #[test]
    fn test_orbit_preserves_distance() {
        let mut camera = Camera::default();
        camera.orbit(1.2, 0.7);
        assert!((camera.eye().length() - camera.distance).abs() < 1e-4);
    }

    #[test]
    fn test_elevation_clamped_short_of_pole() {
        let mut camera = Camera::default();
        camera.orbit(0.0, 10.0);
        assert!(camera.elevation < std::f32::consts::FRAC_PI_2);
        // look_at up vector must stay non-parallel to the view direction
        let view_proj = camera.view_proj();
        assert!(view_proj.is_finite());
    }

    #[test]
    fn test_zoom_bounded() {
        let mut camera = Camera::default();
        for _ in 0..200 {
            camera.zoom(0.5);
        }
        assert!(camera.distance >= CAMERA_NEAR * 4.0);
        for _ in 0..200 {
            camera.zoom(2.0);
        }
        assert!(camera.distance <= CAMERA_FAR * 0.5);
    }

    #[test]
    fn test_view_proj_maps_origin_in_front() {
        let mut camera = Camera::default();
        camera.set_aspect(1280, 720);
        let clip = camera.view_proj() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        // Origin projects inside the frustum, in front of the eye
        assert!(clip.w > 0.0);
        let ndc_z = clip.z / clip.w;
        assert!((0.0..=1.0).contains(&ndc_z));
    }
}
