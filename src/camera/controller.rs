use glam::{Quat, Vec2, Vec3};

use crate::camera::core::{Camera, CameraUniform};
use crate::options::CameraOptions;

/// Radians of orbit per pixel of drag at `rotate_speed = 1`.
const ROTATE_RADIANS_PER_PIXEL: f32 = 0.01;
/// Fraction of the orbit distance panned per pixel at `pan_speed = 1`.
const PAN_FRACTION_PER_PIXEL: f32 = 0.002;

/// Orbit camera around a focus point: drag to rotate, shift-drag to pan,
/// scroll to zoom.
///
/// Pure CPU state; the engine copies [`uniform`](Self::uniform) into the
/// GPU buffer once per frame.
#[derive(Debug, Clone)]
pub struct OrbitController {
    orientation: Quat,
    distance: f32,
    focus_point: Vec3,
    initial_distance: f32,
    min_distance: f32,
    max_distance: f32,

    /// Camera derived from the orbit state.
    pub camera: Camera,
    rotate_speed: f32,
    pan_speed: f32,
    zoom_speed: f32,
}

impl OrbitController {
    /// Camera on +Z at `options.distance`, looking at the origin.
    #[must_use]
    pub fn new(options: &CameraOptions, aspect: f32) -> Self {
        let distance = options.distance;
        let camera = Camera {
            eye: Vec3::new(0.0, 0.0, distance),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        };

        Self {
            orientation: Quat::IDENTITY,
            distance,
            focus_point: Vec3::ZERO,
            initial_distance: distance,
            min_distance: options.znear * 10.0,
            max_distance: options.zfar * 0.9,
            camera,
            rotate_speed: options.rotate_speed,
            pan_speed: options.pan_speed,
            zoom_speed: options.zoom_speed,
        }
    }

    fn update_camera_pos(&mut self) {
        let dir = self.orientation * Vec3::Z;

        self.camera.eye = self.focus_point + (dir * self.distance);
        self.camera.target = self.focus_point;
        self.camera.up = self.orientation * Vec3::Y;
    }

    /// Current eye-to-focus distance.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Current focus point.
    #[must_use]
    pub fn focus_point(&self) -> Vec3 {
        self.focus_point
    }

    /// Uniform snapshot of the current camera.
    #[must_use]
    pub fn uniform(&self) -> CameraUniform {
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&self.camera);
        uniform
    }

    /// Update the aspect ratio. Ignores zero-sized viewports.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.camera.aspect = width as f32 / height as f32;
        }
    }

    /// Orbit by `delta` pixels of drag.
    pub fn rotate(&mut self, delta: Vec2) {
        let speed = ROTATE_RADIANS_PER_PIXEL * self.rotate_speed;

        // Horizontal rotation around camera's up vector
        let up = self.orientation * Vec3::Y;
        self.orientation =
            Quat::from_axis_angle(up, -delta.x * speed) * self.orientation;

        // Vertical rotation around camera's right vector (after horizontal rotation)
        let right = self.orientation * Vec3::X;
        self.orientation =
            Quat::from_axis_angle(right, -delta.y * speed) * self.orientation;

        self.orientation = self.orientation.normalize();
        self.update_camera_pos();
    }

    /// Move the focus point by `delta` pixels of drag, scaled by distance so
    /// the scene tracks the cursor at any zoom level.
    pub fn pan(&mut self, delta: Vec2) {
        let right = self.orientation * Vec3::X;
        let up = self.orientation * Vec3::Y;
        let speed = PAN_FRACTION_PER_PIXEL * self.pan_speed * self.distance;

        self.focus_point += right * (-delta.x * speed) + up * (delta.y * speed);
        self.update_camera_pos();
    }

    /// Zoom in (positive) or out (negative), clamped to the clip range.
    pub fn zoom(&mut self, delta: f32) {
        self.distance *= 1.0 - delta * self.zoom_speed;
        self.clamp_distance();
        self.update_camera_pos();
    }

    /// Take new projection, speed, and home-distance settings while keeping
    /// the current orientation, focus point, and zoom (re-clamped to the new
    /// clip range).
    pub fn apply_options(&mut self, options: &CameraOptions) {
        self.camera.fovy = options.fovy;
        self.camera.znear = options.znear;
        self.camera.zfar = options.zfar;
        self.initial_distance = options.distance;
        self.min_distance = options.znear * 10.0;
        self.max_distance = options.zfar * 0.9;
        self.rotate_speed = options.rotate_speed;
        self.pan_speed = options.pan_speed;
        self.zoom_speed = options.zoom_speed;
        self.clamp_distance();
        self.update_camera_pos();
    }

    // `max` before `min` so a near plane close to the far plane cannot
    // invert the range.
    fn clamp_distance(&mut self) {
        self.distance =
            self.distance.max(self.min_distance).min(self.max_distance);
    }

    /// Return to the initial orbit: on +Z, looking at the origin.
    pub fn reset(&mut self) {
        self.orientation = Quat::IDENTITY;
        self.focus_point = Vec3::ZERO;
        self.distance = self.initial_distance;
        self.update_camera_pos();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> OrbitController {
        OrbitController::new(&CameraOptions::default(), 1.5)
    }

    #[test]
    fn starts_on_positive_z_looking_at_origin() {
        let c = controller();
        assert_eq!(c.camera.eye, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(c.camera.target, Vec3::ZERO);
        assert_eq!(c.camera.fovy, 50.0);
    }

    #[test]
    fn rotation_keeps_distance() {
        let mut c = controller();
        c.rotate(Vec2::new(40.0, -25.0));
        let d = (c.camera.eye - c.camera.target).length();
        assert!((d - 5.0).abs() < 1e-4);
        assert!(c.camera.eye.distance(Vec3::new(0.0, 0.0, 5.0)) > 0.1);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut c = controller();
        for _ in 0..200 {
            c.zoom(5.0);
        }
        assert!((c.distance() - 0.1).abs() < 1e-6);
        for _ in 0..200 {
            c.zoom(-5.0);
        }
        assert!((c.distance() - 90.0).abs() < 1e-3);
    }

    #[test]
    fn pan_moves_focus_and_reset_restores() {
        let mut c = controller();
        c.pan(Vec2::new(10.0, 0.0));
        assert!(c.focus_point().x < 0.0);
        c.rotate(Vec2::new(5.0, 5.0));
        c.zoom(1.0);

        c.reset();
        assert_eq!(c.focus_point(), Vec3::ZERO);
        assert!((c.camera.eye - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-6);
    }

    #[test]
    fn resize_ignores_zero() {
        let mut c = controller();
        c.resize(0, 100);
        assert_eq!(c.camera.aspect, 1.5);
        c.resize(200, 100);
        assert_eq!(c.camera.aspect, 2.0);
    }

    #[test]
    fn new_options_keep_orbit_but_respect_clip_range() {
        let mut c = controller();
        c.rotate(Vec2::new(30.0, 10.0));
        let eye = c.camera.eye;

        let mut options = CameraOptions {
            fovy: 70.0,
            ..CameraOptions::default()
        };
        c.apply_options(&options);
        assert_eq!(c.camera.fovy, 70.0);
        assert!((c.camera.eye - eye).length() < 1e-5);

        options.zfar = 4.0;
        c.apply_options(&options);
        assert!((c.distance() - 3.6).abs() < 1e-5);
        assert!(c.distance().is_finite());
    }
}
