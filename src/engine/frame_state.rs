//! GPU-free per-frame state: clock, camera, and visibility toggles.
//!
//! Everything a command can change lives here, so command handling and
//! frame advancement are testable without a device.

use crate::camera::controller::OrbitController;
use crate::camera::core::CameraUniform;
use crate::engine::command::HaloCommand;
use crate::options::{DisplayOptions, Options};
use crate::renderer::globals::FrameUniform;
use crate::util::frame_clock::FrameClock;

/// Mutable state advanced once per rendered frame.
#[derive(Debug, Clone)]
pub struct FrameState {
    /// Shared animation clock.
    pub clock: FrameClock,
    /// Whether clock advancement is suspended.
    pub paused: bool,
    /// Orbit camera.
    pub camera: OrbitController,
    /// Visibility toggles.
    pub display: DisplayOptions,
    /// Particle sprite size in logical pixels.
    pub point_size: f32,
}

impl FrameState {
    /// Initial state for `options` and a viewport with the given aspect.
    #[must_use]
    pub fn new(options: &Options, aspect: f32) -> Self {
        Self {
            clock: FrameClock::new(options.clock.step)
                .with_rotation_divisor(options.clock.rotation_divisor),
            paused: false,
            camera: OrbitController::new(&options.camera, aspect),
            display: options.display.clone(),
            point_size: options.particles.point_size,
        }
    }

    /// Re-read option values while keeping accumulated time, the viewport
    /// aspect, and the user's current orbit.
    pub fn apply_options(&mut self, options: &Options) {
        self.clock.set_step(options.clock.step);
        self.clock = std::mem::take(&mut self.clock)
            .with_rotation_divisor(options.clock.rotation_divisor);
        self.camera.apply_options(&options.camera);
        self.display = options.display.clone();
        self.point_size = options.particles.point_size;
    }

    /// Advance the clock by `frames` steps unless paused.
    pub fn advance(&mut self, frames: u64) {
        if !self.paused {
            self.clock.advance(frames);
        }
    }

    /// Apply a command. Returns `true` if anything visible changed.
    pub fn apply(&mut self, command: HaloCommand) -> bool {
        match command {
            HaloCommand::RotateCamera { delta } => self.camera.rotate(delta),
            HaloCommand::PanCamera { delta } => self.camera.pan(delta),
            HaloCommand::Zoom { delta } => self.camera.zoom(delta),
            HaloCommand::ResetCamera => self.camera.reset(),
            HaloCommand::TogglePause => {
                self.paused = !self.paused;
                log::info!(
                    "animation {}",
                    if self.paused { "paused" } else { "resumed" }
                );
            }
            HaloCommand::ToggleParticles => {
                self.display.show_particles = !self.display.show_particles;
            }
            HaloCommand::ToggleSphere => {
                self.display.show_sphere = !self.display.show_sphere;
            }
        }
        true
    }

    /// Camera uniform for the current frame.
    #[must_use]
    pub fn camera_uniform(&self) -> CameraUniform {
        self.camera.uniform()
    }

    /// Frame uniform for the current frame and viewport.
    #[must_use]
    pub fn frame_uniform(
        &self,
        size: (u32, u32),
        pixel_ratio: f64,
    ) -> FrameUniform {
        FrameUniform::new(
            self.clock.uniform_time(),
            self.clock.particle_rotation(),
            self.point_size,
            size,
            pixel_ratio,
        )
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;

    fn state() -> FrameState {
        FrameState::new(&Options::default(), 1.0)
    }

    #[test]
    fn advancing_feeds_both_uniform_slots() {
        let mut s = state();
        s.advance(20);
        let frame = s.frame_uniform((800, 600), 1.0);
        assert!((frame.time - 1.0).abs() < 1e-6);
        assert!((frame.particle_rotation - 0.1).abs() < 1e-6);
    }

    #[test]
    fn pause_freezes_clock() {
        let mut s = state();
        s.advance(4);
        let _ = s.apply(HaloCommand::TogglePause);
        s.advance(100);
        assert!((s.clock.time() - 0.2).abs() < 1e-9);

        let _ = s.apply(HaloCommand::TogglePause);
        s.advance(1);
        assert!((s.clock.time() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn toggles_flip_visibility() {
        let mut s = state();
        let _ = s.apply(HaloCommand::ToggleParticles);
        assert!(!s.display.show_particles);
        let _ = s.apply(HaloCommand::ToggleSphere);
        assert!(!s.display.show_sphere);
        let _ = s.apply(HaloCommand::ToggleParticles);
        assert!(s.display.show_particles);
    }

    #[test]
    fn camera_commands_reach_controller() {
        let mut s = state();
        let before = s.camera.camera.eye;
        let _ = s.apply(HaloCommand::RotateCamera {
            delta: Vec2::new(30.0, 0.0),
        });
        assert_ne!(s.camera.camera.eye, before);
        let _ = s.apply(HaloCommand::ResetCamera);
        assert!((s.camera.camera.eye - before).length() < 1e-6);
    }

    #[test]
    fn reapplying_options_keeps_time() {
        let mut s = state();
        s.advance(10);
        let mut opts = Options::default();
        opts.clock.step = 0.1;
        opts.particles.point_size = 5.0;
        s.apply_options(&opts);
        s.advance(1);
        assert!((s.clock.time() - 0.6).abs() < 1e-9);
        assert_eq!(s.point_size, 5.0);
    }

    #[test]
    fn reapplying_options_keeps_orbit() {
        let mut s = state();
        let _ = s.apply(HaloCommand::RotateCamera {
            delta: Vec2::new(40.0, -25.0),
        });
        let _ = s.apply(HaloCommand::Zoom { delta: 1.0 });
        let eye = s.camera.camera.eye;
        let distance = s.camera.distance();

        let mut opts = Options::default();
        opts.clock.step = 0.1;
        s.apply_options(&opts);

        assert!((s.camera.camera.eye - eye).length() < 1e-5);
        assert_eq!(s.camera.distance(), distance);

        let _ = s.apply(HaloCommand::ResetCamera);
        let home = glam::Vec3::new(0.0, 0.0, 5.0);
        assert!((s.camera.camera.eye - home).length() < 1e-5);
    }
}
