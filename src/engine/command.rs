//! The engine's complete interactive vocabulary.
//!
//! Every user-facing operation, whether triggered by a key press, a mouse
//! gesture, or a programmatic call, is a `HaloCommand` passed to
//! [`HaloEngine::execute`](super::HaloEngine::execute).

use glam::Vec2;

/// A discrete or parameterized operation the engine can perform.
///
/// ```ignore
/// engine.execute(HaloCommand::TogglePause);
/// engine.execute(HaloCommand::Zoom { delta: 1.0 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HaloCommand {
    /// Orbit the camera by `delta` pixels of mouse movement.
    RotateCamera {
        /// Horizontal and vertical drag delta.
        delta: Vec2,
    },
    /// Pan the camera by `delta` pixels of mouse movement.
    PanCamera {
        /// Horizontal and vertical drag delta.
        delta: Vec2,
    },
    /// Zoom the camera (positive = zoom in, negative = zoom out).
    Zoom {
        /// Scroll amount.
        delta: f32,
    },
    /// Return the camera to its initial orbit.
    ResetCamera,
    /// Freeze or resume the animation clock.
    TogglePause,
    /// Show or hide the particle cloud.
    ToggleParticles,
    /// Show or hide the core sphere.
    ToggleSphere,
}
