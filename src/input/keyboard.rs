use serde::{Deserialize, Serialize};

use crate::engine::HaloCommand;

/// Engine-level actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// toggle_pause = "Space"
/// reset_camera = "KeyQ"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Return the camera to its initial orbit.
    ResetCamera,
    /// Freeze or resume the animation clock.
    TogglePause,
    /// Show or hide the particle cloud.
    ToggleParticles,
    /// Show or hide the core sphere.
    ToggleSphere,
}

impl KeyAction {
    /// The parameterless command this action triggers.
    #[must_use]
    pub fn to_command(self) -> HaloCommand {
        match self {
            Self::ResetCamera => HaloCommand::ResetCamera,
            Self::TogglePause => HaloCommand::TogglePause,
            Self::ToggleParticles => HaloCommand::ToggleParticles,
            Self::ToggleSphere => HaloCommand::ToggleSphere,
        }
    }
}
