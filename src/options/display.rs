use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Display", inline)]
#[serde(default)]
/// Visibility toggles and background color.
pub struct DisplayOptions {
    /// Whether to draw the shaded core sphere.
    #[schemars(title = "Show Sphere")]
    pub show_sphere: bool,
    /// Whether to draw the particle cloud.
    #[schemars(title = "Show Particles")]
    pub show_particles: bool,
    /// Linear RGB clear color.
    #[schemars(skip)]
    pub background: [f32; 3],
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_sphere: true,
            show_particles: true,
            background: [0.0, 0.0, 0.0],
        }
    }
}
