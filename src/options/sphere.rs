use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Sphere", inline)]
#[serde(default)]
/// Core sphere mesh parameters.
pub struct SphereOptions {
    /// Sphere radius.
    #[schemars(title = "Radius", range(min = 0.1, max = 10.0), extend("step" = 0.1))]
    pub radius: f32,
    /// Slices around the vertical axis.
    #[schemars(skip)]
    pub width_segments: u32,
    /// Stacks from pole to pole.
    #[schemars(skip)]
    pub height_segments: u32,
}

impl Default for SphereOptions {
    fn default() -> Self {
        Self {
            radius: 1.0,
            width_segments: 128,
            height_segments: 128,
        }
    }
}
