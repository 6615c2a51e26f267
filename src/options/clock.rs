use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::frame_clock::{DEFAULT_ROTATION_DIVISOR, DEFAULT_STEP};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Clock", inline)]
#[serde(default)]
/// Animation clock parameters.
pub struct ClockOptions {
    /// Amount added to the shader `time` uniform every frame.
    #[schemars(title = "Step", range(min = 0.0, max = 0.5), extend("step" = 0.005))]
    pub step: f64,
    /// Particle cloud rotation is `time / rotation_divisor` radians.
    #[schemars(title = "Rotation Divisor", range(min = 1.0, max = 100.0))]
    pub rotation_divisor: f64,
}

impl Default for ClockOptions {
    fn default() -> Self {
        Self {
            step: DEFAULT_STEP,
            rotation_divisor: DEFAULT_ROTATION_DIVISOR,
        }
    }
}
