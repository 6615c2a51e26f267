use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Largest particle count accepted by [`Options::validate`](super::Options::validate).
pub const MAX_PARTICLES: i64 = 200_000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Particles", inline)]
#[serde(default)]
/// Particle cloud layout and sprite size.
pub struct ParticleOptions {
    /// Number of particles on the outer sphere.
    #[schemars(title = "Count", range(min = 0, max = 200_000))]
    pub count: i64,
    /// Radius of the sphere the particles are distributed over.
    #[schemars(title = "Radius", range(min = 0.1, max = 10.0), extend("step" = 0.1))]
    pub radius: f32,
    /// Sprite edge length in logical pixels; scaled by the display pixel
    /// ratio in the particle shader.
    #[schemars(title = "Point Size", range(min = 1.0, max = 16.0), extend("step" = 0.5))]
    pub point_size: f32,
}

impl Default for ParticleOptions {
    fn default() -> Self {
        Self {
            count: 8000,
            radius: 1.6,
            point_size: 3.0,
        }
    }
}
