//! Render passes for the core sphere and the particle cloud.
//!
//! Every pipeline binds [`globals::GlobalBindings`] at group 0 so both
//! materials see the same camera and clock.

pub mod globals;
/// Particle cloud pass.
pub mod particles;
pub(crate) mod pipeline_util;
/// Core sphere pass.
pub mod surface;

pub use globals::{FrameUniform, GlobalBindings};
pub use particles::ParticlePass;
pub use surface::SurfacePass;
