//! CPU-side scene content: the particle cloud and the core sphere mesh.
//!
//! Both are generated once at startup and handed to the renderer as
//! immutable buffers.

/// Fibonacci-sphere particle distribution.
pub mod particles;
/// UV-sphere mesh generation.
pub mod sphere_mesh;

pub use particles::{distribute, golden_angle, ParticleSet};
pub use sphere_mesh::{SphereMesh, SphereVertex};
