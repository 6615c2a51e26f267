//! Camera system for 3D scene viewing.
//!
//! Provides a perspective camera and an orbit controller with rotation,
//! panning, and zoom.

/// Orbit controller managing rotation, pan, and zoom.
pub mod controller;
/// Core camera struct and GPU uniform type.
pub mod core;
