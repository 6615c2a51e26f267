// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Animated particle halo around a shaded core sphere, rendered with wgpu.
//!
//! Particles are laid out on a sphere with a Fibonacci (golden-angle)
//! spiral and drawn as pixel-sized sprites. A single fixed-step clock
//! drives both the sphere material and the slow rotation of the cloud.
//!
//! # Key entry points
//!
//! - [`scene::distribute`] - deterministic Fibonacci-sphere point layout
//! - [`util::frame_clock::FrameClock`] - the shared fixed-step clock
//! - [`engine::HaloEngine`] - GPU engine drawing sphere and particles
//! - [`options::Options`] - runtime configuration with TOML presets
//! - `Viewer` - standalone winit window (feature `viewer`)
//!
//! # Architecture
//!
//! Both render pipelines bind a shared uniform group holding the camera and
//! the frame clock. The sphere writes depth; the particle sprites are
//! alpha-blended on top and only test against it. Everything a command can
//! change lives in [`engine::FrameState`], which needs no GPU.

pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod options;
pub mod renderer;
pub mod scene;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use engine::{HaloCommand, HaloEngine};
pub use error::HaloError;
pub use options::Options;
pub use scene::{distribute, ParticleSet};
pub use util::frame_clock::FrameClock;
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
