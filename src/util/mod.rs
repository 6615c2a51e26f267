//! Shared utilities: the animation clock and frame-rate tracking.

pub mod frame_clock;
pub mod frame_timing;
