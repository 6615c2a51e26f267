//! Fixed-step animation clock shared by every time-driven material.

use crate::error::HaloError;

/// Step added per rendered frame unless configured otherwise.
pub const DEFAULT_STEP: f64 = 0.05;

/// Divisor turning clock time into particle-cloud rotation (radians).
pub const DEFAULT_ROTATION_DIVISOR: f64 = 10.0;

/// A monotonically non-decreasing scalar advanced by a fixed step per frame.
///
/// The clock is frame-driven, not wall-clock driven: a slow frame advances
/// it by the same amount as a fast one. Time is accumulated in `f64` and
/// narrowed to `f32` only when written to a shader uniform.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameClock {
    time: f64,
    step: f64,
    frames: u64,
    rotation_divisor: f64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_STEP)
    }
}

impl FrameClock {
    /// Clock starting at zero. Negative or non-finite steps are clamped to
    /// zero so the clock never runs backwards.
    #[must_use]
    pub fn new(step: f64) -> Self {
        let step = if step.is_finite() { step.max(0.0) } else { 0.0 };
        Self {
            time: 0.0,
            step,
            frames: 0,
            rotation_divisor: DEFAULT_ROTATION_DIVISOR,
        }
    }

    /// Like [`new`](Self::new) but rejects invalid steps.
    ///
    /// # Errors
    ///
    /// Returns [`HaloError::InvalidArgument`] if `step` is negative or not
    /// finite.
    pub fn try_new(step: f64) -> Result<Self, HaloError> {
        if !step.is_finite() || step < 0.0 {
            return Err(HaloError::invalid(format!(
                "clock step must be a finite non-negative number, got {step}"
            )));
        }
        Ok(Self::new(step))
    }

    /// Set the divisor used by [`particle_rotation`](Self::particle_rotation).
    /// Non-positive values are ignored.
    #[must_use]
    pub fn with_rotation_divisor(mut self, divisor: f64) -> Self {
        if divisor.is_finite() && divisor > 0.0 {
            self.rotation_divisor = divisor;
        }
        self
    }

    /// Change the per-frame step without touching the accumulated time.
    /// Negative or non-finite steps are clamped to zero.
    pub fn set_step(&mut self, step: f64) {
        self.step = if step.is_finite() { step.max(0.0) } else { 0.0 };
    }

    /// Advance by exactly one step.
    pub fn tick(&mut self) {
        self.advance(1);
    }

    /// Advance by `frames` steps.
    pub fn advance(&mut self, frames: u64) {
        for _ in 0..frames {
            self.time += self.step;
        }
        self.frames += frames;
    }

    /// Current clock value.
    #[must_use]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Current clock value as written into the `time` shader uniform.
    #[must_use]
    pub fn uniform_time(&self) -> f32 {
        self.time as f32
    }

    /// Step added per frame.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Number of frames advanced so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Rotation of the particle cloud about +Y, in radians.
    #[must_use]
    pub fn particle_rotation(&self) -> f32 {
        (self.time / self.rotation_divisor) as f32
    }
}
