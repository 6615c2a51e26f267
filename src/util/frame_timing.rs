//! Frame-rate tracking with periodic debug logging.

use web_time::{Duration, Instant};

/// Smoothed FPS tracking for log output.
pub struct FrameTiming {
    /// Last frame timestamp
    last_frame: Instant,
    /// Last time the FPS was logged
    last_report: Instant,
    /// How often to log FPS (zero disables reporting)
    report_interval: Duration,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl FrameTiming {
    /// Create a new frame timer that logs FPS every `report_interval`.
    #[must_use]
    pub fn new(report_interval: Duration) -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            last_report: now,
            report_interval,
            smoothed_fps: 60.0, // Start with reasonable default
            smoothing: 0.05,    /* 5% new value, 95% old value for smooth
                                 * display */
        }
    }

    /// Call after rendering to update timing.
    pub fn end_frame(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.record(elapsed);

        if !self.report_interval.is_zero()
            && now.duration_since(self.last_report) >= self.report_interval
        {
            log::debug!("{:.1} fps", self.smoothed_fps);
            self.last_report = now;
        }
    }

    fn record(&mut self, elapsed: Duration) {
        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoothing_moves_toward_observed_rate() {
        let mut timing = FrameTiming::new(Duration::ZERO);
        for _ in 0..200 {
            timing.record(Duration::from_millis(10));
        }
        assert!((timing.fps() - 100.0).abs() < 1.0);
    }

    #[test]
    fn zero_length_frame_is_ignored() {
        let mut timing = FrameTiming::new(Duration::ZERO);
        timing.record(Duration::ZERO);
        assert_eq!(timing.fps(), 60.0);
    }
}
