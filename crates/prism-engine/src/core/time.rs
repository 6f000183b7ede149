/// Fixed-period accumulator over a millisecond clock.
/// Drives everything that runs "every N ms": the particle frame step,
/// the auto-rotation ticker and the focus-anchor poll.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    /// The fixed period per step, in milliseconds.
    period: f64,
    /// Accumulated time from variable frame deltas.
    accumulator: f64,
    /// Maximum steps released by a single `accumulate` call.
    max_steps: u32,
}

impl FixedTimestep {
    pub const DEFAULT_MAX_STEPS: u32 = 10;

    pub fn new(period_ms: f64) -> Self {
        Self {
            period: period_ms.max(f64::EPSILON),
            accumulator: 0.0,
            max_steps: Self::DEFAULT_MAX_STEPS,
        }
    }

    /// Cap the number of steps a single long frame can release.
    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_ms: f64) -> u32 {
        self.accumulator += frame_ms.max(0.0);
        // Cap to prevent a spiral of death after a stalled tab
        self.accumulator = self.accumulator.min(self.period * self.max_steps as f64);
        let steps = (self.accumulator / self.period) as u32;
        self.accumulator -= steps as f64 * self.period;
        steps
    }
}
