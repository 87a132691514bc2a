/// Scene-lifetime simulated clock.
/// Advanced exactly once per rendered frame by the frame driver; everything
/// else only reads it.
#[derive(Debug, Clone, Default)]
pub struct SceneClock {
    /// Seconds since scene start. f64 so long sessions keep sub-frame precision.
    elapsed: f64,
    /// Delta of the most recent frame.
    last_delta: f64,
    frames: u64,
}

impl SceneClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate one frame's delta and return the new elapsed time.
    /// The renderer guarantees `delta_seconds >= 0`.
    pub fn advance(&mut self, delta_seconds: f64) -> f64 {
        self.elapsed += delta_seconds;
        self.last_delta = delta_seconds;
        self.frames += 1;
        self.elapsed
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn last_delta(&self) -> f64 {
        self.last_delta
    }

    /// Number of ticks since scene start.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
