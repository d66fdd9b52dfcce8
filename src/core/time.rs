//! Frame timing and the simulation clock

use std::time::{Duration, Instant};

/// Wall-clock frame timer updated once per host frame
#[derive(Debug, Clone)]
pub struct Time {
    start: Instant,
    last_frame: Instant,
    delta: Duration,
    frame_count: u64,
}

impl Time {
    /// Create a new timer starting now
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            delta: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Advance to the current frame
    pub fn update(&mut self) {
        let now = Instant::now();
        self.delta = now - self.last_frame;
        self.last_frame = now;
        self.frame_count += 1;
    }

    /// Time since the previous frame
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Time since the previous frame in seconds
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Seconds since the timer was created
    pub fn elapsed_seconds(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }

    /// Number of frames recorded
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

/// Scaled gameplay clock.
///
/// Gameplay systems read their delta from this clock instead of the frame
/// timer. A frozen clock reports a zero delta and does not accumulate time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationClock {
    scale: f32,
    elapsed: f32,
}

impl SimulationClock {
    /// Normal speed
    pub const NORMAL: f32 = 1.0;

    /// Create a running clock at normal speed
    #[must_use]
    pub const fn new() -> Self {
        Self {
            scale: Self::NORMAL,
            elapsed: 0.0,
        }
    }

    /// Advance by a real frame delta, returning the scaled gameplay delta
    pub fn advance(&mut self, real_delta: f32) -> f32 {
        let scaled = real_delta.max(0.0) * self.scale;
        self.elapsed += scaled;
        scaled
    }

    /// Stop the clock
    pub fn freeze(&mut self) {
        self.scale = 0.0;
    }

    /// Run the clock at normal speed again
    pub fn resume(&mut self) {
        self.scale = Self::NORMAL;
    }

    /// Whether the clock is stopped
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.scale == 0.0
    }

    /// Current scale factor
    #[must_use]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Total gameplay seconds elapsed
    #[must_use]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new()
    }
}
