//! Tick sources - where elapsed time comes from.

use std::time::Instant;

use bricks_core::types::DEFAULT_TICK_MS;

/// Supplies the elapsed milliseconds since the previous call
pub trait TickSource {
    fn elapsed_ms(&mut self) -> u32;
}

/// Measures real time between calls
#[derive(Debug, Clone, Copy)]
pub struct WallClock {
    last: Instant,
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TickSource for WallClock {
    fn elapsed_ms(&mut self) -> u32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last).as_millis();
        self.last = now;
        u32::try_from(elapsed).unwrap_or(u32::MAX)
    }
}

/// Reports the same step every call (tests, headless replays)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedStep {
    step_ms: u32,
}

impl FixedStep {
    pub fn new(step_ms: u32) -> Self {
        Self { step_ms }
    }

    pub fn step_ms(&self) -> u32 {
        self.step_ms
    }
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_MS)
    }
}

impl TickSource for FixedStep {
    fn elapsed_ms(&mut self) -> u32 {
        self.step_ms
    }
}
