//! Frame clock

use std::time::Instant;

/// Tracks frame timing, either from the wall clock (`tick`) or from
/// caller-supplied steps (`step`) for headless runs.
pub struct FrameClock {
    /// Total elapsed time in seconds
    pub total_time: f64,
    /// Duration of the last frame in seconds
    pub delta_time: f64,
    /// Number of frames advanced so far
    pub frame: u64,
    last_instant: Instant,
    first_tick: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            frame: 0,
            last_instant: Instant::now(),
            first_tick: true,
        }
    }
}

impl FrameClock {
    /// Longest frame the clock will report, so tweens do not jump after a
    /// stall (debugger pause, window drag)
    pub const MAX_FRAME_TIME: f64 = 0.25;

    pub fn new() -> Self {
        Self::default()
    }

    /// Advance from the wall clock. The first tick reports a zero delta.
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();

        if self.first_tick {
            self.first_tick = false;
            self.last_instant = now;
            return self.step(0.0);
        }

        let elapsed = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.step(elapsed)
    }

    /// Advance by a fixed amount, clamped to [0, 250ms]
    pub fn step(&mut self, dt: f64) -> f64 {
        self.delta_time = dt.clamp(0.0, Self::MAX_FRAME_TIME);
        self.total_time += self.delta_time;
        self.frame += 1;
        self.delta_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_defaults() {
        let clock = FrameClock::new();
        assert_eq!(clock.total_time, 0.0);
        assert_eq!(clock.delta_time, 0.0);
        assert_eq!(clock.frame, 0);
    }

    #[test]
    fn test_first_tick_zero_delta() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(), 0.0);
        assert_eq!(clock.frame, 1);
    }

    #[test]
    fn step_accumulates() {
        let mut clock = FrameClock::new();
        clock.step(0.1);
        clock.step(0.2);
        assert!((clock.total_time - 0.3).abs() < 1e-12);
        assert_eq!(clock.frame, 2);
    }

    #[test]
    fn step_is_clamped() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.step(3.0), FrameClock::MAX_FRAME_TIME);
        assert_eq!(clock.step(-1.0), 0.0);
    }
}
