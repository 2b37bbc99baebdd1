use std::time::Duration;

/// Fixed-cadence animation tick.
///
/// Accumulates frame deltas and advances a monotonically increasing tick once per
/// `period`. Sprites pick their animation frame from this tick, so animation speed
/// is independent of the display refresh rate.
#[derive(Debug, Clone)]
pub struct AnimationClock {
    period: f32,
    accumulator: f32,
    tick: u64,
}

impl AnimationClock {
    /// Default cadence: ten animation frames per second.
    pub const DEFAULT_PERIOD: Duration = Duration::from_millis(100);

    pub fn new(period: Duration) -> Self {
        assert!(!period.is_zero(), "animation period must be positive");
        Self {
            period: period.as_secs_f32(),
            accumulator: 0.0,
            tick: 0,
        }
    }

    /// Feeds `dt` seconds and returns the current tick.
    ///
    /// `dt` is expected to be clamped already (see `FrameClock`).
    pub fn advance(&mut self, dt: f32) -> u64 {
        self.accumulator += dt.max(0.0);
        while self.accumulator >= self.period {
            self.accumulator -= self.period;
            self.tick = self.tick.wrapping_add(1);
        }
        self.tick
    }
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PERIOD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_once_per_period() {
        let mut clock = AnimationClock::new(Duration::from_millis(100));
        assert_eq!(clock.advance(0.05), 0);
        assert_eq!(clock.advance(0.05), 1);
        assert_eq!(clock.advance(0.1), 2);
    }

    #[test]
    fn remainder_carries_over() {
        let mut clock = AnimationClock::new(Duration::from_millis(100));
        assert_eq!(clock.advance(0.25), 2);
        assert_eq!(clock.advance(0.06), 3);
    }

    #[test]
    fn clamped_stall_advances_a_bounded_number_of_ticks() {
        let mut clock = AnimationClock::new(Duration::from_millis(100));
        // 0.25 s is the largest delta FrameClock hands out.
        assert_eq!(clock.advance(0.25), 2);
    }

    #[test]
    fn negative_dt_is_ignored() {
        let mut clock = AnimationClock::default();
        assert_eq!(clock.advance(-1.0), 0);
        assert_eq!(clock.advance(0.0), 0);
    }
}
