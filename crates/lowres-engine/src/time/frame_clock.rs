use std::time::{Duration, Instant};

/// Largest delta a single frame may report.
pub const MAX_FRAME_DT: Duration = Duration::from_millis(250);

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Clamped time since the previous tick, in seconds.
    pub dt: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Produces clamped `FrameTime` snapshots.
///
/// Delta time is clamped so a debugger pause, a minimized window or an OS stall
/// does not feed a huge step into the animation clock.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Creates a clock clamping dt into `[100 µs, MAX_FRAME_DT]`.
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), MAX_FRAME_DT)
    }

    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        Self::starting_at(Instant::now(), dt_min, dt_max)
    }

    fn starting_at(last: Instant, dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Resets the baseline, e.g. when resuming from suspension.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Advances to the current instant.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Advances to `now`. Instants earlier than the last tick count as zero elapsed.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);

        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock_at(start: Instant) -> FrameClock {
        FrameClock::starting_at(start, Duration::from_micros(100), MAX_FRAME_DT)
    }

    #[test]
    fn long_stall_is_clamped_to_max() {
        let start = Instant::now();
        let mut clock = clock_at(start);

        let ft = clock.tick_at(start + Duration::from_secs(10));
        assert_eq!(ft.dt, 0.25);
    }

    #[test]
    fn normal_frame_passes_through() {
        let start = Instant::now();
        let mut clock = clock_at(start);

        let ft = clock.tick_at(start + Duration::from_millis(16));
        assert!((ft.dt - 0.016).abs() < 1e-6);
    }

    #[test]
    fn zero_elapsed_is_raised_to_min() {
        let start = Instant::now();
        let mut clock = clock_at(start);

        let ft = clock.tick_at(start);
        assert!((ft.dt - 0.0001).abs() < 1e-7);
    }

    #[test]
    fn frame_index_counts_ticks() {
        let start = Instant::now();
        let mut clock = clock_at(start);

        let a = clock.tick_at(start + Duration::from_millis(10));
        let b = clock.tick_at(start + Duration::from_millis(20));
        assert_eq!(a.frame_index, 0);
        assert_eq!(b.frame_index, 1);
    }
}
