use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds (clamped).
    pub dt: f32,

    /// Seconds since the clock was created. Monotonic and never clamped, so
    /// animation derived from it does not drift after stalls.
    pub elapsed: f64,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Delta time is clamped to avoid pathological values when the application is paused
/// by the debugger, minimized, or stalls. Elapsed time is not: it always reflects the
/// wall-clock distance from `start`.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Creates a new clock with default clamps, starting now.
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Creates a clock whose elapsed time is measured from `start`.
    pub fn starting_at(start: Instant) -> Self {
        Self {
            start,
            last: start,
            frame_index: 0,
            dt_min: Duration::from_micros(100),  // 0.0001s
            dt_max: Duration::from_millis(250),  // 0.25s
        }
    }

    /// Seconds since the clock started, measured at `now`.
    pub fn elapsed_at(&self, now: Instant) -> f64 {
        now.saturating_duration_since(self.start).as_secs_f64()
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Advances the clock to `now`.
    ///
    /// A `now` earlier than the previous tick is treated as the previous tick, so
    /// `elapsed` never decreases.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let now = now.max(self.last);
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);

        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            elapsed: self.elapsed_at(now),
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

    fn ms(v: u64) -> Duration { Duration::from_millis(v) }

    #[test]
    fn elapsed_tracks_distance_from_start() {
        let t0 = Instant::now();
        let mut clock = FrameClock::starting_at(t0);

        let a = clock.tick_at(t0 + ms(500));
        let b = clock.tick_at(t0 + ms(1500));

        assert!((a.elapsed - 0.5).abs() < 1e-9);
        assert!((b.elapsed - 1.5).abs() < 1e-9);
    }

    #[test]
    fn elapsed_never_decreases() {
        let t0 = Instant::now();
        let mut clock = FrameClock::starting_at(t0);

        let a = clock.tick_at(t0 + ms(100));
        let b = clock.tick_at(t0 + ms(50));
        assert!(b.elapsed >= a.elapsed);
    }

    #[test]
    fn dt_is_clamped_but_elapsed_is_not() {
        let t0 = Instant::now();
        let mut clock = FrameClock::starting_at(t0);

        // A ten-second stall.
        let ft = clock.tick_at(t0 + Duration::from_secs(10));
        assert!((ft.dt - 0.25).abs() < 1e-6);
        assert!((ft.elapsed - 10.0).abs() < 1e-9);

        let ft = clock.tick_at(t0 + Duration::from_secs(10));
        assert!((ft.dt - 0.0001).abs() < 1e-6);
    }

    #[test]
    fn frame_index_increments() {
        let t0 = Instant::now();
        let mut clock = FrameClock::starting_at(t0);
        assert_eq!(clock.tick_at(t0).frame_index, 0);
        assert_eq!(clock.tick_at(t0 + ms(16)).frame_index, 1);
        assert_eq!(clock.tick_at(t0 + ms(32)).frame_index, 2);
    }
}
