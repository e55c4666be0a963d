use std::time::{Duration, Instant};

/// Timing for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Seconds since the previous tick, clamped.
    pub dt: f32,
    /// Seconds since the clock started.
    pub total: f32,
    pub frame_index: u64,
}

/// Per-window frame clock.
///
/// Delta time is clamped so a stall (debugger, window drag, minimize) does
/// not turn into one huge simulation step.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    fn starting_at(now: Instant) -> Self {
        Self {
            start: now,
            last: now,
            frame_index: 0,
            dt_min: Duration::from_micros(100),
            dt_max: Duration::from_millis(100),
        }
    }

    /// Restart delta timing, e.g. after the window regains focus.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);
        self.last = now;
        self.frame_index += 1;
        FrameTime {
            dt: dt.as_secs_f32(),
            total: now.saturating_duration_since(self.start).as_secs_f32(),
            frame_index: self.frame_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dt_is_clamped() {
        let t0 = Instant::now();
        let mut clock = FrameClock::starting_at(t0);
        let ft = clock.tick_at(t0 + Duration::from_secs(5));
        assert!((ft.dt - 0.1).abs() < 1e-6);
        assert!((ft.total - 5.0).abs() < 1e-6);

        let ft = clock.tick_at(t0 + Duration::from_secs(5));
        assert!((ft.dt - 0.0001).abs() < 1e-6);
        assert_eq!(ft.frame_index, 2);
    }

    #[test]
    fn normal_frames_pass_through() {
        let t0 = Instant::now();
        let mut clock = FrameClock::starting_at(t0);
        let ft = clock.tick_at(t0 + Duration::from_millis(16));
        assert!((ft.dt - 0.016).abs() < 1e-6);
    }
}
