/// Frame timing snapshot.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds.
    pub dt: f32,

    /// Tick timestamp (milliseconds) taken at the end of pacing.
    pub now_ms: u32,

    /// Milliseconds the pacer slept before this frame.
    pub waited_ms: u32,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Last tick timestamp and the derived delta time.
///
/// Unlike a simulation clock, delta time is never clamped: a frame that
/// overruns its budget reports the full elapsed time instead of being split
/// into catch-up steps.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_tick: u32,
    delta_time: f32,
    frame_index: u64,
}

impl FrameClock {
    /// Creates a clock whose baseline is `now_ms`.
    pub fn new(now_ms: u32) -> Self {
        Self {
            last_tick: now_ms,
            delta_time: 0.0,
            frame_index: 0,
        }
    }

    /// Timestamp of the previous tick.
    pub fn last_tick(&self) -> u32 {
        self.last_tick
    }

    /// Delta time (seconds) computed by the most recent tick.
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Milliseconds elapsed since the previous tick.
    ///
    /// Tick counters wrap after ~49 days; wrapping subtraction keeps the
    /// difference correct across the wrap.
    pub fn elapsed_ms(&self, now_ms: u32) -> u32 {
        now_ms.wrapping_sub(self.last_tick)
    }

    /// Advances the clock to `now_ms` and returns a new `FrameTime`.
    pub fn tick(&mut self, now_ms: u32, waited_ms: u32) -> FrameTime {
        self.delta_time = self.elapsed_ms(now_ms) as f32 / 1000.0;
        self.last_tick = now_ms;

        let ft = FrameTime {
            dt: self.delta_time,
            now_ms,
            waited_ms,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_reports_seconds_since_previous_tick() {
        let mut clock = FrameClock::new(1_000);
        let ft = clock.tick(1_020, 0);

        assert_eq!(ft.dt, 0.020);
        assert_eq!(clock.delta_time(), ft.dt);
        assert_eq!(ft.frame_index, 0);
        assert_eq!(clock.last_tick(), 1_020);

        let ft = clock.tick(1_036, 0);
        assert_eq!(ft.frame_index, 1);
        assert!((ft.dt - 0.016).abs() < 1e-6);
    }

    #[test]
    fn elapsed_survives_counter_wrap() {
        let clock = FrameClock::new(u32::MAX - 4);
        assert_eq!(clock.elapsed_ms(5), 10);
    }
}
