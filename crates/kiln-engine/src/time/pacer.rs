use anyhow::Result;

use super::frame_clock::{FrameClock, FrameTime};
use super::ticks::TickSource;

/// Target frame rate used when no explicit rate is configured.
pub const DEFAULT_FPS: u32 = 60;

/// Milliseconds per frame for `fps`, truncated to whole milliseconds.
///
/// `fps` must be non-zero.
pub const fn frame_budget_ms(fps: u32) -> u32 {
    1000 / fps
}

/// Milliseconds to wait so that a frame whose body took `elapsed_ms` fills `budget_ms`.
///
/// Always in `[0, budget_ms]`. An overrun yields 0: the pacer never waits a
/// negative amount and never tries to catch up.
pub const fn compute_wait_ms(budget_ms: u32, elapsed_ms: u32) -> u32 {
    if elapsed_ms >= budget_ms {
        0
    } else {
        budget_ms - elapsed_ms
    }
}

/// Best-effort fixed-rate frame pacer.
///
/// Each call to [`pace`](Self::pace) sleeps for whatever is left of the frame
/// budget since the previous call, then advances the frame clock. This is a
/// soft real-time pacer: a long-running frame body is never preempted, it just
/// produces a larger `dt` on the next frame.
#[derive(Debug)]
pub struct FramePacer<T> {
    ticks: T,
    budget_ms: u32,
    clock: FrameClock,
}

impl<T: TickSource> FramePacer<T> {
    /// Creates a pacer targeting `fps` frames per second.
    pub fn new(fps: u32, ticks: T) -> Result<Self> {
        anyhow::ensure!(fps > 0, "target frame rate must be non-zero");
        anyhow::ensure!(fps <= 1000, "target frame rate {fps} exceeds millisecond resolution");
        Ok(Self::with_budget_ms(frame_budget_ms(fps), ticks))
    }

    /// Creates a pacer with an explicit per-frame budget.
    pub fn with_budget_ms(budget_ms: u32, ticks: T) -> Self {
        let clock = FrameClock::new(ticks.ticks_ms());
        Self {
            ticks,
            budget_ms,
            clock,
        }
    }

    pub fn budget_ms(&self) -> u32 {
        self.budget_ms
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn ticks(&self) -> &T {
        &self.ticks
    }

    pub fn ticks_mut(&mut self) -> &mut T {
        &mut self.ticks
    }

    /// Wait the pacer would perform if called now.
    pub fn pending_wait_ms(&self) -> u32 {
        compute_wait_ms(self.budget_ms, self.clock.elapsed_ms(self.ticks.ticks_ms()))
    }

    /// Sleeps out the remainder of the frame budget and advances the clock.
    pub fn pace(&mut self) -> FrameTime {
        let wait = self.pending_wait_ms();
        if wait > 0 && wait <= self.budget_ms {
            self.ticks.delay_ms(wait);
        }

        let now = self.ticks.ticks_ms();
        self.clock.tick(now, wait)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Manual clock: time only moves through `advance` or `delay_ms`.
    #[derive(Debug, Default)]
    pub(crate) struct FakeTicks {
        pub now: u32,
        pub delays: Vec<u32>,
    }

    impl FakeTicks {
        pub fn at(now: u32) -> Self {
            Self {
                now,
                delays: Vec::new(),
            }
        }

        pub fn advance(&mut self, ms: u32) {
            self.now = self.now.wrapping_add(ms);
        }
    }

    impl TickSource for FakeTicks {
        fn ticks_ms(&self) -> u32 {
            self.now
        }

        fn delay_ms(&mut self, ms: u32) {
            self.delays.push(ms);
            self.advance(ms);
        }
    }

    fn pacer_at_60() -> FramePacer<FakeTicks> {
        FramePacer::new(60, FakeTicks::at(1_000)).unwrap()
    }

    #[test]
    fn budget_is_truncated_to_whole_milliseconds() {
        assert_eq!(frame_budget_ms(60), 16);
        assert_eq!(frame_budget_ms(30), 33);
        assert_eq!(frame_budget_ms(1000), 1);
    }

    #[test]
    fn zero_fps_is_rejected() {
        assert!(FramePacer::new(0, FakeTicks::default()).is_err());
    }

    #[test]
    fn short_frame_waits_out_the_budget() {
        let mut pacer = pacer_at_60();
        pacer.ticks_mut().advance(5);

        assert_eq!(pacer.pending_wait_ms(), 11);

        let ft = pacer.pace();
        assert_eq!(ft.waited_ms, 11);
        assert_eq!(pacer.ticks().delays, vec![11]);
        assert!((ft.dt - 0.016).abs() < 1e-6);
    }

    #[test]
    fn overrun_frame_does_not_wait() {
        let mut pacer = pacer_at_60();
        pacer.ticks_mut().advance(20);

        let ft = pacer.pace();
        assert_eq!(ft.waited_ms, 0);
        assert!(pacer.ticks().delays.is_empty());
        assert!(ft.dt >= 0.020);
    }

    #[test]
    fn overrun_is_not_caught_up_on_the_next_frame() {
        let mut pacer = pacer_at_60();
        pacer.ticks_mut().advance(50);
        pacer.pace();

        pacer.ticks_mut().advance(4);
        let ft = pacer.pace();
        assert_eq!(ft.waited_ms, 12);
        assert!((ft.dt - 0.016).abs() < 1e-6);
    }

    #[test]
    fn wait_stays_within_budget_for_any_body_time() {
        let mut pacer = pacer_at_60();
        let budget = pacer.budget_ms();

        for body_ms in 0..3 * budget {
            let before = pacer.clock().last_tick();
            pacer.ticks_mut().advance(body_ms);
            let ft = pacer.pace();

            assert!(ft.waited_ms <= budget);
            if body_ms < budget {
                assert_eq!(ft.waited_ms, budget - body_ms);
                assert!(ft.now_ms.wrapping_sub(before) >= budget);
                assert!(ft.dt >= budget as f32 / 1000.0);
            } else {
                assert_eq!(ft.waited_ms, 0);
            }
            assert_eq!(ft.dt, ft.now_ms.wrapping_sub(before) as f32 / 1000.0);
        }
    }

    #[test]
    fn frame_index_counts_paced_frames() {
        let mut pacer = pacer_at_60();
        let indices: Vec<u64> = (0..3).map(|_| pacer.pace().frame_index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }
}
