//! Scheduling hosts for a [`LoopState`].

use super::state::{FrameBody, LoopState, LoopStatus};

/// External scheduler that owns the thread and calls back once per host tick.
pub trait HostScheduler {
    /// Registers the zero-argument tick. Called exactly once per loop.
    ///
    /// The host keeps invoking `tick` until it returns [`LoopStatus::Stopped`].
    fn set_main_loop(&mut self, tick: Box<dyn FnMut() -> LoopStatus>);
}

/// Native host: calls the body synchronously until it stops.
///
/// Returns the number of frames that ran.
pub fn run_blocking<B: FrameBody>(state: &mut LoopState<B>) -> u64 {
    let mut frames = 0u64;
    while state.is_running() {
        state.tick();
        frames += 1;
    }
    log::debug!("blocking loop stopped after {frames} frames");
    frames
}

/// Callback host: hands the loop to `host` and returns immediately.
pub fn run_hosted<B, H>(mut state: LoopState<B>, host: &mut H)
where
    B: FrameBody + 'static,
    H: HostScheduler + ?Sized,
{
    host.set_main_loop(Box::new(move || state.tick()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::LoopControl;

    /// Host that runs registered ticks when told to.
    #[derive(Default)]
    struct ManualHost {
        tick: Option<Box<dyn FnMut() -> LoopStatus>>,
        registrations: usize,
    }

    impl ManualHost {
        /// Invokes the tick up to `n` times, stopping once the loop reports stopped.
        fn run_frames(&mut self, n: usize) -> usize {
            let mut ran = 0;
            for _ in 0..n {
                let Some(tick) = self.tick.as_mut() else { break };
                ran += 1;
                if tick() == LoopStatus::Stopped {
                    self.tick = None;
                }
            }
            ran
        }
    }

    impl HostScheduler for ManualHost {
        fn set_main_loop(&mut self, tick: Box<dyn FnMut() -> LoopStatus>) {
            self.registrations += 1;
            self.tick = Some(tick);
        }
    }

    fn countdown(mut n: u32) -> impl FnMut() -> LoopControl {
        move || {
            n -= 1;
            if n == 0 {
                LoopControl::Exit
            } else {
                LoopControl::Continue
            }
        }
    }

    #[test]
    fn blocking_host_runs_until_exit() {
        let mut state = LoopState::running(countdown(5));
        assert_eq!(run_blocking(&mut state), 5);
        assert!(!state.is_running());
    }

    #[test]
    fn hosted_loop_registers_once_and_unregisters_on_stop() {
        let mut host = ManualHost::default();
        run_hosted(LoopState::running(countdown(3)), &mut host);

        assert_eq!(host.registrations, 1);
        assert_eq!(host.run_frames(10), 3);
        assert!(host.tick.is_none());
    }

    #[test]
    fn same_body_runs_under_both_hosts() {
        let mut blocking = LoopState::running(countdown(4));
        let native_frames = run_blocking(&mut blocking);

        let mut host = ManualHost::default();
        run_hosted(LoopState::running(countdown(4)), &mut host);
        let hosted_frames = host.run_frames(100);

        assert_eq!(native_frames, hosted_frames as u64);
    }
}
