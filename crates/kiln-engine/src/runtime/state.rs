/// Control directive returned by a frame body.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Whether a [`LoopState`] still has a body to run.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopStatus {
    Running,
    Stopped,
}

/// One frame of work: poll input, update, draw, present.
///
/// Must not block beyond the frame pacer's bounded sleep, so that it can be
/// driven by a host that owns the thread.
pub trait FrameBody {
    fn frame(&mut self) -> LoopControl;
}

impl<F> FrameBody for F
where
    F: FnMut() -> LoopControl,
{
    fn frame(&mut self) -> LoopControl {
        self()
    }
}

/// The loop body while it runs, nothing once stopped.
///
/// `Stopped` is terminal: the body is dropped on the transition and a stopped
/// state never runs another frame.
pub enum LoopState<B> {
    Running(B),
    Stopped,
}

impl<B: FrameBody> LoopState<B> {
    pub fn running(body: B) -> Self {
        LoopState::Running(body)
    }

    pub fn status(&self) -> LoopStatus {
        match self {
            LoopState::Running(_) => LoopStatus::Running,
            LoopState::Stopped => LoopStatus::Stopped,
        }
    }

    pub fn is_running(&self) -> bool {
        self.status() == LoopStatus::Running
    }

    /// Drops the body.
    pub fn stop(&mut self) {
        *self = LoopState::Stopped;
    }

    /// Runs one frame if the loop is running.
    pub fn tick(&mut self) -> LoopStatus {
        let control = match self {
            LoopState::Running(body) => body.frame(),
            LoopState::Stopped => return LoopStatus::Stopped,
        };

        if control == LoopControl::Exit {
            self.stop();
        }
        self.status()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn exit_stops_and_drops_the_body() {
        let frames = Rc::new(Cell::new(0));
        let counter = frames.clone();
        let mut state = LoopState::running(move || {
            counter.set(counter.get() + 1);
            if counter.get() == 2 {
                LoopControl::Exit
            } else {
                LoopControl::Continue
            }
        });

        assert_eq!(state.tick(), LoopStatus::Running);
        assert_eq!(state.tick(), LoopStatus::Stopped);
        assert!(!state.is_running());

        // The closure (and its counter handle) is gone.
        assert_eq!(Rc::strong_count(&frames), 1);

        assert_eq!(state.tick(), LoopStatus::Stopped);
        assert_eq!(frames.get(), 2);
    }

    #[test]
    fn stopped_state_never_runs() {
        let mut state = LoopState::running(|| -> LoopControl { panic!("must not run") });
        state.stop();
        assert_eq!(state.tick(), LoopStatus::Stopped);
    }
}
