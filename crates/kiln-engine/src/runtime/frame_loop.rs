use crate::core::LayerStack;
use crate::render::{Color, FrameTarget, PresentOutcome};
use crate::time::{FramePacer, TickSource};

use super::event::{EventSource, LoopEvent};
use super::state::{FrameBody, LoopControl};

/// The per-frame body: events, pacing, update, draw, present.
///
/// Knows nothing about its host. Native and web runtimes wrap the same value
/// in a [`LoopState`](super::LoopState).
pub struct FrameLoop<E, T, C> {
    events: E,
    target: T,
    pacer: FramePacer<C>,
    layers: LayerStack,
    clear: Color,
}

impl<E, T, C> FrameLoop<E, T, C>
where
    E: EventSource,
    T: FrameTarget,
    C: TickSource,
{
    pub fn new(
        events: E,
        target: T,
        pacer: FramePacer<C>,
        layers: LayerStack,
        clear: Color,
    ) -> Self {
        Self {
            events,
            target,
            pacer,
            layers,
            clear,
        }
    }

    pub fn pacer(&self) -> &FramePacer<C> {
        &self.pacer
    }

    /// Drains pending events. Returns `Exit` as soon as a quit is seen.
    fn drain_events(&mut self) -> LoopControl {
        self.events.pump();

        while let Some(event) = self.events.poll_event() {
            match event {
                LoopEvent::Quit => {
                    log::info!("quit requested");
                    return LoopControl::Exit;
                }
                LoopEvent::Resized { width, height } => {
                    self.target.resize(width, height);
                    self.layers.dispatch(&event);
                }
                _ => {
                    self.layers.dispatch(&event);
                }
            }
        }

        LoopControl::Continue
    }
}

impl<E, T, C> FrameBody for FrameLoop<E, T, C>
where
    E: EventSource,
    T: FrameTarget,
    C: TickSource,
{
    fn frame(&mut self) -> LoopControl {
        if self.drain_events() == LoopControl::Exit {
            return LoopControl::Exit;
        }

        let time = self.pacer.pace();
        self.layers.update(time);

        self.target.clear(self.clear);
        self.layers.render(&mut self.target);

        match self.target.present() {
            PresentOutcome::Presented => LoopControl::Continue,
            PresentOutcome::Skipped => {
                log::debug!("frame {} skipped", time.frame_index);
                LoopControl::Continue
            }
            PresentOutcome::Fatal => {
                log::error!("surface lost; stopping render loop");
                LoopControl::Exit
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::core::StaticDrawLayer;
    use crate::render::{DrawCall, ProgramId};
    use crate::runtime::{run_blocking, EventQueue, LoopState, LoopStatus};
    use crate::time::pacer::tests::FakeTicks;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Resize(u32, u32),
        Clear(Color),
        Draw(DrawCall),
        Present,
    }

    /// Frame target that records every call into a shared journal.
    #[derive(Clone, Default)]
    struct RecordingTarget {
        ops: Rc<RefCell<Vec<Op>>>,
        fail_present: bool,
    }

    impl RecordingTarget {
        fn ops(&self) -> Vec<Op> {
            self.ops.borrow().clone()
        }

        fn frames(&self) -> Vec<Vec<Op>> {
            let mut frames = vec![];
            let mut current = vec![];
            for op in self.ops() {
                let done = op == Op::Present;
                current.push(op);
                if done {
                    frames.push(std::mem::take(&mut current));
                }
            }
            frames
        }
    }

    impl FrameTarget for RecordingTarget {
        fn resize(&mut self, width: u32, height: u32) {
            self.ops.borrow_mut().push(Op::Resize(width, height));
        }

        fn clear(&mut self, color: Color) {
            self.ops.borrow_mut().push(Op::Clear(color));
        }

        fn draw(&mut self, call: DrawCall) {
            self.ops.borrow_mut().push(Op::Draw(call));
        }

        fn present(&mut self) -> PresentOutcome {
            self.ops.borrow_mut().push(Op::Present);
            if self.fail_present {
                PresentOutcome::Fatal
            } else {
                PresentOutcome::Presented
            }
        }
    }

    fn triangle_loop(
        events: EventQueue,
        target: RecordingTarget,
    ) -> FrameLoop<EventQueue, RecordingTarget, FakeTicks> {
        let pacer = FramePacer::new(60, FakeTicks::at(0)).unwrap();
        let mut layers = LayerStack::new();
        layers.push_layer(Box::new(StaticDrawLayer::new("triangle", ProgramId(0), 3)));
        FrameLoop::new(events, target, pacer, layers, Color::BLACK)
    }

    #[test]
    fn each_frame_draws_the_triangle_once_whatever_the_size() {
        let events = EventQueue::new();
        let target = RecordingTarget::default();
        let mut state = LoopState::running(triangle_loop(events.clone(), target.clone()));

        state.tick();
        events.push(LoopEvent::Resized {
            width: 1920,
            height: 1080,
        });
        state.tick();
        events.push(LoopEvent::Resized {
            width: 1,
            height: 1,
        });
        state.tick();

        let frames = target.frames();
        assert_eq!(frames.len(), 3);
        for frame in &frames {
            let draws: Vec<_> = frame
                .iter()
                .filter_map(|op| match op {
                    Op::Draw(call) => Some(call),
                    _ => None,
                })
                .collect();
            assert_eq!(draws.len(), 1);
            assert_eq!(draws[0].vertex_count(), 3);
        }
        assert_eq!(frames[1][0], Op::Resize(1920, 1080));
    }

    #[test]
    fn frame_order_is_clear_draw_present() {
        let target = RecordingTarget::default();
        let mut body = triangle_loop(EventQueue::new(), target.clone());

        assert_eq!(body.frame(), LoopControl::Continue);
        assert_eq!(
            target.ops(),
            [Op::Clear(Color::BLACK), Op::Draw(DrawCall::new(ProgramId(0), 3)), Op::Present]
        );
    }

    #[test]
    fn quit_on_tick_n_stops_all_later_drawing() {
        let events = EventQueue::new();
        let target = RecordingTarget::default();
        let mut state = LoopState::running(triangle_loop(events.clone(), target.clone()));

        for _ in 0..4 {
            assert_eq!(state.tick(), LoopStatus::Running);
        }
        let before_quit = target.ops().len();

        events.push(LoopEvent::Quit);
        assert_eq!(state.tick(), LoopStatus::Stopped);
        assert_eq!(target.ops().len(), before_quit);

        // The body was dropped with its queue handle.
        assert_eq!(Rc::strong_count(&target.ops), 1);

        events.push(LoopEvent::Focused(true));
        assert_eq!(state.tick(), LoopStatus::Stopped);
        assert_eq!(target.ops().len(), before_quit);
        assert_eq!(target.frames().len(), 4);
    }

    #[test]
    fn events_after_quit_are_not_processed() {
        let events = EventQueue::new();
        let target = RecordingTarget::default();
        let mut body = triangle_loop(events.clone(), target.clone());

        events.push(LoopEvent::Quit);
        events.push(LoopEvent::Resized {
            width: 10,
            height: 10,
        });

        assert_eq!(body.frame(), LoopControl::Exit);
        assert!(target.ops().is_empty());
    }

    #[test]
    fn fatal_present_ends_the_blocking_loop() {
        let target = RecordingTarget {
            fail_present: true,
            ..Default::default()
        };
        let mut state = LoopState::running(triangle_loop(EventQueue::new(), target.clone()));

        assert_eq!(run_blocking(&mut state), 1);
        assert_eq!(target.frames().len(), 1);
    }

    #[test]
    fn frames_are_paced_to_the_budget() {
        let mut body = triangle_loop(EventQueue::new(), RecordingTarget::default());

        body.frame();
        body.frame();

        assert_eq!(body.pacer().ticks().delays, vec![16, 16]);
        assert_eq!(body.pacer().clock().last_tick(), 32);
    }
}
