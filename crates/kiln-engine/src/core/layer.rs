use crate::render::FrameTarget;
use crate::runtime::LoopEvent;
use crate::time::FrameTime;

/// Whether an event should keep travelling down the layer stack.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum EventFlow {
    Continue,
    Handled,
}

/// Unit of per-frame behaviour owned by a [`LayerStack`](super::LayerStack).
pub trait Layer {
    /// Name used by `pop_layer` and in logs.
    fn name(&self) -> &str;

    /// Called when the layer is pushed.
    fn on_attach(&mut self) {}

    /// Called when the layer is popped or the stack is dropped.
    fn on_detach(&mut self) {}

    fn on_event(&mut self, event: &LoopEvent) -> EventFlow {
        let _ = event;
        EventFlow::Continue
    }

    fn on_update(&mut self, time: FrameTime) {
        let _ = time;
    }

    /// Issues draw calls for the current frame. The target is already cleared.
    fn on_render(&mut self, target: &mut dyn FrameTarget) {
        let _ = target;
    }
}
