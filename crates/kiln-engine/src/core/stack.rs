use crate::render::FrameTarget;
use crate::runtime::LoopEvent;
use crate::time::FrameTime;

use super::{EventFlow, Layer};

/// Ordered layers: regular layers at the bottom, overlays on top.
///
/// Events travel top-down and stop at the first layer that handles them.
/// Updates and rendering run bottom-up so overlays draw last.
#[derive(Default)]
pub struct LayerStack {
    layers: Vec<Box<dyn Layer>>,
    overlay_start: usize,
}

impl LayerStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `layer` above the other regular layers and below every overlay.
    pub fn push_layer(&mut self, mut layer: Box<dyn Layer>) {
        layer.on_attach();
        self.layers.insert(self.overlay_start, layer);
        self.overlay_start += 1;
    }

    /// Pushes `overlay` on top of the stack.
    pub fn push_overlay(&mut self, mut overlay: Box<dyn Layer>) {
        overlay.on_attach();
        self.layers.push(overlay);
    }

    /// Removes the topmost layer called `name` and returns it detached.
    pub fn pop_layer(&mut self, name: &str) -> Option<Box<dyn Layer>> {
        let index = self.layers.iter().rposition(|l| l.name() == name)?;
        if index < self.overlay_start {
            self.overlay_start -= 1;
        }
        let mut layer = self.layers.remove(index);
        layer.on_detach();
        Some(layer)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Layer names, bottom to top.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.layers.iter().map(|l| l.name())
    }

    pub fn dispatch(&mut self, event: &LoopEvent) -> EventFlow {
        for layer in self.layers.iter_mut().rev() {
            if layer.on_event(event) == EventFlow::Handled {
                return EventFlow::Handled;
            }
        }
        EventFlow::Continue
    }

    pub fn update(&mut self, time: FrameTime) {
        for layer in &mut self.layers {
            layer.on_update(time);
        }
    }

    pub fn render(&mut self, target: &mut dyn FrameTarget) {
        for layer in &mut self.layers {
            layer.on_render(target);
        }
    }
}

impl Drop for LayerStack {
    fn drop(&mut self) {
        for layer in self.layers.iter_mut().rev() {
            layer.on_detach();
        }
    }
}
