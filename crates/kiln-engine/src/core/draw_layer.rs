use crate::render::{DrawCall, FrameTarget, ProgramId};

use super::Layer;

/// Layer that draws one loaded program every frame with a fixed vertex count.
#[derive(Debug, Clone)]
pub struct StaticDrawLayer {
    name: String,
    program: ProgramId,
    vertex_count: u32,
}

impl StaticDrawLayer {
    pub fn new(name: impl Into<String>, program: ProgramId, vertex_count: u32) -> Self {
        Self {
            name: name.into(),
            program,
            vertex_count,
        }
    }

    pub fn program(&self) -> ProgramId {
        self.program
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }
}

impl Layer for StaticDrawLayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_attach(&mut self) {
        log::debug!(
            "{}: drawing program #{} ({} vertices)",
            self.name,
            self.program.index(),
            self.vertex_count
        );
    }

    fn on_render(&mut self, target: &mut dyn FrameTarget) {
        target.draw(DrawCall::new(self.program, self.vertex_count));
    }
}
