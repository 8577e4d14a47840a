use std::ops::Range;

use super::Color;

/// Index of a program loaded into a [`Renderer`](super::Renderer).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ProgramId(pub(crate) usize);

impl ProgramId {
    /// Raw slot index; useful for logging.
    pub fn index(self) -> usize {
        self.0
    }
}

/// One non-indexed draw of a loaded program.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub program: ProgramId,
    pub vertices: Range<u32>,
}

impl DrawCall {
    /// Draws the first `count` vertices of `program`'s buffer.
    pub fn new(program: ProgramId, count: u32) -> Self {
        Self {
            program,
            vertices: 0..count,
        }
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.end.saturating_sub(self.vertices.start)
    }
}

/// Result of presenting a frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PresentOutcome {
    Presented,
    /// The frame was dropped (surface reconfigured, timeout); try again next tick.
    Skipped,
    /// The surface cannot be used anymore.
    Fatal,
}

/// Where a loop body sends its per-frame commands.
///
/// Calls arrive in the order `clear`, any number of `draw`, `present`.
pub trait FrameTarget {
    /// The drawable changed size (physical pixels).
    fn resize(&mut self, width: u32, height: u32) {
        let _ = (width, height);
    }

    /// Starts a frame cleared to `color`.
    fn clear(&mut self, color: Color);

    fn draw(&mut self, call: DrawCall);

    /// Finishes the frame and shows it.
    fn present(&mut self) -> PresentOutcome;
}
