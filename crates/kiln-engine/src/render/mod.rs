//! Frame rendering.
//!
//! Loop bodies talk to a [`FrameTarget`]; [`Renderer`] is the wgpu-backed
//! implementation that owns the surface and the loaded programs.

mod color;
mod renderer;
mod target;

pub use color::Color;
pub use renderer::Renderer;
pub use target::{DrawCall, FrameTarget, PresentOutcome, ProgramId};
