//! GPU resource loading: vertex upload + shader program build.
//!
//! A program is described by a [`ProgramDesc`] (WGSL text for both stages, a
//! single vertex attribute, and the vertex payload) and built in a fixed order:
//!
//! 1. describe the vertex layout
//! 2. upload the vertex payload
//! 3. compile the vertex stage
//! 4. compile the fragment stage
//! 5. link the stages
//! 6. look up the attribute location by name
//! 7. create the render pipeline
//!
//! Steps 1 and 3–6 run on the CPU through `naga`, so every failure is reported
//! with a diagnostic log before any pipeline is created.

mod desc;
mod error;
mod gpu_program;
mod link;
mod shader;
pub mod triangle;

pub use desc::{AttributeSpec, CompiledProgram, ProgramDesc, VertexLayout};
pub use error::ProgramError;
pub use gpu_program::GpuProgram;
pub use link::{link, BoundAttribute, LinkedProgram, Varying};
pub use shader::{compile_stage, CompiledStage, StageKind};
