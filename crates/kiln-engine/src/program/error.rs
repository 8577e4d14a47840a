use std::fmt;

use super::StageKind;

/// Failure while building a GPU program.
///
/// Compile errors carry the rendered diagnostic log, so printing the error is
/// enough to locate the offending line.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgramError {
    /// The vertex attribute description cannot be expressed as a vertex format.
    InvalidLayout(String),

    /// The vertex payload does not match the attribute description.
    InvalidPayload(String),

    /// WGSL parsing or validation failed.
    Compile {
        stage: StageKind,
        label: String,
        log: String,
    },

    /// The module has no entry point with the requested name and stage.
    MissingEntryPoint { stage: StageKind, name: String },

    /// The stages do not fit together.
    Link { label: String, reason: String },

    /// The vertex stage has no input with this name.
    MissingAttribute { name: String },

    /// The vertex stage input does not match the attribute description.
    AttributeMismatch { name: String, reason: String },

    /// The device rejected the shader modules or the render pipeline.
    Pipeline { label: String, log: String },
}

impl fmt::Display for ProgramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgramError::InvalidLayout(msg) => write!(f, "invalid vertex layout: {msg}"),
            ProgramError::InvalidPayload(msg) => write!(f, "invalid vertex payload: {msg}"),
            ProgramError::Compile { stage, label, log } => {
                write!(f, "{stage} stage of `{label}` failed to compile:\n{log}")
            }
            ProgramError::MissingEntryPoint { stage, name } => {
                write!(f, "no {stage} entry point named `{name}`")
            }
            ProgramError::Link { label, reason } => {
                write!(f, "program `{label}` failed to link: {reason}")
            }
            ProgramError::MissingAttribute { name } => {
                write!(f, "vertex stage has no attribute named `{name}`")
            }
            ProgramError::AttributeMismatch { name, reason } => {
                write!(f, "attribute `{name}` does not match its layout: {reason}")
            }
            ProgramError::Pipeline { label, log } => {
                write!(f, "device rejected the pipeline of `{label}`: {log}")
            }
        }
    }
}

impl std::error::Error for ProgramError {}
