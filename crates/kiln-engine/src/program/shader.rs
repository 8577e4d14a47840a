use std::fmt;

use naga::front::wgsl;
use naga::valid::{Capabilities, ValidationFlags, Validator};

use super::ProgramError;

/// Pipeline stage a shader is compiled for.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum StageKind {
    Vertex,
    Fragment,
}

impl StageKind {
    fn naga_stage(self) -> naga::ShaderStage {
        match self {
            StageKind::Vertex => naga::ShaderStage::Vertex,
            StageKind::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageKind::Vertex => f.write_str("vertex"),
            StageKind::Fragment => f.write_str("fragment"),
        }
    }
}

/// A parsed and validated shader stage.
///
/// Holds the naga IR for interface checks and the source text that is later
/// handed to wgpu unchanged.
#[derive(Debug)]
pub struct CompiledStage {
    kind: StageKind,
    label: String,
    entry_point: String,
    entry_index: usize,
    source: String,
    module: naga::Module,
}

impl CompiledStage {
    pub fn kind(&self) -> StageKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn entry_point(&self) -> &str {
        &self.entry_point
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn module(&self) -> &naga::Module {
        &self.module
    }

    pub(crate) fn entry(&self) -> &naga::EntryPoint {
        &self.module.entry_points[self.entry_index]
    }
}

/// Parses and validates one WGSL stage.
///
/// Validation only admits what `capabilities` allows, so a stage the target
/// device cannot run fails here with a naga diagnostic instead of inside wgpu.
/// Also fails when `entry_point` is missing or belongs to another stage.
pub fn compile_stage(
    kind: StageKind,
    label: &str,
    source: &str,
    entry_point: &str,
    capabilities: Capabilities,
) -> Result<CompiledStage, ProgramError> {
    let compile_error = |log: String| ProgramError::Compile {
        stage: kind,
        label: label.to_string(),
        log,
    };

    let module = wgsl::parse_str(source).map_err(|e| compile_error(e.emit_to_string(source)))?;

    let mut validator = Validator::new(ValidationFlags::all(), capabilities);
    validator
        .validate(&module)
        .map_err(|e| compile_error(e.emit_to_string(source)))?;

    let entry_index = module
        .entry_points
        .iter()
        .position(|ep| ep.name == entry_point && ep.stage == kind.naga_stage())
        .ok_or_else(|| ProgramError::MissingEntryPoint {
            stage: kind,
            name: entry_point.to_string(),
        })?;

    log::debug!("compiled {kind} stage `{entry_point}` of `{label}`");

    Ok(CompiledStage {
        kind,
        label: label.to_string(),
        entry_point: entry_point.to_string(),
        entry_index,
        source: source.to_string(),
        module,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::ContextProfile;

    const BASIC: Capabilities = Capabilities::empty();

    const VS: &str = r#"
@vertex
fn vs_main(@location(0) position: vec2<f32>) -> @builtin(position) vec4<f32> {
    return vec4<f32>(position, 0.0, 1.0);
}
"#;

    #[test]
    fn valid_stage_compiles() {
        let stage = compile_stage(StageKind::Vertex, "test", VS, "vs_main", BASIC).unwrap();
        assert_eq!(stage.kind(), StageKind::Vertex);
        assert_eq!(stage.entry_point(), "vs_main");
        assert_eq!(stage.entry().name, "vs_main");
    }

    #[test]
    fn syntax_error_reports_a_log() {
        let src = "@vertex fn vs_main( -> @builtin(position) vec4<f32> { }";
        let err = compile_stage(StageKind::Vertex, "broken", src, "vs_main", BASIC).unwrap_err();

        match err {
            ProgramError::Compile { stage, label, log } => {
                assert_eq!(stage, StageKind::Vertex);
                assert_eq!(label, "broken");
                assert!(!log.is_empty());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn type_error_fails_validation() {
        let src = r#"
@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return 1.0;
}
"#;
        let err =
            compile_stage(StageKind::Fragment, "bad types", src, "fs_main", BASIC).unwrap_err();
        assert!(matches!(err, ProgramError::Compile { stage: StageKind::Fragment, .. }));
    }

    #[test]
    fn entry_point_of_the_wrong_stage_is_missing() {
        let err = compile_stage(StageKind::Fragment, "test", VS, "vs_main", BASIC).unwrap_err();
        assert_eq!(
            err,
            ProgramError::MissingEntryPoint {
                stage: StageKind::Fragment,
                name: "vs_main".to_string(),
            }
        );
    }

    #[test]
    fn unknown_entry_point_is_missing() {
        let err = compile_stage(StageKind::Vertex, "test", VS, "main", BASIC).unwrap_err();
        assert!(matches!(err, ProgramError::MissingEntryPoint { .. }));
    }

    const F64_VS: &str = r#"
@vertex
fn vs_main(@location(0) position: vec2<f32>) -> @builtin(position) vec4<f32> {
    let x: f64 = f64(position.x);
    return vec4<f32>(f32(x), position.y, 0.0, 1.0);
}
"#;

    #[test]
    fn f64_stage_is_rejected_on_a_compatibility_device() {
        let caps = ContextProfile::Compatibility.shader_capabilities(wgpu::Features::empty());
        let err = compile_stage(StageKind::Vertex, "doubles", F64_VS, "vs_main", caps).unwrap_err();
        assert!(matches!(err, ProgramError::Compile { stage: StageKind::Vertex, .. }));
    }

    #[test]
    fn f64_stage_compiles_when_the_device_has_the_feature() {
        let caps = ContextProfile::Compatibility.shader_capabilities(wgpu::Features::SHADER_F64);
        assert!(compile_stage(StageKind::Vertex, "doubles", F64_VS, "vs_main", caps).is_ok());
    }
}
