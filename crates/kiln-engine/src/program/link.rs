use naga::{Binding, Handle, Module, ScalarKind, Type, TypeInner};

use super::shader::{CompiledStage, StageKind};
use super::{AttributeSpec, ProgramError};

/// A user-defined stage input or output (anything bound to a `@location`).
#[derive(Debug, Clone, PartialEq)]
pub struct Varying {
    pub name: Option<String>,
    pub location: u32,
    pub ty: TypeInner,
}

impl Varying {
    /// `(components, kind)` for scalar and vector varyings.
    fn shape(&self) -> Option<(u32, ScalarKind)> {
        match &self.ty {
            TypeInner::Scalar(s) => Some((1, s.kind)),
            TypeInner::Vector { size, scalar } => Some((*size as u32, scalar.kind)),
            _ => None,
        }
    }
}

/// Attribute location resolved against the linked vertex stage.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BoundAttribute {
    pub location: u32,
    pub format: wgpu::VertexFormat,
    pub array_stride: u64,
    pub offset: u64,
}

/// Interface of a successfully linked vertex/fragment pair.
#[derive(Debug, Clone)]
pub struct LinkedProgram {
    attributes: Vec<Varying>,
    varyings: Vec<Varying>,
}

impl LinkedProgram {
    /// Vertex stage inputs, in declaration order.
    pub fn attributes(&self) -> &[Varying] {
        &self.attributes
    }

    /// Values passed from the vertex to the fragment stage.
    pub fn varyings(&self) -> &[Varying] {
        &self.varyings
    }

    pub fn attribute_location(&self, name: &str) -> Option<u32> {
        self.find_attribute(name).map(|v| v.location)
    }

    fn find_attribute(&self, name: &str) -> Option<&Varying> {
        self.attributes
            .iter()
            .find(|v| v.name.as_deref() == Some(name))
    }

    /// Resolves `spec` by name and checks that the shader input can receive it.
    pub fn bind_attribute(&self, spec: &AttributeSpec<'_>) -> Result<BoundAttribute, ProgramError> {
        let format = spec.format()?;

        let input = self
            .find_attribute(spec.name)
            .ok_or_else(|| ProgramError::MissingAttribute {
                name: spec.name.to_string(),
            })?;

        let mismatch = |reason: String| ProgramError::AttributeMismatch {
            name: spec.name.to_string(),
            reason,
        };

        match input.shape() {
            Some((components, ScalarKind::Float)) if components == spec.components => {}
            Some((components, ScalarKind::Float)) => {
                return Err(mismatch(format!(
                    "shader declares {components} components, layout provides {}",
                    spec.components
                )));
            }
            Some((_, kind)) => {
                return Err(mismatch(format!(
                    "shader declares {kind:?} data, layout provides floats"
                )));
            }
            None => return Err(mismatch("shader input is not a scalar or vector".to_string())),
        }

        Ok(BoundAttribute {
            location: input.location,
            format,
            array_stride: spec.array_stride(),
            offset: spec.offset,
        })
    }
}

/// Checks that `fragment` only reads what `vertex` writes.
///
/// Every fragment input location must be produced by the vertex stage with the
/// same type, and the fragment stage must write at least one output.
pub fn link(
    vertex: &CompiledStage,
    fragment: &CompiledStage,
) -> Result<LinkedProgram, ProgramError> {
    let label = vertex.label().to_string();
    let link_error = |reason: String| ProgramError::Link {
        label: label.clone(),
        reason,
    };

    if vertex.kind() != StageKind::Vertex || fragment.kind() != StageKind::Fragment {
        return Err(link_error(format!(
            "expected a vertex and a fragment stage, got {} and {}",
            vertex.kind(),
            fragment.kind()
        )));
    }

    let attributes = stage_inputs(vertex);
    let varyings = stage_outputs(vertex);

    for input in stage_inputs(fragment) {
        let Some(output) = varyings.iter().find(|v| v.location == input.location) else {
            return Err(link_error(format!(
                "fragment input at location {} is not written by the vertex stage",
                input.location
            )));
        };
        if output.ty != input.ty {
            return Err(link_error(format!(
                "location {} is written as {:?} but read as {:?}",
                input.location, output.ty, input.ty
            )));
        }
    }

    if fragment.entry().function.result.is_none() {
        return Err(link_error("fragment stage writes no output".to_string()));
    }

    Ok(LinkedProgram {
        attributes,
        varyings,
    })
}

fn stage_inputs(stage: &CompiledStage) -> Vec<Varying> {
    let module = stage.module();
    let mut out = Vec::new();
    for arg in &stage.entry().function.arguments {
        collect_varyings(module, arg.name.as_deref(), arg.ty, arg.binding.as_ref(), &mut out);
    }
    out
}

fn stage_outputs(stage: &CompiledStage) -> Vec<Varying> {
    let module = stage.module();
    let mut out = Vec::new();
    if let Some(result) = &stage.entry().function.result {
        collect_varyings(module, None, result.ty, result.binding.as_ref(), &mut out);
    }
    out
}

/// Flattens `@location` bindings, descending into I/O structs. Builtins are skipped.
fn collect_varyings(
    module: &Module,
    name: Option<&str>,
    ty: Handle<Type>,
    binding: Option<&Binding>,
    out: &mut Vec<Varying>,
) {
    match binding {
        Some(Binding::Location { location, .. }) => out.push(Varying {
            name: name.map(str::to_string),
            location: *location,
            ty: module.types[ty].inner.clone(),
        }),
        Some(Binding::BuiltIn(_)) => {}
        None => {
            if let TypeInner::Struct { members, .. } = &module.types[ty].inner {
                for member in members {
                    collect_varyings(
                        module,
                        member.name.as_deref(),
                        member.ty,
                        member.binding.as_ref(),
                        out,
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::compile_stage;
    use naga::valid::Capabilities;

    fn vs(src: &str) -> CompiledStage {
        compile_stage(StageKind::Vertex, "test", src, "vs_main", Capabilities::empty()).unwrap()
    }

    fn fs(src: &str) -> CompiledStage {
        compile_stage(StageKind::Fragment, "test", src, "fs_main", Capabilities::empty()).unwrap()
    }

    const VS_COLOR: &str = r#"
struct VsOut {
    @builtin(position) clip: vec4<f32>,
    @location(0) color: vec3<f32>,
};

@vertex
fn vs_main(@location(0) position: vec2<f32>, @location(1) tint: vec3<f32>) -> VsOut {
    var out: VsOut;
    out.clip = vec4<f32>(position, 0.0, 1.0);
    out.color = tint;
    return out;
}
"#;

    const FS_COLOR: &str = r#"
@fragment
fn fs_main(@location(0) color: vec3<f32>) -> @location(0) vec4<f32> {
    return vec4<f32>(color, 1.0);
}
"#;

    const FS_WHITE: &str = r#"
@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(1.0, 1.0, 1.0, 1.0);
}
"#;

    #[test]
    fn matching_stages_link() {
        let linked = link(&vs(VS_COLOR), &fs(FS_COLOR)).unwrap();

        assert_eq!(linked.attribute_location("position"), Some(0));
        assert_eq!(linked.attribute_location("tint"), Some(1));
        assert_eq!(linked.varyings().len(), 1);
        assert_eq!(linked.varyings()[0].name.as_deref(), Some("color"));
    }

    #[test]
    fn unwritten_fragment_input_fails_to_link() {
        let fs_reads_two = r#"
@fragment
fn fs_main(@location(2) uv: vec2<f32>) -> @location(0) vec4<f32> {
    return vec4<f32>(uv, 0.0, 1.0);
}
"#;
        let err = link(&vs(VS_COLOR), &fs(fs_reads_two)).unwrap_err();
        assert!(matches!(err, ProgramError::Link { .. }));
        assert!(err.to_string().contains("location 2"));
    }

    #[test]
    fn type_mismatch_fails_to_link() {
        let fs_vec4 = r#"
@fragment
fn fs_main(@location(0) color: vec4<f32>) -> @location(0) vec4<f32> {
    return color;
}
"#;
        let err = link(&vs(VS_COLOR), &fs(fs_vec4)).unwrap_err();
        assert!(matches!(err, ProgramError::Link { .. }));
    }

    #[test]
    fn fragment_without_output_fails_to_link() {
        let fs_silent = r#"
@fragment
fn fs_main() {
}
"#;
        let err = link(&vs(VS_COLOR), &fs(fs_silent)).unwrap_err();
        assert!(err.to_string().contains("no output"));
    }

    #[test]
    fn swapped_stages_fail_to_link() {
        let err = link(&fs(FS_WHITE), &vs(VS_COLOR)).unwrap_err();
        assert!(matches!(err, ProgramError::Link { .. }));
    }

    #[test]
    fn attribute_is_bound_by_name() {
        let linked = link(&vs(VS_COLOR), &fs(FS_WHITE)).unwrap();
        let bound = linked
            .bind_attribute(&AttributeSpec::float("tint", 3))
            .unwrap();

        assert_eq!(bound.location, 1);
        assert_eq!(bound.format, wgpu::VertexFormat::Float32x3);
        assert_eq!(bound.array_stride, 12);
    }

    #[test]
    fn unknown_attribute_is_reported() {
        let linked = link(&vs(VS_COLOR), &fs(FS_WHITE)).unwrap();
        let err = linked
            .bind_attribute(&AttributeSpec::float("normal", 3))
            .unwrap_err();

        assert_eq!(
            err,
            ProgramError::MissingAttribute {
                name: "normal".to_string(),
            }
        );
    }

    #[test]
    fn component_count_must_match() {
        let linked = link(&vs(VS_COLOR), &fs(FS_WHITE)).unwrap();
        let err = linked
            .bind_attribute(&AttributeSpec::float("position", 4))
            .unwrap_err();

        assert!(matches!(err, ProgramError::AttributeMismatch { .. }));
    }

    #[test]
    fn integer_input_rejects_float_layout() {
        let vs_int = r#"
@vertex
fn vs_main(@location(0) index: u32) -> @builtin(position) vec4<f32> {
    return vec4<f32>(f32(index), 0.0, 0.0, 1.0);
}
"#;
        let linked = link(&vs(vs_int), &fs(FS_WHITE)).unwrap();
        let err = linked
            .bind_attribute(&AttributeSpec::float("index", 1))
            .unwrap_err();

        assert!(matches!(err, ProgramError::AttributeMismatch { .. }));
    }
}
