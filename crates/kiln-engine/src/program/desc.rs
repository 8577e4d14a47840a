use naga::valid::Capabilities;

use super::link::{link, BoundAttribute};
use super::shader::{compile_stage, CompiledStage, StageKind};
use super::ProgramError;

const FLOAT_SIZE: u64 = std::mem::size_of::<f32>() as u64;

/// Description of the single per-vertex attribute a program consumes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AttributeSpec<'a> {
    /// Name of the vertex stage input.
    pub name: &'a str,

    /// Float components per vertex (1–4).
    pub components: u32,

    /// Normalization only applies to integer data; must be `false` for `f32`.
    pub normalized: bool,

    /// Bytes between consecutive vertices; `0` means tightly packed.
    pub stride: u64,

    /// Byte offset of the first component.
    pub offset: u64,
}

impl<'a> AttributeSpec<'a> {
    /// Tightly packed float attribute.
    pub const fn float(name: &'a str, components: u32) -> Self {
        Self {
            name,
            components,
            normalized: false,
            stride: 0,
            offset: 0,
        }
    }

    pub fn element_size(&self) -> u64 {
        u64::from(self.components) * FLOAT_SIZE
    }

    pub fn array_stride(&self) -> u64 {
        if self.stride == 0 { self.element_size() } else { self.stride }
    }

    /// wgpu vertex format for this attribute.
    pub fn format(&self) -> Result<wgpu::VertexFormat, ProgramError> {
        if self.normalized {
            return Err(ProgramError::InvalidLayout(format!(
                "`{}` is a float attribute and cannot be normalized",
                self.name
            )));
        }

        match self.components {
            1 => Ok(wgpu::VertexFormat::Float32),
            2 => Ok(wgpu::VertexFormat::Float32x2),
            3 => Ok(wgpu::VertexFormat::Float32x3),
            4 => Ok(wgpu::VertexFormat::Float32x4),
            n => Err(ProgramError::InvalidLayout(format!(
                "`{}` has {n} components; expected 1 to 4",
                self.name
            ))),
        }
    }
}

/// Resolved vertex buffer layout.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct VertexLayout {
    pub format: wgpu::VertexFormat,
    pub array_stride: u64,
    pub offset: u64,
    pub vertex_count: u32,
}

/// Everything needed to build one program with one static vertex buffer.
#[derive(Debug, Clone)]
pub struct ProgramDesc<'a> {
    pub label: &'a str,

    pub vertex_source: &'a str,
    pub vertex_entry: &'a str,

    pub fragment_source: &'a str,
    pub fragment_entry: &'a str,

    pub attribute: AttributeSpec<'a>,

    /// Vertex payload, uploaded verbatim.
    pub vertices: &'a [f32],

    pub topology: wgpu::PrimitiveTopology,
}

impl ProgramDesc<'_> {
    /// Describes the vertex array and checks the payload against it.
    pub fn vertex_layout(&self) -> Result<VertexLayout, ProgramError> {
        let attr = &self.attribute;
        let format = attr.format()?;
        let array_stride = attr.array_stride();
        let element = attr.element_size();

        if array_stride % FLOAT_SIZE != 0 || attr.offset % FLOAT_SIZE != 0 {
            return Err(ProgramError::InvalidLayout(format!(
                "stride {array_stride} and offset {} must be multiples of {FLOAT_SIZE}",
                attr.offset
            )));
        }
        if attr.offset + element > array_stride {
            return Err(ProgramError::InvalidLayout(format!(
                "{element}-byte attribute at offset {} does not fit a {array_stride}-byte stride",
                attr.offset
            )));
        }

        let bytes = self.vertices.len() as u64 * FLOAT_SIZE;
        if bytes < attr.offset + element {
            return Err(ProgramError::InvalidPayload(format!(
                "{} floats hold no complete vertex",
                self.vertices.len()
            )));
        }
        if attr.stride == 0 && self.vertices.len() as u64 % u64::from(attr.components) != 0 {
            return Err(ProgramError::InvalidPayload(format!(
                "{} floats are not a whole number of {}-component vertices",
                self.vertices.len(),
                attr.components
            )));
        }

        let vertex_count = (bytes - attr.offset - element) / array_stride + 1;
        let vertex_count = u32::try_from(vertex_count).map_err(|_| {
            ProgramError::InvalidPayload(format!("{vertex_count} vertices exceed a draw call"))
        })?;

        Ok(VertexLayout {
            format,
            array_stride,
            offset: attr.offset,
            vertex_count,
        })
    }

    /// Compiles both stages for a device with `capabilities`, links them and
    /// binds the attribute.
    pub fn compile(&self, capabilities: Capabilities) -> Result<CompiledProgram, ProgramError> {
        let vertex = compile_stage(
            StageKind::Vertex,
            self.label,
            self.vertex_source,
            self.vertex_entry,
            capabilities,
        )?;
        let fragment = compile_stage(
            StageKind::Fragment,
            self.label,
            self.fragment_source,
            self.fragment_entry,
            capabilities,
        )?;

        let linked = link(&vertex, &fragment)?;
        let attribute = linked.bind_attribute(&self.attribute)?;

        Ok(CompiledProgram {
            vertex,
            fragment,
            attribute,
        })
    }
}

/// CPU-side result of compiling and linking a [`ProgramDesc`].
#[derive(Debug)]
pub struct CompiledProgram {
    pub vertex: CompiledStage,
    pub fragment: CompiledStage,
    pub attribute: BoundAttribute,
}
