use std::future::Future;

use wgpu::util::DeviceExt;

use crate::device::Surface;

use super::{BoundAttribute, ProgramDesc, ProgramError};

/// A linked render pipeline together with its static vertex buffer.
///
/// Immutable after creation.
pub struct GpuProgram {
    label: String,
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
    attribute: BoundAttribute,
}

impl GpuProgram {
    /// Uploads the vertex payload and builds the pipeline described by `desc`.
    ///
    /// Requires a live [`Surface`]: the pipeline targets its colour format and,
    /// if present, its depth format.
    pub fn load(surface: &Surface, desc: &ProgramDesc<'_>) -> Result<Self, ProgramError> {
        let device = surface.device();

        let layout = desc.vertex_layout()?;

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(desc.label),
            contents: bytemuck::cast_slice(desc.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let compiled = desc.compile(surface.shader_capabilities())?;
        let attribute = compiled.attribute;

        // Anything naga let through but the device refuses ends up here
        // instead of in wgpu's panicking uncaptured-error handler.
        let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);

        let vertex_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(desc.label),
            source: wgpu::ShaderSource::Wgsl(compiled.vertex.source().into()),
        });
        let fragment_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(desc.label),
            source: wgpu::ShaderSource::Wgsl(compiled.fragment.source().into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(desc.label),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let attributes = [wgpu::VertexAttribute {
            format: attribute.format,
            offset: attribute.offset,
            shader_location: attribute.location,
        }];
        let buffers = [wgpu::VertexBufferLayout {
            array_stride: layout.array_stride,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &attributes,
        }];

        let depth_stencil = surface.depth_format().map(|format| wgpu::DepthStencilState {
            format,
            depth_write_enabled: false,
            depth_compare: wgpu::CompareFunction::Always,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(desc.label),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &vertex_module,
                entry_point: Some(compiled.vertex.entry_point()),
                compilation_options: Default::default(),
                buffers: &buffers,
            },

            fragment: Some(wgpu::FragmentState {
                module: &fragment_module,
                entry_point: Some(compiled.fragment.entry_point()),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface.surface_format(),
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: desc.topology,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil,
            multisample: wgpu::MultisampleState::default(),

            multiview_mask: None,
            cache: None,
        });

        if let Some(err) = settle_error_scope(scope.pop()) {
            return Err(ProgramError::Pipeline {
                label: desc.label.to_string(),
                log: err.to_string(),
            });
        }

        log::info!(
            "program `{}` ready: {} vertices, `{}` at location {} ({:?})",
            desc.label,
            layout.vertex_count,
            desc.attribute.name,
            attribute.location,
            attribute.format
        );

        Ok(Self {
            label: desc.label.to_string(),
            pipeline,
            vertex_buffer,
            vertex_count: layout.vertex_count,
            attribute,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }

    pub fn vertex_buffer(&self) -> &wgpu::Buffer {
        &self.vertex_buffer
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn attribute(&self) -> BoundAttribute {
        self.attribute
    }
}

/// Resolves a popped error scope without yielding to an executor.
#[cfg(not(target_arch = "wasm32"))]
fn settle_error_scope<F>(pop: F) -> Option<wgpu::Error>
where
    F: Future<Output = Option<wgpu::Error>>,
{
    pollster::block_on(pop)
}

/// The WebGL backend resolves scopes immediately. Browser WebGPU resolves them
/// on a later task; those errors are reported on the console by the browser.
#[cfg(target_arch = "wasm32")]
fn settle_error_scope<F>(pop: F) -> Option<wgpu::Error>
where
    F: Future<Output = Option<wgpu::Error>>,
{
    use std::task::{Context, Poll, Waker};

    let mut pop = std::pin::pin!(pop);
    match pop.as_mut().poll(&mut Context::from_waker(Waker::noop())) {
        Poll::Ready(err) => err,
        Poll::Pending => {
            log::debug!("pipeline validation result not available yet");
            None
        }
    }
}
