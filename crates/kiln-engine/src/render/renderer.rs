use winit::dpi::PhysicalSize;

use crate::device::Surface;
use crate::program::{GpuProgram, ProgramDesc, ProgramError};

use super::{Color, DrawCall, FrameTarget, PresentOutcome, ProgramId};

/// Surface-backed [`FrameTarget`] owning every loaded program.
///
/// Draw calls are recorded between `clear` and `present` and replayed in one
/// render pass when the frame is presented.
pub struct Renderer {
    surface: Surface,
    programs: Vec<GpuProgram>,
    clear: Color,
    draws: Vec<DrawCall>,
    warned_unknown_program: bool,
}

impl Renderer {
    pub fn new(surface: Surface) -> Self {
        Self {
            surface,
            programs: Vec::new(),
            clear: Color::BLACK,
            draws: Vec::new(),
            warned_unknown_program: false,
        }
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Builds a program against this renderer's surface.
    pub fn load_program(&mut self, desc: &ProgramDesc<'_>) -> Result<ProgramId, ProgramError> {
        let program = GpuProgram::load(&self.surface, desc)?;
        self.programs.push(program);
        Ok(ProgramId(self.programs.len() - 1))
    }

    pub fn program(&self, id: ProgramId) -> Option<&GpuProgram> {
        self.programs.get(id.0)
    }
}

impl FrameTarget for Renderer {
    fn resize(&mut self, width: u32, height: u32) {
        self.surface.resize(PhysicalSize::new(width, height));
    }

    fn clear(&mut self, color: Color) {
        self.clear = color;
        self.draws.clear();
    }

    fn draw(&mut self, call: DrawCall) {
        self.draws.push(call);
    }

    fn present(&mut self) -> PresentOutcome {
        let clear = self.clear.to_wgpu();
        let programs = &self.programs;
        let draws = &mut self.draws;
        let warned = &mut self.warned_unknown_program;

        let outcome = self.surface.present_with(|encoder, view, depth| {
            let depth_stencil_attachment = depth.map(|view| wgpu::RenderPassDepthStencilAttachment {
                view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Discard,
                }),
                stencil_ops: None,
            });

            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("kiln frame pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            for call in draws.drain(..) {
                let Some(program) = programs.get(call.program.0) else {
                    if !*warned {
                        log::warn!("draw call for unknown program {}", call.program.0);
                        *warned = true;
                    }
                    continue;
                };

                rpass.set_pipeline(program.pipeline());
                rpass.set_vertex_buffer(0, program.vertex_buffer().slice(..));
                rpass.draw(call.vertices, 0..1);
            }
        });

        // Draws recorded for a dropped frame must not leak into the next one.
        self.draws.clear();
        outcome
    }
}
