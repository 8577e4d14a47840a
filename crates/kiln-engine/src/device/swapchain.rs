use winit::dpi::PhysicalSize;

use crate::render::PresentOutcome;

use super::SurfaceRequest;

/// Swapchain settings for `request` on a surface with `caps`.
///
/// Picks the first sRGB format so linear clear colours are encoded on write,
/// and an opaque alpha mode when the compositor offers one. `None` when the
/// surface and adapter share no format at all.
pub(crate) fn swapchain_config(
    caps: &wgpu::SurfaceCapabilities,
    size: PhysicalSize<u32>,
    request: &SurfaceRequest,
) -> Option<wgpu::SurfaceConfiguration> {
    let format = caps
        .formats
        .iter()
        .copied()
        .find(wgpu::TextureFormat::is_srgb)
        .or_else(|| caps.formats.first().copied())?;

    let alpha_mode = if caps.alpha_modes.contains(&wgpu::CompositeAlphaMode::Opaque) {
        wgpu::CompositeAlphaMode::Opaque
    } else {
        caps.alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto)
    };

    Some(wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width: size.width.max(1),
        height: size.height.max(1),
        present_mode: request.swap_interval.present_mode(),
        alpha_mode,
        view_formats: vec![],
        desired_maximum_frame_latency: request.frame_latency(),
    })
}

/// Minimized windows report a 0x0 drawable, which wgpu cannot configure.
pub(crate) fn has_area(size: PhysicalSize<u32>) -> bool {
    size.width > 0 && size.height > 0
}

/// Whether a failed acquire is cured by configuring the swapchain again.
pub(crate) fn reconfigures(err: &wgpu::SurfaceError) -> bool {
    matches!(err, wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)
}

/// Frame outcome after the swapchain image could not be acquired.
///
/// Only running out of memory ends the loop; everything else drops one frame.
pub(crate) fn failed_acquire_outcome(err: &wgpu::SurfaceError) -> PresentOutcome {
    match err {
        wgpu::SurfaceError::OutOfMemory => PresentOutcome::Fatal,
        wgpu::SurfaceError::Lost
        | wgpu::SurfaceError::Outdated
        | wgpu::SurfaceError::Timeout
        | wgpu::SurfaceError::Other => PresentOutcome::Skipped,
    }
}

/// Depth attachment matching the swapchain size.
pub(crate) struct DepthTarget {
    pub format: wgpu::TextureFormat,
    pub view: wgpu::TextureView,
}

impl DepthTarget {
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        size: PhysicalSize<u32>,
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("kiln depth target"),
            size: wgpu::Extent3d {
                width: size.width.max(1),
                height: size.height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });

        Self {
            format,
            view: texture.create_view(&wgpu::TextureViewDescriptor::default()),
        }
    }
}
