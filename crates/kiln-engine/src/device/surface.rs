use std::sync::Arc;

use anyhow::{Context, Result};
use naga::valid::Capabilities;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::render::PresentOutcome;

use super::swapchain::{self, DepthTarget};
use super::{AdapterReport, SurfaceRequest};

/// A window plus the GPU context drawing into it.
///
/// Owns the adapter, device and queue, the configured swapchain and an
/// optional depth target. The window is shared through an `Arc` so the
/// swapchain can be `'static`, which lets the whole value be built inside a
/// spawned future on the web.
pub struct Surface {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    /// Present when the request asked for depth bits.
    depth: Option<DepthTarget>,

    /// Current drawable size in physical pixels; may be 0x0 while minimized.
    size: PhysicalSize<u32>,

    /// What shaders compiled for this device may use.
    shader_capabilities: Capabilities,
}

impl Surface {
    /// Creates the GPU context for `window` with the requested capabilities.
    ///
    /// Adapter/device acquisition is asynchronous under wgpu. On failure every
    /// partially created object, the window included, is dropped before the
    /// error is returned.
    pub async fn new(window: Arc<Window>, request: SurfaceRequest) -> Result<Self> {
        request.validate()?;

        let size = window.inner_size();
        anyhow::ensure!(swapchain::has_area(size), "window has zero size");

        let depth_format = request.depth_format()?;

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: request.profile.backends(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("kiln device"),
                required_features: wgpu::Features::empty(),
                required_limits: request.profile.limits().using_resolution(adapter.limits()),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        let caps = surface.get_capabilities(&adapter);
        let config = swapchain::swapchain_config(&caps, size, &request)
            .context("surface is not compatible with the selected adapter")?;
        surface.configure(&device, &config);

        let depth = depth_format.map(|format| DepthTarget::new(&device, format, size));
        let shader_capabilities = request.profile.shader_capabilities(device.features());

        log::debug!(
            "surface configured: {}x{} {:?} {:?} depth={:?}",
            size.width,
            size.height,
            config.format,
            config.present_mode,
            depth_format
        );

        Ok(Self {
            window,
            surface,
            adapter,
            device,
            queue,
            config,
            depth,
            size,
            shader_capabilities,
        })
    }

    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn depth_format(&self) -> Option<wgpu::TextureFormat> {
        self.depth.as_ref().map(|d| d.format)
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Shader capabilities of the device, used to validate programs before upload.
    pub fn shader_capabilities(&self) -> Capabilities {
        self.shader_capabilities
    }

    pub fn adapter_report(&self) -> AdapterReport {
        AdapterReport::from_adapter(&self.adapter)
    }

    /// Reconfigures the swapchain and depth target for a new drawable size.
    ///
    /// A 0x0 size is remembered but configuration waits until the window has
    /// area again.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.size = new_size;
        if !swapchain::has_area(new_size) {
            return;
        }

        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);

        if let Some(format) = self.depth_format() {
            self.depth = Some(DepthTarget::new(&self.device, format, new_size));
        }
    }

    /// Acquires the next swapchain image, lets `record` encode the frame, then
    /// submits and presents it.
    ///
    /// `record` receives the encoder, the colour view and the depth view. It is
    /// not called when no image could be acquired.
    pub fn present_with<F>(&mut self, record: F) -> PresentOutcome
    where
        F: FnOnce(&mut wgpu::CommandEncoder, &wgpu::TextureView, Option<&wgpu::TextureView>),
    {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(err) => return self.recover(err),
        };

        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("kiln frame encoder"),
            });

        record(&mut encoder, &view, self.depth.as_ref().map(|d| &d.view));

        self.queue.submit(std::iter::once(encoder.finish()));
        self.window.pre_present_notify();
        surface_texture.present();
        PresentOutcome::Presented
    }

    fn recover(&mut self, err: wgpu::SurfaceError) -> PresentOutcome {
        if swapchain::reconfigures(&err) && swapchain::has_area(self.size) {
            self.surface.configure(&self.device, &self.config);
        }

        let outcome = swapchain::failed_acquire_outcome(&err);
        if outcome == PresentOutcome::Fatal {
            log::error!("swapchain image unavailable: {err}");
        } else {
            log::debug!("frame dropped: {err}");
        }
        outcome
    }
}
