use std::sync::Arc;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy};
use winit::platform::web::{EventLoopExtWebSys, WindowAttributesExtWebSys};
use winit::window::{Window, WindowId};

use crate::core::LayerStack;
use crate::device::Surface;
use crate::render::Renderer;
use crate::runtime::{run_hosted, EventQueue, FrameLoop, HostScheduler, LoopState, LoopStatus};
use crate::time::{FramePacer, SystemTicks};

use super::{translate_window_event, Runtime, RuntimeConfig};

impl Runtime {
    /// Starts the runtime under the browser's event loop and returns at once.
    ///
    /// The canvas is appended to the document body. The surface is created
    /// asynchronously; `setup` runs once it is ready, then the loop ticks on
    /// every animation frame.
    pub fn spawn<F>(config: RuntimeConfig, setup: F) -> Result<()>
    where
        F: FnOnce(&mut Renderer) -> Result<LayerStack> + 'static,
    {
        config.surface.validate()?;

        let event_loop = EventLoop::<WebEvent>::with_user_event()
            .build()
            .context("failed to create winit EventLoop")?;
        let proxy = event_loop.create_proxy();

        event_loop.spawn_app(WebApp {
            config,
            setup: Some(setup),
            proxy,
            window: None,
            events: EventQueue::new(),
            tick: None,
        });
        Ok(())
    }
}

enum WebEvent {
    SurfaceReady(Result<Surface>),
}

struct WebApp<F> {
    config: RuntimeConfig,
    setup: Option<F>,
    proxy: EventLoopProxy<WebEvent>,
    window: Option<Arc<Window>>,

    /// Shared with the loop body, which drains it each tick.
    events: EventQueue,
    tick: Option<Box<dyn FnMut() -> LoopStatus>>,
}

impl<F> HostScheduler for WebApp<F> {
    fn set_main_loop(&mut self, tick: Box<dyn FnMut() -> LoopStatus>) {
        self.tick = Some(tick);
    }
}

impl<F> WebApp<F>
where
    F: FnOnce(&mut Renderer) -> Result<LayerStack> + 'static,
{
    fn start_loop(&mut self, surface: Surface) -> Result<()> {
        log::info!("{}", surface.adapter_report());

        let setup = self.setup.take().context("render loop already started")?;
        let mut renderer = Renderer::new(surface);
        let layers = setup(&mut renderer).context("resource setup failed")?;

        let pacer = FramePacer::new(self.config.target_fps, SystemTicks::new())?;
        let body = FrameLoop::new(
            self.events.clone(),
            renderer,
            pacer,
            layers,
            self.config.clear_color,
        );

        run_hosted(LoopState::running(body), self);
        Ok(())
    }
}

impl<F> ApplicationHandler<WebEvent> for WebApp<F>
where
    F: FnOnce(&mut Renderer) -> Result<LayerStack> + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = self.config.window_attributes().with_append(true);
        let window = match event_loop.create_window(attributes) {
            Ok(w) => Arc::new(w),
            Err(err) => {
                log::error!("failed to create window: {err}");
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        let request = self.config.surface.clone();
        let proxy = self.proxy.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let result = Surface::new(window, request).await;
            if proxy.send_event(WebEvent::SurfaceReady(result)).is_err() {
                log::warn!("event loop closed before the surface was ready");
            }
        });
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: WebEvent) {
        match event {
            WebEvent::SurfaceReady(Ok(surface)) => {
                if let Err(err) = self.start_loop(surface) {
                    log::error!("{err:#}");
                    event_loop.exit();
                    return;
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WebEvent::SurfaceReady(Err(err)) => {
                log::error!("GPU surface initialization failed: {err:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if !matches!(event, WindowEvent::RedrawRequested) {
            self.events.push(translate_window_event(&event));
            return;
        }

        let Some(tick) = self.tick.as_mut() else {
            return;
        };

        if tick() == LoopStatus::Stopped {
            self.tick = None;
            self.window = None;
            event_loop.exit();
        } else if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
