use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::core::LayerStack;
use crate::device::Surface;
use crate::render::Renderer;
use crate::runtime::{run_blocking, EventSource, FrameLoop, LoopEvent, LoopState};
use crate::time::{FramePacer, SystemTicks};

use super::{translate_window_event, Runtime, RuntimeConfig};

/// Upper bound on pump rounds spent waiting for the platform to resume us.
const WINDOW_WAIT_ROUNDS: u32 = 500;
const WINDOW_WAIT_TIMEOUT: Duration = Duration::from_millis(10);

impl Runtime {
    /// Opens the window, builds the GPU surface, runs `setup` to load
    /// resources, then drives the render loop on the calling thread until quit.
    ///
    /// Returns the process exit status.
    pub fn run<F>(config: RuntimeConfig, setup: F) -> Result<i32>
    where
        F: FnOnce(&mut Renderer) -> Result<LayerStack>,
    {
        config.surface.validate()?;

        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut pump = EventPump::new(event_loop, config.window_attributes());
        let window = pump.wait_for_window()?;
        log::info!("window \"{}\" created", config.title);

        let surface = pollster::block_on(Surface::new(window, config.surface.clone()))
            .context("GPU surface initialization failed")?;
        log::info!("{}", surface.adapter_report());

        let mut renderer = Renderer::new(surface);
        let layers = setup(&mut renderer).context("resource setup failed")?;

        let pacer = FramePacer::new(config.target_fps, SystemTicks::new())?;
        let body = FrameLoop::new(pump, renderer, pacer, layers, config.clear_color);

        let mut state = LoopState::running(body);
        let frames = run_blocking(&mut state);
        log::info!("render loop finished after {frames} frames");

        Ok(0)
    }
}

/// winit event loop driven by explicit pumping, used as the loop's event source.
struct EventPump {
    event_loop: EventLoop<()>,
    handler: PumpHandler,
}

struct PumpHandler {
    attributes: WindowAttributes,
    window: Option<Arc<Window>>,
    error: Option<anyhow::Error>,
    queue: VecDeque<LoopEvent>,
}

impl EventPump {
    fn new(event_loop: EventLoop<()>, attributes: WindowAttributes) -> Self {
        Self {
            event_loop,
            handler: PumpHandler {
                attributes,
                window: None,
                error: None,
                queue: VecDeque::new(),
            },
        }
    }

    fn pump_with(&mut self, timeout: Duration) -> PumpStatus {
        self.event_loop
            .pump_app_events(Some(timeout), &mut self.handler)
    }

    /// Pumps until `resumed` has created the window.
    fn wait_for_window(&mut self) -> Result<Arc<Window>> {
        for _ in 0..WINDOW_WAIT_ROUNDS {
            let status = self.pump_with(WINDOW_WAIT_TIMEOUT);

            if let Some(err) = self.handler.error.take() {
                return Err(err);
            }
            if let Some(window) = &self.handler.window {
                return Ok(window.clone());
            }
            if let PumpStatus::Exit(code) = status {
                anyhow::bail!("event loop exited with status {code} before a window was created");
            }
        }

        anyhow::bail!("timed out waiting for the window to be created")
    }
}

impl EventSource for EventPump {
    fn pump(&mut self) {
        if let PumpStatus::Exit(code) = self.pump_with(Duration::ZERO) {
            log::debug!("event loop exited with status {code}");
            self.handler.queue.push_back(LoopEvent::Quit);
        }
    }

    fn poll_event(&mut self) -> Option<LoopEvent> {
        self.handler.queue.pop_front()
    }
}

impl ApplicationHandler for PumpHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        match event_loop.create_window(self.attributes.clone()) {
            Ok(window) => self.window = Some(Arc::new(window)),
            Err(err) => {
                self.error = Some(anyhow::Error::new(err).context("failed to create window"));
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
        let event = translate_window_event(&event);
        if event.is_quit() {
            event_loop.exit();
        }
        self.queue.push_back(event);
    }
}
