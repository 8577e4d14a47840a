//! Layer-stack demo: the triangle as a regular layer plus a frame statistics overlay.

mod stats;

use anyhow::Result;

use kiln_engine::core::{EventFlow, Layer, LayerStack, StaticDrawLayer};
use kiln_engine::logging::{init_logging, LoggingConfig};
use kiln_engine::program::triangle;
use kiln_engine::render::{FrameTarget, Renderer};
use kiln_engine::runtime::LoopEvent;
use kiln_engine::time::FrameTime;
use kiln_engine::window::{Runtime, RuntimeConfig};

use stats::FrameStatsLayer;

/// Application layer: forwards its lifecycle and drawing to an inner layer and
/// logs window changes.
struct ExampleLayer {
    inner: Box<dyn Layer>,
}

impl ExampleLayer {
    fn new(inner: impl Layer + 'static) -> Self {
        Self {
            inner: Box::new(inner),
        }
    }
}

impl Layer for ExampleLayer {
    fn name(&self) -> &str {
        "example"
    }

    fn on_attach(&mut self) {
        self.inner.on_attach();
    }

    fn on_detach(&mut self) {
        self.inner.on_detach();
    }

    fn on_event(&mut self, event: &LoopEvent) -> EventFlow {
        match event {
            LoopEvent::Resized { width, height } => {
                log::info!("window resized to {width}x{height}");
                EventFlow::Continue
            }
            LoopEvent::Focused(focused) => {
                log::debug!("focus: {focused}");
                EventFlow::Handled
            }
            _ => EventFlow::Continue,
        }
    }

    fn on_update(&mut self, time: FrameTime) {
        self.inner.on_update(time);
    }

    fn on_render(&mut self, target: &mut dyn FrameTarget) {
        self.inner.on_render(target);
    }
}

fn setup(renderer: &mut Renderer) -> Result<LayerStack> {
    let program = renderer.load_program(&triangle::program_desc())?;

    let mut layers = LayerStack::new();
    layers.push_overlay(Box::new(FrameStatsLayer::new(1000)));
    layers.push_layer(Box::new(ExampleLayer::new(StaticDrawLayer::new(
        "triangle",
        program,
        triangle::VERTEX_COUNT,
    ))));
    Ok(layers)
}

fn config() -> RuntimeConfig {
    RuntimeConfig::default().with_title("OpenGL Examples")
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    init_logging(LoggingConfig::default());

    match Runtime::run(config(), setup) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            log::error!("{err:#}");
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    init_logging(LoggingConfig::default());

    if let Err(err) = Runtime::spawn(config(), setup) {
        log::error!("{err:#}");
    }
}
