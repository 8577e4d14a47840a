//! White triangle on a black background, paced at 60 frames per second.

use anyhow::Result;

use kiln_engine::core::{LayerStack, StaticDrawLayer};
use kiln_engine::logging::{init_logging, LoggingConfig};
use kiln_engine::program::triangle;
use kiln_engine::render::Renderer;
use kiln_engine::window::{Runtime, RuntimeConfig};

fn setup(renderer: &mut Renderer) -> Result<LayerStack> {
    let program = renderer.load_program(&triangle::program_desc())?;

    let mut layers = LayerStack::new();
    layers.push_layer(Box::new(StaticDrawLayer::new(
        "triangle",
        program,
        triangle::VERTEX_COUNT,
    )));
    Ok(layers)
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    init_logging(LoggingConfig::default());

    match Runtime::run(RuntimeConfig::default(), setup) {
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

    if let Err(err) = Runtime::spawn(RuntimeConfig::default(), setup) {
        log::error!("{err:#}");
    }
}
