//! Window + runtime hosts.
//!
//! Owns the `winit` event loop and window and wires them to the surface,
//! the renderer and the render loop driver.
//!
//! - native: [`Runtime::run`] pumps winit from a blocking loop
//! - web: [`Runtime::spawn`] hands the loop to the browser's animation frames

mod config;
#[cfg(not(target_arch = "wasm32"))]
mod native;
mod translate;
#[cfg(target_arch = "wasm32")]
mod web;

pub use config::RuntimeConfig;
pub use translate::translate_window_event;

/// Entry point for the runtime.
pub struct Runtime;
