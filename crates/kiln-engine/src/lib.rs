//! Kiln engine crate.
//!
//! Window and GPU bootstrap, shader program loading, frame pacing and a
//! host-agnostic render loop.

pub mod core;
pub mod device;
pub mod logging;
pub mod program;
pub mod render;
pub mod runtime;
pub mod time;
pub mod window;
