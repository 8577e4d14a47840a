//! Window surface + GPU context management.
//!
//! This module is responsible for:
//! - creating the wgpu adapter, device and queue for a window
//! - configuring the swapchain and an optional depth target
//! - acquiring, recording and presenting frames
//!
//! Nothing GPU-side can be created before a [`Surface`] exists: every loader
//! and renderer in this crate takes the surface (or its device) as input.

mod info;
mod init;
mod surface;
mod swapchain;

pub use info::AdapterReport;
pub use init::{ContextProfile, SurfaceRequest, SwapInterval};
pub use surface::Surface;
