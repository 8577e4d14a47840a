//! Render loop driver.
//!
//! The per-frame body is a plain [`FrameBody`] with no knowledge of who calls
//! it. A [`LoopState`] owns the body while it runs and drops it on quit; the
//! hosts in [`host`] decide how often `tick` is invoked:
//!
//! - [`run_blocking`]: native unbounded loop on the calling thread
//! - [`run_hosted`]: registers the tick once with an external scheduler
//!   (e.g. the browser's animation-frame loop)

mod event;
mod frame_loop;
pub mod host;
mod state;

pub use event::{EventQueue, EventSource, LoopEvent};
pub use frame_loop::FrameLoop;
pub use host::{run_blocking, run_hosted, HostScheduler};
pub use state::{FrameBody, LoopControl, LoopState, LoopStatus};
