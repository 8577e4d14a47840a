//! Time subsystem.
//!
//! Provides stable, testable frame timing utilities without coupling to the runtime.
//! Intended usage:
//! - one `FramePacer` per render loop
//! - call `pace()` once per frame, before drawing, to obtain `FrameTime`
//!
//! All timestamps are integer milliseconds read from a `TickSource`, so the
//! pacing arithmetic can be driven by a fake clock in tests.

mod frame_clock;
pub(crate) mod pacer;
mod ticks;

pub use frame_clock::{FrameClock, FrameTime};
pub use pacer::{compute_wait_ms, frame_budget_ms, FramePacer, DEFAULT_FPS};
pub use ticks::{SystemTicks, TickSource};
