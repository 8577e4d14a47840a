//! Logger setup for kiln binaries.
//!
//! The crate itself only talks to the `log` facade; `env_logger` is wired up
//! here so executables get one consistent initialization path.

mod init;

pub use init::{init_logging, LoggingConfig};
