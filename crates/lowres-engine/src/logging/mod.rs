//! Logging setup.
//!
//! Engine code logs through the `log` facade only; the binary decides when to
//! install the `env_logger` backend.

mod init;

pub use init::{init_logging, LoggingConfig};
