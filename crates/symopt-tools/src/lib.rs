//! Diagnostics helpers for symopt.
//!
//! Structured logging setup driven by `SYMOPT_TRACE`, `SYMOPT_LOG_FORMAT` and
//! `SYMOPT_LOG_FILE`.

pub mod logging;

pub use logging::{LogFormat, LoggingConfig, LoggingError, enable_logging};
