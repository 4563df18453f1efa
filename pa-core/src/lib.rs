//! PurpleAir Core - Foundation types, error handling, configuration, and logging.
//!
//! This crate provides the shared foundation used by the API client crate:
//! - Client configuration (base URL, timeouts, credential header names)
//! - The error taxonomy separating local validation from remote failures
//! - Structured logging with tracing
//! - Common constants

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;

// Re-export commonly used items at the crate root
pub use config::{ClientConfig, Config};
pub use error::{ApiFailure, FailureKind, KeyKind, PaError, PaResult};
pub use logging::init_logging;
