//! Configuration model for userparam.
//!
//! This module defines the Config struct that represents the YAML
//! configuration file. It supports forward-compatible YAML parsing (unknown
//! fields are ignored), sensible defaults for optional fields, and validation
//! of config values.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::Config;
pub use types::{LogLevel, MAX_TIMEOUT_SECONDS, MIN_TIMEOUT_SECONDS};
