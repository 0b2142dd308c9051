//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Configuration for user parameters.
///
/// ```yaml
/// timeout: 3
/// unsafe_user_parameters: false
/// script_locations:
///   - /etc/userparam/scripts
/// user_parameters:
///   - "mycheck[*],echo $1 $2"
/// log_level: info
/// ```
///
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seconds a command may run before it is killed.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Allow shell metacharacters in request parameters.
    #[serde(default)]
    pub unsafe_user_parameters: bool,

    /// Directories searched, in order, for the script a command names.
    /// Empty entries are skipped.
    #[serde(default)]
    pub script_locations: Vec<String>,

    /// User parameter definitions, `<key-expression>,<command>`.
    #[serde(default)]
    pub user_parameters: Vec<String>,

    /// Log level used when `RUST_LOG` is not set.
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            unsafe_user_parameters: false,
            script_locations: Vec::new(),
            user_parameters: Vec::new(),
            log_level: LogLevel::default(),
        }
    }
}
