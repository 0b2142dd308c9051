//! Log output for the userparam CLI.
//!
//! Logs go to stderr so that stdout carries only metric values.

use crate::error::{Error, Result};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over `default_level`.
pub fn init(default_level: &str) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .try_init()
        .map_err(|e| Error::ConfigFile(format!("log system initialization failed: {}", e)))
}

/// Pick the filter for `-v` flags: none keeps the configured level.
pub fn level_for_verbosity(configured: &'static str, verbose: u8) -> &'static str {
    match verbose {
        0 => configured,
        1 => "debug",
        _ => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for_verbosity("warn", 0), "warn");
        assert_eq!(level_for_verbosity("warn", 1), "debug");
        assert_eq!(level_for_verbosity("info", 3), "trace");
    }
}
