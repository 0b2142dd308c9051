//! Config loading, validation, and utility operations.

use super::model::Config;
use super::types::{MAX_TIMEOUT_SECONDS, MIN_TIMEOUT_SECONDS};
use crate::error::{Error, Result};
use crate::plugin::UserParameterOptions;
use std::path::Path;
use std::time::Duration;

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the config file
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(Error::ConfigFile)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::ConfigFile(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| Error::ConfigFile(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigFile(format!("failed to serialize config to YAML: {}", e)))
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `timeout` must be between 1 and 30 seconds
    pub fn validate(&self) -> Result<()> {
        if !(MIN_TIMEOUT_SECONDS..=MAX_TIMEOUT_SECONDS).contains(&self.timeout) {
            return Err(Error::ConfigFile(format!(
                "config validation failed: timeout must be between {} and {} seconds (got {})",
                MIN_TIMEOUT_SECONDS, MAX_TIMEOUT_SECONDS, self.timeout
            )));
        }

        Ok(())
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Startup options for the user parameter plugin.
    pub fn user_parameter_options(&self) -> UserParameterOptions {
        UserParameterOptions {
            unsafe_parameters: self.unsafe_user_parameters,
            script_locations: self.script_locations.clone(),
            timeout: self.timeout_duration(),
        }
    }
}
