//! Command implementations for userparam.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, plus the startup shared by all of them: loading the
//! configuration, applying command-line overrides, and initializing the
//! user parameter plugin.

mod check;
mod print;
mod test_cmd;

use crate::cli::{Cli, Command, Overrides};
use crate::config::Config;
use crate::error::Result;
use crate::logging;
use crate::metrics::MetricRegistry;
use crate::plugin::UserParameters;
use std::path::Path;
use tracing::info;

/// Dispatch a command to its implementation.
///
/// This is the main entry point for command execution. Logging is set up
/// once the configuration is known.
pub fn dispatch(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref(), &cli.overrides)?;
    logging::init(logging::level_for_verbosity(
        config.log_level.as_filter(),
        cli.verbose,
    ))?;

    match cli.command {
        Command::Test(args) => test_cmd::cmd_test(&config, args),
        Command::Print(args) => print::cmd_print(&config, args),
        Command::Check => check::cmd_check(&config),
    }
}

/// Load the configuration file (if any) and apply command-line overrides.
pub(crate) fn load_config(path: Option<&Path>, overrides: &Overrides) -> Result<Config> {
    let mut config = match path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Some(timeout) = overrides.timeout {
        config.timeout = timeout;
    }
    if overrides.unsafe_parameters {
        config.unsafe_user_parameters = true;
    }
    if !overrides.locations.is_empty() {
        config.script_locations = overrides.locations.clone();
    }
    config
        .user_parameters
        .extend(overrides.user_parameters.iter().cloned());

    config.validate()?;
    Ok(config)
}

/// Initialize the user parameter plugin from the configuration.
pub(crate) fn build_plugin(config: &Config) -> Result<(MetricRegistry, UserParameters)> {
    let mut metrics = MetricRegistry::new();
    let params = UserParameters::initialize(
        &config.user_parameters,
        config.user_parameter_options(),
        &mut metrics,
    )?;
    info!("initialized {} user parameters", params.len());
    Ok((metrics, params))
}
