//! Implementation of the `userparam check` command.

use super::build_plugin;
use crate::config::Config;
use crate::error::Result;
use crate::plugin::UserParameters;

/// Execute the `userparam check` command.
///
/// Initialization fails on the first invalid line, so reaching the summary
/// means every definition was accepted.
pub fn cmd_check(config: &Config) -> Result<()> {
    let (_metrics, params) = build_plugin(config)?;
    println!("{}", summary(&params));
    Ok(())
}

fn summary(params: &UserParameters) -> String {
    let flexible = params
        .keys()
        .into_iter()
        .filter_map(|key| params.definition(key))
        .filter(|d| d.is_flexible())
        .count();

    format!(
        "configuration OK: {} user parameters ({} flexible), {} script locations, timeout {}s{}",
        params.len(),
        flexible,
        params.script_locations().len(),
        params.timeout().as_secs(),
        if params.unsafe_parameters() {
            ", unsafe parameters allowed"
        } else {
            ""
        }
    )
}
