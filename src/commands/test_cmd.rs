//! Implementation of the `userparam test` command.
//!
//! Runs a single item the way the agent would serve it and prints the
//! result in the agent's test format:
//!
//! ```text
//! mycheck[a,b]                                  [t|a b]
//! mycheck[a;b]                                  [m|ZBX_NOTSUPPORTED] [Character ";" is not allowed]
//! ```

use super::build_plugin;
use crate::cli::TestArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::key::parse_key;
use crate::plugin::UserParameters;

/// Column width the item key is padded to.
const KEY_WIDTH: usize = 46;

/// Execute the `userparam test` command.
pub fn cmd_test(config: &Config, args: TestArgs) -> Result<()> {
    let (_metrics, params) = build_plugin(config)?;

    if args.dry_run {
        let (key, item_params) = split_item(&args.item)?;
        println!("{}", params.command(&key, &item_params)?);
        return Ok(());
    }

    match run_item(&params, &args.item) {
        Ok(output) => {
            println!("{}", format_success(&args.item, &output));
            Ok(())
        }
        Err(err) => {
            println!("{}", format_failure(&args.item, &err));
            Err(err)
        }
    }
}

fn split_item(item: &str) -> Result<(String, Vec<String>)> {
    let key = parse_key(item).map_err(|source| Error::Key {
        expr: item.to_string(),
        source,
    })?;
    Ok((key.name, key.params))
}

/// Parse an item key and serve it.
pub(crate) fn run_item(params: &UserParameters, item: &str) -> Result<Vec<u8>> {
    let (key, item_params) = split_item(item)?;
    params.export(&key, &item_params)
}

pub(crate) fn format_success(item: &str, output: &[u8]) -> String {
    format!(
        "{:<width$}[t|{}]",
        item,
        String::from_utf8_lossy(output),
        width = KEY_WIDTH
    )
}

pub(crate) fn format_failure(item: &str, err: &Error) -> String {
    format!(
        "{:<width$}[m|ZBX_NOTSUPPORTED] [{}]",
        item,
        err,
        width = KEY_WIDTH
    )
}
