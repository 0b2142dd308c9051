//! Implementation of the `userparam print` command.

use super::build_plugin;
use crate::cli::PrintArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::metrics::{MetricInfo, MetricRegistry};

/// Execute the `userparam print` command.
pub fn cmd_print(config: &Config, args: PrintArgs) -> Result<()> {
    let (metrics, _params) = build_plugin(config)?;

    if args.json {
        println!("{}", render_json(&metrics)?);
    } else {
        for line in render_text(&metrics) {
            println!("{}", line);
        }
    }

    Ok(())
}

fn render_text(metrics: &MetricRegistry) -> Vec<String> {
    metrics
        .iter()
        .map(|m| format!("{}\t{}", m.key, m.description))
        .collect()
}

fn render_json(metrics: &MetricRegistry) -> Result<String> {
    let list: Vec<&MetricInfo> = metrics.iter().collect();
    serde_json::to_string_pretty(&list)
        .map_err(|e| Error::ConfigFile(format!("failed to serialize metrics: {}", e)))
}
