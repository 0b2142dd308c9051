//! CLI argument parsing for userparam.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// userparam: run user-defined metrics.
///
/// Each user parameter maps a metric key to a shell command. Keys declared
/// as `key[*]` accept parameters, which are substituted for `$1`..`$9`.
#[derive(Parser, Debug)]
#[command(name = "userparam")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(flatten)]
    pub overrides: Overrides,

    #[command(subcommand)]
    pub command: Command,
}

/// Settings that take precedence over the configuration file.
#[derive(Args, Debug, Default)]
pub struct Overrides {
    /// Command timeout in seconds.
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Allow shell metacharacters in parameters.
    #[arg(long = "unsafe", global = true)]
    pub unsafe_parameters: bool,

    /// Script location to search (repeatable, replaces the configured list).
    #[arg(long = "location", global = true)]
    pub locations: Vec<String>,

    /// Additional user parameter `<key>,<command>` (repeatable).
    #[arg(short = 'u', long = "user-parameter", global = true)]
    pub user_parameters: Vec<String>,
}

/// Available commands for userparam.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one item and print its value.
    ///
    /// The item is a full key, e.g. `mycheck[a,b]`.
    Test(TestArgs),

    /// List the registered user parameters.
    Print(PrintArgs),

    /// Validate the configuration and the user parameter definitions.
    Check,
}

/// Arguments for the `test` command.
#[derive(Parser, Debug)]
pub struct TestArgs {
    /// Item key to run (e.g., `mycheck[a,b]`).
    pub item: String,

    /// Show the command that would be executed without running it.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `print` command.
#[derive(Parser, Debug)]
pub struct PrintArgs {
    /// Print a JSON array instead of text.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
