//! userparam: user-defined metrics backed by shell commands.
//!
//! A user parameter maps a metric key to a command template. Requests for
//! the key run the command, with request parameters substituted for
//! `$1`..`$9` under a character-safety policy, optionally from one of a list
//! of script directories, under a time budget. The command's output is the
//! metric value.
//!
//! ```no_run
//! use userparam::metrics::MetricRegistry;
//! use userparam::plugin::{UserParameterOptions, UserParameters};
//!
//! let mut metrics = MetricRegistry::new();
//! let params = UserParameters::initialize(
//!     &["mycheck[*],echo $1 $2"],
//!     UserParameterOptions::default(),
//!     &mut metrics,
//! )?;
//! let value = params.export("mycheck", &["a", "b"])?;
//! assert_eq!(value, b"a b");
//! # Ok::<(), userparam::Error>(())
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod key;
pub mod logging;
pub mod metrics;
pub mod plugin;

pub use error::{Error, Result};
