//! The user parameter plugin.
//!
//! This module provides:
//!
//! - **Template**: `$1`..`$9` substitution with the parameter safety check
//! - **Resolver**: script location probing
//! - **Executor**: shell execution with a time budget
//! - **Registry**: definitions built from configuration lines, and the
//!   request entry point [`UserParameters::export`]
//!
//! A request flows through all four: the key's definition is looked up, its
//! template rendered with the request parameters, the result resolved
//! against the script locations, and the final command line executed.

pub mod executor;
mod registry;
pub mod resolver;
mod template;

pub use executor::{CommandExecutor, MAX_OUTPUT_BYTES, ProcessRunner, ShellRunner};
pub use registry::{
    DEFAULT_TIMEOUT, PLUGIN_NAME, ParameterDefinition, UserParameterOptions, UserParameters,
};
pub use resolver::{ScriptResolver, resolve};
pub use template::{FORBIDDEN_CHARACTERS, Segment, Template, check_parameter, substitute};
