//! User parameter definitions and request handling.
//!
//! [`UserParameters`] is built once from configuration lines of the form
//! `<key-expression>,<command>` and is read-only afterwards. It is an
//! ordinary value owned by the host, so any number of threads can serve
//! requests through `&UserParameters` without locking.

use super::executor::{CommandExecutor, ProcessRunner};
use super::resolver::ScriptResolver;
use super::template::Template;
use crate::error::{ConfigError, Error, ParameterError, Result};
use crate::key::parse_key;
use crate::metrics::MetricRegistry;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Plugin name under which user parameters are announced.
pub const PLUGIN_NAME: &str = "UserParameter";

/// Default command timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Number of output bytes shown in debug logs.
const OUTPUT_PREVIEW_BYTES: usize = 20;

/// A single configured user parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDefinition {
    key: String,
    template: Template,
    flexible: bool,
}

impl ParameterDefinition {
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The command template as configured.
    pub fn template(&self) -> &str {
        self.template.source()
    }

    /// Whether the key was declared with `[*]` and accepts parameters.
    pub fn is_flexible(&self) -> bool {
        self.flexible
    }

    /// Build the command line for a request.
    pub fn command<S: AsRef<str>>(
        &self,
        params: &[S],
        allow_unsafe: bool,
    ) -> std::result::Result<String, ParameterError> {
        if !self.flexible {
            if !params.is_empty() {
                return Err(ParameterError::ParametersNotAllowed);
            }
            return Ok(self.template.source().to_string());
        }

        self.template.render(params, allow_unsafe)
    }
}

/// Startup options for user parameters.
#[derive(Debug, Clone)]
pub struct UserParameterOptions {
    /// Allow shell metacharacters in request parameters.
    pub unsafe_parameters: bool,
    /// Directories searched, in order, for the script a command names.
    pub script_locations: Vec<String>,
    /// Time budget for each command.
    pub timeout: Duration,
}

impl Default for UserParameterOptions {
    fn default() -> Self {
        Self {
            unsafe_parameters: false,
            script_locations: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// The user parameter plugin: definitions plus the settings used to serve them.
#[derive(Debug)]
pub struct UserParameters {
    definitions: HashMap<String, ParameterDefinition>,
    unsafe_parameters: bool,
    resolver: ScriptResolver,
    executor: CommandExecutor,
    timeout: Duration,
}

impl UserParameters {
    /// Parse configuration lines and register their keys.
    ///
    /// Lines are processed in order and the first invalid line aborts
    /// initialization. Keys are announced to `metrics` only after every line
    /// has been accepted, so a failure leaves `metrics` untouched.
    pub fn initialize<S: AsRef<str>>(
        lines: &[S],
        options: UserParameterOptions,
        metrics: &mut MetricRegistry,
    ) -> std::result::Result<Self, ConfigError> {
        let mut definitions: HashMap<String, ParameterDefinition> = HashMap::new();
        let mut announcements = Vec::with_capacity(lines.len());

        for line in lines.iter().map(AsRef::as_ref) {
            let definition = parse_line(line, |key| {
                definitions.contains_key(key) || metrics.contains(key)
            })?;
            announcements.push((
                definition.key.clone(),
                format!("User parameter: {}.", definition.template()),
                line.to_string(),
            ));
            definitions.insert(definition.key.clone(), definition);
        }

        for (key, description, line) in announcements {
            metrics
                .register(&key, PLUGIN_NAME, &description)
                .map_err(|_| ConfigError::DuplicateKey {
                    line,
                    key: key.clone(),
                })?;
            debug!("registered user parameter '{}'", key);
        }

        Ok(Self {
            definitions,
            unsafe_parameters: options.unsafe_parameters,
            resolver: ScriptResolver::new(options.script_locations),
            executor: CommandExecutor::default(),
            timeout: options.timeout,
        })
    }

    /// Replace the process runner used to execute commands.
    pub fn with_runner(mut self, runner: impl ProcessRunner + 'static) -> Self {
        self.executor = CommandExecutor::new(runner);
        self
    }

    pub fn definition(&self, key: &str) -> Option<&ParameterDefinition> {
        self.definitions.get(key)
    }

    /// Registered keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<_> = self.definitions.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn unsafe_parameters(&self) -> bool {
        self.unsafe_parameters
    }

    pub fn script_locations(&self) -> &[String] {
        self.resolver.locations()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Build the command line a request would execute, without running it.
    pub fn command<S: AsRef<str>>(&self, key: &str, params: &[S]) -> Result<String> {
        let definition = self
            .definitions
            .get(key)
            .ok_or_else(|| Error::UnknownKey(key.to_string()))?;
        let command = definition.command(params, self.unsafe_parameters)?;
        Ok(self.resolver.resolve(&command))
    }

    /// Serve a request: run the command for `key` with `params` and return its output.
    pub fn export<S: AsRef<str>>(&self, key: &str, params: &[S]) -> Result<Vec<u8>> {
        let command = self.command(key, params)?;

        debug!("executing command:'{}'", command);
        let output = self.executor.execute(&command, self.timeout)?;

        let preview = &output[..output.len().min(OUTPUT_PREVIEW_BYTES)];
        debug!(
            "command:'{}' length:{} output:'{}'",
            command,
            output.len(),
            String::from_utf8_lossy(preview)
        );

        Ok(output)
    }
}

/// Parse one `<key-expression>,<command>` line.
///
/// `is_taken` reports whether a key is already registered.
fn parse_line(
    line: &str,
    is_taken: impl Fn(&str) -> bool,
) -> std::result::Result<ParameterDefinition, ConfigError> {
    let (key_expr, command) = match line.split_once(',') {
        Some((key_expr, command)) if !key_expr.is_empty() && !command.is_empty() => {
            (key_expr, command)
        }
        _ => {
            return Err(ConfigError::MalformedLine {
                line: line.to_string(),
            });
        }
    };

    let key = parse_key(key_expr).map_err(|e| ConfigError::KeySyntax {
        line: line.to_string(),
        reason: e.to_string(),
    })?;

    if is_taken(&key.name) {
        return Err(ConfigError::DuplicateKey {
            line: line.to_string(),
            key: key.name,
        });
    }

    if command.trim().is_empty() {
        return Err(ConfigError::EmptyCommand {
            line: line.to_string(),
        });
    }

    let flexible = match key.params.as_slice() {
        [] => false,
        [only] if only == "*" => true,
        _ => {
            return Err(ConfigError::KeySyntax {
                line: line.to_string(),
                reason: "syntax error".to_string(),
            });
        }
    };

    Ok(ParameterDefinition {
        key: key.name,
        template: Template::compile(command),
        flexible,
    })
}
