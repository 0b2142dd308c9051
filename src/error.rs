//! Error types for userparam.
//!
//! Uses thiserror for derive macros. Each failure class is its own enum so
//! callers can tell configuration problems (fatal at startup) apart from
//! per-request parameter and execution failures.

use crate::exit_codes;
use crate::key::KeyError;
use thiserror::Error;

/// A user parameter line could not be registered.
///
/// Raised only while initializing; the whole initialization is abandoned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The line is not of the form `<key>,<command>`.
    #[error("cannot add user parameter \"{line}\": not comma-separated")]
    MalformedLine { line: String },

    /// The key expression is not valid, or its parameters are not `[*]`.
    #[error("cannot add user parameter \"{line}\": {reason}")]
    KeySyntax { line: String, reason: String },

    /// The key is already provided by this or another plugin.
    #[error("cannot register user parameter \"{line}\": key already used")]
    DuplicateKey { line: String, key: String },

    /// The command part is blank.
    #[error("cannot add user parameter \"{line}\": command is missing")]
    EmptyCommand { line: String },
}

/// Caller-supplied parameters were rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParameterError {
    /// A parameter contains a character the shell could interpret.
    #[error("Character {} is not allowed", describe_char(.0))]
    ForbiddenCharacter(char),

    /// Parameters were passed to a key defined without `[*]`.
    #[error("Parameters are not allowed.")]
    ParametersNotAllowed,
}

/// The shell command could not produce a value.
#[derive(Error, Debug)]
pub enum ExecError {
    /// The process could not be started or its output could not be read.
    #[error("Cannot execute command: {0}")]
    Execution(#[source] std::io::Error),

    /// The process outlived its time budget and was killed.
    #[error("Timeout while executing a shell script.")]
    Timeout,

    /// The combined output reached the size limit.
    #[error("Command output exceeded limit of {} KB", .limit / 1024)]
    OutputLimit { limit: usize },
}

/// Main error type for userparam operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error(transparent)]
    Exec(#[from] ExecError),

    /// An item key given on the command line could not be parsed.
    #[error("invalid item key \"{expr}\": {source}")]
    Key {
        expr: String,
        #[source]
        source: KeyError,
    },

    /// The configuration file could not be read, parsed or validated.
    #[error("{0}")]
    ConfigFile(String),

    /// No user parameter is registered under the key.
    #[error("unknown metric \"{0}\"")]
    UnknownKey(String),
}

impl Error {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) | Error::Key { .. } | Error::ConfigFile(_) | Error::UnknownKey(_) => {
                exit_codes::USER_ERROR
            }
            Error::Parameter(_) => exit_codes::PARAMETER_ERROR,
            Error::Exec(ExecError::Timeout) => exit_codes::TIMEOUT,
            Error::Exec(_) => exit_codes::EXECUTION_FAILURE,
        }
    }
}

/// Printable characters are quoted, anything else is shown as a hex code.
fn describe_char(c: &char) -> String {
    if c.is_control() {
        format!("0x{:02x}", u32::from(*c))
    } else {
        format!("\"{}\"", c)
    }
}

/// Result type alias for userparam operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_are_user_errors() {
        let err: Error = ConfigError::EmptyCommand {
            line: "k,".to_string(),
        }
        .into();
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
        assert_eq!(Error::UnknownKey("k".into()).exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn parameter_errors_have_their_own_exit_code() {
        let err: Error = ParameterError::ParametersNotAllowed.into();
        assert_eq!(err.exit_code(), exit_codes::PARAMETER_ERROR);
    }

    #[test]
    fn timeout_is_distinguished_from_execution_failure() {
        let err: Error = ExecError::Timeout.into();
        assert_eq!(err.exit_code(), exit_codes::TIMEOUT);

        let err: Error = ExecError::OutputLimit { limit: 512 * 1024 }.into();
        assert_eq!(err.exit_code(), exit_codes::EXECUTION_FAILURE);
    }

    #[test]
    fn forbidden_character_messages() {
        assert_eq!(
            ParameterError::ForbiddenCharacter(';').to_string(),
            "Character \";\" is not allowed"
        );
        assert_eq!(
            ParameterError::ForbiddenCharacter('\n').to_string(),
            "Character 0x0a is not allowed"
        );
    }

    #[test]
    fn config_error_messages_name_the_line() {
        let err = ConfigError::MalformedLine {
            line: "nocomma".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "cannot add user parameter \"nocomma\": not comma-separated"
        );

        let err = ConfigError::DuplicateKey {
            line: "a,echo".to_string(),
            key: "a".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "cannot register user parameter \"a,echo\": key already used"
        );
    }

    #[test]
    fn exec_error_messages() {
        assert_eq!(
            ExecError::Timeout.to_string(),
            "Timeout while executing a shell script."
        );
        assert_eq!(
            ExecError::OutputLimit { limit: 512 * 1024 }.to_string(),
            "Command output exceeded limit of 512 KB"
        );
    }
}
