//! Exit code constants for the userparam CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, config file, user parameter definitions)
//! - 2: Parameter error (forbidden character, parameters not allowed)
//! - 3: Execution failure (command could not run, output too large)
//! - 4: Timeout while executing the command

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, unreadable config, invalid user parameter lines.
pub const USER_ERROR: i32 = 1;

/// Parameter error: caller-supplied parameters violate the safety or arity rules.
pub const PARAMETER_ERROR: i32 = 2;

/// Execution failure: the shell command could not be run or its output was rejected.
pub const EXECUTION_FAILURE: i32 = 3;

/// Timeout: the command exceeded its time budget and was killed.
pub const TIMEOUT: i32 = 4;
