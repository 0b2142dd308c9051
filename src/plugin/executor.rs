//! Shell command execution with a time budget.
//!
//! [`ShellRunner`] is the process-execution primitive: it runs a command line
//! through `sh -c` in its own process group, with stdout and stderr joined
//! into a single pipe. When the time budget runs out, the whole process group
//! is killed. [`CommandExecutor`] is the thin layer the plugin calls; it hands
//! the command to a [`ProcessRunner`] and passes the output through untouched.

use crate::error::ExecError;
use std::fmt;
use std::io::{self, Read};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Output of this many bytes or more is rejected.
pub const MAX_OUTPUT_BYTES: usize = 512 * 1024;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// How long to wait for the output pipe to close once the process group is killed.
const DRAIN_GRACE: Duration = Duration::from_secs(1);

/// Runs a command line and returns its combined output.
pub trait ProcessRunner: Send + Sync {
    /// Run `command`, killing it if it is still running after `timeout`.
    fn run(&self, command: &str, timeout: Duration) -> Result<Vec<u8>, ExecError>;
}

/// Runs commands through the system shell.
///
/// A non-zero exit status is not an error: whatever the command printed is
/// the result. Trailing spaces, tabs, CR and LF are trimmed from the output.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    output_limit: usize,
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self {
            output_limit: MAX_OUTPUT_BYTES,
        }
    }
}

impl ShellRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject output of `limit` bytes or more instead of [`MAX_OUTPUT_BYTES`].
    pub fn with_output_limit(limit: usize) -> Self {
        Self {
            output_limit: limit,
        }
    }
}

impl ProcessRunner for ShellRunner {
    fn run(&self, command: &str, timeout: Duration) -> Result<Vec<u8>, ExecError> {
        let (reader, writer) = io::pipe().map_err(ExecError::Execution)?;
        let stdout = writer.try_clone().map_err(ExecError::Execution)?;

        let mut shell = shell_command(command);
        shell.stdin(Stdio::null()).stdout(stdout).stderr(writer);
        let spawned = shell.spawn();
        // The parent's copies of the write end must be closed or the reader never sees EOF.
        drop(shell);
        let mut child = spawned.map_err(ExecError::Execution)?;

        let limit = self.output_limit;
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let _ = tx.send(read_output(reader, limit));
        });

        let deadline = Instant::now() + timeout;
        match wait_until(&mut child, deadline) {
            Ok(true) => {}
            Ok(false) => {
                kill_process_group(&mut child);
                let _ = rx.recv_timeout(DRAIN_GRACE);
                return Err(ExecError::Timeout);
            }
            Err(e) => {
                kill_process_group(&mut child);
                return Err(ExecError::Execution(e));
            }
        }

        // Background jobs started by the command keep the pipe open.
        let remaining = deadline.saturating_duration_since(Instant::now());
        let (mut output, total) = match rx.recv_timeout(remaining) {
            Ok(result) => result.map_err(ExecError::Execution)?,
            Err(_) => {
                kill_process_group(&mut child);
                let _ = rx.recv_timeout(DRAIN_GRACE);
                return Err(ExecError::Timeout);
            }
        };

        if total >= limit {
            return Err(ExecError::OutputLimit { limit });
        }

        while let Some(b' ' | b'\t' | b'\r' | b'\n') = output.last() {
            output.pop();
        }

        Ok(output)
    }
}

#[cfg(unix)]
fn shell_command(command: &str) -> Command {
    use std::os::unix::process::CommandExt;

    let mut shell = Command::new("sh");
    shell.arg("-c").arg(command).process_group(0);
    shell
}

#[cfg(not(unix))]
fn shell_command(command: &str) -> Command {
    let mut shell = Command::new("cmd");
    shell.arg("/C").arg(command);
    shell
}

/// Read the pipe to EOF, keeping at most `limit` bytes.
///
/// Returns the kept bytes and the total number of bytes read.
fn read_output(mut reader: impl Read, limit: usize) -> io::Result<(Vec<u8>, usize)> {
    let mut output = Vec::new();
    let mut total = 0;
    let mut buf = [0u8; 8192];

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        total += n;
        let room = limit.saturating_sub(output.len());
        output.extend_from_slice(&buf[..n.min(room)]);
    }

    Ok((output, total))
}

/// Wait for a child process until `deadline`.
///
/// Returns `false` if the process was still running at the deadline.
fn wait_until(child: &mut Child, deadline: Instant) -> io::Result<bool> {
    loop {
        match child.try_wait()? {
            Some(status) => {
                debug!("command exited with {}", status);
                return Ok(true);
            }
            None => {
                let now = Instant::now();
                if now >= deadline {
                    return Ok(false);
                }
                thread::sleep(POLL_INTERVAL.min(deadline - now));
            }
        }
    }
}

/// Kill the child's process group and reap the child.
#[cfg(unix)]
fn kill_process_group(child: &mut Child) {
    let pgid = child.id() as libc::pid_t;
    // SAFETY: kill(2) has no memory-safety preconditions; a negative pid
    // addresses the process group the child leads.
    if unsafe { libc::kill(-pgid, libc::SIGKILL) } != 0 {
        let err = io::Error::last_os_error();
        if err.raw_os_error() != Some(libc::ESRCH) {
            warn!("failed to kill process group {}: {}", pgid, err);
        }
        let _ = child.kill();
    }
    let _ = child.wait();
}

#[cfg(not(unix))]
fn kill_process_group(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

/// Executes resolved command lines for the plugin.
pub struct CommandExecutor {
    runner: Box<dyn ProcessRunner>,
}

impl Default for CommandExecutor {
    fn default() -> Self {
        Self::new(ShellRunner::default())
    }
}

impl fmt::Debug for CommandExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandExecutor").finish_non_exhaustive()
    }
}

impl CommandExecutor {
    pub fn new(runner: impl ProcessRunner + 'static) -> Self {
        Self {
            runner: Box::new(runner),
        }
    }

    /// Run `command` within `timeout` and return its output as produced.
    pub fn execute(&self, command: &str, timeout: Duration) -> Result<Vec<u8>, ExecError> {
        let result = self.runner.run(command, timeout);
        if let Err(ExecError::Timeout) = &result {
            warn!("command '{}' timed out after {:?}", command, timeout);
        }
        result
    }
}
