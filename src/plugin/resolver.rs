//! Script location resolution.
//!
//! A command may name a script that lives in one of the configured script
//! directories. Each non-empty directory is tried in order by prefixing it to
//! the command and checking whether the executable part (everything before
//! the first space or tab) exists and is not a directory. The first match
//! wins; if nothing matches, the command is used as written.

use tracing::debug;

/// Resolves commands against an ordered list of script directories.
#[derive(Debug, Clone, Default)]
pub struct ScriptResolver {
    locations: Vec<String>,
}

impl ScriptResolver {
    pub fn new(locations: Vec<String>) -> Self {
        Self { locations }
    }

    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    /// Resolve `command` against the configured locations.
    pub fn resolve(&self, command: &str) -> String {
        resolve(command, &self.locations)
    }
}

/// Pick the command line to execute for `command`.
///
/// Never fails: the unprefixed command is the fallback.
pub fn resolve<S: AsRef<str>>(command: &str, locations: &[S]) -> String {
    for location in locations.iter().map(AsRef::as_ref) {
        if location.is_empty() {
            continue;
        }

        let candidate = format!("{}/{}", location, command);
        let base = base_command(&candidate);

        match std::fs::metadata(base) {
            Err(e) => debug!("cannot stat '{}' ({})", base, e),
            Ok(meta) if meta.is_dir() => debug!("'{}' is not a regular file", base),
            Ok(_) => return candidate,
        }
    }

    command.to_string()
}

/// The executable part of a command line: everything before the first space or tab.
fn base_command(command: &str) -> &str {
    match command.find([' ', '\t']) {
        Some(end) => &command[..end],
        None => command,
    }
}
