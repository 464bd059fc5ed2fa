//! Prefix-based command dispatch.
//!
//! A comment is a command when, after trimming, it starts with the registry's
//! global prefix. The text after the prefix is matched against command names
//! in registration order; the first name that is a prefix of it wins. The
//! text after the name, split on whitespace, becomes the argument list.
//!
//! Comments that are not commands are not errors: arbitrary discussion is
//! expected on issues, so non-matches are silently ignored.

use tracing::{debug, info, warn};

use super::exec::{CommandError, ExecConfig, run_command};
use super::registry::{CommandDefinition, CommandRegistry};

/// A resolved command and the arguments to run it with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation<'a> {
    pub command: &'a CommandDefinition,
    pub args: Vec<&'a str>,
}

/// Strips `prefix` from a trimmed comment, returning the trimmed remainder.
///
/// Returns `None` when the comment does not start with the prefix.
///
/// # Examples
///
/// ```
/// use sink::commands::strip_command_prefix;
///
/// assert_eq!(strip_command_prefix("  sink: echo hi \n", "sink: "), Some("echo hi"));
/// assert_eq!(strip_command_prefix("just chatting", "sink: "), None);
/// ```
pub fn strip_command_prefix<'a>(comment: &'a str, prefix: &str) -> Option<&'a str> {
    comment
        .trim()
        .strip_prefix(prefix)
        .map(|rest| rest.trim())
}

/// Resolves a comment to an invocation, without running anything.
pub fn resolve<'a>(registry: &'a CommandRegistry, comment: &'a str) -> Option<Invocation<'a>> {
    let text = strip_command_prefix(comment, registry.prefix())?;
    let command = registry.lookup(text)?;
    let args = text[command.name.len()..].split_whitespace().collect();
    Some(Invocation { command, args })
}

/// Runs commands named in comments, using a validated registry.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: CommandRegistry,
    exec: ExecConfig,
}

impl Dispatcher {
    pub fn new(registry: CommandRegistry, exec: ExecConfig) -> Self {
        Dispatcher { registry, exec }
    }

    /// Dispatches a comment.
    ///
    /// Returns `Ok(None)` when the comment is not a command (wrong prefix or
    /// no matching name), `Ok(Some(stdout))` when a command ran successfully,
    /// and `Err` when it could not be run or exited unsuccessfully.
    pub async fn dispatch(&self, comment: &str) -> Result<Option<String>, CommandError> {
        let Some(invocation) = resolve(&self.registry, comment) else {
            debug!("Comment is not a registered command");
            return Ok(None);
        };

        info!(
            command = %invocation.command.name,
            program = %invocation.command.run.display(),
            args = ?invocation.args,
            "Running command"
        );

        match run_command(&invocation.command.run, &invocation.args, &self.exec).await {
            Ok(output) => Ok(Some(output)),
            Err(e) => {
                warn!(command = %invocation.command.name, error = %e, "Command failed");
                Err(e)
            }
        }
    }
}
