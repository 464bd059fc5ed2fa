//! External command execution.
//!
//! Commands run as child processes with stdin closed and stdout/stderr
//! captured. Every run is bounded by a timeout; the child is killed when the
//! timeout fires or when the awaiting future is dropped.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

/// Default bound on a single command run.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(60);

/// Errors from running an external command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The process could not be started.
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The process exited unsuccessfully.
    #[error("{program} failed with status {status}\nstderr: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },

    /// The process did not finish within the configured bound.
    #[error("{program} timed out after {}s", timeout.as_secs_f64())]
    TimedOut { program: String, timeout: Duration },

    /// Waiting for the process failed.
    #[error("failed to wait for {program}: {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// How commands are run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecConfig {
    /// Upper bound on a single run.
    pub timeout: Duration,

    /// Working directory for the child, or the server's own when `None`.
    pub working_dir: Option<PathBuf>,
}

impl Default for ExecConfig {
    fn default() -> Self {
        ExecConfig {
            timeout: DEFAULT_COMMAND_TIMEOUT,
            working_dir: None,
        }
    }
}

/// Runs `program` with `args` and returns its standard output.
///
/// Output is decoded lossily as UTF-8. A nonzero exit, a kill by signal, a
/// spawn failure and a timeout are all errors.
pub async fn run_command(
    program: &Path,
    args: &[&str],
    config: &ExecConfig,
) -> Result<String, CommandError> {
    let program_name = program.display().to_string();

    let mut command = Command::new(program);
    command.kill_on_drop(true);
    command.args(args);
    command.stdin(Stdio::null());
    command.stdout(Stdio::piped());
    command.stderr(Stdio::piped());
    if let Some(dir) = &config.working_dir {
        command.current_dir(dir);
    }

    debug!(program = %program_name, ?args, "Spawning command");

    let child = command.spawn().map_err(|source| CommandError::Spawn {
        program: program_name.clone(),
        source,
    })?;

    let output = tokio::time::timeout(config.timeout, child.wait_with_output())
        .await
        .map_err(|_| CommandError::TimedOut {
            program: program_name.clone(),
            timeout: config.timeout,
        })?
        .map_err(|source| CommandError::Wait {
            program: program_name.clone(),
            source,
        })?;

    if !output.status.success() {
        let status = output
            .status
            .code()
            .map(|code| code.to_string())
            .unwrap_or_else(|| "signal".to_string());
        return Err(CommandError::Failed {
            program: program_name,
            status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
