//! Local git operations.
//!
//! The bot keeps one local clone of its source repository so that commands can
//! run against a checkout. The clone is made once at startup and never
//! updated; an existing directory is left as it is.

use std::path::{Path, PathBuf};
use std::process::Output;

use thiserror::Error;
use tracing::info;

/// Errors from git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// Git command failed.
    #[error("git command failed: {command}\nstderr: {stderr}")]
    CommandFailed { command: String, stderr: String },

    /// No directory name can be derived from the remote.
    #[error("cannot derive a directory name from remote {remote:?}")]
    InvalidRemote { remote: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for git operations.
pub type GitResult<T> = Result<T, GitError>;

/// Create a git Command with a clean environment.
///
/// System and global config are ignored and terminal prompts are disabled, so
/// a missing credential fails instead of hanging.
pub(crate) fn git_command(workdir: &Path) -> std::process::Command {
    use std::process::Command;

    let mut cmd = Command::new("git");
    cmd.current_dir(workdir);

    cmd.env("GIT_CONFIG_NOSYSTEM", "1");
    cmd.env("GIT_CONFIG_GLOBAL", "/dev/null");
    cmd.env("GIT_TERMINAL_PROMPT", "0");

    cmd
}

/// Run a git command synchronously, failing on a nonzero exit.
pub fn run_git_sync(workdir: &Path, args: &[&str]) -> GitResult<Output> {
    let output = git_command(workdir).args(args).output()?;

    if output.status.success() {
        Ok(output)
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        let command = format!("git {}", args.join(" "));
        Err(GitError::CommandFailed { command, stderr })
    }
}

/// Directory name `git clone` would pick for `remote`.
///
/// This is the last path component with any `.git` suffix removed. Both URL
/// and scp-style (`git@host:owner/repo.git`) remotes are accepted.
///
/// # Examples
///
/// ```
/// use sink::git::repo_dir_name;
///
/// assert_eq!(repo_dir_name("https://github.com/octocat/hello-world.git").as_deref(), Some("hello-world"));
/// assert_eq!(repo_dir_name("git@github.com:octocat/hello-world").as_deref(), Some("hello-world"));
/// assert_eq!(repo_dir_name("https://github.com/"), None);
/// ```
pub fn repo_dir_name(remote: &str) -> Option<String> {
    let trimmed = remote.trim().trim_end_matches('/');
    let base = trimmed
        .rsplit(['/', ':'])
        .next()
        .unwrap_or(trimmed);
    let name = base.strip_suffix(".git").unwrap_or(base);

    match name {
        "" | "." | ".." => None,
        _ => Some(name.to_string()),
    }
}

/// Clones `remote` into `workdir`, unless the target directory already exists.
///
/// Returns the path of the clone. `workdir` is created if missing.
pub fn clone_if_absent(remote: &str, workdir: &Path) -> GitResult<PathBuf> {
    let name = repo_dir_name(remote).ok_or_else(|| GitError::InvalidRemote {
        remote: remote.to_string(),
    })?;
    let target = workdir.join(&name);

    if target.exists() {
        info!(path = %target.display(), "Repository directory exists; skipping clone");
        return Ok(target);
    }

    std::fs::create_dir_all(workdir)?;
    info!(path = %target.display(), "Cloning repository");
    run_git_sync(workdir, &["clone", "--quiet", "--", remote, &name])?;

    Ok(target)
}
