//! Process configuration.
//!
//! Every setting is a command-line flag that falls back to a `SINK_*`
//! environment variable. Values that parse but do not make sense together are
//! rejected by [`Config::validate`] before the server starts.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use crate::commands::{DEFAULT_COMMAND_TIMEOUT, ExecConfig};

/// Errors from validating configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// No webhook secret and verification was not explicitly disabled.
    #[error(
        "SINK_WEBHOOK_SECRET is required; set SINK_SKIP_SIGNATURE_VERIFICATION=true to accept unsigned webhooks"
    )]
    MissingWebhookSecret,

    /// The access token is empty.
    #[error("SINK_REPO_ACCESS_TOKEN must not be empty")]
    EmptyAccessToken,

    /// The command timeout is zero.
    #[error("SINK_COMMAND_TIMEOUT_SECS must be greater than zero")]
    ZeroTimeout,
}

/// Runs commands named in GitHub comments and posts their output back.
#[derive(Debug, Clone, Parser)]
#[command(name = "sink", version, about)]
pub struct Config {
    /// HMAC secret shared with the GitHub webhook.
    #[arg(long, env = "SINK_WEBHOOK_SECRET", hide_env_values = true)]
    pub webhook_secret: Option<String>,

    /// Accept webhooks without a signature when no secret is set.
    #[arg(long, env = "SINK_SKIP_SIGNATURE_VERIFICATION")]
    pub skip_signature_verification: bool,

    /// GitHub token used to post comments.
    #[arg(long, env = "SINK_REPO_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: String,

    /// Remote to clone at startup; commands run inside the clone.
    #[arg(long, env = "SINK_REPO_REMOTE")]
    pub repo_remote: Option<String>,

    /// Directory the clone is placed in.
    #[arg(long, env = "SINK_WORKDIR", default_value = ".")]
    pub workdir: PathBuf,

    /// Command map file. Without one, prefixed comments are echoed back.
    #[arg(long, env = "SINK_COMMAND_MAP")]
    pub command_map: Option<PathBuf>,

    /// Prefix the echo responder answers to.
    #[arg(long, env = "SINK_ECHO_PREFIX", default_value = "sink: ")]
    pub echo_prefix: String,

    /// Address to listen on.
    #[arg(long, env = "SINK_LISTEN_ADDR", default_value = "0.0.0.0:8888")]
    pub listen_addr: SocketAddr,

    /// Upper bound on a single command run, in seconds.
    #[arg(
        long,
        env = "SINK_COMMAND_TIMEOUT_SECS",
        default_value_t = DEFAULT_COMMAND_TIMEOUT.as_secs()
    )]
    pub command_timeout_secs: u64,

    /// GitHub API base URL, for GitHub Enterprise.
    #[arg(long, env = "SINK_GITHUB_API_URL")]
    pub github_api_url: Option<String>,
}

impl Config {
    /// Checks settings that clap cannot check on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.webhook_secret().is_none() && !self.skip_signature_verification {
            return Err(ConfigError::MissingWebhookSecret);
        }
        if self.access_token.trim().is_empty() {
            return Err(ConfigError::EmptyAccessToken);
        }
        if self.command_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    /// The webhook secret, treating an empty value as unset.
    ///
    /// A configured secret is always enforced, even when the skip flag is set.
    pub fn webhook_secret(&self) -> Option<&[u8]> {
        self.webhook_secret
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::as_bytes)
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }

    /// How commands are run, given the clone directory if there is one.
    pub fn exec_config(&self, working_dir: Option<PathBuf>) -> ExecConfig {
        ExecConfig {
            timeout: self.command_timeout(),
            working_dir,
        }
    }
}
