//! GitHub API error type.
//!
//! Failures are reported once and never retried, so the error only carries
//! what a caller needs to report it: the HTTP status when GitHub answered, a
//! message, and the underlying octocrab error.

use std::fmt;
use thiserror::Error;

/// A GitHub API error.
#[derive(Debug, Error)]
pub struct GitHubApiError {
    /// The HTTP status code, if GitHub returned an error response.
    pub status_code: Option<u16>,

    /// A human-readable description of the error.
    pub message: String,

    /// The underlying octocrab error, if available.
    #[source]
    pub source: Option<octocrab::Error>,
}

impl fmt::Display for GitHubApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status_code {
            Some(code) => write!(f, "GitHub API error (HTTP {}): {}", code, self.message),
            None => write!(f, "GitHub API error: {}", self.message),
        }
    }
}

impl GitHubApiError {
    /// Wraps an octocrab error, keeping GitHub's own message when there is one.
    pub fn from_octocrab(err: octocrab::Error) -> Self {
        let (status_code, message) = match &err {
            octocrab::Error::GitHub { source, .. } => {
                (Some(source.status_code.as_u16()), source.message.clone())
            }
            other => (None, headline(&other.to_string())),
        };
        Self {
            status_code,
            message,
            source: Some(err),
        }
    }

    /// Creates an error without an octocrab source.
    pub fn without_source(message: impl Into<String>) -> Self {
        Self {
            status_code: None,
            message: message.into(),
            source: None,
        }
    }
}

/// First line of an error message.
///
/// octocrab appends a backtrace to its `Display` output when backtraces are
/// enabled; that must not reach HTTP responses or logs.
fn headline(message: &str) -> String {
    message.lines().next().unwrap_or_default().trim_end().to_string()
}
