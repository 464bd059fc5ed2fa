//! GitHub API client and comment publishing.
//!
//! This module posts responder output back to the issue or pull request a
//! command came from, via the octocrab library. Calls are made once; there
//! is no retry.

mod client;
mod error;
mod publisher;

pub use client::GitHubClient;
pub use error::GitHubApiError;
pub use publisher::{CommentPublisher, format_publish_summary};
