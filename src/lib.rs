//! Sink - A GitHub bot that runs commands named in issue and pull request comments.
//!
//! A comment such as `sink: echo hello` arriving by webhook is matched against a
//! command map, the named executable is run, and its output is posted back as a
//! new comment on the same issue.

pub mod commands;
pub mod config;
pub mod git;
pub mod github;
pub mod server;
pub mod types;
pub mod webhooks;

#[cfg(test)]
pub(crate) mod test_utils;
