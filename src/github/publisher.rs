//! Posting responder output back to GitHub.

use std::future::Future;

use tracing::info;

use crate::types::{IssueNumber, RepoId};
use crate::webhooks::IssueCommentEvent;

use super::client::GitHubClient;
use super::error::GitHubApiError;

/// Posts a reply to the issue an event came from.
///
/// On success returns a one-line summary of what was posted, see
/// [`format_publish_summary`].
pub trait CommentPublisher {
    fn publish(
        &self,
        event: &IssueCommentEvent,
        message: &str,
    ) -> impl Future<Output = Result<String, GitHubApiError>> + Send;
}

/// Formats `<owner> <repo> <number> <quoted message>`.
///
/// # Examples
///
/// ```
/// use sink::github::format_publish_summary;
/// use sink::types::{IssueNumber, RepoId};
///
/// let summary = format_publish_summary(
///     &RepoId::new("octocat", "hello-world"),
///     IssueNumber(42),
///     "hello world\n",
/// );
/// assert_eq!(summary, r#"octocat hello-world 42 "hello world\n""#);
/// ```
pub fn format_publish_summary(repo: &RepoId, issue: IssueNumber, message: &str) -> String {
    format!("{} {} {} {:?}", repo.owner, repo.repo, issue.0, message)
}

impl CommentPublisher for GitHubClient {
    async fn publish(
        &self,
        event: &IssueCommentEvent,
        message: &str,
    ) -> Result<String, GitHubApiError> {
        self.create_issue_comment(&event.repo, event.issue_number, message)
            .await?;
        let summary = format_publish_summary(&event.repo, event.issue_number, message);
        info!(repo = %event.repo, issue = %event.issue_number, "Comment posted");
        Ok(summary)
    }
}
