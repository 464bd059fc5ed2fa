//! Octocrab client wrapper.
//!
//! The bot answers comments in whichever repository the webhook came from,
//! so unlike a repo-scoped client every call names its repository.

use octocrab::Octocrab;
use tracing::debug;

use crate::types::{IssueNumber, RepoId};

use super::error::GitHubApiError;

/// A GitHub API client authenticated with a bearer token.
#[derive(Clone)]
pub struct GitHubClient {
    client: Octocrab,
}

impl GitHubClient {
    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Creates a client from a personal access token.
    ///
    /// `base_url` overrides the API root (for GitHub Enterprise); `None` uses
    /// `https://api.github.com`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn from_token(
        token: impl Into<String>,
        base_url: Option<&str>,
    ) -> Result<Self, octocrab::Error> {
        let token: String = token.into();
        let mut builder = Octocrab::builder().personal_token(token);
        if let Some(url) = base_url {
            builder = builder.base_uri(url)?;
        }
        Ok(Self::new(builder.build()?))
    }

    /// Posts a new comment on an issue or pull request.
    pub async fn create_issue_comment(
        &self,
        repo: &RepoId,
        issue: IssueNumber,
        body: &str,
    ) -> Result<(), GitHubApiError> {
        debug!(repo = %repo, issue = %issue, "Posting comment");
        self.client
            .issues(&repo.owner, &repo.repo)
            .create_comment(issue.0, body)
            .await
            .map(|_| ())
            .map_err(GitHubApiError::from_octocrab)
    }
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient").finish_non_exhaustive()
    }
}
