//! GitHub webhook event types.
//!
//! Only `issue_comment` events carry commands. Every other event type is
//! acknowledged and ignored by the receiver.

use crate::types::{CommentId, IssueNumber, RepoId};

/// A parsed GitHub webhook event.
///
/// Unknown or irrelevant events are represented by returning `None` from the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitHubEvent {
    /// An issue or PR comment was created, edited, or deleted.
    ///
    /// Note: In GitHub's API, PR comments on the conversation tab are delivered
    /// as `issue_comment` events, not `pull_request_review_comment` events.
    IssueComment(IssueCommentEvent),
}

/// Action performed on an issue comment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CommentAction {
    /// Comment was created.
    Created,
    /// Comment was edited.
    Edited,
    /// Comment was deleted.
    Deleted,
    /// An action GitHub may add later; kept verbatim.
    Other(String),
}

impl CommentAction {
    /// Maps the payload's `action` string.
    pub fn from_api_str(action: &str) -> Self {
        match action {
            "created" => CommentAction::Created,
            "edited" => CommentAction::Edited,
            "deleted" => CommentAction::Deleted,
            other => CommentAction::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CommentAction::Created => "created",
            CommentAction::Edited => "edited",
            CommentAction::Deleted => "deleted",
            CommentAction::Other(s) => s,
        }
    }
}

/// An issue/PR comment event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueCommentEvent {
    /// The repository.
    pub repo: RepoId,

    /// The action that triggered this event.
    pub action: CommentAction,

    /// The issue (or pull request) the comment was posted on.
    pub issue_number: IssueNumber,

    /// True when the issue is a pull request.
    pub is_pull_request: bool,

    /// The comment ID, when present in the payload.
    pub comment_id: Option<CommentId>,

    /// The comment body text. Empty if GitHub sent `null`.
    pub body: String,

    /// The comment author's login name, when present in the payload.
    pub author_login: Option<String>,
}
