//! GitHub webhook payload parser.
//!
//! This module parses raw webhook JSON payloads into typed [`GitHubEvent`] values.
//!
//! # Parsing Strategy
//!
//! 1. The event type is determined from the `X-GitHub-Event` header
//! 2. The payload is parsed according to the event type
//! 3. Unknown event types return `Ok(None)` (ignored, not error)
//! 4. Malformed payloads return `Err` with details

use serde::Deserialize;
use thiserror::Error;

use crate::types::{CommentId, IssueNumber, RepoId};

use super::events::{CommentAction, GitHubEvent, IssueCommentEvent};

/// Error type for webhook parsing failures.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON deserialization failed (includes missing required fields).
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Parses a webhook payload into a typed event.
///
/// # Returns
///
/// * `Ok(Some(event))` - Successfully parsed a known event type
/// * `Ok(None)` - Unknown event type (ignored, not an error)
/// * `Err(e)` - Malformed payload or missing required fields
///
/// # Examples
///
/// ```
/// use sink::webhooks::{GitHubEvent, parse_webhook};
///
/// let payload = br#"{
///     "action": "created",
///     "comment": { "id": 123, "body": "sink: echo hi", "user": { "login": "octocat" } },
///     "issue": { "number": 42 },
///     "repository": { "owner": { "login": "owner" }, "name": "repo" }
/// }"#;
///
/// let event = parse_webhook("issue_comment", payload).unwrap();
/// assert!(matches!(event, Some(GitHubEvent::IssueComment(_))));
///
/// assert!(parse_webhook("push", b"{}").unwrap().is_none());
/// ```
pub fn parse_webhook(event_type: &str, payload: &[u8]) -> Result<Option<GitHubEvent>, ParseError> {
    match event_type {
        "issue_comment" => parse_issue_comment(payload).map(|e| Some(GitHubEvent::IssueComment(e))),
        // Unknown event types are ignored (not an error)
        _ => Ok(None),
    }
}

#[derive(Debug, Deserialize)]
struct RawRepository {
    owner: RawOwner,
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawOwner {
    login: String,
}

#[derive(Debug, Deserialize)]
struct RawUser {
    login: String,
}

#[derive(Debug, Deserialize)]
struct RawIssueCommentPayload {
    action: String,
    comment: RawComment,
    issue: RawIssue,
    repository: RawRepository,
}

#[derive(Debug, Deserialize)]
struct RawComment {
    id: Option<u64>,
    body: Option<String>,
    user: Option<RawUser>,
}

#[derive(Debug, Deserialize)]
struct RawIssue {
    number: u64,
    // If this field is present, the issue is actually a PR
    pull_request: Option<serde_json::Value>,
}

fn parse_issue_comment(payload: &[u8]) -> Result<IssueCommentEvent, ParseError> {
    let raw: RawIssueCommentPayload = serde_json::from_slice(payload)?;

    Ok(IssueCommentEvent {
        repo: RepoId::new(raw.repository.owner.login, raw.repository.name),
        action: CommentAction::from_api_str(&raw.action),
        issue_number: IssueNumber(raw.issue.number),
        is_pull_request: raw.issue.pull_request.is_some(),
        comment_id: raw.comment.id.map(CommentId),
        body: raw.comment.body.unwrap_or_default(),
        author_login: raw.comment.user.map(|u| u.login),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_issue_comment_created_on_pr() {
        let payload = r#"{
            "action": "created",
            "comment": {
                "id": 12345,
                "body": "sink: echo hello",
                "user": { "id": 100, "login": "octocat" }
            },
            "issue": {
                "number": 42,
                "pull_request": { "url": "https://api.github.com/repos/owner/repo/pulls/42" }
            },
            "repository": {
                "owner": { "login": "myorg" },
                "name": "myrepo"
            }
        }"#;

        let event = parse_webhook("issue_comment", payload.as_bytes())
            .unwrap()
            .expect("should parse");

        let GitHubEvent::IssueComment(e) = event;
        assert_eq!(e.repo, RepoId::new("myorg", "myrepo"));
        assert_eq!(e.action, CommentAction::Created);
        assert_eq!(e.issue_number, IssueNumber(42));
        assert!(e.is_pull_request);
        assert_eq!(e.comment_id, Some(CommentId(12345)));
        assert_eq!(e.body, "sink: echo hello");
        assert_eq!(e.author_login.as_deref(), Some("octocat"));
    }

    #[test]
    fn parse_issue_comment_on_plain_issue() {
        let payload = r#"{
            "action": "edited",
            "comment": { "body": "hello" },
            "issue": { "number": 7 },
            "repository": { "owner": { "login": "o" }, "name": "r" }
        }"#;

        let Some(GitHubEvent::IssueComment(e)) =
            parse_webhook("issue_comment", payload.as_bytes()).unwrap()
        else {
            panic!("expected IssueComment");
        };
        assert_eq!(e.action, CommentAction::Edited);
        assert!(!e.is_pull_request);
        assert_eq!(e.comment_id, None);
        assert_eq!(e.author_login, None);
    }

    #[test]
    fn parse_issue_comment_null_body_is_empty() {
        let payload = r#"{
            "action": "deleted",
            "comment": { "id": 1, "body": null },
            "issue": { "number": 1 },
            "repository": { "owner": { "login": "o" }, "name": "r" }
        }"#;

        let Some(GitHubEvent::IssueComment(e)) =
            parse_webhook("issue_comment", payload.as_bytes()).unwrap()
        else {
            panic!("expected IssueComment");
        };
        assert_eq!(e.action, CommentAction::Deleted);
        assert_eq!(e.body, "");
    }

    #[test]
    fn parse_issue_comment_unknown_action_is_kept() {
        let payload = r#"{
            "action": "pinned",
            "comment": { "body": "x" },
            "issue": { "number": 1 },
            "repository": { "owner": { "login": "o" }, "name": "r" }
        }"#;

        let Some(GitHubEvent::IssueComment(e)) =
            parse_webhook("issue_comment", payload.as_bytes()).unwrap()
        else {
            panic!("expected IssueComment");
        };
        assert_eq!(e.action, CommentAction::Other("pinned".to_string()));
        assert_eq!(e.action.as_str(), "pinned");
    }

    #[test]
    fn parse_issue_comment_missing_issue_is_error() {
        let payload = r#"{
            "action": "created",
            "comment": { "body": "x" },
            "repository": { "owner": { "login": "o" }, "name": "r" }
        }"#;

        let result = parse_webhook("issue_comment", payload.as_bytes());
        assert!(matches!(result, Err(ParseError::JsonError(_))));
    }

    #[test]
    fn parse_invalid_json_is_error() {
        let result = parse_webhook("issue_comment", b"not json");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_event_types_are_ignored() {
        assert!(parse_webhook("push", b"{}").unwrap().is_none());
        assert!(parse_webhook("ping", b"not even json").unwrap().is_none());
        assert!(parse_webhook("pull_request", b"{}").unwrap().is_none());
    }
}
