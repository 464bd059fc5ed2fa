//! Shared test utilities: a mock GitHub API and recording test doubles.

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Bytes;
use axum::http::{HeaderMap, StatusCode, Uri, header};
use axum::response::IntoResponse;
use axum::routing::post;
use tokio::net::TcpListener;

use crate::commands::{CommandError, Responder};
use crate::github::{CommentPublisher, GitHubApiError, format_publish_summary};
use crate::types::{CommentId, IssueNumber, RepoId};
use crate::webhooks::{CommentAction, IssueCommentEvent};

/// A request received by [`MockGitHub`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub authorization: Option<String>,
    pub body: serde_json::Value,
}

/// A local HTTP server standing in for the GitHub comments API.
pub struct MockGitHub {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockGitHub {
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// Spawns a mock GitHub API that answers every comment creation with `status`.
///
/// Success statuses carry a full comment object, as GitHub's create endpoint
/// returns. Non-success statuses carry a GitHub-style error body whose message
/// is the status's canonical reason (e.g. "Not Found").
pub async fn spawn_mock_github(status: StatusCode) -> MockGitHub {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&requests);

    let app = Router::new().route(
        "/repos/{owner}/{repo}/issues/{number}/comments",
        post(move |uri: Uri, headers: HeaderMap, body: Bytes| {
            let recorded = Arc::clone(&recorded);
            async move {
                recorded.lock().unwrap().push(RecordedRequest {
                    path: uri.path().to_string(),
                    authorization: headers
                        .get(header::AUTHORIZATION)
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string),
                    body: serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null),
                });

                let body = if status.is_success() {
                    created_comment_response(&uri, &body)
                } else {
                    serde_json::json!({
                        "message": status.canonical_reason().unwrap_or("Error"),
                        "documentation_url": "https://docs.github.com/rest",
                    })
                };
                (status, axum::Json(body)).into_response()
            }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockGitHub {
        base_url: format!("http://{}", addr),
        requests,
    }
}

/// The body GitHub returns for a created issue comment, echoing the posted text.
fn created_comment_response(uri: &Uri, request_body: &[u8]) -> serde_json::Value {
    let text = serde_json::from_slice::<serde_json::Value>(request_body)
        .ok()
        .and_then(|v| v.get("body").cloned())
        .unwrap_or(serde_json::Value::Null);
    let issue_path = uri.path().trim_end_matches("/comments");

    serde_json::json!({
        "id": 1,
        "node_id": "MDEyOklzc3VlQ29tbWVudDE=",
        "url": "https://api.github.com/repos/octocat/hello-world/issues/comments/1",
        "html_url": "https://github.com/octocat/hello-world/issues/42#issuecomment-1",
        "issue_url": format!("https://api.github.com{}", issue_path),
        "body": text,
        "user": {
            "login": "sink-bot",
            "id": 1,
            "node_id": "MDQ6VXNlcjE=",
            "avatar_url": "https://github.com/images/error/octocat_happy.gif",
            "gravatar_id": "",
            "url": "https://api.github.com/users/sink-bot",
            "html_url": "https://github.com/sink-bot",
            "followers_url": "https://api.github.com/users/sink-bot/followers",
            "following_url": "https://api.github.com/users/sink-bot/following{/other_user}",
            "gists_url": "https://api.github.com/users/sink-bot/gists{/gist_id}",
            "starred_url": "https://api.github.com/users/sink-bot/starred{/owner}{/repo}",
            "subscriptions_url": "https://api.github.com/users/sink-bot/subscriptions",
            "organizations_url": "https://api.github.com/users/sink-bot/orgs",
            "repos_url": "https://api.github.com/users/sink-bot/repos",
            "events_url": "https://api.github.com/users/sink-bot/events{/privacy}",
            "received_events_url": "https://api.github.com/users/sink-bot/received_events",
            "type": "Bot",
            "site_admin": false
        },
        "created_at": "2011-04-14T16:00:49Z",
        "updated_at": "2011-04-14T16:00:49Z",
        "author_association": "NONE"
    })
}

/// A comment on `octocat/hello-world#42`.
pub fn comment_event(action: CommentAction, body: &str) -> IssueCommentEvent {
    IssueCommentEvent {
        repo: RepoId::new("octocat", "hello-world"),
        action,
        issue_number: IssueNumber(42),
        is_pull_request: false,
        comment_id: Some(CommentId(1001)),
        body: body.to_string(),
        author_login: Some("octocat".to_string()),
    }
}

/// The `issue_comment` payload GitHub would send for [`comment_event`].
pub fn issue_comment_payload(action: &str, body: &str) -> serde_json::Value {
    serde_json::json!({
        "action": action,
        "issue": {
            "number": 42,
            "title": "Found a bug"
        },
        "comment": {
            "id": 1001,
            "body": body,
            "user": { "login": "octocat" }
        },
        "repository": {
            "name": "hello-world",
            "full_name": "octocat/hello-world",
            "owner": { "login": "octocat" }
        }
    })
}

/// A publisher that records what it was asked to post.
#[derive(Clone, Default)]
pub struct RecordingPublisher {
    calls: Arc<Mutex<Vec<(RepoId, IssueNumber, String)>>>,
    fail: bool,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// A publisher whose every call fails after being recorded.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<(RepoId, IssueNumber, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommentPublisher for RecordingPublisher {
    async fn publish(
        &self,
        event: &IssueCommentEvent,
        message: &str,
    ) -> Result<String, GitHubApiError> {
        self.calls.lock().unwrap().push((
            event.repo.clone(),
            event.issue_number,
            message.to_string(),
        ));
        if self.fail {
            return Err(GitHubApiError::without_source("mock publish failure"));
        }
        Ok(format_publish_summary(&event.repo, event.issue_number, message))
    }
}

/// A responder with a fixed answer that records the comments it saw.
#[derive(Clone)]
pub struct StubResponder {
    seen: Arc<Mutex<Vec<String>>>,
    outcome: StubOutcome,
}

#[derive(Clone)]
enum StubOutcome {
    Reply(Option<String>),
    Fail,
}

impl StubResponder {
    pub fn replying(reply: Option<&str>) -> Self {
        Self {
            seen: Arc::default(),
            outcome: StubOutcome::Reply(reply.map(str::to_string)),
        }
    }

    /// A responder whose command always exits with status 1.
    pub fn failing() -> Self {
        Self {
            seen: Arc::default(),
            outcome: StubOutcome::Fail,
        }
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

impl Responder for StubResponder {
    async fn respond(&self, comment: &str) -> Result<Option<String>, CommandError> {
        self.seen.lock().unwrap().push(comment.to_string());
        match &self.outcome {
            StubOutcome::Reply(reply) => Ok(reply.clone()),
            StubOutcome::Fail => Err(CommandError::Failed {
                program: "stub".to_string(),
                status: "1".to_string(),
                stderr: "boom".to_string(),
            }),
        }
    }
}
