//! Webhook endpoint handler.
//!
//! Validates a GitHub delivery, decodes it, runs the comment through the
//! responder and posts any reply. The HTTP response carries the outcome.

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::AppState;
use crate::commands::{CommandError, Responder};
use crate::github::{CommentPublisher, GitHubApiError};
use crate::types::DeliveryId;
use crate::webhooks::{
    CommentAction, GitHubEvent, IssueCommentEvent, ParseError, SignatureAlgorithm, parse_webhook,
    verify_signature,
};

/// Header name for GitHub event type.
const HEADER_EVENT: &str = "x-github-event";
/// Header name for GitHub delivery ID.
const HEADER_DELIVERY: &str = "x-github-delivery";

/// GitHub caps webhook payloads at 25 MB.
const MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

/// Response body for comment events other than `created`.
pub const IGNORED_ACTION_MESSAGE: &str = "Ignoring comment since action was not created";

/// Errors that can occur when processing a webhook.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Missing required header.
    #[error("missing required header: {0}")]
    MissingHeader(&'static str),

    /// No signature header although a secret is configured.
    #[error("missing X-Hub-Signature header required for HMAC verification")]
    MissingSignature,

    /// Signature does not match the body.
    #[error("HMAC verification failed")]
    InvalidSignature,

    /// The request body could not be read.
    #[error("failed to read request body: {0}")]
    BodyRead(#[source] axum::Error),

    /// The payload does not decode as the declared event type.
    #[error("invalid payload: {0}")]
    Parse(#[from] ParseError),

    /// The command could not be run or failed.
    #[error("command failed: {0}")]
    Command(#[from] CommandError),

    /// Posting the reply failed.
    #[error("failed to post comment: {0}")]
    Publish(#[from] GitHubApiError),
}

impl WebhookError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::MissingHeader(_) => StatusCode::BAD_REQUEST,
            WebhookError::MissingSignature | WebhookError::InvalidSignature => {
                StatusCode::FORBIDDEN
            }
            WebhookError::BodyRead(_)
            | WebhookError::Parse(_)
            | WebhookError::Command(_)
            | WebhookError::Publish(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}

/// Webhook handler.
///
/// # Request
///
/// - Method: POST (other methods get 405 from the router)
/// - Required headers:
///   - `X-GitHub-Event`: Event type (e.g., "issue_comment")
///   - `X-Hub-Signature-256` or `X-Hub-Signature`: HMAC of the body, when a
///     secret is configured. The SHA-256 header wins when both are present.
/// - Optional headers:
///   - `X-GitHub-Delivery`: Delivery ID, used for logging
/// - Body: JSON webhook payload
///
/// # Response
///
/// - 200 OK: the publish summary, an explanation of why the event was
///   ignored, or an empty body when the comment was not a command
/// - 400 Bad Request: missing event header
/// - 403 Forbidden: missing or invalid signature
/// - 500 Internal Server Error: body, payload, command or GitHub failure
pub async fn webhook_handler<R, P>(
    State(app_state): State<AppState<R, P>>,
    headers: HeaderMap,
    body: Body,
) -> Result<(StatusCode, String), WebhookError>
where
    R: Responder + Send + Sync + 'static,
    P: CommentPublisher + Send + Sync + 'static,
{
    let event_type = get_header(&headers, HEADER_EVENT)?;
    let delivery_id = get_header(&headers, HEADER_DELIVERY)
        .map(DeliveryId::new)
        .unwrap_or_else(|_| DeliveryId::new("-"));

    debug!(
        delivery_id = %delivery_id,
        event_type = %event_type,
        "Received webhook"
    );

    let body = axum::body::to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(WebhookError::BodyRead)?;

    // Verify signature BEFORE any parsing.
    if let Some(secret) = app_state.webhook_secret() {
        if let Err(e) = check_signature(&headers, &body, secret) {
            warn!(delivery_id = %delivery_id, error = %e, "Rejected webhook signature");
            return Err(e);
        }
    }

    let event = match parse_webhook(&event_type, &body) {
        Ok(Some(event)) => event,
        Ok(None) => {
            info!(
                delivery_id = %delivery_id,
                event_type = %event_type,
                "Ignoring unsupported event type"
            );
            return Ok((
                StatusCode::OK,
                format!("Ignoring unsupported event type: {}", event_type),
            ));
        }
        Err(e) => {
            warn!(delivery_id = %delivery_id, error = %e, "Failed to decode webhook payload");
            return Err(e.into());
        }
    };

    match event {
        GitHubEvent::IssueComment(event) => {
            process_issue_comment(&app_state, &delivery_id, &event).await
        }
    }
}

/// Runs a comment through the responder and publishes the reply.
async fn process_issue_comment<R, P>(
    app_state: &AppState<R, P>,
    delivery_id: &DeliveryId,
    event: &IssueCommentEvent,
) -> Result<(StatusCode, String), WebhookError>
where
    R: Responder + Send + Sync + 'static,
    P: CommentPublisher + Send + Sync + 'static,
{
    if event.action != CommentAction::Created {
        debug!(
            delivery_id = %delivery_id,
            action = %event.action.as_str(),
            "Ignoring comment action"
        );
        return Ok((StatusCode::OK, IGNORED_ACTION_MESSAGE.to_string()));
    }

    debug!(
        delivery_id = %delivery_id,
        repo = %event.repo,
        issue = %event.issue_number,
        pull_request = event.is_pull_request,
        comment_id = ?event.comment_id.map(|id| id.0),
        author = event.author_login.as_deref().unwrap_or("-"),
        "Handling new comment"
    );

    let reply = match app_state.responder().respond(event.body.trim()).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!(
                delivery_id = %delivery_id,
                repo = %event.repo,
                issue = %event.issue_number,
                error = %e,
                "Command failed"
            );
            return Err(e.into());
        }
    };

    let reply = match reply {
        Some(reply) if !reply.is_empty() => reply,
        Some(_) => {
            // GitHub rejects comments with an empty body.
            info!(delivery_id = %delivery_id, "Command produced no output; nothing to post");
            return Ok((StatusCode::OK, String::new()));
        }
        None => return Ok((StatusCode::OK, String::new())),
    };

    match app_state.publisher().publish(event, &reply).await {
        Ok(summary) => {
            info!(
                delivery_id = %delivery_id,
                repo = %event.repo,
                issue = %event.issue_number,
                "Reply posted"
            );
            Ok((StatusCode::OK, summary))
        }
        Err(e) => {
            warn!(
                delivery_id = %delivery_id,
                repo = %event.repo,
                issue = %event.issue_number,
                error = %e,
                "Failed to post reply"
            );
            Err(e.into())
        }
    }
}

/// Verifies the delivery signature, preferring the SHA-256 header.
fn check_signature(headers: &HeaderMap, body: &Bytes, secret: &[u8]) -> Result<(), WebhookError> {
    let (algorithm, signature) = [SignatureAlgorithm::Sha256, SignatureAlgorithm::Sha1]
        .into_iter()
        .find_map(|algorithm| {
            get_header(headers, algorithm.header_name())
                .ok()
                .map(|value| (algorithm, value))
        })
        .ok_or(WebhookError::MissingSignature)?;

    if verify_signature(algorithm, body, &signature, secret) {
        Ok(())
    } else {
        Err(WebhookError::InvalidSignature)
    }
}

/// Extracts a required, non-empty header value as a string.
fn get_header(headers: &HeaderMap, name: &'static str) -> Result<String, WebhookError> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .ok_or(WebhookError::MissingHeader(name))
}
