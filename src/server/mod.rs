//! HTTP server for the comment command bot.
//!
//! This module implements the HTTP server that:
//! - Accepts `issue_comment` webhooks from GitHub and verifies their signatures
//! - Runs commands named in new comments and posts their output back
//! - Provides health checks for liveness probes
//!
//! Each delivery is handled to completion inside its request; the response
//! status tells GitHub whether it worked.
//!
//! # Endpoints
//!
//! - `POST /postreceive` - Accepts GitHub webhook deliveries
//! - `GET /health` - Returns 200 if server is running

use std::sync::Arc;

use tower_http::trace::TraceLayer;

use crate::commands::Responder;
use crate::github::CommentPublisher;

pub mod health;
pub mod webhook;

pub use health::health_handler;
pub use webhook::{IGNORED_ACTION_MESSAGE, WebhookError, webhook_handler};

/// Path GitHub delivers webhooks to.
pub const WEBHOOK_PATH: &str = "/postreceive";

/// Shared application state.
///
/// This is passed to all handlers via Axum's `State` extractor. `R` decides
/// what to reply to a comment and `P` posts the reply.
pub struct AppState<R, P> {
    inner: Arc<AppStateInner<R, P>>,
}

struct AppStateInner<R, P> {
    responder: R,
    publisher: P,

    /// Secret for HMAC signature verification. `None` disables verification.
    webhook_secret: Option<Vec<u8>>,
}

// Manual impl: cloning shares the inner state, so `R` and `P` need not be Clone.
impl<R, P> Clone for AppState<R, P> {
    fn clone(&self) -> Self {
        AppState {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R, P> AppState<R, P> {
    /// Creates a new `AppState`.
    ///
    /// Passing `None` as the secret accepts unsigned deliveries; callers must
    /// only do so when verification was explicitly turned off.
    pub fn new(responder: R, publisher: P, webhook_secret: Option<Vec<u8>>) -> Self {
        AppState {
            inner: Arc::new(AppStateInner {
                responder,
                publisher,
                webhook_secret,
            }),
        }
    }

    pub fn responder(&self) -> &R {
        &self.inner.responder
    }

    pub fn publisher(&self) -> &P {
        &self.inner.publisher
    }

    /// Returns the webhook secret, if signatures are verified.
    pub fn webhook_secret(&self) -> Option<&[u8]> {
        self.inner.webhook_secret.as_deref()
    }
}

/// Builds the axum Router with all endpoints.
pub fn build_router<R, P>(app_state: AppState<R, P>) -> axum::Router
where
    R: Responder + Send + Sync + 'static,
    P: CommentPublisher + Send + Sync + 'static,
{
    use axum::routing::{get, post};

    axum::Router::new()
        .route(WEBHOOK_PATH, post(webhook_handler::<R, P>))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
