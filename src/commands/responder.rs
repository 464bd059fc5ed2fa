//! Responders turn comment text into an optional reply.
//!
//! The webhook receiver only knows the [`Responder`] trait. Two responders
//! exist: [`EchoResponder`], which repeats prefixed comments back, and
//! [`Dispatcher`], which runs commands from a command map. [`CommandResponder`]
//! selects between them at startup.

use std::future::Future;

use super::dispatch::{Dispatcher, strip_command_prefix};
use super::exec::CommandError;

/// Produces the reply to a comment.
///
/// `Ok(None)` means "no action": the comment was not addressed to the bot.
///
/// # Example (mock for testing)
///
/// ```ignore
/// struct FixedResponder(&'static str);
///
/// impl Responder for FixedResponder {
///     async fn respond(&self, _comment: &str) -> Result<Option<String>, CommandError> {
///         Ok(Some(self.0.to_string()))
///     }
/// }
/// ```
pub trait Responder {
    fn respond(
        &self,
        comment: &str,
    ) -> impl Future<Output = Result<Option<String>, CommandError>> + Send;
}

/// Replies to every prefixed comment by quoting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EchoResponder {
    prefix: String,
}

impl EchoResponder {
    pub fn new(prefix: impl Into<String>) -> Self {
        EchoResponder {
            prefix: prefix.into(),
        }
    }
}

impl Responder for EchoResponder {
    async fn respond(&self, comment: &str) -> Result<Option<String>, CommandError> {
        let message = comment.trim();
        if strip_command_prefix(message, &self.prefix).is_none() {
            return Ok(None);
        }
        Ok(Some(format!("Hey I heard you say: {:?}", message)))
    }
}

impl Responder for Dispatcher {
    async fn respond(&self, comment: &str) -> Result<Option<String>, CommandError> {
        self.dispatch(comment).await
    }
}

/// The responder chosen from configuration.
#[derive(Debug, Clone)]
pub enum CommandResponder {
    /// No command map configured.
    Echo(EchoResponder),
    /// Commands loaded from a command map file.
    Registry(Dispatcher),
}

impl Responder for CommandResponder {
    async fn respond(&self, comment: &str) -> Result<Option<String>, CommandError> {
        match self {
            CommandResponder::Echo(echo) => echo.respond(comment).await,
            CommandResponder::Registry(dispatcher) => dispatcher.respond(comment).await,
        }
    }
}
