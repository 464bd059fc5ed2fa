//! Webhook handling for GitHub events.
//!
//! This module provides:
//! - Signature verification for webhook payloads (HMAC-SHA1 and HMAC-SHA256)
//! - Typed event parsing for the `issue_comment` event

pub mod events;
pub mod parser;
pub mod signature;

pub use events::{CommentAction, GitHubEvent, IssueCommentEvent};
pub use parser::{ParseError, parse_webhook};
pub use signature::{
    SignatureAlgorithm, compute_signature, format_signature_header, parse_signature_header,
    verify_signature,
};
