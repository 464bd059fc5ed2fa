//! Core domain types for the sink bot.

pub mod ids;

pub use ids::{CommentId, DeliveryId, IssueNumber, RepoId};
