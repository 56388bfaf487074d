//! Core types and traits for the shopping reply bot
//!
//! This crate provides foundational types used across all other crates:
//! - Extraction output (`ParsedRequest`, `NumberMatch`)
//! - Product taxonomy and recommendation entries
//! - Reply policy decisions
//! - Comment platform types
//! - Error types
//! - Collaborator traits (`LinkBuilder`, `CommentSource`)

pub mod catalog;
pub mod comment;
pub mod decision;
pub mod error;
pub mod request;
pub mod traits;

pub use catalog::{ProductCategory, Recommendation};
pub use comment::{CommentThread, ReplyRecord};
pub use decision::{ReplyDecision, Suggestion};
pub use error::{Error, Result};
pub use request::{NumberMatch, ParsedRequest, UnitMultiplier};
pub use traits::{CommentSource, LinkBuilder};
