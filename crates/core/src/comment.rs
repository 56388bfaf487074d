//! Inbound comment types supplied by the comment platform

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A top-level comment thread as seen by the responder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentThread {
    /// Platform identifier of the top-level comment (reply parent)
    pub comment_id: String,
    /// Comment text as written by the author
    pub text: String,
    /// Set by the platform when the thread already has replies
    pub already_answered: bool,
}

impl CommentThread {
    pub fn new(comment_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            comment_id: comment_id.into(),
            text: text.into(),
            already_answered: false,
        }
    }

    pub fn answered(mut self) -> Self {
        self.already_answered = true;
        self
    }
}

/// Audit record of one reply sent (or composed, in dry-run mode)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyRecord {
    pub video_id: String,
    pub comment_id: String,
    pub original_comment: String,
    pub need: Option<String>,
    pub budget: Option<u64>,
    pub decision: String,
    pub reply_text: String,
    pub link: Option<String>,
    pub posted: bool,
    pub replied_at: DateTime<Utc>,
}
