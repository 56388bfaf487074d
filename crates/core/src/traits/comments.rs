//! Comment platform collaborator

use async_trait::async_trait;

use crate::{CommentThread, Result};

/// Source of inbound comments and sink for replies
///
/// # Example
///
/// ```ignore
/// let threads = source.fetch_threads("dQw4w9WgXcQ").await?;
/// for thread in threads.iter().filter(|t| !t.already_answered) {
///     source.post_reply(&thread.comment_id, "reply text").await?;
/// }
/// ```
#[async_trait]
pub trait CommentSource: Send + Sync + 'static {
    /// Latest top-level threads for a video
    async fn fetch_threads(&self, video_id: &str) -> Result<Vec<CommentThread>>;

    /// Post `text` as a reply under the comment `parent_id`
    async fn post_reply(&self, parent_id: &str, text: &str) -> Result<()>;

    /// Name for logging
    fn name(&self) -> &str;
}
