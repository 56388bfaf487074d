//! One polling pass over comment threads
//!
//! Each message is isolated: a configuration or collaborator failure is
//! logged and counted, and the pass moves on to the next message. A video
//! whose threads cannot be fetched does not stop the other videos.

use chrono::Utc;
use serde::Serialize;
use shopbot_config::BotConfig;
use shopbot_core::{CommentSource, CommentThread, ReplyRecord};
use std::sync::Arc;

use crate::engine::ReplyEngine;

/// Counter names exported on `/metrics`
pub mod counters {
    pub const REPLIES_POSTED: &str = "shopbot_replies_posted_total";
    pub const COMMENTS_SKIPPED: &str = "shopbot_comments_skipped_total";
    pub const COMMENTS_FAILED: &str = "shopbot_comments_failed_total";
}

/// Outcome of one pass
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PassReport {
    /// Unanswered threads run through the reply engine
    pub processed_comments: usize,
    /// Threads left alone (already answered, empty or no signal)
    pub skipped: usize,
    /// Threads whose reply could not be built or posted
    pub failed: usize,
    /// Videos whose threads could not be fetched
    pub failed_videos: usize,
    pub replies: Vec<ReplyRecord>,
}

enum Outcome {
    Replied(ReplyRecord),
    Skipped(&'static str),
    Failed,
}

/// Answers new comments on a set of videos
pub struct CommentResponder {
    engine: ReplyEngine,
    source: Arc<dyn CommentSource>,
    options: BotConfig,
}

impl CommentResponder {
    pub fn new(engine: ReplyEngine, source: Arc<dyn CommentSource>, options: BotConfig) -> Self {
        Self {
            engine,
            source,
            options,
        }
    }

    pub fn engine(&self) -> &ReplyEngine {
        &self.engine
    }

    /// Fetch, answer and report on every video in turn
    pub async fn run_pass(&self, video_ids: &[String]) -> PassReport {
        let mut report = PassReport::default();

        for video_id in video_ids.iter().map(|v| v.trim()).filter(|v| !v.is_empty()) {
            let threads = match self.source.fetch_threads(video_id).await {
                Ok(threads) => threads,
                Err(e) => {
                    tracing::error!(
                        video_id,
                        source = self.source.name(),
                        error = %e,
                        "Failed to fetch comment threads"
                    );
                    report.failed_videos += 1;
                    continue;
                }
            };

            tracing::debug!(video_id, threads = threads.len(), "Fetched comment threads");

            for thread in &threads {
                if thread.already_answered {
                    report.skipped += 1;
                    metrics::counter!(counters::COMMENTS_SKIPPED, "reason" => "answered")
                        .increment(1);
                    continue;
                }

                report.processed_comments += 1;
                match self.handle_thread(video_id, thread).await {
                    Outcome::Replied(record) => report.replies.push(record),
                    Outcome::Skipped(reason) => {
                        report.skipped += 1;
                        metrics::counter!(counters::COMMENTS_SKIPPED, "reason" => reason)
                            .increment(1);
                    }
                    Outcome::Failed => {
                        report.failed += 1;
                        metrics::counter!(counters::COMMENTS_FAILED).increment(1);
                    }
                }
            }
        }

        tracing::info!(
            processed = report.processed_comments,
            replied = report.replies.len(),
            skipped = report.skipped,
            failed = report.failed,
            failed_videos = report.failed_videos,
            dry_run = self.options.dry_run,
            "Comment pass finished"
        );

        report
    }

    async fn handle_thread(&self, video_id: &str, thread: &CommentThread) -> Outcome {
        let text = thread.text.trim();
        if text.is_empty() {
            return Outcome::Skipped("empty");
        }

        let reply = match self.engine.respond(text) {
            Ok(reply) => reply,
            Err(e) if e.is_configuration() => {
                tracing::error!(
                    comment_id = %thread.comment_id,
                    error = %e,
                    "Cannot build reply, configuration incomplete"
                );
                return Outcome::Failed;
            }
            Err(e) => {
                tracing::warn!(comment_id = %thread.comment_id, error = %e, "Cannot build reply");
                return Outcome::Failed;
            }
        };

        if reply.is_no_signal() && !self.options.reply_on_no_signal {
            tracing::info!(comment_id = %thread.comment_id, text, "Skip (no budget/need found)");
            return Outcome::Skipped("no_signal");
        }

        let posted = if self.options.dry_run {
            false
        } else {
            if let Err(e) = self.source.post_reply(&thread.comment_id, &reply.text).await {
                tracing::error!(
                    comment_id = %thread.comment_id,
                    source = self.source.name(),
                    error = %e,
                    "Failed to post reply"
                );
                return Outcome::Failed;
            }
            metrics::counter!(counters::REPLIES_POSTED).increment(1);
            true
        };

        let parsed = reply.parsed.as_ref();
        tracing::info!(
            comment_id = %thread.comment_id,
            need = ?parsed.map(|p| p.need.as_str()),
            budget = ?parsed.and_then(|p| p.budget),
            decision = reply.decision.kind(),
            posted,
            "Replied to comment"
        );

        Outcome::Replied(ReplyRecord {
            video_id: video_id.to_string(),
            comment_id: thread.comment_id.clone(),
            original_comment: thread.text.clone(),
            need: parsed.map(|p| p.need.clone()),
            budget: parsed.and_then(|p| p.budget),
            decision: reply.decision.kind().to_string(),
            link: reply.decision.primary_link().map(str::to_string),
            reply_text: reply.text,
            posted,
            replied_at: Utc::now(),
        })
    }
}
