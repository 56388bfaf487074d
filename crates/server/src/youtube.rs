//! YouTube Data API v3 comment source
//!
//! Uses an OAuth refresh token to obtain short-lived access tokens, lists
//! the newest top-level comment threads of a video and posts replies under
//! them. A thread with any reply is treated as already answered.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use shopbot_config::YoutubeConfig;
use shopbot_core::{CommentSource, CommentThread, Error, Result};

/// Refresh this long before the token actually expires
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

/// [`CommentSource`] backed by the YouTube Data API
pub struct YoutubeClient {
    config: YoutubeConfig,
    client: Client,
    token: Mutex<Option<CachedToken>>,
}

impl YoutubeClient {
    pub fn new(config: YoutubeConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Collaborator(e.to_string()))?;

        Ok(Self {
            config,
            client,
            token: Mutex::new(None),
        })
    }

    /// Cached access token, refreshed when missing or about to expire
    async fn access_token(&self) -> Result<String> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if Instant::now() + TOKEN_EXPIRY_MARGIN < token.expires_at {
                return Ok(token.access_token.clone());
            }
        }

        let response = self
            .client
            .post(&self.config.token_url)
            .form(&[
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("refresh_token", self.config.refresh_token.as_str()),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await
            .map_err(collaborator)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(Error::Collaborator(format!(
                "token refresh failed, HTTP {}: {}",
                status, error_text
            )));
        }

        let token: TokenResponse = response.json().await.map_err(collaborator)?;
        tracing::debug!(expires_in = token.expires_in, "Refreshed YouTube access token");

        let access_token = token.access_token.clone();
        *cached = Some(CachedToken {
            access_token: token.access_token,
            expires_at: Instant::now() + Duration::from_secs(token.expires_in),
        });
        Ok(access_token)
    }
}

#[async_trait]
impl CommentSource for YoutubeClient {
    async fn fetch_threads(&self, video_id: &str) -> Result<Vec<CommentThread>> {
        let token = self.access_token().await?;
        let max_results = self.config.max_results.to_string();

        let response = self
            .client
            .get(format!("{}/commentThreads", self.config.api_base))
            .bearer_auth(token)
            .query(&[
                ("part", "snippet"),
                ("videoId", video_id),
                ("order", "time"),
                ("maxResults", max_results.as_str()),
            ])
            .send()
            .await
            .map_err(collaborator)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(Error::Collaborator(format!(
                "commentThreads.list for {} failed, HTTP {}: {}",
                video_id, status, error_text
            )));
        }

        let list: CommentThreadList = response.json().await.map_err(collaborator)?;
        let total = list.items.len();
        let threads: Vec<CommentThread> = list
            .items
            .into_iter()
            .filter_map(ThreadItem::into_thread)
            .collect();
        if threads.len() < total {
            tracing::debug!(
                video_id,
                skipped = total - threads.len(),
                "Skipped comment threads without a top-level comment"
            );
        }
        Ok(threads)
    }

    async fn post_reply(&self, parent_id: &str, text: &str) -> Result<()> {
        let token = self.access_token().await?;
        let body = InsertComment {
            snippet: InsertSnippet {
                parent_id,
                text_original: text,
            },
        };

        let response = self
            .client
            .post(format!("{}/comments", self.config.api_base))
            .bearer_auth(token)
            .query(&[("part", "snippet")])
            .json(&body)
            .send()
            .await
            .map_err(collaborator)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(Error::Collaborator(format!(
                "comments.insert under {} failed, HTTP {}: {}",
                parent_id, status, error_text
            )));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "youtube"
    }
}

fn collaborator(e: reqwest::Error) -> Error {
    Error::Collaborator(e.to_string())
}

// Wire types

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

#[derive(Debug, Deserialize)]
struct CommentThreadList {
    #[serde(default)]
    items: Vec<ThreadItem>,
}

#[derive(Debug, Deserialize)]
struct ThreadItem {
    snippet: ThreadSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThreadSnippet {
    #[serde(default)]
    top_level_comment: Option<TopLevelComment>,
    #[serde(default)]
    total_reply_count: u32,
}

#[derive(Debug, Deserialize)]
struct TopLevelComment {
    id: String,
    snippet: CommentSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentSnippet {
    #[serde(default)]
    text_original: String,
}

impl ThreadItem {
    /// `None` when the item carries no top-level comment
    fn into_thread(self) -> Option<CommentThread> {
        let comment = self.snippet.top_level_comment?;
        Some(CommentThread {
            comment_id: comment.id,
            text: comment.snippet.text_original,
            already_answered: self.snippet.total_reply_count > 0,
        })
    }
}

#[derive(Debug, Serialize)]
struct InsertComment<'a> {
    snippet: InsertSnippet<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InsertSnippet<'a> {
    parent_id: &'a str,
    text_original: &'a str,
}
