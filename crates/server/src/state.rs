//! Application State
//!
//! Shared state across all handlers.

use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tokio::sync::Mutex;

use shopbot_agent::{AffiliateLinkBuilder, CommentResponder, ReplyEngine};
use shopbot_config::{ConfigError, Settings};
use shopbot_core::CommentSource;

use crate::youtube::YoutubeClient;
use crate::ServerError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    /// Settings, immutable after startup
    pub settings: Arc<Settings>,
    /// Text → reply pipeline
    pub engine: ReplyEngine,
    /// Comment platform, absent when credentials are not configured
    pub source: Option<Arc<dyn CommentSource>>,
    /// Prometheus handle for `/metrics`
    pub metrics: Option<PrometheusHandle>,
    /// Held for the duration of a comment pass so passes never overlap
    pass_lock: Arc<Mutex<()>>,
}

impl AppState {
    /// Build state from settings: knowledge base, link builder and, when
    /// credentials are present, the YouTube client
    pub fn from_settings(settings: Settings) -> Result<Self, ServerError> {
        let knowledge = settings.load_knowledge_base()?;
        tracing::info!(categories = knowledge.len(), "Recommendation knowledge base ready");

        let links = AffiliateLinkBuilder::from_config(&settings.affiliate)?;
        if !links.has_tag() {
            tracing::warn!("Affiliate tag missing; suggestion replies will fail until it is set");
        }

        let engine = ReplyEngine::new(
            Arc::new(knowledge),
            Arc::new(links),
            settings.replies.clone(),
        );

        let source: Option<Arc<dyn CommentSource>> =
            if settings.missing_youtube_credentials().is_empty() {
                Some(Arc::new(YoutubeClient::new(settings.youtube.clone())?))
            } else {
                None
            };

        Ok(Self::new(settings, engine, source))
    }

    pub fn new(
        settings: Settings,
        engine: ReplyEngine,
        source: Option<Arc<dyn CommentSource>>,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            engine,
            source,
            metrics: None,
            pass_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Responder for one pass, or the list of what is missing to run one
    pub fn responder(&self) -> Result<CommentResponder, Vec<&'static str>> {
        let missing = self.settings.missing_youtube_credentials();
        match (&self.source, missing.is_empty()) {
            (Some(source), true) => Ok(CommentResponder::new(
                self.engine.clone(),
                source.clone(),
                self.settings.bot.clone(),
            )),
            (None, true) => Err(vec!["youtube client"]),
            (_, false) => Err(missing),
        }
    }

    pub(crate) fn pass_lock(&self) -> &Mutex<()> {
        &self.pass_lock
    }
}

impl From<ConfigError> for ServerError {
    fn from(err: ConfigError) -> Self {
        ServerError::Config(err.to_string())
    }
}
