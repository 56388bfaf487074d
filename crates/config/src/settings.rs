//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::{affiliate, endpoints, server, youtube, ENV_PREFIX};
use crate::{ConfigError, KnowledgeBase, ReplyTemplates};

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    /// Development mode - relaxed validation, warnings only
    #[default]
    Development,
    /// Staging mode - stricter validation
    Staging,
    /// Production mode - all validations enforced
    Production,
}

impl RuntimeEnvironment {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Check if strict validation should be applied
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Production | Self::Staging)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Marketplace link configuration
    #[serde(default)]
    pub affiliate: AffiliateConfig,

    /// YouTube Data API credentials and polled videos
    #[serde(default)]
    pub youtube: YoutubeConfig,

    /// Reply behaviour
    #[serde(default)]
    pub bot: BotConfig,

    /// Reply templates
    #[serde(default)]
    pub replies: ReplyTemplates,

    /// Optional YAML file replacing the built-in recommendation knowledge base
    #[serde(default)]
    pub knowledge_base_path: Option<String>,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port (falls back to the `PORT` env var, then 3000)
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    server::DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(server::DEFAULT_PORT)
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Marketplace link configuration
///
/// The tag may be empty at load time; link construction refuses to build
/// untagged links and reports the missing tag per message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffiliateConfig {
    /// Tracking tag appended to every outbound link
    #[serde(default = "default_affiliate_tag")]
    pub tag: String,

    /// Marketplace base URL
    #[serde(default = "default_marketplace_url")]
    pub marketplace_url: String,
}

fn default_affiliate_tag() -> String {
    std::env::var("AMAZON_TAG").unwrap_or_default()
}

fn default_marketplace_url() -> String {
    endpoints::MARKETPLACE_URL.to_string()
}

impl Default for AffiliateConfig {
    fn default() -> Self {
        Self {
            tag: default_affiliate_tag(),
            marketplace_url: default_marketplace_url(),
        }
    }
}

impl AffiliateConfig {
    /// Usable tag: trimmed, non-empty and not the sample placeholder
    pub fn effective_tag(&self) -> Option<&str> {
        let tag = self.tag.trim();
        if tag.is_empty() || tag == affiliate::TAG_PLACEHOLDER {
            None
        } else {
            Some(tag)
        }
    }
}

/// YouTube Data API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YoutubeConfig {
    #[serde(default = "default_client_id")]
    pub client_id: String,

    #[serde(default = "default_client_secret")]
    pub client_secret: String,

    #[serde(default = "default_refresh_token")]
    pub refresh_token: String,

    /// Videos polled on every pass
    #[serde(default = "default_video_ids")]
    pub video_ids: Vec<String>,

    /// Threads fetched per video per pass
    #[serde(default = "default_max_results")]
    pub max_results: u32,

    #[serde(default = "default_api_base")]
    pub api_base: String,

    #[serde(default = "default_token_url")]
    pub token_url: String,
}

fn default_client_id() -> String {
    std::env::var("GOOGLE_CLIENT_ID").unwrap_or_default()
}

fn default_client_secret() -> String {
    std::env::var("GOOGLE_CLIENT_SECRET").unwrap_or_default()
}

fn default_refresh_token() -> String {
    std::env::var("YT_REFRESH_TOKEN").unwrap_or_default()
}

fn default_video_ids() -> Vec<String> {
    std::env::var("VIDEO_ID")
        .map(|s| {
            s.split(',')
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

fn default_max_results() -> u32 {
    youtube::DEFAULT_MAX_RESULTS
}

fn default_api_base() -> String {
    endpoints::YOUTUBE_API_BASE.to_string()
}

fn default_token_url() -> String {
    endpoints::GOOGLE_TOKEN_URL.to_string()
}

impl Default for YoutubeConfig {
    fn default() -> Self {
        Self {
            client_id: default_client_id(),
            client_secret: default_client_secret(),
            refresh_token: default_refresh_token(),
            video_ids: default_video_ids(),
            max_results: default_max_results(),
            api_base: default_api_base(),
            token_url: default_token_url(),
        }
    }
}

/// Reply behaviour
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BotConfig {
    /// Answer comments with no budget, need or product reference with the
    /// generic clarification instead of skipping them
    #[serde(default)]
    pub reply_on_no_signal: bool,

    /// Compose replies but never post them
    #[serde(default)]
    pub dry_run: bool,
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub log_json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

impl Settings {
    /// Create default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_affiliate()?;
        self.validate_youtube()?;
        self.replies.validate()?;
        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                message: "Port must be non-zero".to_string(),
            });
        }
        Ok(())
    }

    fn validate_affiliate(&self) -> Result<(), ConfigError> {
        let url = &self.affiliate.marketplace_url;
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ConfigError::InvalidValue {
                field: "affiliate.marketplace_url".to_string(),
                message: format!("Must be an http(s) URL, got {:?}", url),
            });
        }

        if self.affiliate.effective_tag().is_none() {
            if self.environment.is_strict() {
                return Err(ConfigError::MissingField("affiliate.tag".to_string()));
            }
            tracing::warn!("Affiliate tag missing or placeholder; link construction will fail");
        }

        Ok(())
    }

    fn validate_youtube(&self) -> Result<(), ConfigError> {
        let max = self.youtube.max_results;
        if !(1..=youtube::MAX_RESULTS_LIMIT).contains(&max) {
            return Err(ConfigError::InvalidValue {
                field: "youtube.max_results".to_string(),
                message: format!(
                    "Must be between 1 and {}, got {}",
                    youtube::MAX_RESULTS_LIMIT,
                    max
                ),
            });
        }
        Ok(())
    }

    /// Names of unset credentials needed to poll comments
    pub fn missing_youtube_credentials(&self) -> Vec<&'static str> {
        let yt = &self.youtube;
        let mut missing = Vec::new();
        if yt.client_id.trim().is_empty() {
            missing.push("youtube.client_id");
        }
        if yt.client_secret.trim().is_empty() {
            missing.push("youtube.client_secret");
        }
        if yt.refresh_token.trim().is_empty() {
            missing.push("youtube.refresh_token");
        }
        if yt.video_ids.iter().all(|id| id.trim().is_empty()) {
            missing.push("youtube.video_ids");
        }
        missing
    }

    /// Load the configured knowledge base, or the built-in one
    pub fn load_knowledge_base(&self) -> Result<KnowledgeBase, ConfigError> {
        match self.knowledge_base_path.as_deref() {
            Some(path) if !path.trim().is_empty() => KnowledgeBase::load(path),
            _ => KnowledgeBase::builtin(),
        }
    }
}

/// Load settings from files and environment
///
/// Priority: env vars > config/{env}.yaml > config/default.yaml > defaults
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    // Load default config
    builder = builder.add_source(File::with_name("config/default").required(false));

    // Load environment-specific config
    if let Some(env_name) = env {
        builder =
            builder.add_source(File::with_name(&format!("config/{}", env_name)).required(false));
    }

    // Load from environment variables
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("youtube.video_ids")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    Ok(settings)
}
