//! Configuration management for the shopping reply bot
//!
//! Supports loading configuration from:
//! - YAML files (`config/default.yaml`, `config/{env}.yaml`)
//! - Environment variables (`SHOPBOT__` prefix, `__` separator)
//!
//! Also owns the static data the core reads at startup: the
//! recommendation knowledge base and the reply templates. Both are built
//! once and treated as read-only for the process lifetime.

pub mod constants;
pub mod knowledge;
pub mod replies;
pub mod settings;

pub use knowledge::KnowledgeBase;
pub use replies::ReplyTemplates;
pub use settings::{
    load_settings, AffiliateConfig, BotConfig, ObservabilityConfig, RuntimeEnvironment,
    ServerConfig, Settings, YoutubeConfig,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
