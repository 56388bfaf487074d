//! Error taxonomy shared by every crate in the workspace
//!
//! Missing signal in a comment is not an error: extraction returns `None`
//! and the policy engine turns that into a clarification decision.

use thiserror::Error;

/// Errors raised while turning a comment into a reply
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A deployment value needed to build an outbound link is unset
    #[error("Configuration missing: {0}")]
    ConfigurationMissing(String),

    /// The comment platform (or any other network collaborator) failed
    #[error("Collaborator failure: {0}")]
    Collaborator(String),

    /// Input rejected before reaching the pipeline
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Configuration errors abort one message, never the batch
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::ConfigurationMissing(_))
    }
}

/// Result alias using the core error
pub type Result<T> = std::result::Result<T, Error>;
