//! Outbound link construction

use crate::Result;

/// Builds marketplace links carrying the deployment's tracking tag
///
/// Implementations must fail with [`crate::Error::ConfigurationMissing`]
/// when the tag is unset rather than return an untagged link.
pub trait LinkBuilder: Send + Sync + 'static {
    /// Direct link to a single product reference
    fn product_link(&self, product_ref: &str) -> Result<String>;

    /// Search link for a free-text need, optionally capped by a budget
    fn search_link(&self, need: &str, budget: Option<u64>) -> Result<String>;
}
