//! Centralized constants and default values
//!
//! Single source of truth for endpoints and defaults used by settings and
//! the collaborators built from them.

/// External service endpoints
pub mod endpoints {
    /// Marketplace that receives search and product links
    pub const MARKETPLACE_URL: &str = "https://www.amazon.in";

    /// YouTube Data API v3 base
    pub const YOUTUBE_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

    /// Google OAuth token endpoint (refresh-token exchange)
    pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
}

/// Affiliate tag handling
pub mod affiliate {
    /// Literal placeholder shipped in sample env files; treated as unset
    pub const TAG_PLACEHOLDER: &str = "AMAZON_TAG";

    /// Query parameter carrying the tracking tag
    pub const TAG_PARAM: &str = "tag";

    /// Query parameter carrying the search keywords
    pub const SEARCH_PARAM: &str = "k";
}

/// Comment polling defaults
pub mod youtube {
    /// Threads fetched per video per pass
    pub const DEFAULT_MAX_RESULTS: u32 = 50;

    /// API upper bound for `maxResults`
    pub const MAX_RESULTS_LIMIT: u32 = 100;
}

/// HTTP server defaults
pub mod server {
    pub const DEFAULT_HOST: &str = "0.0.0.0";
    pub const DEFAULT_PORT: u16 = 3000;
}

/// Environment variable prefix for settings overrides (`SHOPBOT__SECTION__KEY`)
pub const ENV_PREFIX: &str = "SHOPBOT";
