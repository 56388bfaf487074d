//! Marketplace link construction
//!
//! Every outbound link carries the deployment's tracking tag. The tag is
//! checked per call so a missing tag fails the affected message with
//! [`Error::ConfigurationMissing`] instead of producing an untagged link.

use shopbot_config::constants::affiliate::{SEARCH_PARAM, TAG_PARAM, TAG_PLACEHOLDER};
use shopbot_config::AffiliateConfig;
use shopbot_core::{Error, LinkBuilder, Result};
use url::Url;

/// Product references are 10 ASCII alphanumerics
const PRODUCT_REF_LEN: usize = 10;

/// [`LinkBuilder`] for an Amazon-style marketplace
///
/// - product: `{base}/dp/{ref}?tag={tag}`
/// - search: `{base}/s?k={need}[ under {budget} rupees]&tag={tag}`
#[derive(Debug, Clone)]
pub struct AffiliateLinkBuilder {
    base: Url,
    tag: Option<String>,
}

impl AffiliateLinkBuilder {
    pub fn new(marketplace_url: &str, tag: &str) -> Result<Self> {
        let base = Url::parse(marketplace_url).map_err(|e| {
            Error::ConfigurationMissing(format!("valid marketplace URL ({}): {}", marketplace_url, e))
        })?;

        let tag = tag.trim();
        let tag = (!tag.is_empty() && tag != TAG_PLACEHOLDER).then(|| tag.to_string());

        Ok(Self { base, tag })
    }

    pub fn from_config(config: &AffiliateConfig) -> Result<Self> {
        Self::new(&config.marketplace_url, &config.tag)
    }

    /// Whether links can be built at all
    pub fn has_tag(&self) -> bool {
        self.tag.is_some()
    }

    fn tag(&self) -> Result<&str> {
        self.tag
            .as_deref()
            .ok_or_else(|| Error::ConfigurationMissing("affiliate tag".to_string()))
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|e| Error::InvalidInput(format!("cannot build link path {}: {}", path, e)))
    }
}

impl LinkBuilder for AffiliateLinkBuilder {
    fn product_link(&self, product_ref: &str) -> Result<String> {
        let tag = self.tag()?;
        if product_ref.len() != PRODUCT_REF_LEN
            || !product_ref.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(Error::InvalidInput(format!(
                "product reference must be {} alphanumerics, got {:?}",
                PRODUCT_REF_LEN, product_ref
            )));
        }

        let mut url = self.endpoint(&format!("dp/{}", product_ref))?;
        url.query_pairs_mut().append_pair(TAG_PARAM, tag);
        Ok(url.into())
    }

    fn search_link(&self, need: &str, budget: Option<u64>) -> Result<String> {
        let tag = self.tag()?;

        let mut parts = Vec::with_capacity(2);
        let need = need.trim();
        if !need.is_empty() {
            parts.push(need.to_string());
        }
        if let Some(budget) = budget.filter(|b| *b > 0) {
            parts.push(format!("under {} rupees", budget));
        }
        let query = parts.join(" ");

        let mut url = self.endpoint("s")?;
        {
            let mut pairs = url.query_pairs_mut();
            if !query.is_empty() {
                pairs.append_pair(SEARCH_PARAM, &query);
            }
            pairs.append_pair(TAG_PARAM, tag);
        }
        Ok(url.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> AffiliateLinkBuilder {
        AffiliateLinkBuilder::new("https://www.amazon.in", "shop-21").unwrap()
    }

    #[test]
    fn test_product_link() {
        assert_eq!(
            builder().product_link("B0C1X2Y3Z4").unwrap(),
            "https://www.amazon.in/dp/B0C1X2Y3Z4?tag=shop-21"
        );
    }

    #[test]
    fn test_search_link_with_budget() {
        assert_eq!(
            builder().search_link("gaming laptop", Some(50000)).unwrap(),
            "https://www.amazon.in/s?k=gaming+laptop+under+50000+rupees&tag=shop-21"
        );
    }

    #[test]
    fn test_search_link_without_budget() {
        assert_eq!(
            builder().search_link(" saree ", None).unwrap(),
            "https://www.amazon.in/s?k=saree&tag=shop-21"
        );
    }

    #[test]
    fn test_search_link_encodes_need() {
        let link = builder().search_link("kurta & pyjama", Some(2000)).unwrap();
        assert!(link.contains("k=kurta+%26+pyjama+under+2000+rupees"));
    }

    #[test]
    fn test_missing_tag_is_configuration_error() {
        for tag in ["", "   ", "AMAZON_TAG"] {
            let builder = AffiliateLinkBuilder::new("https://www.amazon.in", tag).unwrap();
            assert!(!builder.has_tag());
            assert_eq!(
                builder.search_link("phone", Some(10000)),
                Err(Error::ConfigurationMissing("affiliate tag".to_string()))
            );
            assert!(builder.product_link("B0C1X2Y3Z4").unwrap_err().is_configuration());
        }
    }

    #[test]
    fn test_rejects_malformed_reference() {
        assert!(matches!(
            builder().product_link("B0C1"),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(AffiliateLinkBuilder::new("not a url", "shop-21").is_err());
    }
}
