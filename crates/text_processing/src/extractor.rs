//! Request extraction: normalize → budget → need (+ product ref)

use shopbot_core::{NumberMatch, ParsedRequest};

use crate::budget::extract_number;
use crate::need::extract_need;
use crate::normalize::normalize_text;
use crate::product_ref::extract_product_ref;

/// Intermediate results of one extraction, kept for logging and debugging
#[derive(Debug, Clone)]
pub struct Extraction {
    pub normalized: String,
    pub number: Option<NumberMatch>,
    pub product_ref: Option<String>,
    pub need: Option<String>,
}

impl Extraction {
    /// Collapse into a request record
    ///
    /// A missing need is replaced by `product <ref>` when a reference
    /// exists. With neither, the budget alone is not actionable and the
    /// result is `None`.
    pub fn into_request(self) -> Option<ParsedRequest> {
        let need = match (self.need, &self.product_ref) {
            (Some(need), _) => need,
            (None, Some(product_ref)) => ParsedRequest::need_for_reference(product_ref),
            (None, None) => return None,
        };

        Some(ParsedRequest {
            need,
            budget: self.number.as_ref().map(NumberMatch::budget),
            product_ref: self.product_ref,
        })
    }
}

/// Turns one comment into a [`ParsedRequest`]
///
/// Stateless; all patterns are static and compiled once, so a single
/// extractor can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct RequestExtractor;

impl RequestExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Run every extraction step and keep the intermediate results
    pub fn analyze(&self, text: &str) -> Extraction {
        let normalized = normalize_text(text);
        let number = extract_number(&normalized);
        let product_ref = extract_product_ref(text);

        let need = if number.is_none() && product_ref.is_none() {
            None
        } else {
            extract_need(text, &normalized, number.as_ref())
        };

        Extraction {
            normalized,
            number,
            product_ref,
            need,
        }
    }

    /// Extract `{need, budget, product_ref}`
    ///
    /// Returns `None` ("no parse") when the text has neither a number nor a
    /// product reference, or when nothing usable remains around the number.
    pub fn extract(&self, text: &str) -> Option<ParsedRequest> {
        let extraction = self.analyze(text);
        let request = extraction.into_request();

        match &request {
            Some(r) => tracing::debug!(need = %r.need, budget = ?r.budget, product_ref = ?r.product_ref, "Extracted request"),
            None => tracing::debug!(text, "No budget, need or product reference found"),
        }

        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_need_and_budget() {
        let extractor = RequestExtractor::new();

        let request = extractor.extract("gaming laptop under 50000 please").unwrap();
        assert_eq!(request.need, "gaming laptop");
        assert_eq!(request.budget, Some(50_000));
        assert_eq!(request.product_ref, None);

        let request = extractor.extract("Mujhe 1.5 lakh tak ka laptop chahiye").unwrap();
        assert_eq!(request.budget, Some(150_000));
    }

    #[test]
    fn test_no_number_no_reference_is_no_parse() {
        let extractor = RequestExtractor::new();
        assert!(extractor.extract("which phone is best?").is_none());
        assert!(extractor.extract("").is_none());
    }

    #[test]
    fn test_budget_without_need_is_no_parse() {
        let extractor = RequestExtractor::new();
        assert!(extractor.extract("under 5000").is_none());
    }

    #[test]
    fn test_reference_without_budget() {
        let extractor = RequestExtractor::new();

        let request = extractor.extract("phone https://www.amazon.in/dp/B0C1X2Y3Z4").unwrap();
        assert_eq!(request.need, "phone");
        assert_eq!(request.budget, None);
        assert_eq!(request.product_ref.as_deref(), Some("B0C1X2Y3Z4"));
    }

    #[test]
    fn test_reference_only_synthesizes_need() {
        let extractor = RequestExtractor::new();

        let request = extractor.extract("amazon.in/dp/B0C1X2Y3Z4").unwrap();
        assert_eq!(request.need, "product B0C1X2Y3Z4");
        assert_eq!(request.budget, None);
    }

    #[test]
    fn test_analyze_keeps_intermediates() {
        let extraction = RequestExtractor::new().analyze("earphones  ₹1,500 ke under");
        assert_eq!(extraction.normalized, "earphones 1500 ke under");
        assert_eq!(extraction.number.as_ref().map(|n| n.raw.as_str()), Some("1500 ke under"));
        assert_eq!(extraction.need.as_deref(), Some("earphones"));
    }

    #[test]
    fn test_digits_in_product_url_slug_count_as_budget() {
        // First numeric token wins, even inside a pasted URL
        let request = RequestExtractor::new()
            .extract("ye phone kaisa hai https://www.amazon.in/Redmi-Note-13-5G/dp/B0C1X2Y3Z4")
            .unwrap();
        assert_eq!(request.budget, Some(13));
        assert_eq!(request.need, "ye phone kaisa hai");
        assert_eq!(request.product_ref.as_deref(), Some("B0C1X2Y3Z4"));
    }
}
