//! Keyword based product category classification
//!
//! Cues overlap ("earphones" contains "phone"), so categories are tested in
//! a fixed order: audio, phone, laptop, clothing, home goods.

use once_cell::sync::Lazy;
use regex::Regex;

use shopbot_core::ProductCategory;

// Patterns run against lowercased text (order matters - audio before phone)
static CATEGORY_PATTERNS: Lazy<Vec<(ProductCategory, Regex)>> = Lazy::new(|| vec![
    (ProductCategory::Earphones, Regex::new(r"(?:earphone|earbud|ear\s*pods?|headphone|headset|neckband|airpods|\btws\b|bluetooth\s+speaker)").unwrap()),
    (ProductCategory::Phone, Regex::new(r"\b(?:phones?|smart\s*phones?|mobiles?|iphones?|fone|फ़ोन|फोन|मोबाइल)\b").unwrap()),
    (ProductCategory::Laptop, Regex::new(r"\b(?:laptops?|notebooks?|macbooks?|chromebooks?)\b").unwrap()),
    (ProductCategory::Clothes, Regex::new(r"\b(?:clothes|clothing|kapde|kapda|shirts?|t-?shirts?|tshirts?|jeans|kurtas?|kurtis?|sarees?|saris?|dress(?:es)?|jackets?|hoodies?|trousers?|lehengas?|tracksuits?)\b").unwrap()),
    (ProductCategory::Home, Regex::new(r"\b(?:home|kitchen|mixer|grinder|cooler|fans?|bedsheets?|curtains?|geyser|iron|purifier|cookware|pressure\s+cooker|mattress|sofa)\b").unwrap()),
]);

/// Classify a need phrase
///
/// Lowercases a copy internally; the caller's need string is untouched.
/// `Unknown` is a regular outcome, not an error.
pub fn classify(need: &str) -> ProductCategory {
    let lower = need.to_lowercase();

    for (category, pattern) in CATEGORY_PATTERNS.iter() {
        if pattern.is_match(&lower) {
            return *category;
        }
    }

    ProductCategory::Unknown
}
