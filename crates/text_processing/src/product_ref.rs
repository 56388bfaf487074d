//! Product reference detection in pasted marketplace URLs

use once_cell::sync::Lazy;
use regex::Regex;

/// Length of a marketplace product reference
pub const PRODUCT_REF_LEN: usize = 10;

// Path keywords are case-insensitive, the captured reference keeps its case
static PRODUCT_REF_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i:/dp/|/gp/product/)([A-Za-z0-9]{10})(?:[^A-Za-z0-9]|$)").unwrap()
});

/// Find a `/dp/<ref>` or `/gp/product/<ref>` reference of exactly ten
/// alphanumeric characters
///
/// ```
/// use shopbot_text_processing::product_ref::extract_product_ref;
/// assert_eq!(
///     extract_product_ref("ye wala? amazon.in/dp/B0C1X2Y3Z4").as_deref(),
///     Some("B0C1X2Y3Z4")
/// );
/// ```
pub fn extract_product_ref(text: &str) -> Option<String> {
    PRODUCT_REF_PATTERN
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dp_reference() {
        assert_eq!(
            extract_product_ref("https://www.amazon.in/dp/B0C1X2Y3Z4?tag=x").as_deref(),
            Some("B0C1X2Y3Z4")
        );
        assert_eq!(
            extract_product_ref("amazon.in/DP/b0c1x2y3z4/").as_deref(),
            Some("b0c1x2y3z4")
        );
    }

    #[test]
    fn test_gp_product_reference() {
        assert_eq!(
            extract_product_ref("https://amazon.in/gp/product/8172234988 kaisa hai").as_deref(),
            Some("8172234988")
        );
    }

    #[test]
    fn test_wrong_length_rejected() {
        assert!(extract_product_ref("amazon.in/dp/B0C1X2Y3Z").is_none());
        assert!(extract_product_ref("amazon.in/dp/B0C1X2Y3Z45").is_none());
        assert!(extract_product_ref("no link here").is_none());
    }
}
