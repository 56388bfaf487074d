//! Text normalization
//!
//! Normalized text is only used for number matching and the windowed need
//! capture. Casing is preserved: need phrases are cut from the original text.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Currency symbols stripped before number matching
const CURRENCY_SYMBOLS: [char; 5] = ['₹', '₨', '$', '€', '£'];

/// Strip currency symbols and thousands separators, collapse whitespace, trim
///
/// A comma is a thousands separator when it sits between two digits, so
/// both `15,000` and the Indian `1,50,000` grouping lose their commas while
/// `phone, laptop` keeps its punctuation. Idempotent.
///
/// ```
/// use shopbot_text_processing::normalize::normalize_text;
/// assert_eq!(normalize_text("  laptop   under ₹1,50,000 "), "laptop under 150000");
/// ```
pub fn normalize_text(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut stripped = String::with_capacity(text.len());

    for (i, &c) in chars.iter().enumerate() {
        if CURRENCY_SYMBOLS.contains(&c) {
            continue;
        }
        if c == ',' && is_thousands_separator(&chars, i) {
            continue;
        }
        stripped.push(c);
    }

    collapse_whitespace(&stripped)
}

/// Collapse whitespace runs to one space and trim
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

fn is_thousands_separator(chars: &[char], i: usize) -> bool {
    let before = i.checked_sub(1).and_then(|j| chars.get(j));
    let after = chars.get(i + 1);
    matches!((before, after), (Some(b), Some(a)) if b.is_ascii_digit() && a.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_and_symbols() {
        assert_eq!(normalize_text("earphones\t\t₹1500  ke\nunder"), "earphones 1500 ke under");
        assert_eq!(normalize_text("budget $ 200"), "budget 200");
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text("   "), "");
    }

    #[test]
    fn test_thousands_separators() {
        assert_eq!(normalize_text("15,000"), "15000");
        assert_eq!(normalize_text("1,50,000"), "150000");
        assert_eq!(normalize_text("1,2,3"), "123");
        assert_eq!(normalize_text("phone, laptop"), "phone, laptop");
    }

    #[test]
    fn test_casing_preserved() {
        assert_eq!(normalize_text("Gaming LAPTOP Under 50k"), "Gaming LAPTOP Under 50k");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "  Mujhe ₹ 2,500 ke under  earphones chahiye ",
            "1,,2 ₹ , 3",
            "हज़ार  2 ",
            "gaming laptop under 50000 please",
        ];
        for sample in samples {
            let once = normalize_text(sample);
            assert_eq!(normalize_text(&once), once, "not idempotent for {:?}", sample);
        }
    }
}
