//! Need phrase extraction
//!
//! The need is cut from the *original* comment so the author's casing
//! survives into the reply. Comments are short and loose, so plain
//! removal can leave nothing behind; a window of words around the budget
//! in the normalized text is the fallback.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use shopbot_core::NumberMatch;

use crate::normalize::collapse_whitespace;

/// Words kept before the budget phrase in the fallback window
pub const WINDOW_WORDS_BEFORE: usize = 4;
/// Words kept after the budget phrase in the fallback window
pub const WINDOW_WORDS_AFTER: usize = 6;

/// Needs shorter than this (in characters) trigger the window fallback
const MIN_NEED_CHARS: usize = 2;

// Filler words and phrases, removed as whole words (order matters: the
// "ke under" particle goes before the lone "under")
static FILLER_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\bke\s*under\b",
        r"(?i)\bunder\b",
        r"(?i)\bplease\b",
        r"(?i)\bplz\b",
        r"(?i)\bpls\b",
        r"(?i)\bpl\b",
        r"(?i)\bkindly\b",
        r"(?i)\bbata\s+do\b",
        r"(?i)\bbatao\b",
        r"(?i)\bbataiye\b",
        r"(?i)\btell\s+me\b",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

// A pasted marketplace URL is a reference, not part of the need
static PRODUCT_URL_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\S*(?:/dp/|/gp/product/)\S*").unwrap());

/// Remove the first case-insensitive occurrence of `phrase`
///
/// `phrase` comes from normalized text, so the match tolerates what
/// normalization dropped: any whitespace run between words, a currency
/// symbol before a word and commas between digits.
pub fn remove_first_occurrence(text: &str, phrase: &str) -> String {
    let pieces: Vec<String> = phrase.split_whitespace().map(piece_pattern).collect();
    if pieces.is_empty() {
        return text.to_string();
    }

    match Regex::new(&format!("(?i){}", pieces.join(r"\s+"))) {
        Ok(pattern) => pattern.replacen(text, 1, "").into_owned(),
        Err(e) => {
            tracing::warn!(phrase, error = %e, "Could not build removal pattern");
            text.to_string()
        }
    }
}

fn piece_pattern(piece: &str) -> String {
    let mut pattern = String::from(r"(?:[₹₨$€£]\s*)?");
    let mut buf = [0u8; 4];
    for c in piece.chars() {
        pattern.push_str(&regex::escape(c.encode_utf8(&mut buf)));
        if c.is_ascii_digit() {
            pattern.push_str(",?");
        }
    }
    pattern
}

/// Strip product URLs and filler words, then collapse whitespace
pub fn strip_fillers(text: &str) -> String {
    let mut stripped = PRODUCT_URL_TOKEN.replace_all(text, " ").into_owned();
    for pattern in FILLER_PATTERNS.iter() {
        stripped = pattern.replace_all(&stripped, " ").into_owned();
    }
    collapse_whitespace(&stripped)
}

/// Words around the budget phrase in normalized text
///
/// Takes up to [`WINDOW_WORDS_BEFORE`] words before and [`WINDOW_WORDS_AFTER`]
/// words after the match, dropping the `ke`/`under` particles.
pub fn window_capture(normalized: &str, matched: &NumberMatch) -> String {
    let before = normalized.get(..matched.start).unwrap_or_default();
    let after = normalized.get(matched.end..).unwrap_or_default();

    let before_words: Vec<&str> = before.unicode_words().collect();
    let skip = before_words.len().saturating_sub(WINDOW_WORDS_BEFORE);

    before_words
        .into_iter()
        .skip(skip)
        .chain(after.unicode_words().take(WINDOW_WORDS_AFTER))
        .filter(|w| !is_particle(w))
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_particle(word: &str) -> bool {
    word.eq_ignore_ascii_case("ke") || word.eq_ignore_ascii_case("under")
}

/// Extract the residual need phrase
///
/// * `original` - comment text as written
/// * `normalized` - output of [`crate::normalize::normalize_text`] for the same comment
/// * `matched` - budget expression found in `normalized`, if any
///
/// Returns `None` when nothing is left, which the caller treats as "no need".
pub fn extract_need(
    original: &str,
    normalized: &str,
    matched: Option<&NumberMatch>,
) -> Option<String> {
    let mut need = match matched {
        Some(m) => strip_fillers(&remove_first_occurrence(original, &m.raw)),
        None => strip_fillers(original),
    };

    if let Some(m) = matched {
        if need.chars().count() < MIN_NEED_CHARS {
            let candidate = window_capture(normalized, m);
            if candidate.chars().count() > need.chars().count() {
                tracing::debug!(
                    candidate = %candidate,
                    "Need recovered from window around budget"
                );
                need = candidate;
            }
        }
    }

    let need = collapse_whitespace(&need);
    if need.is_empty() {
        None
    } else {
        Some(need)
    }
}
