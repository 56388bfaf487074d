//! Budget (number + unit) extraction
//!
//! Budget expressions are matched by an ordered list of named rules; the
//! first rule that matches anywhere in the normalized text wins:
//!
//! 1. `under 2500`, `under 2.5k`
//! 2. `2k ke under`, `2 k ke under`
//! 3. `5000 ke`
//! 4. the first standalone number, with an optional unit
//!
//! Units: `k`/`thousand`/`hazar`/हज़ार → ×1,000 and `lakh`/`lac`/लाख → ×1,00,000.
//! A bare number is taken at face value. The generic rule happily matches
//! stray numbers (model numbers, quantities); first number wins.

use once_cell::sync::Lazy;
use regex::Regex;

use shopbot_core::{NumberMatch, UnitMultiplier};

use crate::normalize::normalize_text;

/// Unit alternation, longest spelling first.
///
/// हज़ार appears with a precomposed ज़ (U+095B), with ज + nukta
/// (U+091C U+093C), and without the nukta.
const UNIT_ALTERNATION: &str = concat!(
    "thousand|lakhs|lakh|lacs|lac|hazaar|hazar|k|",
    "\u{939}\u{95B}\u{93E}\u{930}|",
    "\u{939}\u{91C}\u{93C}\u{93E}\u{930}|",
    "\u{939}\u{91C}\u{93E}\u{930}|",
    "\u{932}\u{93E}\u{916}",
);

/// Named budget matcher, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetRule {
    /// `under <number><unit>`
    UnderPrefix,
    /// `<number><unit> ke under`
    KeUnderSuffix,
    /// `<number><unit> ke`
    KeSuffix,
    /// First standalone `<number><unit>`
    Generic,
}

impl BudgetRule {
    pub fn name(&self) -> &'static str {
        match self {
            BudgetRule::UnderPrefix => "under_prefix",
            BudgetRule::KeUnderSuffix => "ke_under_suffix",
            BudgetRule::KeSuffix => "ke_suffix",
            BudgetRule::Generic => "generic",
        }
    }
}

static BUDGET_RULES: Lazy<Vec<(BudgetRule, Regex)>> = Lazy::new(|| {
    // ASCII digits only: `\d` would also take Devanagari numerals, which
    // do not parse as f64
    let num = r"(?P<num>[0-9]+(?:\.[0-9]+)?)";
    let unit = format!(r"(?:\s*(?P<unit>{}))?", UNIT_ALTERNATION);
    vec![
        (
            BudgetRule::UnderPrefix,
            Regex::new(&format!(r"(?i)\bunder\s+{num}{unit}\b")).unwrap(),
        ),
        (
            BudgetRule::KeUnderSuffix,
            Regex::new(&format!(r"(?i)\b{num}{unit}\s+ke\s+under\b")).unwrap(),
        ),
        (
            BudgetRule::KeSuffix,
            Regex::new(&format!(r"(?i)\b{num}{unit}\s+ke\b")).unwrap(),
        ),
        (
            BudgetRule::Generic,
            Regex::new(&format!(r"(?i)\b{num}{unit}\b")).unwrap(),
        ),
    ]
});

/// Resolve a unit token to its multiplier (case-insensitive)
pub fn unit_multiplier(token: &str) -> UnitMultiplier {
    match token.trim().to_lowercase().as_str() {
        "k" | "thousand" | "hazar" | "hazaar" => UnitMultiplier::Thousand,
        "lakh" | "lakhs" | "lac" | "lacs" => UnitMultiplier::Lakh,
        "\u{939}\u{95B}\u{93E}\u{930}"
        | "\u{939}\u{91C}\u{93C}\u{93E}\u{930}"
        | "\u{939}\u{91C}\u{93E}\u{930}" => UnitMultiplier::Thousand,
        "\u{932}\u{93E}\u{916}" => UnitMultiplier::Lakh,
        _ => UnitMultiplier::Unit,
    }
}

/// Find the best budget expression in normalized text
///
/// Returns `None` when the text holds no number at all, which is the usual
/// case for pure "which phone is good" questions.
pub fn extract_number(normalized: &str) -> Option<NumberMatch> {
    extract_number_with_rule(normalized).map(|(_, number)| number)
}

/// Same as [`extract_number`], also reporting which rule matched
pub fn extract_number_with_rule(normalized: &str) -> Option<(BudgetRule, NumberMatch)> {
    for (rule, pattern) in BUDGET_RULES.iter() {
        let Some(caps) = pattern.captures(normalized) else {
            continue;
        };
        let (Some(whole), Some(num)) = (caps.get(0), caps.name("num")) else {
            continue;
        };
        let Ok(value) = num.as_str().parse::<f64>() else {
            continue;
        };
        let multiplier = caps
            .name("unit")
            .map(|u| unit_multiplier(u.as_str()))
            .unwrap_or(UnitMultiplier::Unit);

        tracing::trace!(
            rule = rule.name(),
            raw = whole.as_str(),
            value,
            multiplier = multiplier.value(),
            "Matched budget expression"
        );

        return Some((
            *rule,
            NumberMatch {
                raw: whole.as_str().to_string(),
                value,
                multiplier,
                start: whole.start(),
                end: whole.end(),
            },
        ));
    }

    None
}

/// Convenience: normalize raw text and return the resolved budget in rupees
pub fn extract_budget(text: &str) -> Option<u64> {
    extract_number(&normalize_text(text)).map(|m| m.budget())
}
