//! Extraction output types

use serde::{Deserialize, Serialize};

/// Budget unit multiplier
///
/// `Unit` covers bare numbers, `Thousand` covers k/thousand/hazar/हज़ार and
/// `Lakh` covers lakh/lac/लाख.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitMultiplier {
    Unit,     // 1
    Thousand, // 1,000
    Lakh,     // 1,00,000
}

impl UnitMultiplier {
    pub fn value(&self) -> u64 {
        match self {
            UnitMultiplier::Unit => 1,
            UnitMultiplier::Thousand => 1_000,
            UnitMultiplier::Lakh => 100_000,
        }
    }
}

/// A budget expression found in normalized text
///
/// Lives only for the duration of one extraction call.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberMatch {
    /// Matched substring exactly as it appears in the normalized text
    pub raw: String,
    /// Numeric literal before the unit (may be fractional, e.g. 1.5)
    pub value: f64,
    /// Resolved unit
    pub multiplier: UnitMultiplier,
    /// Byte offset of `raw` in the normalized text
    pub start: usize,
    /// Byte offset one past the end of `raw` in the normalized text
    pub end: usize,
}

impl NumberMatch {
    /// Budget in rupees, rounded to the nearest integer
    pub fn budget(&self) -> u64 {
        (self.value * self.multiplier.value() as f64).round() as u64
    }
}

/// Structured request extracted from one comment
///
/// `need` is always present: when the text yields no need phrase but a
/// product reference exists, the need is synthesized as `product <ref>`.
/// A comment with neither a need nor a reference produces no record at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedRequest {
    pub need: String,
    pub budget: Option<u64>,
    pub product_ref: Option<String>,
}

impl ParsedRequest {
    /// Need phrase used when only a product reference is available
    pub fn need_for_reference(product_ref: &str) -> String {
        format!("product {}", product_ref)
    }
}
