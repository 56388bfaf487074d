//! Product taxonomy and static recommendation entries

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of product categories
///
/// `Unknown` is a normal classification outcome that routes to the
/// category clarification prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Phone,
    Earphones,
    Laptop,
    Clothes,
    Home,
    Unknown,
}

impl ProductCategory {
    /// Every category that owns a recommendation list
    pub const KNOWN: [ProductCategory; 5] = [
        ProductCategory::Phone,
        ProductCategory::Earphones,
        ProductCategory::Laptop,
        ProductCategory::Clothes,
        ProductCategory::Home,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Phone => "phone",
            ProductCategory::Earphones => "earphones",
            ProductCategory::Laptop => "laptop",
            ProductCategory::Clothes => "clothes",
            ProductCategory::Home => "home",
            ProductCategory::Unknown => "unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ProductCategory::Unknown)
    }

    /// Comma separated list of known categories, as shown to users
    pub fn known_list() -> String {
        Self::KNOWN
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "phone" => Ok(ProductCategory::Phone),
            "earphones" => Ok(ProductCategory::Earphones),
            "laptop" => Ok(ProductCategory::Laptop),
            "clothes" => Ok(ProductCategory::Clothes),
            "home" => Ok(ProductCategory::Home),
            "unknown" => Ok(ProductCategory::Unknown),
            other => Err(format!("unknown product category: {}", other)),
        }
    }
}

/// One entry of a category's recommendation list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub display_name: String,
    pub reason_phrase: String,
}

impl Recommendation {
    pub fn new(display_name: impl Into<String>, reason_phrase: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            reason_phrase: reason_phrase.into(),
        }
    }
}
