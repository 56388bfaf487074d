//! Recommendation knowledge base
//!
//! Maps each known product category to an ordered list of
//! recommendations. Built once at startup and never mutated, so a single
//! instance can be shared by any number of concurrent readers.

use serde::Deserialize;
use shopbot_core::{ProductCategory, Recommendation};
use std::collections::BTreeMap;
use std::path::Path;

use crate::ConfigError;

const BUILTIN_YAML: &str = include_str!("../data/recommendations.yaml");

#[derive(Debug, Deserialize)]
struct KnowledgeBaseFile {
    #[serde(default)]
    categories: BTreeMap<ProductCategory, Vec<Recommendation>>,
}

/// Read-only category → recommendations table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnowledgeBase {
    categories: BTreeMap<ProductCategory, Vec<Recommendation>>,
}

impl KnowledgeBase {
    /// Knowledge base shipped with the binary
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_yaml(BUILTIN_YAML)
    }

    /// Load from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileNotFound(format!("{}: {}", path.display(), e)))?;

        let kb = Self::from_yaml(&content)?;
        tracing::info!(
            path = %path.display(),
            categories = kb.categories.len(),
            "Loaded recommendation knowledge base"
        );
        Ok(kb)
    }

    /// Parse and validate YAML content
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let file: KnowledgeBaseFile =
            serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        Self::from_entries(file.categories)
    }

    /// Build from in-memory entries, applying the same validation as file loads
    pub fn from_entries(
        categories: BTreeMap<ProductCategory, Vec<Recommendation>>,
    ) -> Result<Self, ConfigError> {
        for (category, entries) in &categories {
            let field = format!("categories.{}", category);
            if !category.is_known() {
                return Err(ConfigError::InvalidValue {
                    field,
                    message: "The unknown category cannot carry recommendations".to_string(),
                });
            }
            if entries.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field,
                    message: "Recommendation list is empty".to_string(),
                });
            }
            if let Some(pos) = entries
                .iter()
                .position(|r| r.display_name.trim().is_empty())
            {
                return Err(ConfigError::InvalidValue {
                    field,
                    message: format!("Entry {} has a blank display_name", pos + 1),
                });
            }
        }

        Ok(Self { categories })
    }

    /// Recommendations for a category, in stored order
    pub fn recommendations(&self, category: ProductCategory) -> Option<&[Recommendation]> {
        self.categories.get(&category).map(|v| v.as_slice())
    }

    /// Categories that have a list
    pub fn categories(&self) -> impl Iterator<Item = ProductCategory> + '_ {
        self.categories.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_has_three_per_category() {
        let kb = KnowledgeBase::builtin().unwrap();
        for category in ProductCategory::KNOWN {
            let entries = kb.recommendations(category).unwrap();
            assert_eq!(entries.len(), 3, "category {}", category);
        }
        assert!(kb.recommendations(ProductCategory::Unknown).is_none());
    }

    #[test]
    fn test_builtin_order_preserved() {
        let kb = KnowledgeBase::builtin().unwrap();
        let names: Vec<_> = kb
            .recommendations(ProductCategory::Earphones)
            .unwrap()
            .iter()
            .map(|r| r.display_name.as_str())
            .collect();
        assert_eq!(names, vec!["boAt Airdopes", "Noise Buds", "realme Buds"]);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "categories:\n  laptop:\n    - display_name: \"ThinkPad E14\"\n      reason_phrase: \"solid keyboard\""
        )
        .unwrap();

        let kb = KnowledgeBase::load(file.path()).unwrap();
        assert_eq!(kb.len(), 1);
        assert_eq!(
            kb.recommendations(ProductCategory::Laptop).unwrap()[0],
            Recommendation::new("ThinkPad E14", "solid keyboard")
        );
        // Categories absent from the file have no list
        assert!(kb.recommendations(ProductCategory::Phone).is_none());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = KnowledgeBase::load(dir.path().join("missing.yaml"));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_rejects_unknown_category() {
        let yaml = "categories:\n  unknown:\n    - display_name: \"X\"\n      reason_phrase: \"y\"\n";
        assert!(matches!(
            KnowledgeBase::from_yaml(yaml),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_rejects_empty_list_and_blank_name() {
        assert!(KnowledgeBase::from_yaml("categories:\n  home: []\n").is_err());

        let yaml = "categories:\n  home:\n    - display_name: \"  \"\n      reason_phrase: \"y\"\n";
        assert!(KnowledgeBase::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_rejects_unlisted_category_name() {
        let yaml = "categories:\n  tablet:\n    - display_name: \"X\"\n      reason_phrase: \"y\"\n";
        assert!(matches!(
            KnowledgeBase::from_yaml(yaml),
            Err(ConfigError::ParseError(_))
        ));
    }
}
