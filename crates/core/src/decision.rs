//! Reply policy decisions

use serde::{Deserialize, Serialize};

use crate::catalog::{ProductCategory, Recommendation};

/// A recommendation paired with the search link built for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub recommendation: Recommendation,
    pub link: String,
}

/// Outcome of the reply policy for one request
///
/// Produced fresh per comment and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReplyDecision {
    /// Nothing usable in the text
    AskForCategoryAndBudget,
    /// A need exists but matches no category
    AskForCategory { need: String },
    /// Category known, budget absent
    AskForBudget {
        need: String,
        category: ProductCategory,
    },
    /// Category and budget known: the category's recommendation list
    SuggestTopN {
        need: String,
        category: ProductCategory,
        budget: u64,
        suggestions: Vec<Suggestion>,
    },
    /// Single search or product link
    SuggestFallback {
        need: String,
        budget: Option<u64>,
        link: String,
    },
}

impl ReplyDecision {
    /// Short stable name, used in logs, metrics and reports
    pub fn kind(&self) -> &'static str {
        match self {
            ReplyDecision::AskForCategoryAndBudget => "ask_for_category_and_budget",
            ReplyDecision::AskForCategory { .. } => "ask_for_category",
            ReplyDecision::AskForBudget { .. } => "ask_for_budget",
            ReplyDecision::SuggestTopN { .. } => "suggest_top_n",
            ReplyDecision::SuggestFallback { .. } => "suggest_fallback",
        }
    }

    /// True when the comment carried no budget, need or product reference
    pub fn is_no_signal(&self) -> bool {
        matches!(self, ReplyDecision::AskForCategoryAndBudget)
    }

    /// First outbound link carried by the decision, if any
    pub fn primary_link(&self) -> Option<&str> {
        match self {
            ReplyDecision::SuggestTopN { suggestions, .. } => {
                suggestions.first().map(|s| s.link.as_str())
            }
            ReplyDecision::SuggestFallback { link, .. } => Some(link.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_links() {
        let decision = ReplyDecision::SuggestFallback {
            need: "product B0C1X2Y3Z4".to_string(),
            budget: None,
            link: "https://www.amazon.in/dp/B0C1X2Y3Z4?tag=t-21".to_string(),
        };
        assert_eq!(decision.kind(), "suggest_fallback");
        assert!(decision.primary_link().unwrap().contains("B0C1X2Y3Z4"));
        assert!(ReplyDecision::AskForCategoryAndBudget.is_no_signal());
        assert!(ReplyDecision::AskForCategoryAndBudget.primary_link().is_none());
    }

    #[test]
    fn test_serialized_tag() {
        let decision = ReplyDecision::AskForBudget {
            need: "phone".to_string(),
            category: ProductCategory::Phone,
        };
        let json = serde_json::to_value(&decision).unwrap();
        assert_eq!(json["kind"], "ask_for_budget");
        assert_eq!(json["category"], "phone");
    }
}
