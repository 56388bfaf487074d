//! Reply policy
//!
//! Strict precedence chain over one extracted request:
//!
//! ```text
//! no request                      -> AskForCategoryAndBudget
//! category unknown                -> AskForCategory
//! category known, no budget       -> AskForBudget
//! category + budget, list found   -> SuggestTopN
//! category + budget, no list      -> SuggestFallback (product or search link)
//! ```

use shopbot_config::KnowledgeBase;
use shopbot_core::{LinkBuilder, ParsedRequest, ProductCategory, ReplyDecision, Result, Suggestion};
use shopbot_text_processing::classify;

/// Decide how to answer one request
///
/// Only the suggestion branches build links, so only they can fail.
pub fn decide(
    request: Option<&ParsedRequest>,
    knowledge: &KnowledgeBase,
    links: &dyn LinkBuilder,
) -> Result<ReplyDecision> {
    let Some(request) = request else {
        return Ok(ReplyDecision::AskForCategoryAndBudget);
    };

    let category = classify(&request.need);
    if !category.is_known() {
        return Ok(ReplyDecision::AskForCategory {
            need: request.need.clone(),
        });
    }

    let Some(budget) = request.budget else {
        return Ok(ReplyDecision::AskForBudget {
            need: request.need.clone(),
            category,
        });
    };

    match knowledge.recommendations(category) {
        Some(entries) => {
            let suggestions = entries
                .iter()
                .map(|entry| {
                    let query = format!("{} {}", entry.display_name, category);
                    Ok(Suggestion {
                        recommendation: entry.clone(),
                        link: links.search_link(&query, Some(budget))?,
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            Ok(ReplyDecision::SuggestTopN {
                need: request.need.clone(),
                category,
                budget,
                suggestions,
            })
        }
        None => {
            tracing::debug!(%category, "No recommendation list, using single link");
            fallback(request, links)
        }
    }
}

/// Single link: the referenced product when there is one, otherwise a search
fn fallback(request: &ParsedRequest, links: &dyn LinkBuilder) -> Result<ReplyDecision> {
    let link = match request.product_ref.as_deref() {
        Some(product_ref) => links.product_link(product_ref)?,
        None => links.search_link(&request.need, request.budget)?,
    };

    Ok(ReplyDecision::SuggestFallback {
        need: request.need.clone(),
        budget: request.budget,
        link,
    })
}

/// Category the policy resolved for a decision, if any
pub fn decision_category(decision: &ReplyDecision) -> Option<ProductCategory> {
    match decision {
        ReplyDecision::AskForBudget { category, .. } | ReplyDecision::SuggestTopN { category, .. } => {
            Some(*category)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::AffiliateLinkBuilder;
    use shopbot_core::{Error, Recommendation};
    use std::collections::BTreeMap;

    fn links() -> AffiliateLinkBuilder {
        AffiliateLinkBuilder::new("https://www.amazon.in", "shop-21").unwrap()
    }

    fn request(need: &str, budget: Option<u64>) -> ParsedRequest {
        ParsedRequest {
            need: need.to_string(),
            budget,
            product_ref: None,
        }
    }

    #[test]
    fn test_no_request_asks_for_both() {
        let kb = KnowledgeBase::builtin().unwrap();
        let decision = decide(None, &kb, &links()).unwrap();
        assert_eq!(decision, ReplyDecision::AskForCategoryAndBudget);
    }

    #[test]
    fn test_unknown_category() {
        let kb = KnowledgeBase::builtin().unwrap();
        let decision = decide(Some(&request("fancy watch", Some(3000))), &kb, &links()).unwrap();
        assert_eq!(
            decision,
            ReplyDecision::AskForCategory {
                need: "fancy watch".to_string()
            }
        );
    }

    #[test]
    fn test_known_category_without_budget_never_ready() {
        let kb = KnowledgeBase::builtin().unwrap();
        let decision = decide(Some(&request("phone", None)), &kb, &links()).unwrap();
        assert_eq!(
            decision,
            ReplyDecision::AskForBudget {
                need: "phone".to_string(),
                category: ProductCategory::Phone
            }
        );
    }

    #[test]
    fn test_ready_builds_top_n_in_stored_order() {
        let kb = KnowledgeBase::builtin().unwrap();
        let decision = decide(Some(&request("earphones", Some(1500))), &kb, &links()).unwrap();

        let ReplyDecision::SuggestTopN {
            suggestions,
            budget,
            category,
            ..
        } = decision
        else {
            panic!("expected top-n");
        };
        assert_eq!(budget, 1500);
        assert_eq!(category, ProductCategory::Earphones);
        assert_eq!(suggestions.len(), 3);

        let expected = kb.recommendations(ProductCategory::Earphones).unwrap();
        for (suggestion, entry) in suggestions.iter().zip(expected) {
            assert_eq!(&suggestion.recommendation, entry);
            assert!(suggestion.link.contains("under+1500+rupees"));
            assert!(suggestion.link.contains("earphones"));
        }
    }

    #[test]
    fn test_missing_list_falls_back_to_search() {
        let mut categories = BTreeMap::new();
        categories.insert(
            ProductCategory::Phone,
            vec![Recommendation::new("Any phone", "works")],
        );
        let kb = KnowledgeBase::from_entries(categories).unwrap();

        let decision = decide(Some(&request("gaming laptop", Some(50000))), &kb, &links()).unwrap();
        assert_eq!(
            decision,
            ReplyDecision::SuggestFallback {
                need: "gaming laptop".to_string(),
                budget: Some(50000),
                link: "https://www.amazon.in/s?k=gaming+laptop+under+50000+rupees&tag=shop-21"
                    .to_string(),
            }
        );
    }

    #[test]
    fn test_fallback_prefers_product_link() {
        let kb = KnowledgeBase::default();
        let request = ParsedRequest {
            need: "laptop".to_string(),
            budget: Some(40000),
            product_ref: Some("B0C1X2Y3Z4".to_string()),
        };

        let decision = decide(Some(&request), &kb, &links()).unwrap();
        assert_eq!(
            decision.primary_link(),
            Some("https://www.amazon.in/dp/B0C1X2Y3Z4?tag=shop-21")
        );
    }

    #[test]
    fn test_missing_tag_only_fails_link_branches() {
        let kb = KnowledgeBase::builtin().unwrap();
        let untagged = AffiliateLinkBuilder::new("https://www.amazon.in", "").unwrap();

        assert!(decide(Some(&request("phone", None)), &kb, &untagged).is_ok());
        assert!(decide(None, &kb, &untagged).is_ok());
        assert_eq!(
            decide(Some(&request("phone", Some(10000))), &kb, &untagged),
            Err(Error::ConfigurationMissing("affiliate tag".to_string()))
        );
    }

    #[test]
    fn test_decision_category() {
        let decision = ReplyDecision::AskForBudget {
            need: "kurta".to_string(),
            category: ProductCategory::Clothes,
        };
        assert_eq!(decision_category(&decision), Some(ProductCategory::Clothes));
        assert_eq!(decision_category(&ReplyDecision::AskForCategoryAndBudget), None);
    }
}
