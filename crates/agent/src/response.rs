//! Reply text composition
//!
//! One named template per decision branch. Every reply ends with the
//! affiliate disclosure footer.

use shopbot_config::ReplyTemplates;
use shopbot_core::{ProductCategory, ReplyDecision, Suggestion};

/// Renders [`ReplyDecision`]s into comment replies
#[derive(Debug, Clone, Default)]
pub struct ReplyComposer {
    templates: ReplyTemplates,
}

impl ReplyComposer {
    pub fn new(templates: ReplyTemplates) -> Self {
        Self { templates }
    }

    pub fn templates(&self) -> &ReplyTemplates {
        &self.templates
    }

    /// Full reply text for a decision
    pub fn compose(&self, decision: &ReplyDecision) -> String {
        let body = match decision {
            ReplyDecision::AskForCategoryAndBudget => self.clarify_both(),
            ReplyDecision::AskForCategory { need } => self.clarify_category(need),
            ReplyDecision::AskForBudget { need, category } => self.clarify_budget(need, *category),
            ReplyDecision::SuggestTopN {
                need,
                category,
                budget,
                suggestions,
            } => self.suggestions(need, *category, *budget, suggestions),
            ReplyDecision::SuggestFallback { need, budget, link } => {
                self.fallback(need, *budget, link)
            }
        };

        format!("{}\n\n{}", body, self.templates.footer)
    }

    fn clarify_both(&self) -> String {
        self.templates.clarify_both.clone()
    }

    fn clarify_category(&self, need: &str) -> String {
        let categories = ProductCategory::known_list();
        ReplyTemplates::render(
            &self.templates.clarify_category,
            &[("need", need), ("categories", categories.as_str())],
        )
    }

    fn clarify_budget(&self, need: &str, category: ProductCategory) -> String {
        ReplyTemplates::render(
            &self.templates.clarify_budget,
            &[("need", need), ("category", category.as_str())],
        )
    }

    fn suggestions(
        &self,
        need: &str,
        category: ProductCategory,
        budget: u64,
        suggestions: &[Suggestion],
    ) -> String {
        let budget = format_inr(budget);
        let mut lines = Vec::with_capacity(suggestions.len() + 1);
        lines.push(ReplyTemplates::render(
            &self.templates.suggestions_header,
            &[
                ("need", need),
                ("category", category.as_str()),
                ("budget", budget.as_str()),
            ],
        ));

        for (i, suggestion) in suggestions.iter().enumerate() {
            let index = (i + 1).to_string();
            lines.push(ReplyTemplates::render(
                &self.templates.suggestion_item,
                &[
                    ("index", index.as_str()),
                    ("name", suggestion.recommendation.display_name.as_str()),
                    ("reason", suggestion.recommendation.reason_phrase.as_str()),
                    ("link", suggestion.link.as_str()),
                ],
            ));
        }

        lines.join("\n")
    }

    fn fallback(&self, need: &str, budget: Option<u64>, link: &str) -> String {
        let budget_text = match budget {
            Some(budget) => format!("approx {}", format_inr(budget)),
            None => self.templates.unknown_budget.clone(),
        };

        ReplyTemplates::render(
            &self.templates.fallback,
            &[("need", need), ("budget", budget_text.as_str()), ("link", link)],
        )
    }
}

/// Rupee amount with Indian digit grouping: 150000 -> `₹1,50,000`
pub fn format_inr(amount: u64) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return format!("₹{}", digits);
    }

    let (head, last_three) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("₹{},{}", groups.join(","), last_three)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopbot_core::Recommendation;

    fn composer() -> ReplyComposer {
        ReplyComposer::default()
    }

    #[test]
    fn test_format_inr() {
        assert_eq!(format_inr(0), "₹0");
        assert_eq!(format_inr(999), "₹999");
        assert_eq!(format_inr(1500), "₹1,500");
        assert_eq!(format_inr(50000), "₹50,000");
        assert_eq!(format_inr(150000), "₹1,50,000");
        assert_eq!(format_inr(12345678), "₹1,23,45,678");
    }

    #[test]
    fn test_every_reply_ends_with_footer() {
        let composer = composer();
        let footer = &composer.templates().footer;
        let decisions = [
            ReplyDecision::AskForCategoryAndBudget,
            ReplyDecision::AskForCategory {
                need: "watch".to_string(),
            },
            ReplyDecision::AskForBudget {
                need: "phone".to_string(),
                category: ProductCategory::Phone,
            },
        ];
        for decision in &decisions {
            assert!(composer.compose(decision).ends_with(footer.as_str()));
        }
    }

    #[test]
    fn test_clarify_category_lists_categories() {
        let reply = composer().compose(&ReplyDecision::AskForCategory {
            need: "Fancy Watch".to_string(),
        });
        assert!(reply.contains("\"Fancy Watch\""));
        assert!(reply.contains("phone, earphones, laptop, clothes, home"));
    }

    #[test]
    fn test_clarify_budget_gives_ranges() {
        let reply = composer().compose(&ReplyDecision::AskForBudget {
            need: "Redmi phone".to_string(),
            category: ProductCategory::Phone,
        });
        assert!(reply.contains("Redmi phone"));
        assert!(reply.contains("₹5,000-10,000"));
    }

    #[test]
    fn test_suggestions_enumerated_in_order() {
        let suggestions = vec![
            Suggestion {
                recommendation: Recommendation::new("First", "one"),
                link: "https://example.test/1".to_string(),
            },
            Suggestion {
                recommendation: Recommendation::new("Second", "two"),
                link: "https://example.test/2".to_string(),
            },
        ];
        let reply = composer().compose(&ReplyDecision::SuggestTopN {
            need: "earphones".to_string(),
            category: ProductCategory::Earphones,
            budget: 1500,
            suggestions,
        });

        assert!(reply.contains("₹1,500"));
        let first = reply.find("1. First – one\nhttps://example.test/1").unwrap();
        let second = reply.find("2. Second – two\nhttps://example.test/2").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_fallback_budget_text() {
        let composer = composer();
        let with_budget = composer.compose(&ReplyDecision::SuggestFallback {
            need: "Gaming Laptop".to_string(),
            budget: Some(150000),
            link: "https://example.test/s".to_string(),
        });
        assert!(with_budget.contains("\"Gaming Laptop\""));
        assert!(with_budget.contains("approx ₹1,50,000"));
        assert!(with_budget.contains("https://example.test/s"));

        let without_budget = composer.compose(&ReplyDecision::SuggestFallback {
            need: "saree".to_string(),
            budget: None,
            link: "https://example.test/s".to_string(),
        });
        assert!(without_budget.contains("aapke budget"));
    }
}
