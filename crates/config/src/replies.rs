//! Reply templates
//!
//! One template per reply branch, with `{placeholder}` substitution.
//! Defaults are built in; any field can be overridden under `replies:` in
//! the settings file.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Reply templates keyed by reply branch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyTemplates {
    /// Nothing usable in the message
    #[serde(default = "default_clarify_both")]
    pub clarify_both: String,

    /// Need found but no known category. Placeholders: `{need}`, `{categories}`
    #[serde(default = "default_clarify_category")]
    pub clarify_category: String,

    /// Category known, budget missing. Placeholders: `{need}`, `{category}`
    #[serde(default = "default_clarify_budget")]
    pub clarify_budget: String,

    /// Heading above the Top-N list. Placeholders: `{need}`, `{category}`, `{budget}`
    #[serde(default = "default_suggestions_header")]
    pub suggestions_header: String,

    /// One Top-N entry. Placeholders: `{index}`, `{name}`, `{reason}`, `{link}`
    #[serde(default = "default_suggestion_item")]
    pub suggestion_item: String,

    /// Single search link. Placeholders: `{need}`, `{budget}`, `{link}`
    #[serde(default = "default_fallback")]
    pub fallback: String,

    /// Substituted for `{budget}` in the fallback when no budget is known
    #[serde(default = "default_unknown_budget")]
    pub unknown_budget: String,

    /// Appended to every reply
    #[serde(default = "default_footer")]
    pub footer: String,
}

fn default_clarify_both() -> String {
    "Aap kya lena chahte hain aur budget kitna hai? \
     Jaise: \"earphones under 1500\" ya \"gaming laptop 60k\"."
        .to_string()
}

fn default_clarify_category() -> String {
    "Aapki requirement: \"{need}\".\n\
     Ye kis category mein hai? Options: {categories}."
        .to_string()
}

fn default_clarify_budget() -> String {
    "Aapki requirement: \"{need}\" ({category}).\n\
     Aapka budget kitna hai? Jaise: ₹1,000-2,000, ₹5,000-10,000 ya ₹20,000+."
        .to_string()
}

fn default_suggestions_header() -> String {
    "Aapki requirement: \"{need}\"\n\
     Budget approx {budget} ke hisaab se top {category} options:"
        .to_string()
}

fn default_suggestion_item() -> String {
    "{index}. {name} – {reason}\n{link}".to_string()
}

fn default_fallback() -> String {
    "Aapki requirement: \"{need}\"\n\
     Aur budget: {budget} ke hisaab se,\n\
     ye Amazon par best options ke liye search link hai:\n\
     {link}"
        .to_string()
}

fn default_unknown_budget() -> String {
    "aapke budget".to_string()
}

fn default_footer() -> String {
    "Note: ye affiliate link hai, aapko koi extra cost nahi lagegi.\n\
     Aur specific options chahiye to apni requirement aur budget reply karein. 🙂"
        .to_string()
}

impl Default for ReplyTemplates {
    fn default() -> Self {
        Self {
            clarify_both: default_clarify_both(),
            clarify_category: default_clarify_category(),
            clarify_budget: default_clarify_budget(),
            suggestions_header: default_suggestions_header(),
            suggestion_item: default_suggestion_item(),
            fallback: default_fallback(),
            unknown_budget: default_unknown_budget(),
            footer: default_footer(),
        }
    }
}

impl ReplyTemplates {
    /// Substitute `{key}` placeholders in a template
    ///
    /// Single left-to-right pass over the template: substituted values are
    /// never rescanned, so a value containing `{...}` is copied verbatim.
    /// Unknown placeholders are left as-is.
    pub fn render(template: &str, placeholders: &[(&str, &str)]) -> String {
        let mut message = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            message.push_str(&rest[..open]);
            let after = &rest[open + 1..];

            let value = after.find('}').and_then(|close| {
                let key = &after[..close];
                placeholders
                    .iter()
                    .find(|(k, _)| *k == key)
                    .map(|(_, value)| (*value, close))
            });

            match value {
                Some((value, close)) => {
                    message.push_str(value);
                    rest = &after[close + 1..];
                }
                None => {
                    message.push('{');
                    rest = after;
                }
            }
        }

        message.push_str(rest);
        message
    }

    /// Reject templates that would drop a link from the reply
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("replies.suggestion_item", &self.suggestion_item, "{link}"),
            ("replies.fallback", &self.fallback, "{link}"),
        ];
        for (field, template, placeholder) in required {
            if !template.contains(placeholder) {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    message: format!("Template must contain {}", placeholder),
                });
            }
        }

        if self.footer.trim().is_empty() {
            return Err(ConfigError::MissingField("replies.footer".to_string()));
        }
        Ok(())
    }
}
