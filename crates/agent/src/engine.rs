//! Text → decision → reply

use serde::Serialize;
use shopbot_config::{KnowledgeBase, ReplyTemplates};
use shopbot_core::{LinkBuilder, ParsedRequest, ReplyDecision, Result};
use shopbot_text_processing::RequestExtractor;
use std::sync::Arc;

use crate::policy::{decide, decision_category};
use crate::response::ReplyComposer;

/// Everything produced for one comment
#[derive(Debug, Clone, Serialize)]
pub struct Reply {
    /// Extracted request, `None` when the text carried no signal
    pub parsed: Option<ParsedRequest>,
    pub decision: ReplyDecision,
    /// Composed reply text
    pub text: String,
}

impl Reply {
    pub fn is_no_signal(&self) -> bool {
        self.decision.is_no_signal()
    }
}

/// The reply pipeline for a single comment
///
/// Holds only read-only state, so one engine can serve any number of
/// concurrent callers.
#[derive(Clone)]
pub struct ReplyEngine {
    extractor: RequestExtractor,
    knowledge: Arc<KnowledgeBase>,
    links: Arc<dyn LinkBuilder>,
    composer: ReplyComposer,
}

impl ReplyEngine {
    pub fn new(
        knowledge: Arc<KnowledgeBase>,
        links: Arc<dyn LinkBuilder>,
        templates: ReplyTemplates,
    ) -> Self {
        Self {
            extractor: RequestExtractor::new(),
            knowledge,
            links,
            composer: ReplyComposer::new(templates),
        }
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Run the full pipeline on one comment
    ///
    /// Fails only when a suggestion link cannot be built.
    pub fn respond(&self, text: &str) -> Result<Reply> {
        let parsed = self.extractor.extract(text);
        let decision = decide(parsed.as_ref(), &self.knowledge, self.links.as_ref())?;

        tracing::debug!(
            decision = decision.kind(),
            category = ?decision_category(&decision),
            need = ?parsed.as_ref().map(|p| p.need.as_str()),
            budget = ?parsed.as_ref().and_then(|p| p.budget),
            "Reply decided"
        );

        let text = self.composer.compose(&decision);
        Ok(Reply {
            parsed,
            decision,
            text,
        })
    }
}

impl std::fmt::Debug for ReplyEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReplyEngine")
            .field("categories", &self.knowledge.len())
            .finish_non_exhaustive()
    }
}
