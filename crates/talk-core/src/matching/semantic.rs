//! Vector-similarity matching against the embedding index.

use super::{MatchContext, MatchStrategy, StrategyHit};
use crate::shared::DEFAULT_SIMILARITY_THRESHOLD;

#[derive(Debug, Clone, Copy)]
pub struct SemanticStrategy {
    threshold: f32,
}

impl SemanticStrategy {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }
}

impl Default for SemanticStrategy {
    fn default() -> Self {
        Self::new(DEFAULT_SIMILARITY_THRESHOLD)
    }
}

impl MatchStrategy for SemanticStrategy {
    fn name(&self) -> &'static str {
        "semantic"
    }

    fn find(&self, query: &str, ctx: &MatchContext<'_>) -> Option<StrategyHit> {
        let query_vec = ctx.embedder.embed(query);
        let (idx, score) = ctx.index.best(&query_vec)?;
        let question = ctx.index.question(idx)?;
        tracing::debug!(
            target: "terminaltalk::matching",
            best = question,
            score,
            threshold = self.threshold,
            "Semantic search"
        );
        // Below threshold is a miss, never a fallback to some earlier answer.
        if score < self.threshold {
            return None;
        }
        Some(StrategyHit {
            question: question.to_string(),
            score,
        })
    }
}
