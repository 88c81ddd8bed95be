//! Ordered strategy registry and answer selection.

use super::{
    FuzzyStrategy, MatchContext, MatchOutcome, MatchStrategy, SemanticStrategy, SubstringStrategy,
};
use crate::shared::{normalize_question, CoreConfig};
use rand::seq::SliceRandom;
use rand::Rng;

/// Strategies tried in registration order; the first hit resolves the input.
pub struct MatchingPipeline {
    strategies: Vec<Box<dyn MatchStrategy>>,
}

impl MatchingPipeline {
    /// A pipeline with no strategies; every input is unresolved.
    pub fn new() -> Self {
        Self {
            strategies: Vec::new(),
        }
    }

    /// Substring, then semantic; fuzzy runs between them only when enabled.
    pub fn from_config(config: &CoreConfig) -> Self {
        let mut pipeline = Self::new().with_strategy(SubstringStrategy);
        if config.fuzzy_enabled {
            pipeline = pipeline.with_strategy(FuzzyStrategy::new(config.fuzzy_cutoff));
        }
        pipeline.with_strategy(SemanticStrategy::new(config.similarity_threshold))
    }

    pub fn with_strategy<S: MatchStrategy + 'static>(mut self, strategy: S) -> Self {
        self.register(Box::new(strategy));
        self
    }

    pub fn register(&mut self, strategy: Box<dyn MatchStrategy>) {
        self.strategies.push(strategy);
    }

    /// Names of the registered strategies, in the order they run.
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Resolves `text` against the book in `ctx`, drawing the answer with `rng`.
    pub fn resolve<R: Rng + ?Sized>(
        &self,
        text: &str,
        ctx: &MatchContext<'_>,
        rng: &mut R,
    ) -> MatchOutcome {
        let query = normalize_question(text);
        tracing::debug!(target: "terminaltalk::matching", query = %query, "Resolving input");
        if query.is_empty() {
            return MatchOutcome::Unresolved;
        }

        for strategy in &self.strategies {
            let Some(hit) = strategy.find(&query, ctx) else {
                continue;
            };
            let Some(answer) = ctx.book.get(&hit.question).and_then(|a| a.choose(&mut *rng)) else {
                tracing::warn!(
                    target: "terminaltalk::matching",
                    strategy = strategy.name(),
                    question = %hit.question,
                    "Matched question has no answers in the active book"
                );
                continue;
            };
            tracing::info!(
                target: "terminaltalk::matching",
                strategy = strategy.name(),
                question = %hit.question,
                score = hit.score,
                "Match: '{}' -> '{}'",
                text,
                hit.question
            );
            return MatchOutcome::Resolved {
                answer: answer.clone(),
                question: hit.question,
                strategy: strategy.name(),
                score: hit.score,
            };
        }

        tracing::warn!(target: "terminaltalk::matching", "No match found for question: {}", text);
        MatchOutcome::Unresolved
    }
}

impl Default for MatchingPipeline {
    fn default() -> Self {
        Self::from_config(&CoreConfig::default())
    }
}
