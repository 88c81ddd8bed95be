//! Exact and substring matching, first key in book order wins.
//!
//! Short or generic keys can shadow later, more specific ones. That is the
//! accepted behavior; reorder the book to change precedence.

use super::{MatchContext, MatchStrategy, StrategyHit};

#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringStrategy;

impl MatchStrategy for SubstringStrategy {
    fn name(&self) -> &'static str {
        "substring"
    }

    fn find(&self, query: &str, ctx: &MatchContext<'_>) -> Option<StrategyHit> {
        ctx.book
            .questions()
            .find(|key| *key == query || query.contains(key) || key.contains(query))
            .map(|key| StrategyHit {
                question: key.to_string(),
                score: 1.0,
            })
    }
}
