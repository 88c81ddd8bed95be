//! Edit-distance matching for misspelled or slightly reworded questions.

use super::{MatchContext, MatchStrategy, StrategyHit};
use crate::shared::DEFAULT_FUZZY_CUTOFF;

#[derive(Debug, Clone, Copy)]
pub struct FuzzyStrategy {
    cutoff: f64,
}

impl FuzzyStrategy {
    pub fn new(cutoff: f64) -> Self {
        Self { cutoff }
    }
}

impl Default for FuzzyStrategy {
    fn default() -> Self {
        Self::new(DEFAULT_FUZZY_CUTOFF)
    }
}

impl MatchStrategy for FuzzyStrategy {
    fn name(&self) -> &'static str {
        "fuzzy"
    }

    fn find(&self, query: &str, ctx: &MatchContext<'_>) -> Option<StrategyHit> {
        let mut best: Option<(&str, f64)> = None;
        for key in ctx.book.questions() {
            let score = strsim::normalized_levenshtein(query, key);
            if best.map_or(true, |(_, b)| score > b) {
                best = Some((key, score));
            }
        }
        let (key, score) = best?;
        tracing::debug!(
            target: "terminaltalk::matching",
            best = key,
            score,
            cutoff = self.cutoff,
            "Fuzzy candidate"
        );
        (score >= self.cutoff).then(|| StrategyHit {
            question: key.to_string(),
            score: score as f32,
        })
    }
}
