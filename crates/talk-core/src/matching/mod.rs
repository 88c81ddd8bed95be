//! Answer resolution: ordered strategies map free text to a canonical question.
//!
//! | Order | Strategy  | Accepts when                                        |
//! |-------|-----------|-----------------------------------------------------|
//! | 1     | substring | key == input, key within input, or input within key |
//! | 2     | semantic  | cosine similarity of embeddings >= threshold        |
//!
//! The first strategy that returns a hit wins; later ones never run.
//! `FuzzyStrategy` (normalized Levenshtein similarity >= cutoff) is opt-in via
//! `fuzzy_enabled` and slots in between the two.

mod fuzzy;
mod pipeline;
mod semantic;
mod substring;

pub use fuzzy::FuzzyStrategy;
pub use pipeline::MatchingPipeline;
pub use semantic::SemanticStrategy;
pub use substring::SubstringStrategy;

use crate::embedding::{Embedder, EmbeddingIndex};
use crate::knowledge::QaBook;

/// Read-only state a strategy may consult for one resolution.
pub struct MatchContext<'a> {
    pub book: &'a QaBook,
    pub index: &'a EmbeddingIndex,
    pub embedder: &'a dyn Embedder,
}

/// Canonical question picked by a strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyHit {
    pub question: String,
    pub score: f32,
}

/// One way of mapping normalized input to a canonical question.
pub trait MatchStrategy {
    /// Short name for logs and outcomes.
    fn name(&self) -> &'static str;

    /// `query` is already trimmed and lower-cased and never empty.
    fn find(&self, query: &str, ctx: &MatchContext<'_>) -> Option<StrategyHit>;
}

/// Outcome of resolving one input.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    Resolved {
        question: String,
        answer: String,
        strategy: &'static str,
        score: f32,
    },
    Unresolved,
}

impl MatchOutcome {
    pub fn answer(&self) -> Option<&str> {
        match self {
            Self::Resolved { answer, .. } => Some(answer),
            Self::Unresolved => None,
        }
    }

    pub fn question(&self) -> Option<&str> {
        match self {
            Self::Resolved { question, .. } => Some(question),
            Self::Unresolved => None,
        }
    }

    pub fn strategy(&self) -> Option<&'static str> {
        match self {
            Self::Resolved { strategy, .. } => Some(strategy),
            Self::Unresolved => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }
}
