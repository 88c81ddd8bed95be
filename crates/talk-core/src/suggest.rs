//! Ranked question suggestions for short keyword phrases.

use crate::embedding::{Embedder, EmbeddingIndex};

/// Longest input, in whitespace-separated words, treated as a keyword phrase.
pub const MAX_KEYWORD_WORDS: usize = 3;

/// A canonical question offered to the user, with its similarity to the phrase.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub question: String,
    pub score: f32,
}

/// True for short inputs without a question mark, e.g. `library` or `semester fee`.
pub fn is_keyword_phrase(text: &str) -> bool {
    let text = text.trim();
    !text.is_empty() && !text.contains('?') && text.split_whitespace().count() <= MAX_KEYWORD_WORDS
}

/// Up to `top_k` indexed questions scoring at least `threshold`, best first.
///
/// Equal scores keep book order.
pub fn suggest<E: Embedder + ?Sized>(
    index: &EmbeddingIndex,
    embedder: &E,
    phrase: &str,
    top_k: usize,
    threshold: f32,
) -> Vec<Suggestion> {
    let phrase = phrase.trim().to_lowercase();
    if phrase.is_empty() || index.is_empty() || top_k == 0 {
        return Vec::new();
    }

    let query = embedder.embed(&phrase);
    let mut ranked: Vec<(usize, f32)> = index.scores(&query).into_iter().enumerate().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    let suggestions: Vec<Suggestion> = ranked
        .into_iter()
        .filter(|(_, score)| *score >= threshold)
        .take(top_k)
        .filter_map(|(idx, score)| {
            index.question(idx).map(|q| Suggestion {
                question: q.to_string(),
                score,
            })
        })
        .collect();

    tracing::debug!(
        target: "terminaltalk::suggest",
        phrase = %phrase,
        count = suggestions.len(),
        "Suggestions ranked"
    );
    suggestions
}
