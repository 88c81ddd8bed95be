//! Question embedding index, derived from the active book.

use super::{cosine_similarity, Embedder};
use crate::knowledge::QaBook;

/// Ordered questions with one vector each, in book order.
///
/// Never edited entry by entry: callers build a fresh index and replace the
/// old one whenever the active book's questions change.
#[derive(Debug, Clone, Default)]
pub struct EmbeddingIndex {
    questions: Vec<String>,
    vectors: Vec<Vec<f32>>,
}

impl EmbeddingIndex {
    pub fn build<E: Embedder + ?Sized>(book: &QaBook, embedder: &E) -> Self {
        let questions: Vec<String> = book.questions().map(str::to_string).collect();
        let refs: Vec<&str> = questions.iter().map(String::as_str).collect();
        let vectors = embedder.embed_batch(&refs);
        tracing::debug!(
            target: "terminaltalk::embedding",
            questions = questions.len(),
            dims = embedder.dimensions(),
            "Embedding index built"
        );
        Self { questions, vectors }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    pub fn question(&self, idx: usize) -> Option<&str> {
        self.questions.get(idx).map(String::as_str)
    }

    /// Cosine similarity of `query` against every indexed question, in order.
    pub fn scores(&self, query: &[f32]) -> Vec<f32> {
        self.vectors
            .iter()
            .map(|v| cosine_similarity(query, v))
            .collect()
    }

    /// Index and score of the most similar question. The first one wins ties.
    pub fn best(&self, query: &[f32]) -> Option<(usize, f32)> {
        self.scores(query)
            .into_iter()
            .enumerate()
            .fold(None, |best, (i, s)| match best {
                Some((_, b)) if b >= s => best,
                _ => Some((i, s)),
            })
    }
}
