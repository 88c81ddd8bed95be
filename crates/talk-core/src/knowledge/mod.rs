//! Question/answer knowledge base.
//!
//! A [`QaBook`] is an insertion-ordered mapping from canonical question to its
//! answer set. The [`KnowledgeStore`] holds the mutable internal book and an
//! optional imported book; only one of them is active at a time.

mod defaults;
mod import;
mod store;

pub use defaults::builtin_book;
pub use import::{read_csv_book, ImportReport, ANSWER_COLUMNS, QUESTION_COLUMN};
pub use store::{AddOutcome, KnowledgeStore, RemoveOutcome};

use crate::shared::normalize_question;
use serde::{Deserialize, Serialize};

/// One canonical question and its answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaEntry {
    pub question: String,
    pub answers: Vec<String>,
}

/// Insertion-ordered question → answers mapping.
///
/// Order matters: the substring strategy walks the book front to back and
/// stops at the first hit. Serialized as a JSON array of [`QaEntry`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QaBook {
    entries: Vec<QaEntry>,
}

impl QaBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a book from `(question, answers)` pairs. Questions are normalized;
    /// a repeated question replaces the earlier answers in place.
    pub fn from_pairs<Q, A, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Q, Vec<A>)>,
        Q: AsRef<str>,
        A: Into<String>,
    {
        let mut book = Self::new();
        for (question, answers) in pairs {
            book.insert(
                normalize_question(question.as_ref()),
                answers.into_iter().map(Into::into).collect(),
            );
        }
        book
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &QaEntry> {
        self.entries.iter()
    }

    /// Canonical questions in book order.
    pub fn questions(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.question.as_str())
    }

    pub fn contains(&self, question: &str) -> bool {
        self.position(question).is_some()
    }

    /// Answers for an already-normalized question.
    pub fn get(&self, question: &str) -> Option<&[String]> {
        self.position(question)
            .map(|i| self.entries[i].answers.as_slice())
    }

    pub(crate) fn get_mut(&mut self, question: &str) -> Option<&mut Vec<String>> {
        let i = self.position(question)?;
        Some(&mut self.entries[i].answers)
    }

    /// Inserts or replaces. A replaced question keeps its position.
    pub(crate) fn insert(&mut self, question: String, answers: Vec<String>) {
        match self.position(&question) {
            Some(i) => self.entries[i].answers = answers,
            None => self.entries.push(QaEntry { question, answers }),
        }
    }

    pub(crate) fn remove(&mut self, question: &str) -> Option<QaEntry> {
        let i = self.position(question)?;
        Some(self.entries.remove(i))
    }

    /// Normalizes keys and drops entries that cannot be answered. Used on
    /// documents read from disk, which may have been edited by hand.
    pub(crate) fn sanitized(self) -> Self {
        let mut book = Self::new();
        for entry in self.entries {
            let question = normalize_question(&entry.question);
            let mut answers: Vec<String> = Vec::new();
            for answer in entry.answers {
                let answer = answer.trim().to_string();
                if !answer.is_empty() && !answers.contains(&answer) {
                    answers.push(answer);
                }
            }
            if question.is_empty() || answers.is_empty() {
                tracing::warn!(
                    target: "terminaltalk::knowledge",
                    question = %question,
                    "Skipping unusable entry in defaults document"
                );
                continue;
            }
            book.insert(question, answers);
        }
        book
    }

    fn position(&self, question: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.question == question)
    }
}
