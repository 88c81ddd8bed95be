//! Session-facing facade over the store, the embedding index and the pipeline.
//!
//! Owns all mutable state. Every mutation of the active book is followed by a
//! full index rebuild, so a lookup never sees questions the index lacks.

use crate::embedding::{Embedder, EmbeddingIndex, HashingEmbedder};
use crate::error::{ImportError, KnowledgeError, PersistError};
use crate::knowledge::{AddOutcome, ImportReport, KnowledgeStore, RemoveOutcome};
use crate::matching::{MatchContext, MatchOutcome, MatchingPipeline};
use crate::shared::{CoreConfig, NO_MATCH_MESSAGE};
use crate::splitter::split_compound;
use crate::suggest::{suggest, Suggestion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;

pub struct Assistant {
    store: KnowledgeStore,
    embedder: Box<dyn Embedder>,
    index: EmbeddingIndex,
    pipeline: MatchingPipeline,
    rng: StdRng,
    suggestion_top_k: usize,
    suggestion_threshold: f32,
    import_min_rows: usize,
}

impl Assistant {
    /// Opens the defaults document named in `config` and uses the hashing embedder.
    pub fn from_config(config: &CoreConfig) -> Result<Self, PersistError> {
        let store = KnowledgeStore::open_path(&config.defaults_path)?;
        let embedder = HashingEmbedder::new(config.embedding_dims);
        Ok(Self::new(store, Box::new(embedder), config))
    }

    pub fn new(store: KnowledgeStore, embedder: Box<dyn Embedder>, config: &CoreConfig) -> Self {
        let index = EmbeddingIndex::build(store.get_active(), &*embedder);
        let pipeline = MatchingPipeline::from_config(config);
        tracing::info!(
            target: "terminaltalk::assistant",
            questions = index.len(),
            strategies = ?pipeline.strategy_names(),
            "Assistant ready"
        );
        Self {
            store,
            embedder,
            index,
            pipeline,
            rng: StdRng::from_entropy(),
            suggestion_top_k: config.suggestion_top_k,
            suggestion_threshold: config.suggestion_threshold,
            import_min_rows: config.import_min_rows,
        }
    }

    /// Fixes the answer draw so repeated runs pick the same answers.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Answer text for `text`, or the fixed "don't recognize" reply.
    pub fn resolve(&mut self, text: &str) -> String {
        match self.resolve_outcome(text) {
            MatchOutcome::Resolved { answer, .. } => answer,
            MatchOutcome::Unresolved => NO_MATCH_MESSAGE.to_string(),
        }
    }

    pub fn resolve_outcome(&mut self, text: &str) -> MatchOutcome {
        let ctx = MatchContext {
            book: self.store.get_active(),
            index: &self.index,
            embedder: &*self.embedder,
        };
        self.pipeline.resolve(text, &ctx, &mut self.rng)
    }

    /// Related questions for a short keyword phrase, best first.
    pub fn suggest(&self, phrase: &str) -> Vec<Suggestion> {
        suggest(
            &self.index,
            &*self.embedder,
            phrase,
            self.suggestion_top_k,
            self.suggestion_threshold,
        )
    }

    pub fn split(&self, text: &str) -> Vec<String> {
        split_compound(text)
    }

    pub fn add<S: AsRef<str>>(
        &mut self,
        question: &str,
        answers: &[S],
    ) -> Result<AddOutcome, KnowledgeError> {
        let result = self.store.add(question, answers);
        let changed = match &result {
            Ok(outcome) => outcome.changed(),
            Err(e) => mutated_before_error(e),
        };
        if changed {
            self.rebuild_index();
        }
        result
    }

    pub fn remove<S: AsRef<str>>(
        &mut self,
        question: &str,
        answers: &[S],
    ) -> Result<RemoveOutcome, KnowledgeError> {
        let result = self.store.remove(question, answers);
        let changed = match &result {
            Ok(outcome) => outcome.changed(),
            Err(e) => mutated_before_error(e),
        };
        if changed {
            self.rebuild_index();
        }
        result
    }

    /// Imports a CSV book; on failure the current book and index stay active.
    pub fn import(&mut self, path: &Path) -> Result<ImportReport, ImportError> {
        let report = self.store.import_from(path, self.import_min_rows)?;
        self.rebuild_index();
        Ok(report)
    }

    /// Canonical questions of the active book, in book order.
    pub fn list_questions(&self) -> impl Iterator<Item = &str> + '_ {
        self.store.get_active().questions()
    }

    pub fn store(&self) -> &KnowledgeStore {
        &self.store
    }

    pub fn index(&self) -> &EmbeddingIndex {
        &self.index
    }

    fn rebuild_index(&mut self) {
        let fresh = EmbeddingIndex::build(self.store.get_active(), &*self.embedder);
        tracing::debug!(
            target: "terminaltalk::assistant",
            questions = fresh.len(),
            "Embedding index rebuilt"
        );
        self.index = fresh;
    }
}

/// A persist failure happens after the in-memory book was already changed.
fn mutated_before_error(err: &KnowledgeError) -> bool {
    matches!(err, KnowledgeError::Persist(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::knowledge::{builtin_book, QaBook};
    use std::cell::Cell;
    use std::io::Write;
    use std::rc::Rc;

    fn builtin() -> Assistant {
        Assistant::new(
            KnowledgeStore::with_builtin_defaults(),
            Box::new(HashingEmbedder::default()),
            &CoreConfig::default(),
        )
        .with_seed(11)
    }

    fn assert_index_in_sync(assistant: &Assistant) {
        let active: Vec<&str> = assistant.list_questions().collect();
        assert_eq!(assistant.index().len(), active.len());
        assert_eq!(
            assistant.index().questions().iter().map(String::as_str).collect::<Vec<_>>(),
            active
        );
    }

    /// Hashing embedder that counts single-text calls made after setup.
    struct Counting {
        inner: HashingEmbedder,
        calls: Rc<Cell<usize>>,
    }

    impl Embedder for Counting {
        fn dimensions(&self) -> usize {
            self.inner.dimensions()
        }

        fn embed(&self, text: &str) -> Vec<f32> {
            self.calls.set(self.calls.get() + 1);
            self.inner.embed(text)
        }
    }

    #[test]
    fn known_questions_resolve_to_their_own_answers() {
        let mut assistant = builtin();
        let book = builtin_book();
        for entry in book.iter() {
            let answer = assistant.resolve(&entry.question);
            assert!(entry.answers.contains(&answer), "{}", entry.question);
        }
    }

    #[test]
    fn substring_hit_never_embeds_the_query() {
        let calls = Rc::new(Cell::new(0));
        let embedder = Counting {
            inner: HashingEmbedder::default(),
            calls: Rc::clone(&calls),
        };
        let mut assistant = Assistant::new(
            KnowledgeStore::with_builtin_defaults(),
            Box::new(embedder),
            &CoreConfig::default(),
        );
        let after_setup = calls.get();

        let outcome = assistant.resolve_outcome("Hey, what is git? I keep hearing about it");
        assert_eq!(outcome.strategy(), Some("substring"));
        assert_eq!(outcome.question(), Some("what is git?"));
        assert_eq!(calls.get(), after_setup);

        // A substring miss does reach the embedder.
        assistant.resolve_outcome("why do aliens love pizza?");
        assert_eq!(calls.get(), after_setup + 1);
    }

    #[test]
    fn paraphrase_resolves_semantically() {
        let mut assistant = builtin();
        let outcome = assistant.resolve_outcome("tell me your name");
        assert_eq!(outcome.strategy(), Some("semantic"));
        assert_eq!(outcome.question(), Some("what is your name?"));
        assert!(assistant.resolve("tell me your name").contains("TerminalTalk"));
    }

    #[test]
    fn unrelated_text_gets_the_fixed_reply() {
        let mut assistant = builtin();
        assert_eq!(assistant.resolve("why do aliens love pizza?"), NO_MATCH_MESSAGE);
        assert_eq!(assistant.resolve("what is the capital of france?"), NO_MATCH_MESSAGE);
        assert_eq!(assistant.resolve("   "), NO_MATCH_MESSAGE);
    }

    #[test]
    fn lookalike_questions_stay_unresolved_by_default() {
        let mut assistant = builtin();
        for text in [
            "what is python?",
            "what is love?",
            "what is your age?",
            "who is your father?",
        ] {
            assert_eq!(assistant.resolve_outcome(text), MatchOutcome::Unresolved, "{}", text);
        }
        assert_eq!(assistant.resolve("what is python?"), NO_MATCH_MESSAGE);

        let config = CoreConfig {
            fuzzy_enabled: true,
            ..CoreConfig::default()
        };
        let mut fuzzy = Assistant::new(
            KnowledgeStore::with_builtin_defaults(),
            Box::new(HashingEmbedder::default()),
            &config,
        );
        let outcome = fuzzy.resolve_outcome("what is python?");
        assert_eq!(outcome.strategy(), Some("fuzzy"));
        assert_eq!(outcome.question(), Some("what is json?"));
    }

    #[test]
    fn split_parts_resolve_independently_in_order() {
        let mut assistant = builtin();
        let parts = assistant.split("what is git and what is json");
        assert_eq!(parts, vec!["what is git", "what is json"]);

        let book = builtin_book();
        let git = assistant.resolve(&parts[0]);
        let json = assistant.resolve(&parts[1]);
        assert!(book.get("what is git?").unwrap().contains(&git));
        assert!(book.get("what is json?").unwrap().contains(&json));
    }

    #[test]
    fn add_then_remove_restores_keys_and_keeps_index_in_sync() {
        let mut assistant = builtin();
        let before: Vec<String> = assistant.list_questions().map(str::to_string).collect();
        assert_index_in_sync(&assistant);

        assistant.add("what is rust?", &["a language"]).unwrap();
        assert_index_in_sync(&assistant);
        assert_eq!(assistant.index().len(), before.len() + 1);
        assert_eq!(assistant.resolve("what is rust?"), "a language");

        assistant.remove::<&str>("what is rust?", &[]).unwrap();
        assert_index_in_sync(&assistant);
        let after: Vec<String> = assistant.list_questions().map(str::to_string).collect();
        assert_eq!(after, before);
    }

    #[test]
    fn duplicate_answers_are_not_added_twice() {
        let mut assistant = builtin();
        let existing = builtin_book().get("what is git?").unwrap()[0].clone();

        let outcome = assistant.add("what is git?", &[existing.as_str()]).unwrap();
        assert!(!outcome.changed());

        let outcome = assistant
            .add("what is git?", &[existing.as_str(), "A distributed VCS."])
            .unwrap();
        assert_eq!(
            outcome,
            AddOutcome::Extended {
                question: "what is git?".to_string(),
                added: 1
            }
        );
        let answers = assistant.store().get_active().get("what is git?").unwrap();
        assert_eq!(answers.iter().filter(|a| **a == existing).count(), 1);
    }

    #[test]
    fn rejected_mutations_leave_everything_alone() {
        let mut assistant = builtin();
        let before = assistant.index().len();
        assert!(matches!(
            assistant.add("   ", &["x"]),
            Err(KnowledgeError::Validation(ValidationError::EmptyQuestion))
        ));
        assert!(matches!(
            assistant.add::<&str>("what is rust?", &[]),
            Err(KnowledgeError::Validation(ValidationError::NoAnswers))
        ));
        assert!(matches!(
            assistant.remove::<&str>("what is cobol?", &[]),
            Err(KnowledgeError::NotFound { .. })
        ));
        assert_eq!(assistant.index().len(), before);
    }

    #[test]
    fn suggestions_are_bounded_and_ranked() {
        let assistant = builtin();
        let found = assistant.suggest("semester fee");
        assert!(!found.is_empty());
        assert!(found.len() <= 5);
        assert!(found.iter().all(|s| s.score >= 0.45));
        assert!(found.windows(2).all(|w| w[0].score >= w[1].score));
        assert_eq!(
            found[0].question,
            "what is the deadline for paying the semester fee?"
        );
    }

    #[test]
    fn small_import_replaces_book_with_warning_flag() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "question,answer1").unwrap();
        writeln!(file, "What is Rust?,A systems language.").unwrap();
        writeln!(file, "What is Cargo?,Rust's build tool.").unwrap();
        writeln!(file, "What is a crate?,A compilation unit.").unwrap();
        file.flush().unwrap();

        let mut assistant = builtin();
        let report = assistant.import(file.path()).unwrap();
        assert_eq!(report.rows, 3);
        assert!(report.below_minimum);
        assert_eq!(assistant.list_questions().count(), 3);
        assert_index_in_sync(&assistant);
        assert_eq!(assistant.resolve("what is cargo?"), "Rust's build tool.");
    }

    #[test]
    fn failed_import_keeps_previous_book() {
        let mut assistant = builtin();
        let before = assistant.index().len();
        assert!(matches!(
            assistant.import(Path::new("/nonexistent/questions.csv")),
            Err(ImportError::NotFound(_))
        ));
        assert_eq!(assistant.index().len(), before);
        assert!(!assistant.store().is_imported());
    }

    #[test]
    fn mutations_persist_through_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = CoreConfig {
            defaults_path: dir.path().join("qa.json").to_string_lossy().into_owned(),
            ..CoreConfig::default()
        };

        let mut first = Assistant::from_config(&config).unwrap();
        first.add("what is rust?", &["a language"]).unwrap();

        let mut second = Assistant::from_config(&config).unwrap();
        assert_eq!(second.resolve("what is rust?"), "a language");
        assert_eq!(second.index().len(), builtin_book().len() + 1);
    }

    #[test]
    fn seeded_assistants_agree() {
        let book = QaBook::from_pairs([("pick one", vec!["a", "b", "c", "d"])]);
        let make = || {
            Assistant::new(
                KnowledgeStore::new(book.clone()),
                Box::new(HashingEmbedder::default()),
                &CoreConfig::default(),
            )
            .with_seed(5)
        };
        let (mut a, mut b) = (make(), make());
        let left: Vec<String> = (0..8).map(|_| a.resolve("pick one")).collect();
        let right: Vec<String> = (0..8).map(|_| b.resolve("pick one")).collect();
        assert_eq!(left, right);
    }
}
