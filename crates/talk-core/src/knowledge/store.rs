//! Knowledge store: internal (persisted, mutable) book plus an optional
//! imported book that replaces it for the rest of the session.
//!
//! The internal book is saved as a pretty-printed JSON array next to the
//! configured path. Writes go to a temporary file in the same directory and
//! are renamed over the target, so a crash never leaves a half-written file.

use super::import::{read_csv_book, ImportReport};
use super::{builtin_book, QaBook};
use crate::error::{ImportError, KnowledgeError, PersistError, ValidationError};
use crate::shared::normalize_question;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Result of [`KnowledgeStore::add`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// The question did not exist and was created.
    Created { question: String, answers: usize },
    /// The question existed and `added` new answers were appended.
    Extended { question: String, added: usize },
    /// Every supplied answer was already present.
    Unchanged { question: String },
}

impl AddOutcome {
    pub fn question(&self) -> &str {
        match self {
            Self::Created { question, .. }
            | Self::Extended { question, .. }
            | Self::Unchanged { question } => question,
        }
    }

    /// True when the book was modified.
    pub fn changed(&self) -> bool {
        !matches!(self, Self::Unchanged { .. })
    }
}

/// Result of [`KnowledgeStore::remove`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The whole question was deleted on request.
    RemovedQuestion { question: String },
    /// Some answers were removed; `remaining` are left.
    RemovedAnswers {
        question: String,
        removed: usize,
        remaining: usize,
    },
    /// The last answers were removed, so the question was deleted too.
    RemovedLastAnswers { question: String, removed: usize },
    /// None of the supplied answers matched; nothing changed.
    NoMatchingAnswers { question: String },
}

impl RemoveOutcome {
    pub fn question(&self) -> &str {
        match self {
            Self::RemovedQuestion { question }
            | Self::RemovedAnswers { question, .. }
            | Self::RemovedLastAnswers { question, .. }
            | Self::NoMatchingAnswers { question } => question,
        }
    }

    pub fn changed(&self) -> bool {
        !matches!(self, Self::NoMatchingAnswers { .. })
    }
}

/// Holds the internal and imported question books.
pub struct KnowledgeStore {
    internal: QaBook,
    imported: Option<QaBook>,
    defaults_path: Option<PathBuf>,
}

impl KnowledgeStore {
    /// In-memory store over `internal`; mutations are not persisted.
    pub fn new(internal: QaBook) -> Self {
        Self {
            internal,
            imported: None,
            defaults_path: None,
        }
    }

    /// In-memory store over the compiled-in questions.
    pub fn with_builtin_defaults() -> Self {
        Self::new(builtin_book())
    }

    /// Opens the defaults document at `path`, or starts from the built-in
    /// questions when the file does not exist yet. Mutations are written back
    /// to `path`.
    pub fn open_path<P: AsRef<Path>>(path: P) -> Result<Self, PersistError> {
        let path = path.as_ref();
        let internal = if path.exists() {
            let book = load_book(path)?;
            tracing::info!(
                target: "terminaltalk::knowledge",
                path = %path.display(),
                questions = book.len(),
                "Loaded question defaults"
            );
            book
        } else {
            tracing::debug!(
                target: "terminaltalk::knowledge",
                path = %path.display(),
                "No defaults document yet; using built-in questions"
            );
            builtin_book()
        };
        Ok(Self {
            internal,
            imported: None,
            defaults_path: Some(path.to_path_buf()),
        })
    }

    /// Sets where mutations of the internal book are persisted.
    pub fn persist_to<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.defaults_path = Some(path.into());
        self
    }

    /// The book used for lookups: the imported one if present, else internal.
    pub fn get_active(&self) -> &QaBook {
        self.imported.as_ref().unwrap_or(&self.internal)
    }

    pub fn internal(&self) -> &QaBook {
        &self.internal
    }

    pub fn is_imported(&self) -> bool {
        self.imported.is_some()
    }

    pub fn defaults_path(&self) -> Option<&Path> {
        self.defaults_path.as_deref()
    }

    /// Imports a CSV book and makes it active. On error the previously active
    /// book is untouched.
    pub fn import_from(
        &mut self,
        path: &Path,
        min_rows: usize,
    ) -> Result<ImportReport, ImportError> {
        tracing::info!(target: "terminaltalk::import", path = %path.display(), "Attempting CSV import");
        let book = match read_csv_book(path) {
            Ok(book) => book,
            Err(e) => {
                tracing::warn!(
                    target: "terminaltalk::import",
                    path = %path.display(),
                    error = %e,
                    "CSV import failed; keeping current questions"
                );
                return Err(e);
            }
        };

        let rows = book.len();
        let below_minimum = rows < min_rows;
        if below_minimum {
            tracing::warn!(
                target: "terminaltalk::import",
                rows,
                min_rows,
                "CSV has fewer Q&A pairs than suggested"
            );
        }
        self.imported = Some(book);
        tracing::info!(target: "terminaltalk::import", rows, "CSV loaded");
        Ok(ImportReport {
            path: path.to_path_buf(),
            rows,
            below_minimum,
        })
    }

    /// Drops the imported book so the internal one is active again.
    pub fn clear_import(&mut self) {
        self.imported = None;
    }

    /// Adds a question, or appends new answers to an existing one.
    ///
    /// Answers are trimmed; blank ones are ignored and text already present
    /// (exact match) is not duplicated.
    pub fn add<S: AsRef<str>>(
        &mut self,
        question: &str,
        answers: &[S],
    ) -> Result<AddOutcome, KnowledgeError> {
        let key = normalize_question(question);
        if key.is_empty() {
            return Err(ValidationError::EmptyQuestion.into());
        }
        let supplied: Vec<String> = answers
            .iter()
            .map(|a| a.as_ref().trim().to_string())
            .filter(|a| !a.is_empty())
            .collect();
        if supplied.is_empty() {
            return Err(ValidationError::NoAnswers.into());
        }

        let outcome = match self.internal.get_mut(&key) {
            Some(existing) => {
                let before = existing.len();
                for answer in supplied {
                    if !existing.contains(&answer) {
                        existing.push(answer);
                    }
                }
                let added = existing.len() - before;
                if added == 0 {
                    AddOutcome::Unchanged { question: key }
                } else {
                    AddOutcome::Extended {
                        question: key,
                        added,
                    }
                }
            }
            None => {
                let mut fresh: Vec<String> = Vec::with_capacity(supplied.len());
                for answer in supplied {
                    if !fresh.contains(&answer) {
                        fresh.push(answer);
                    }
                }
                let count = fresh.len();
                self.internal.insert(key.clone(), fresh);
                AddOutcome::Created {
                    question: key,
                    answers: count,
                }
            }
        };

        let action = match &outcome {
            AddOutcome::Created { .. } => "CREATE",
            AddOutcome::Extended { .. } => "EXTEND",
            AddOutcome::Unchanged { .. } => "UNCHANGED",
        };
        tracing::info!(
            target: "terminaltalk::knowledge",
            question = outcome.question(),
            action,
            "Add question"
        );

        if outcome.changed() {
            self.persist()?;
        }
        Ok(outcome)
    }

    /// Removes a whole question (empty `answers`) or only the listed answers.
    pub fn remove<S: AsRef<str>>(
        &mut self,
        question: &str,
        answers: &[S],
    ) -> Result<RemoveOutcome, KnowledgeError> {
        let key = normalize_question(question);
        if key.is_empty() {
            return Err(ValidationError::EmptyQuestion.into());
        }
        let targets: Vec<String> = answers
            .iter()
            .map(|a| a.as_ref().trim().to_string())
            .collect();

        let outcome = {
            let existing = self
                .internal
                .get_mut(&key)
                .ok_or_else(|| KnowledgeError::NotFound {
                    question: key.clone(),
                })?;

            if targets.is_empty() {
                RemoveOutcome::RemovedQuestion {
                    question: key.clone(),
                }
            } else {
                let before = existing.len();
                existing.retain(|a| !targets.contains(a));
                let removed = before - existing.len();
                if removed == 0 {
                    RemoveOutcome::NoMatchingAnswers {
                        question: key.clone(),
                    }
                } else if existing.is_empty() {
                    RemoveOutcome::RemovedLastAnswers {
                        question: key.clone(),
                        removed,
                    }
                } else {
                    RemoveOutcome::RemovedAnswers {
                        question: key.clone(),
                        removed,
                        remaining: existing.len(),
                    }
                }
            }
        };

        if matches!(
            outcome,
            RemoveOutcome::RemovedQuestion { .. } | RemoveOutcome::RemovedLastAnswers { .. }
        ) {
            self.internal.remove(&key);
        }

        tracing::info!(
            target: "terminaltalk::knowledge",
            question = %key,
            changed = outcome.changed(),
            "Remove question"
        );

        if outcome.changed() {
            self.persist()?;
        }
        Ok(outcome)
    }

    /// Writes the internal book to the defaults document, if one is configured.
    pub fn persist(&self) -> Result<(), PersistError> {
        match &self.defaults_path {
            Some(path) => save_book(path, &self.internal),
            None => Ok(()),
        }
    }
}

fn load_book(path: &Path) -> Result<QaBook, PersistError> {
    let text = std::fs::read_to_string(path).map_err(|source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let raw: QaBook = serde_json::from_str(&text).map_err(|source| PersistError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(raw.sanitized())
}

fn save_book(path: &Path, book: &QaBook) -> Result<(), PersistError> {
    let io_err = |source: std::io::Error| PersistError::Io {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir).map_err(io_err)?;

    let json = serde_json::to_string_pretty(book).map_err(|source| PersistError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(io_err)?;
    tmp.write_all(json.as_bytes()).map_err(io_err)?;
    tmp.write_all(b"\n").map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;

    tracing::debug!(
        target: "terminaltalk::knowledge",
        path = %path.display(),
        questions = book.len(),
        "Question defaults written"
    );
    Ok(())
}
