//! Error taxonomy for the knowledge store and importer.
//!
//! None of these are fatal: callers report them and carry on with the
//! previously valid state. "No match" is not an error at all, see
//! [`MatchOutcome::Unresolved`](crate::MatchOutcome).

use std::path::PathBuf;

/// Failure while importing an external question file. The previously
/// active book stays in place.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("unsupported file type (only .csv is allowed): {}", .0.display())]
    UnsupportedFileType(PathBuf),

    #[error("CSV must contain at least a 'question' column")]
    MissingQuestionColumn,

    #[error("no valid Q&A rows found in {}", .0.display())]
    NoUsableRows(PathBuf),

    #[error("CSV file format is invalid or corrupted: {0}")]
    Csv(#[from] csv::Error),

    #[error("could not read import file: {0}")]
    Io(#[from] std::io::Error),
}

/// Rejected input for a mutation; nothing was changed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("question text is empty")]
    EmptyQuestion,

    #[error("at least one non-empty answer is required")]
    NoAnswers,
}

/// Failure of an add/remove on the internal book.
#[derive(Debug, thiserror::Error)]
pub enum KnowledgeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("question not found: {question}")]
    NotFound { question: String },

    #[error("failed to persist question defaults: {0}")]
    Persist(#[from] PersistError),
}

/// Failure reading or writing the persisted defaults file.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid defaults document {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
