//! talk-core: TerminalTalk answer resolution (knowledge store, embedding index,
//! matching pipeline, keyword suggestions and compound-question splitting).
//!
//! The CLI add-on drives everything through [`Assistant`]; the lower layers are
//! exported for embedding the engine elsewhere or plugging in other strategies.

mod assistant;
mod embedding;
mod error;
mod knowledge;
mod matching;
mod shared;
mod splitter;
mod suggest;

pub use assistant::Assistant;

// Shared config and constants
pub use shared::{
    normalize_question, CoreConfig, DEFAULT_SIMILARITY_THRESHOLD, DEFAULT_SUGGESTION_THRESHOLD,
    DEFAULT_SUGGESTION_TOP_K, NO_MATCH_MESSAGE,
};

// Errors
pub use error::{ImportError, KnowledgeError, PersistError, ValidationError};

// Knowledge store and CSV import
pub use knowledge::{
    builtin_book, read_csv_book, AddOutcome, ImportReport, KnowledgeStore, QaBook, QaEntry,
    RemoveOutcome, ANSWER_COLUMNS, QUESTION_COLUMN,
};

// Embeddings
pub use embedding::{cosine_similarity, Embedder, EmbeddingIndex, HashingEmbedder};

// Matching
pub use matching::{
    FuzzyStrategy, MatchContext, MatchOutcome, MatchStrategy, MatchingPipeline, SemanticStrategy,
    StrategyHit, SubstringStrategy,
};

pub use splitter::{split_compound, CONNECTORS};
pub use suggest::{is_keyword_phrase, suggest, Suggestion, MAX_KEYWORD_WORDS};
