//! Shared types and configuration used across the TerminalTalk crates.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Minimum cosine similarity for a semantic match to be accepted.
pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.45;

/// Minimum cosine similarity for a question to be offered as a suggestion.
pub const DEFAULT_SUGGESTION_THRESHOLD: f32 = 0.45;

/// Number of suggestions offered for a keyword phrase.
pub const DEFAULT_SUGGESTION_TOP_K: usize = 5;

/// Minimum normalized Levenshtein similarity for a fuzzy match.
pub const DEFAULT_FUZZY_CUTOFF: f64 = 0.6;

/// Vector length of the built-in hashing embedder.
pub const DEFAULT_EMBEDDING_DIMS: usize = 384;

/// Imports with fewer usable rows than this succeed with a warning.
pub const DEFAULT_IMPORT_MIN_ROWS: usize = 10;

/// Fixed reply when no strategy resolves the input.
pub const NO_MATCH_MESSAGE: &str = "Sorry, I don't recognize that question.";

/// Normalizes question text to its canonical key form (trimmed, lower-cased).
pub fn normalize_question(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Application configuration. Load from TOML or env.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// JSON file holding the persisted built-in questions.
    pub defaults_path: String,
    /// Acceptance threshold for the semantic strategy.
    pub similarity_threshold: f32,
    /// Cutoff for keyword suggestions.
    pub suggestion_threshold: f32,
    /// Maximum number of keyword suggestions.
    pub suggestion_top_k: usize,
    /// Whether the fuzzy string strategy runs between substring and semantic. Off by default.
    #[serde(default)]
    pub fuzzy_enabled: bool,
    /// Cutoff for the fuzzy string strategy.
    pub fuzzy_cutoff: f64,
    /// Vector length of the hashing embedder.
    pub embedding_dims: usize,
    /// Row count below which an import is flagged as small.
    pub import_min_rows: usize,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            defaults_path: "./data/qa_defaults.json".to_string(),
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            suggestion_threshold: DEFAULT_SUGGESTION_THRESHOLD,
            suggestion_top_k: DEFAULT_SUGGESTION_TOP_K,
            fuzzy_enabled: false,
            fuzzy_cutoff: DEFAULT_FUZZY_CUTOFF,
            embedding_dims: DEFAULT_EMBEDDING_DIMS,
            import_min_rows: DEFAULT_IMPORT_MIN_ROWS,
        }
    }
}

impl CoreConfig {
    /// Load config from file and environment.
    /// Precedence: env `TERMINALTALK__*` > `TERMINALTALK_CONFIG` path (or `config/terminaltalk`) > defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path = std::env::var("TERMINALTALK_CONFIG")
            .unwrap_or_else(|_| "config/terminaltalk".to_string());
        let defaults = Self::default();
        let builder = config::Config::builder()
            .set_default("defaults_path", defaults.defaults_path)?
            .set_default("similarity_threshold", defaults.similarity_threshold as f64)?
            .set_default("suggestion_threshold", defaults.suggestion_threshold as f64)?
            .set_default("suggestion_top_k", defaults.suggestion_top_k as i64)?
            .set_default("fuzzy_enabled", defaults.fuzzy_enabled)?
            .set_default("fuzzy_cutoff", defaults.fuzzy_cutoff)?
            .set_default("embedding_dims", defaults.embedding_dims as i64)?
            .set_default("import_min_rows", defaults.import_min_rows as i64)?;

        // `config::File` resolves the extension itself, so check the TOML variant too.
        let path = Path::new(&config_path);
        let with_ext = path.with_extension("toml");
        let builder = if path.exists() {
            builder.add_source(config::File::from(path))
        } else if with_ext.exists() {
            builder.add_source(config::File::from(with_ext.as_path()))
        } else {
            builder
        };

        let built = builder
            .add_source(config::Environment::with_prefix("TERMINALTALK").separator("__"))
            .build()?;

        built.try_deserialize()
    }
}
