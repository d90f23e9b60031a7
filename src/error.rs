//! Error types for the `build_finder` crate.
//!
//! In-domain gating failures (unaffordable builds, missing tech, unknown
//! timing tokens) are not errors; they are part of normal economy modeling
//! and never reach these enums.

use std::path::PathBuf;

/// Errors raised at the catalog boundary.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// A required field was requested for an identifier the catalog lacks.
    #[error("unknown action: {0}")]
    UnknownAction(String),

    /// An entry names a prerequisite or structure that is not in the catalog.
    #[error("entry {entry} references unknown identifier {reference}")]
    DanglingReference {
        /// The entry carrying the reference.
        entry: String,
        /// The missing identifier.
        reference: String,
    },

    /// An upgrade structure does not say which structure it morphs from.
    #[error("upgrade structure {0} has no morphs_from")]
    MissingMorphSource(String),

    /// Failed to read a catalog file from disk.
    #[error("failed to read catalog {path}: {source}")]
    ReadFailed {
        /// File that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse catalog JSON.
    #[error("failed to parse catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors that can occur when loading a search configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config {path}: {source}")]
    ReadFailed {
        /// File that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse configuration JSON.
    #[error("failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Out-of-domain inputs to the search. Checked before any simulation runs.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("target time must be positive")]
    ZeroTargetTime,

    #[error("action vocabulary is empty")]
    EmptyVocabulary,

    #[error("vocabulary action {0} is not in the catalog")]
    UnknownVocabularyAction(String),

    #[error("population size must be positive")]
    EmptyPopulation,

    #[error("build order length must be positive")]
    EmptyBuildOrder,

    #[error("mutation rate {0} is outside [0, 1]")]
    InvalidMutationRate(f64),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
