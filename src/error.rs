//! Error types for ranking and evaluation.

use thiserror::Error;

/// Result type for rankeval operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the ranking and evaluation harness.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or invalid configuration, such as an out-of-range ranking
    /// parameter or an unrecognized ranker name. Fatal to a hosting program.
    #[error("invalid configuration: {field}: {message}")]
    Config {
        /// The configuration field that failed validation.
        field: &'static str,
        /// What was wrong with it.
        message: String,
    },

    /// A ranking formula hit a mathematically undefined case, e.g. a zero
    /// document frequency for a term the provider claims matched. This is a
    /// provider-contract violation and is propagated rather than coerced
    /// into a NaN score.
    #[error("undefined score: {message}")]
    UndefinedScore {
        /// Which statistic violated the contract, and how.
        message: String,
    },

    /// Mean average precision was requested before any query was recorded.
    /// Recoverable: the caller can report that no queries were processed.
    #[error("evaluation session is empty: no queries recorded")]
    EmptySession,

    /// A query-source read failed. Propagated from the external collaborator
    /// without retries.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Convenience constructor for configuration errors.
    pub fn config(field: &'static str, message: impl Into<String>) -> Self {
        Self::Config {
            field,
            message: message.into(),
        }
    }

    /// Convenience constructor for undefined-score errors.
    pub fn undefined_score(message: impl Into<String>) -> Self {
        Self::UndefinedScore {
            message: message.into(),
        }
    }
}
