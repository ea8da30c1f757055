//! Error types for stackcheck core.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for stackcheck operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised to the caller.
///
/// Runtime problems with the analyzed project (a failing check, a rule that
/// cannot be evaluated) are represented as data inside reports. Only engine
/// misconfiguration ends up here.
#[derive(Debug, Error)]
pub enum Error {
    /// Engine configuration is structurally invalid.
    #[error("Structural validation failed: {message}")]
    StructuralValidation {
        /// Description of the defect.
        message: String,
    },

    /// A check produced a score outside `0..=100`.
    #[error("Check '{check}' returned score {score}, expected 0..=100")]
    ScoreOutOfRange {
        /// Name of the offending check.
        check: String,
        /// The score it returned.
        score: u32,
    },

    /// The project root is unusable.
    #[error("Invalid project root {path:?}: {reason}")]
    InvalidProjectRoot {
        path: PathBuf,
        reason: String,
    },

    /// Facts file could not be parsed.
    #[error("JSON parse error in {file}: {source}")]
    Json {
        /// Path to the facts file.
        file: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a [`Error::StructuralValidation`].
    pub fn structural(message: impl Into<String>) -> Self {
        Self::StructuralValidation {
            message: message.into(),
        }
    }

    /// Whether this error signals engine misconfiguration.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Error::StructuralValidation { .. } | Error::ScoreOutOfRange { .. }
        )
    }
}
