//! Error types for stackcheck-health

use std::time::Duration;
use thiserror::Error;

/// Result type alias for stackcheck-health operations
pub type Result<T> = std::result::Result<T, HealthError>;

/// Why a single check could not produce a result.
///
/// The runner never propagates these; each becomes a `fail` result carrying
/// this error's message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
    /// Provider reported an error
    #[error("{check} check failed: {message}")]
    Failed { check: String, message: String },

    /// Provider exceeded its time budget
    #[error("{check} check timed out after {after:?}")]
    Timeout { check: String, after: Duration },

    /// Suite was cancelled before the provider finished
    #[error("{check} check cancelled")]
    Cancelled { check: String },

    /// Provider panicked
    #[error("{check} check panicked: {message}")]
    Panicked { check: String, message: String },
}

impl CheckError {
    /// Create a provider failure
    pub fn failed(check: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failed {
            check: check.into(),
            message: message.into(),
        }
    }
}

/// Errors raised to the caller of the runner
#[derive(Error, Debug)]
pub enum HealthError {
    /// Engine misconfiguration (bad score, duplicate provider, ...)
    #[error(transparent)]
    Core(#[from] stackcheck_core::Error),
}
