//! Structural validation of engine inputs and outputs.

use crate::error::{Error, Result};
use crate::types::CheckResult;
use std::path::{Path, PathBuf};

/// Upper bound for any score.
pub const MAX_SCORE: u32 = 100;

/// Validates and canonicalizes a project root directory.
pub fn validate_project_root(path: &Path) -> Result<PathBuf> {
    let canonical = path.canonicalize().map_err(|e| Error::InvalidProjectRoot {
        path: path.to_path_buf(),
        reason: format!("Cannot canonicalize: {}", e),
    })?;

    if !canonical.is_dir() {
        return Err(Error::InvalidProjectRoot {
            path: path.to_path_buf(),
            reason: "not a directory".to_string(),
        });
    }

    Ok(canonical)
}

/// Validates a check result returned by a provider named `expected_name`.
pub fn validate_check_result(result: &CheckResult, expected_name: &str) -> Result<()> {
    if result.score > MAX_SCORE {
        return Err(Error::ScoreOutOfRange {
            check: result.name.clone(),
            score: result.score,
        });
    }

    if result.name != expected_name {
        return Err(Error::structural(format!(
            "provider '{}' returned a result named '{}'",
            expected_name, result.name
        )));
    }

    Ok(())
}

/// Clamps a signed running total into `0..=100`.
pub fn clamp_score(score: i64) -> u32 {
    score.clamp(0, MAX_SCORE as i64) as u32
}
