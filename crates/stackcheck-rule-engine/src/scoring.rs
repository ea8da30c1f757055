//! Severity-weighted compatibility scoring.

use stackcheck_core::{Conflict, Severity};

/// Starting score before any deductions.
pub const BASE_SCORE: i64 = 100;

/// Scores a conflict list: 100 minus each conflict's severity weight,
/// floored at 0.
///
/// Only the multiset of severities matters, so the result is independent of
/// conflict order.
pub fn score_conflicts(conflicts: &[Conflict]) -> u8 {
    let deductions: i64 = conflicts
        .iter()
        .map(|c| i64::from(c.severity.weight()))
        .sum();

    stackcheck_core::clamp_score(BASE_SCORE - deductions) as u8
}

/// A module set is compatible unless some conflict is critical.
pub fn is_compatible(conflicts: &[Conflict]) -> bool {
    !conflicts.iter().any(|c| c.severity == Severity::Critical)
}
