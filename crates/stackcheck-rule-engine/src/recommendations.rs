//! Recommendation synthesis from detected conflicts.

use stackcheck_core::Conflict;

/// Sole recommendation when no conflicts were detected.
pub const ALL_COMPATIBLE_MESSAGE: &str = "All modules are compatible";

/// Derives guidance from conflicts: one entry per conflict, in conflict order,
/// equal to its resolution.
///
/// `_framework` is reserved for framework-specific phrasing; resolutions are
/// currently framework-neutral.
pub fn generate_recommendations(conflicts: &[Conflict], _framework: &str) -> Vec<String> {
    if conflicts.is_empty() {
        return vec![ALL_COMPATIBLE_MESSAGE.to_string()];
    }

    conflicts.iter().map(|c| c.resolution.clone()).collect()
}
