//! Built-in check providers
//!
//! Each provider reads one section of [`ProjectFacts`] and scores it by
//! deduction from 100. A provider whose facts are absent reports a warning
//! asking for them rather than guessing.
//!
//! [`ProjectFacts`]: stackcheck_core::ProjectFacts

mod build;
mod dependencies;
mod performance;
mod security;
mod test_suite;

pub use build::BuildCheck;
pub use dependencies::{update_type, DependencyCheck, UpdateType};
pub use performance::PerformanceCheck;
pub use security::SecurityCheck;
pub use test_suite::TestCheck;

use crate::CheckProvider;
use stackcheck_core::CheckResult;
use std::sync::Arc;

/// Score given to a check that has nothing to look at
pub const MISSING_FACTS_SCORE: u32 = 50;

/// The built-in providers in their canonical order
pub fn default_providers() -> Vec<Arc<dyn CheckProvider>> {
    vec![
        Arc::new(DependencyCheck),
        Arc::new(BuildCheck),
        Arc::new(TestCheck),
        Arc::new(SecurityCheck),
        Arc::new(PerformanceCheck),
    ]
}

pub(crate) fn missing_facts(check: &str, kind: &str) -> CheckResult {
    CheckResult::warning(
        check,
        MISSING_FACTS_SCORE,
        format!("No {} results available", kind),
    )
    .with_recommendation(format!("Provide {} results to enable this check", kind))
}
