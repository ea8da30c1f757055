//! Core trait for health check providers

use crate::CheckError;
use stackcheck_core::{CheckResult, ProjectHandle};
use std::time::Duration;

/// One independent project health check
///
/// Providers are run concurrently by [`crate::HealthCheckRunner`], so `run`
/// must not depend on another provider's side effects. A provider owns its
/// result name: the runner rejects results whose `name` differs from
/// [`CheckProvider::name`].
#[async_trait::async_trait]
pub trait CheckProvider: Send + Sync {
    /// Stable check name, e.g. `"dependencies"`
    fn name(&self) -> &str;

    /// Evaluate the project
    ///
    /// # Errors
    /// Returns [`CheckError::Failed`] when the check cannot be evaluated. The
    /// runner turns it into a `fail` result with score 0.
    async fn run(&self, project: &ProjectHandle) -> Result<CheckResult, CheckError>;

    /// Per-provider time budget, overriding the runner default
    fn timeout(&self) -> Option<Duration> {
        None
    }
}
