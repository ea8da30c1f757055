//! Concurrent health check runner
//!
//! Providers are spawned onto the tokio runtime together and their results
//! collected as they finish. The final result list is always in registration
//! order, one entry per provider, whatever the completion order was.

use crate::aggregate::build_report;
use crate::providers::default_providers;
use crate::{CheckError, CheckProvider, Result};
use futures::FutureExt;
use stackcheck_core::{validate_check_result, CheckResult, Error, HealthReport, ProjectHandle};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::{JoinError, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Default time budget for a single check
pub const DEFAULT_CHECK_TIMEOUT: Duration = Duration::from_secs(30);

/// Runner configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerOptions {
    /// Budget for providers that don't set their own
    pub check_timeout: Duration,
}

impl Default for RunnerOptions {
    fn default() -> Self {
        Self {
            check_timeout: DEFAULT_CHECK_TIMEOUT,
        }
    }
}

/// Registry of health check providers plus the suite executor
pub struct HealthCheckRunner {
    providers: Vec<Arc<dyn CheckProvider>>,
    options: RunnerOptions,
}

impl std::fmt::Debug for HealthCheckRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthCheckRunner")
            .field("providers", &self.names())
            .field("options", &self.options)
            .finish()
    }
}

impl Default for HealthCheckRunner {
    fn default() -> Self {
        Self::new(RunnerOptions::default())
    }
}

impl HealthCheckRunner {
    /// Create a runner with no providers
    pub fn new(options: RunnerOptions) -> Self {
        Self {
            providers: Vec::new(),
            options,
        }
    }

    /// Create a runner with the five built-in providers
    pub fn with_default_providers(options: RunnerOptions) -> Self {
        let mut runner = Self::new(options);
        runner.providers.extend(default_providers());
        runner
    }

    /// Register a provider
    ///
    /// # Errors
    /// Returns a structural error when the name is empty or already taken.
    pub fn register<P: CheckProvider + 'static>(&mut self, provider: P) -> Result<()> {
        self.register_shared(Arc::new(provider))
    }

    /// Register an already shared provider
    pub fn register_shared(&mut self, provider: Arc<dyn CheckProvider>) -> Result<()> {
        let name = provider.name();
        if name.is_empty() {
            return Err(Error::structural("check provider name must not be empty").into());
        }
        if self.providers.iter().any(|p| p.name() == name) {
            return Err(
                Error::structural(format!("check provider '{}' is already registered", name))
                    .into(),
            );
        }
        debug!(check = name, "registered check provider");
        self.providers.push(provider);
        Ok(())
    }

    /// Remove a provider by name, returning whether it was registered
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.providers.len();
        self.providers.retain(|p| p.name() != name);
        before != self.providers.len()
    }

    /// Provider names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn options(&self) -> &RunnerOptions {
        &self.options
    }

    /// Run every provider concurrently
    ///
    /// Provider errors, panics and timeouts become `fail` results with score
    /// 0. On cancellation, providers still running are aborted and reported
    /// as cancelled; results already collected are kept.
    ///
    /// # Errors
    /// Returns a structural error when a provider returns a score above 100
    /// or a result under another name.
    pub async fn run_suite(
        &self,
        project: Arc<ProjectHandle>,
        cancel: &CancellationToken,
    ) -> Result<Vec<CheckResult>> {
        let names: Vec<String> = self.providers.iter().map(|p| p.name().to_string()).collect();
        let mut slots: Vec<Option<CheckResult>> = vec![None; self.providers.len()];
        let mut tasks = JoinSet::new();

        for (index, provider) in self.providers.iter().enumerate() {
            let provider = Arc::clone(provider);
            let project = Arc::clone(&project);
            let budget = provider.timeout().unwrap_or(self.options.check_timeout);

            tasks.spawn(async move {
                let outcome = execute(provider.as_ref(), &project, budget).await;
                (index, outcome)
            });
        }

        loop {
            tokio::select! {
                biased;

                _ = cancel.cancelled() => {
                    // Keep results that finished before the cancel was observed
                    while let Some(joined) = tasks.try_join_next() {
                        slot_joined(joined, &names, &mut slots)?;
                    }
                    warn!(
                        pending = tasks.len(),
                        "health check suite cancelled"
                    );
                    tasks.abort_all();
                    break;
                }

                joined = tasks.join_next() => match joined {
                    Some(joined) => slot_joined(joined, &names, &mut slots)?,
                    None => break,
                }
            }
        }

        let results: Vec<CheckResult> = slots
            .into_iter()
            .zip(&names)
            .map(|(slot, name)| {
                slot.unwrap_or_else(|| {
                    failed_result(
                        name,
                        &CheckError::Cancelled {
                            check: name.clone(),
                        },
                    )
                })
            })
            .collect();

        Ok(results)
    }

    /// Run the suite and aggregate it into a report
    pub async fn check(
        &self,
        project: Arc<ProjectHandle>,
        cancel: &CancellationToken,
    ) -> Result<HealthReport> {
        let checks = self.run_suite(project, cancel).await?;
        let report = build_report(checks);

        info!(
            overall = %report.overall,
            score = report.score,
            total = report.summary.total_checks,
            failed = report.summary.failed_checks,
            "health check complete"
        );

        Ok(report)
    }
}

/// Run one provider under its time budget with unwinds caught
async fn execute(
    provider: &dyn CheckProvider,
    project: &ProjectHandle,
    budget: Duration,
) -> std::result::Result<CheckResult, CheckError> {
    let name = provider.name();
    debug!(check = name, timeout = ?budget, "check started");
    let guarded = AssertUnwindSafe(provider.run(project)).catch_unwind();

    match tokio::time::timeout(budget, guarded).await {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(payload)) => Err(CheckError::Panicked {
            check: name.to_string(),
            message: panic_message(payload.as_ref()),
        }),
        Err(_) => Err(CheckError::Timeout {
            check: name.to_string(),
            after: budget,
        }),
    }
}

/// Place a joined task's outcome into its registration slot
fn slot_joined(
    joined: std::result::Result<(usize, std::result::Result<CheckResult, CheckError>), JoinError>,
    names: &[String],
    slots: &mut [Option<CheckResult>],
) -> Result<()> {
    match joined {
        Ok((index, Ok(result))) => {
            validate_check_result(&result, &names[index])?;
            debug!(
                check = %names[index],
                status = %result.status,
                score = result.score,
                "check finished"
            );
            slots[index] = Some(result);
        }
        Ok((index, Err(error))) => {
            warn!(check = %names[index], error = %error, "check did not complete");
            slots[index] = Some(failed_result(&names[index], &error));
        }
        Err(join_error) => {
            // Unwinds are caught inside the task; only aborts land here
            debug!(error = %join_error, "check task ended without a result");
        }
    }
    Ok(())
}

fn failed_result(name: &str, error: &CheckError) -> CheckResult {
    CheckResult::fail(name, 0, error.to_string())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
