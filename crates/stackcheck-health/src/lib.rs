//! Stackcheck Health - concurrent project health checks
//!
//! A [`HealthCheckRunner`] holds an ordered list of [`CheckProvider`]s. Running
//! a suite spawns every provider at once, isolates failures (errors, panics,
//! timeouts) into `fail` results, and aggregates the results into a
//! [`HealthReport`](stackcheck_core::HealthReport).
//!
//! # Example
//!
//! ```no_run
//! use stackcheck_core::ProjectHandle;
//! use stackcheck_health::{HealthCheckRunner, RunnerOptions};
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run() -> stackcheck_health::Result<()> {
//! let runner = HealthCheckRunner::with_default_providers(RunnerOptions::default());
//! let project = ProjectHandle::load(std::path::Path::new("."))?;
//! let report = runner.check(Arc::new(project), &CancellationToken::new()).await?;
//! println!("{} ({:.1})", report.overall, report.score);
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod error;
pub mod provider;
pub mod providers;
pub mod runner;

pub use aggregate::{build_report, collect_recommendations, determine_overall, overall_score, summarize};
pub use error::{CheckError, HealthError, Result};
pub use provider::CheckProvider;
pub use providers::{
    default_providers, BuildCheck, DependencyCheck, PerformanceCheck, SecurityCheck, TestCheck,
};
pub use runner::{HealthCheckRunner, RunnerOptions, DEFAULT_CHECK_TIMEOUT};
