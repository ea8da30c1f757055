//! Runner behavior under concurrency, failure and cancellation.

use stackcheck_core::{CheckResult, CheckStatus, OverallStatus, ProjectHandle};
use stackcheck_health::{
    CheckError, CheckProvider, HealthCheckRunner, HealthError, RunnerOptions,
};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Sleeps for `delay`, then returns a fixed result
struct Scripted {
    name: &'static str,
    delay: Duration,
    outcome: Outcome,
}

enum Outcome {
    Pass(u32),
    Warn(u32),
    Error,
    Panic,
    Rename,
}

impl Scripted {
    fn new(name: &'static str, delay_ms: u64, outcome: Outcome) -> Self {
        Self {
            name,
            delay: Duration::from_millis(delay_ms),
            outcome,
        }
    }
}

#[async_trait::async_trait]
impl CheckProvider for Scripted {
    fn name(&self) -> &str {
        self.name
    }

    async fn run(&self, _project: &ProjectHandle) -> Result<CheckResult, CheckError> {
        tokio::time::sleep(self.delay).await;
        match self.outcome {
            Outcome::Pass(score) => Ok(CheckResult::pass(self.name, score, "ok")),
            Outcome::Warn(score) => Ok(CheckResult::warning(self.name, score, "meh")
                .with_recommendation(format!("Look at {}", self.name))),
            Outcome::Error => Err(CheckError::failed(self.name, "tool crashed")),
            Outcome::Panic => panic!("provider exploded"),
            Outcome::Rename => Ok(CheckResult::pass("someone-else", 100, "ok")),
        }
    }
}

struct Hanging;

#[async_trait::async_trait]
impl CheckProvider for Hanging {
    fn name(&self) -> &str {
        "hanging"
    }

    async fn run(&self, _project: &ProjectHandle) -> Result<CheckResult, CheckError> {
        std::future::pending().await
    }

    fn timeout(&self) -> Option<Duration> {
        Some(Duration::from_secs(5))
    }
}

fn project() -> Arc<ProjectHandle> {
    Arc::new(ProjectHandle::default())
}

fn runner(providers: Vec<Scripted>) -> HealthCheckRunner {
    let mut runner = HealthCheckRunner::new(RunnerOptions {
        check_timeout: Duration::from_secs(60),
    });
    for provider in providers {
        runner.register(provider).unwrap();
    }
    runner
}

#[tokio::test(start_paused = true)]
async fn test_results_follow_registration_order() {
    let runner = runner(vec![
        Scripted::new("slow", 300, Outcome::Pass(90)),
        Scripted::new("medium", 200, Outcome::Pass(80)),
        Scripted::new("fast", 100, Outcome::Pass(70)),
    ]);

    let results = runner
        .run_suite(project(), &CancellationToken::new())
        .await
        .unwrap();

    let names: Vec<_> = results.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["slow", "medium", "fast"]);
}

#[tokio::test(start_paused = true)]
async fn test_providers_run_concurrently() {
    let runner = runner(vec![
        Scripted::new("a", 1_000, Outcome::Pass(100)),
        Scripted::new("b", 1_000, Outcome::Pass(100)),
        Scripted::new("c", 1_000, Outcome::Pass(100)),
    ]);

    let started = tokio::time::Instant::now();
    runner
        .run_suite(project(), &CancellationToken::new())
        .await
        .unwrap();
    assert!(started.elapsed() < Duration::from_millis(1_500));
}

#[tokio::test]
async fn test_failing_provider_is_isolated() {
    let runner = runner(vec![
        Scripted::new("dependencies", 0, Outcome::Pass(90)),
        Scripted::new("build", 0, Outcome::Error),
        Scripted::new("tests", 0, Outcome::Pass(80)),
    ]);

    let report = runner
        .check(project(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.checks.len(), 3);
    let build = &report.checks[1];
    assert_eq!(build.name, "build");
    assert_eq!(build.status, CheckStatus::Fail);
    assert_eq!(build.score, 0);
    assert!(build.details.contains("tool crashed"));

    assert_eq!(report.overall, OverallStatus::Critical);
    assert_eq!(report.summary.failed_checks, 1);
    assert_eq!(report.score, (90.0 + 0.0 + 80.0) / 3.0);
}

#[tokio::test]
async fn test_panicking_provider_is_isolated() {
    let runner = runner(vec![
        Scripted::new("security", 0, Outcome::Panic),
        Scripted::new("performance", 0, Outcome::Pass(100)),
    ]);

    let report = runner
        .check(project(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.checks[0].status, CheckStatus::Fail);
    assert_eq!(report.checks[0].score, 0);
    assert!(report.checks[0].details.contains("provider exploded"));
    assert_eq!(report.checks[1].status, CheckStatus::Pass);
}

#[tokio::test(start_paused = true)]
async fn test_timeout_becomes_failure() {
    let mut runner = runner(vec![Scripted::new("quick", 10, Outcome::Pass(100))]);
    runner.register(Hanging).unwrap();

    let results = runner
        .run_suite(project(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(results[0].status, CheckStatus::Pass);
    assert_eq!(results[1].name, "hanging");
    assert_eq!(results[1].status, CheckStatus::Fail);
    assert!(results[1].details.contains("timed out"));
}

#[tokio::test(start_paused = true)]
async fn test_runner_default_timeout_applies() {
    let mut runner = HealthCheckRunner::new(RunnerOptions {
        check_timeout: Duration::from_millis(50),
    });
    runner
        .register(Scripted::new("slow", 10_000, Outcome::Pass(100)))
        .unwrap();

    let results = runner
        .run_suite(project(), &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(results[0].status, CheckStatus::Fail);
    assert!(results[0].details.contains("timed out after 50ms"));
}

#[tokio::test(start_paused = true)]
async fn test_cancellation_keeps_partial_results() {
    let runner = runner(vec![
        Scripted::new("fast", 10, Outcome::Warn(70)),
        Scripted::new("slow", 30_000, Outcome::Pass(100)),
    ]);

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let report = runner.check(project(), &cancel).await.unwrap();

    assert_eq!(report.summary.total_checks, 2);
    assert_eq!(report.checks[0].status, CheckStatus::Warning);
    assert_eq!(report.checks[0].score, 70);
    assert_eq!(report.checks[1].name, "slow");
    assert_eq!(report.checks[1].status, CheckStatus::Fail);
    assert!(report.checks[1].details.contains("cancelled"));
    assert_eq!(report.recommendations, vec!["Look at fast"]);
}

/// Cancels the suite from inside its own run, then still returns a result
struct CancelOnFinish {
    cancel: CancellationToken,
}

#[async_trait::async_trait]
impl CheckProvider for CancelOnFinish {
    fn name(&self) -> &str {
        "finisher"
    }

    async fn run(&self, _project: &ProjectHandle) -> Result<CheckResult, CheckError> {
        tokio::time::sleep(Duration::from_millis(100)).await;
        self.cancel.cancel();
        Ok(CheckResult::pass("finisher", 95, "done"))
    }
}

#[tokio::test(start_paused = true)]
async fn test_result_finished_at_cancel_instant_is_kept() {
    let cancel = CancellationToken::new();
    let mut runner = runner(vec![Scripted::new("slow", 30_000, Outcome::Pass(100))]);
    runner
        .register(CancelOnFinish {
            cancel: cancel.clone(),
        })
        .unwrap();

    let results = runner.run_suite(project(), &cancel).await.unwrap();

    assert_eq!(results[0].name, "slow");
    assert_eq!(results[0].status, CheckStatus::Fail);
    assert!(results[0].details.contains("cancelled"));
    assert_eq!(results[1].name, "finisher");
    assert_eq!(results[1].status, CheckStatus::Pass);
    assert_eq!(results[1].score, 95);
}

#[tokio::test]
async fn test_score_above_range_is_structural_error() {
    let runner = runner(vec![Scripted::new("build", 0, Outcome::Pass(101))]);

    let err = runner
        .run_suite(project(), &CancellationToken::new())
        .await
        .unwrap_err();
    let HealthError::Core(inner) = err;
    assert!(inner.is_structural());
}

#[tokio::test]
async fn test_result_under_wrong_name_is_structural_error() {
    let runner = runner(vec![Scripted::new("build", 0, Outcome::Rename)]);
    assert!(runner
        .run_suite(project(), &CancellationToken::new())
        .await
        .is_err());
}

#[tokio::test]
async fn test_empty_suite() {
    let runner = HealthCheckRunner::default();
    let report = runner
        .check(project(), &CancellationToken::new())
        .await
        .unwrap();

    assert!(report.checks.is_empty());
    assert_eq!(report.overall, OverallStatus::Healthy);
    assert_eq!(report.score, 0.0);
}
