use super::Outcome;
use crate::formatters::{human, json, OutputFormat};
use anyhow::{bail, Context, Result};
use clap::Args;
use stackcheck_config::{HealthSettings, StackcheckConfig};
use stackcheck_core::{OverallStatus, ProjectHandle};
use stackcheck_health::{HealthCheckRunner, RunnerOptions};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;
use tracing::warn;

#[derive(Args, Debug)]
pub struct HealthArgs {
    /// Project root
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// Facts file (defaults to <PATH>/.stackcheck/facts.json)
    #[arg(long, value_name = "FILE")]
    pub facts: Option<PathBuf>,

    /// Per-check timeout in seconds (overrides config)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Check to skip (can be specified multiple times)
    #[arg(long = "skip", value_name = "CHECK")]
    pub skip: Vec<String>,
}

pub fn run_health(
    args: &HealthArgs,
    config: &StackcheckConfig,
    format: OutputFormat,
) -> Result<Outcome> {
    let runner = build_runner(args, &config.health)?;
    let project = load_project(args)?;

    let runtime = Runtime::new().context("Failed to create tokio runtime")?;
    let report = runtime.block_on(async {
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        let interrupt = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("interrupted, cancelling remaining checks");
                trigger.cancel();
            }
        });

        let report = runner.check(Arc::new(project), &cancel).await;
        interrupt.abort();
        report
    })?;

    match format {
        OutputFormat::Human => human::print_health(&report),
        OutputFormat::Json => json::print_json("health", &report)?,
    }

    Ok(if report.overall == OverallStatus::Critical {
        Outcome::Failing
    } else {
        Outcome::Clean
    })
}

fn build_runner(args: &HealthArgs, settings: &HealthSettings) -> Result<HealthCheckRunner> {
    let check_timeout = match args.timeout {
        Some(0) => bail!("--timeout must be greater than 0"),
        Some(secs) => Duration::from_secs(secs),
        None => settings.check_timeout(),
    };

    let mut runner = HealthCheckRunner::with_default_providers(RunnerOptions { check_timeout });
    let known: Vec<String> = runner.names().into_iter().map(String::from).collect();

    for check in settings.disabled_checks.iter().chain(&args.skip) {
        if known.contains(check) {
            runner.remove(check);
        } else {
            warn!(check = %check, "unknown check, nothing to skip");
        }
    }

    Ok(runner)
}

fn load_project(args: &HealthArgs) -> Result<ProjectHandle> {
    let project = match &args.facts {
        Some(facts) => ProjectHandle::load_with_facts(&args.path, facts),
        None => ProjectHandle::load(&args.path),
    };
    project.with_context(|| format!("Failed to load project at {}", args.path.display()))
}
