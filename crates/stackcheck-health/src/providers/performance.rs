//! Runtime performance check

use super::missing_facts;
use crate::{CheckError, CheckProvider};
use stackcheck_core::{clamp_score, CheckResult, PerformanceFacts, ProjectHandle};

const NAME: &str = "performance";

const BUNDLE_WARN_KB: f64 = 500.0;
const BUNDLE_LIMIT_KB: f64 = 1000.0;
const LOAD_WARN_MS: f64 = 1500.0;
const LOAD_LIMIT_MS: f64 = 3000.0;
const MEMORY_LIMIT_MB: f64 = 512.0;

/// Below this score the check fails outright
const FAIL_BELOW: u32 = 50;

/// Scores bundle size, load time and memory use against fixed budgets
#[derive(Debug, Clone, Copy, Default)]
pub struct PerformanceCheck;

#[async_trait::async_trait]
impl CheckProvider for PerformanceCheck {
    fn name(&self) -> &str {
        NAME
    }

    async fn run(&self, project: &ProjectHandle) -> Result<CheckResult, CheckError> {
        match &project.facts.performance {
            Some(facts) if has_metrics(facts) => Ok(evaluate(facts)),
            _ => Ok(missing_facts(NAME, "performance")),
        }
    }
}

fn has_metrics(facts: &PerformanceFacts) -> bool {
    facts.bundle_size_kb.is_some() || facts.load_time_ms.is_some() || facts.memory_mb.is_some()
}

fn evaluate(facts: &PerformanceFacts) -> CheckResult {
    let mut score: i64 = 100;
    let mut notes = Vec::new();
    let mut recommendations = Vec::new();

    if let Some(bundle) = facts.bundle_size_kb {
        notes.push(format!("bundle {:.0} KB", bundle));
        if bundle > BUNDLE_LIMIT_KB {
            score -= 35;
        } else if bundle > BUNDLE_WARN_KB {
            score -= 20;
        }
        if bundle > BUNDLE_WARN_KB {
            recommendations.push("Reduce bundle size with code splitting".to_string());
        }
    }

    if let Some(load) = facts.load_time_ms {
        notes.push(format!("load {:.0} ms", load));
        if load > LOAD_LIMIT_MS {
            score -= 25;
        } else if load > LOAD_WARN_MS {
            score -= 10;
        }
        if load > LOAD_WARN_MS {
            recommendations.push("Improve initial load time".to_string());
        }
    }

    if let Some(memory) = facts.memory_mb {
        notes.push(format!("memory {:.0} MB", memory));
        if memory > MEMORY_LIMIT_MB {
            score -= 15;
            recommendations.push("Investigate memory usage".to_string());
        }
    }

    let score = clamp_score(score);
    let details = notes.join(", ");

    let result = if score < FAIL_BELOW {
        CheckResult::fail(NAME, score, details)
    } else if score < 100 {
        CheckResult::warning(NAME, score, details)
    } else {
        CheckResult::pass(NAME, score, details)
    };
    result.with_recommendations(recommendations)
}
