//! Build outcome check

use super::missing_facts;
use crate::{CheckError, CheckProvider};
use stackcheck_core::{clamp_score, BuildFacts, CheckResult, ProjectHandle};

const NAME: &str = "build";

const WARNING_PENALTY: i64 = 2;
const WARNING_FLOOR: i64 = 40;
const SLOW_BUILD_MS: u64 = 120_000;
const SLOW_BUILD_PENALTY: i64 = 10;

/// Scores the last build on success, warnings and duration
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildCheck;

#[async_trait::async_trait]
impl CheckProvider for BuildCheck {
    fn name(&self) -> &str {
        NAME
    }

    async fn run(&self, project: &ProjectHandle) -> Result<CheckResult, CheckError> {
        match &project.facts.build {
            Some(facts) => Ok(evaluate(facts)),
            None => Ok(missing_facts(NAME, "build")),
        }
    }
}

fn evaluate(facts: &BuildFacts) -> CheckResult {
    if !facts.succeeded {
        let mut details = format!("Build failed with {} errors", facts.errors.len());
        if let Some(first) = facts.errors.first() {
            details.push_str(": ");
            details.push_str(first);
        }
        return CheckResult::fail(NAME, 0, details).with_recommendation("Fix build errors");
    }

    let mut recommendations = Vec::new();
    let mut score = (100 - WARNING_PENALTY * i64::from(facts.warnings)).max(WARNING_FLOOR);
    if facts.warnings > 0 {
        recommendations.push(format!("Resolve {} build warnings", facts.warnings));
    }

    let slow = facts.duration_ms > SLOW_BUILD_MS;
    if slow {
        score -= SLOW_BUILD_PENALTY;
        recommendations.push("Reduce build time".to_string());
    }

    let details = format!(
        "Build succeeded in {:.1}s with {} warnings",
        facts.duration_ms as f64 / 1000.0,
        facts.warnings
    );
    let score = clamp_score(score);

    let result = if facts.warnings > 0 || slow {
        CheckResult::warning(NAME, score, details)
    } else {
        CheckResult::pass(NAME, score, details)
    };
    result.with_recommendations(recommendations)
}
