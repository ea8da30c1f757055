//! Test suite check: pass rate and coverage

use super::missing_facts;
use crate::{CheckError, CheckProvider};
use stackcheck_core::{CheckResult, ProjectHandle, TestFacts};

const NAME: &str = "tests";

/// Coverage below this is a warning
pub const COVERAGE_TARGET: f64 = 80.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct TestCheck;

#[async_trait::async_trait]
impl CheckProvider for TestCheck {
    fn name(&self) -> &str {
        NAME
    }

    async fn run(&self, project: &ProjectHandle) -> Result<CheckResult, CheckError> {
        match &project.facts.tests {
            Some(facts) => Ok(evaluate(facts)),
            None => Ok(missing_facts(NAME, "test")),
        }
    }
}

fn evaluate(facts: &TestFacts) -> CheckResult {
    let executed = facts.executed();
    if executed == 0 {
        return CheckResult::warning(NAME, 50, "No tests were executed")
            .with_recommendation("Add automated tests");
    }

    if facts.failed > 0 {
        let pass_rate = (f64::from(facts.passed) * 100.0 / executed as f64).round() as u32;
        return CheckResult::fail(
            NAME,
            pass_rate,
            format!("{} of {} tests failed", facts.failed, executed),
        )
        .with_recommendation(format!("Fix {} failing tests", facts.failed));
    }

    let mut details = format!("{} tests passed", facts.passed);
    if facts.skipped > 0 {
        details.push_str(&format!(", {} skipped", facts.skipped));
    }

    match facts.coverage_percent {
        None => CheckResult::pass(NAME, 100, details),
        Some(coverage) => {
            let coverage = coverage.clamp(0.0, 100.0);
            details.push_str(&format!(", {:.1}% coverage", coverage));
            let score = coverage.round() as u32;
            if coverage < COVERAGE_TARGET {
                CheckResult::warning(NAME, score, details).with_recommendation(format!(
                    "Increase test coverage to at least {}%",
                    COVERAGE_TARGET
                ))
            } else {
                CheckResult::pass(NAME, score, details)
            }
        }
    }
}
