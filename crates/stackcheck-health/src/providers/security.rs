//! Security audit check

use super::missing_facts;
use crate::{CheckError, CheckProvider};
use stackcheck_core::{clamp_score, CheckResult, ProjectHandle, SecurityFinding, Severity};

const NAME: &str = "security";

fn penalty(severity: Severity) -> i64 {
    match severity {
        Severity::Critical => 40,
        Severity::High => 25,
        Severity::Medium => 10,
        Severity::Low => 5,
    }
}

/// Scores audit findings; any critical or high finding fails the check
#[derive(Debug, Clone, Copy, Default)]
pub struct SecurityCheck;

#[async_trait::async_trait]
impl CheckProvider for SecurityCheck {
    fn name(&self) -> &str {
        NAME
    }

    async fn run(&self, project: &ProjectHandle) -> Result<CheckResult, CheckError> {
        match &project.facts.security {
            Some(facts) => Ok(evaluate(&facts.findings)),
            None => Ok(missing_facts(NAME, "security audit")),
        }
    }
}

fn evaluate(findings: &[SecurityFinding]) -> CheckResult {
    if findings.is_empty() {
        return CheckResult::pass(NAME, 100, "No known vulnerabilities");
    }

    let score = clamp_score(100 - findings.iter().map(|f| penalty(f.severity)).sum::<i64>());
    let worst = findings.iter().map(|f| f.severity).max().unwrap_or(Severity::Low);

    let recommendations = findings.iter().map(|finding| match &finding.fix {
        Some(fix) => fix.clone(),
        None => format!("Address {}", finding.title),
    });

    let details = format!(
        "{} findings, highest severity {}",
        findings.len(),
        worst
    );

    let result = if worst >= Severity::High {
        CheckResult::fail(NAME, score, details)
    } else {
        CheckResult::warning(NAME, score, details)
    };
    result.with_recommendations(recommendations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackcheck_core::CheckStatus;

    fn finding(severity: Severity, title: &str, fix: Option<&str>) -> SecurityFinding {
        SecurityFinding {
            id: format!("SC-{}", title.len()),
            severity,
            title: title.to_string(),
            fix: fix.map(String::from),
        }
    }

    #[test]
    fn test_no_findings() {
        let result = evaluate(&[]);
        assert_eq!(result.status, CheckStatus::Pass);
        assert_eq!(result.score, 100);
    }

    #[test]
    fn test_low_and_medium_warn() {
        let result = evaluate(&[
            finding(Severity::Medium, "Missing CSP header", None),
            finding(Severity::Low, "Verbose errors", Some("Disable stack traces in production")),
        ]);
        assert_eq!(result.status, CheckStatus::Warning);
        assert_eq!(result.score, 85);
        assert_eq!(
            result.recommendations,
            vec!["Address Missing CSP header", "Disable stack traces in production"]
        );
    }

    #[test]
    fn test_high_fails() {
        let result = evaluate(&[finding(Severity::High, "Hardcoded secret", None)]);
        assert_eq!(result.status, CheckStatus::Fail);
        assert_eq!(result.score, 75);
        assert_eq!(result.details, "1 findings, highest severity high");
    }

    #[test]
    fn test_many_criticals_floor_at_zero() {
        let findings: Vec<_> = (0..3)
            .map(|_| finding(Severity::Critical, "RCE", None))
            .collect();
        assert_eq!(evaluate(&findings).score, 0);
    }
}
