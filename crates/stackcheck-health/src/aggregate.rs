//! Report aggregation: status tally, overall status, mean score

use stackcheck_core::{CheckResult, CheckStatus, HealthReport, HealthSummary, OverallStatus};
use std::collections::HashSet;

/// Count results by status
pub fn summarize(checks: &[CheckResult]) -> HealthSummary {
    let mut summary = HealthSummary {
        total_checks: checks.len(),
        ..HealthSummary::default()
    };

    for check in checks {
        match check.status {
            CheckStatus::Pass => summary.passed_checks += 1,
            CheckStatus::Warning => summary.warning_checks += 1,
            CheckStatus::Fail => summary.failed_checks += 1,
        }
    }

    summary
}

/// Any failure makes the project critical; otherwise any warning makes it a
/// warning. An empty suite is healthy.
pub fn determine_overall(summary: &HealthSummary) -> OverallStatus {
    if summary.failed_checks > 0 {
        OverallStatus::Critical
    } else if summary.warning_checks > 0 {
        OverallStatus::Warning
    } else {
        OverallStatus::Healthy
    }
}

/// Arithmetic mean of check scores, `0.0` for an empty suite
pub fn overall_score(checks: &[CheckResult]) -> f64 {
    if checks.is_empty() {
        return 0.0;
    }
    let total: u64 = checks.iter().map(|c| u64::from(c.score)).sum();
    total as f64 / checks.len() as f64
}

/// Recommendations of non-passing checks, first occurrence wins
pub fn collect_recommendations(checks: &[CheckResult]) -> Vec<String> {
    let mut seen = HashSet::new();
    checks
        .iter()
        .filter(|c| c.status != CheckStatus::Pass)
        .flat_map(|c| c.recommendations.iter())
        .filter(|r| seen.insert(r.as_str()))
        .cloned()
        .collect()
}

/// Assemble a report from results already in registration order
pub fn build_report(checks: Vec<CheckResult>) -> HealthReport {
    let summary = summarize(&checks);
    HealthReport {
        overall: determine_overall(&summary),
        score: overall_score(&checks),
        recommendations: collect_recommendations(&checks),
        summary,
        checks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn result(name: &str, status: CheckStatus, score: u32) -> CheckResult {
        CheckResult::new(name, status, score, "")
    }

    #[test]
    fn test_mixed_suite() {
        let checks = vec![
            result("dependencies", CheckStatus::Pass, 90),
            result("build", CheckStatus::Pass, 85),
            result("tests", CheckStatus::Warning, 75),
            result("security", CheckStatus::Pass, 95),
            result("performance", CheckStatus::Pass, 88),
        ];

        let report = build_report(checks);
        assert_eq!(report.score, 86.6);
        assert_eq!(report.overall, OverallStatus::Warning);
        assert_eq!(
            report.summary,
            HealthSummary {
                total_checks: 5,
                passed_checks: 4,
                warning_checks: 1,
                failed_checks: 0,
            }
        );
    }

    #[test]
    fn test_empty_suite_is_healthy() {
        let report = build_report(Vec::new());
        assert_eq!(report.overall, OverallStatus::Healthy);
        assert_eq!(report.score, 0.0);
        assert_eq!(report.summary, HealthSummary::default());
        assert!(report.recommendations.is_empty());
    }

    #[test]
    fn test_recommendations_skip_passing_and_dedupe() {
        let checks = vec![
            result("build", CheckStatus::Pass, 100).with_recommendation("Cache builds"),
            result("tests", CheckStatus::Warning, 60)
                .with_recommendations(["Add tests", "Run CI"]),
            result("security", CheckStatus::Fail, 20)
                .with_recommendations(["Run CI", "Rotate keys"]),
        ];

        assert_eq!(
            collect_recommendations(&checks),
            vec!["Add tests", "Run CI", "Rotate keys"]
        );
    }

    #[test]
    fn test_overall_precedence_exhaustive() {
        for passed in 0..3 {
            for warnings in 0..3 {
                for failed in 0..3 {
                    let checks: Vec<_> = std::iter::repeat(CheckStatus::Pass)
                        .take(passed)
                        .chain(std::iter::repeat(CheckStatus::Warning).take(warnings))
                        .chain(std::iter::repeat(CheckStatus::Fail).take(failed))
                        .map(|s| result("c", s, 50))
                        .collect();

                    let expected = if failed > 0 {
                        OverallStatus::Critical
                    } else if warnings > 0 {
                        OverallStatus::Warning
                    } else {
                        OverallStatus::Healthy
                    };
                    assert_eq!(
                        determine_overall(&summarize(&checks)),
                        expected,
                        "passed={} warnings={} failed={}",
                        passed,
                        warnings,
                        failed
                    );
                }
            }
        }
    }

    fn status_strategy() -> impl Strategy<Value = CheckStatus> {
        prop_oneof![
            Just(CheckStatus::Pass),
            Just(CheckStatus::Warning),
            Just(CheckStatus::Fail),
        ]
    }

    proptest! {
        #[test]
        fn prop_status_precedence(statuses in prop::collection::vec(status_strategy(), 0..8)) {
            let checks: Vec<_> = statuses.iter().map(|s| result("c", *s, 50)).collect();
            let summary = summarize(&checks);

            prop_assert_eq!(
                summary.passed_checks + summary.warning_checks + summary.failed_checks,
                summary.total_checks
            );

            let expected = if statuses.contains(&CheckStatus::Fail) {
                OverallStatus::Critical
            } else if statuses.contains(&CheckStatus::Warning) {
                OverallStatus::Warning
            } else {
                OverallStatus::Healthy
            };
            prop_assert_eq!(determine_overall(&summary), expected);
        }

        #[test]
        fn prop_score_is_mean(scores in prop::collection::vec(0u32..=100, 1..16)) {
            let checks: Vec<_> = scores.iter().map(|s| result("c", CheckStatus::Pass, *s)).collect();
            let mean = scores.iter().map(|s| *s as f64).sum::<f64>() / scores.len() as f64;
            let score = overall_score(&checks);

            prop_assert!((score - mean).abs() < 1e-9);
            prop_assert!((0.0..=100.0).contains(&score));
        }
    }
}
