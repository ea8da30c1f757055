//! Dependency freshness and advisory check

use super::missing_facts;
use crate::{CheckError, CheckProvider};
use semver::Version;
use stackcheck_core::{clamp_score, CheckResult, DependencyFact, ProjectHandle};
use tracing::debug;

const NAME: &str = "dependencies";

const VULNERABLE_PENALTY: i64 = 15;
const DEPRECATED_PENALTY: i64 = 10;
const MAJOR_PENALTY: i64 = 5;
const MINOR_PENALTY: i64 = 2;

/// Type of version update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateType {
    /// Major version bump (1.0.0 -> 2.0.0) - potentially breaking
    Major,
    /// Minor version bump (1.0.0 -> 1.1.0)
    Minor,
    /// Patch version bump (1.0.0 -> 1.0.1)
    Patch,
    /// Already on latest
    None,
}

/// Determine the update type between two versions
///
/// Accepts npm-style prefixes (`^1.2.3`, `~1.2.3`, `v1.2.3`). Returns `None`
/// when either side isn't a valid semver version.
pub fn update_type(current: &str, latest: &str) -> Option<UpdateType> {
    let c = parse_version(current)?;
    let l = parse_version(latest)?;

    Some(if l <= c {
        UpdateType::None
    } else if l.major > c.major {
        UpdateType::Major
    } else if l.minor > c.minor {
        UpdateType::Minor
    } else {
        UpdateType::Patch
    })
}

fn parse_version(raw: &str) -> Option<Version> {
    let trimmed = raw.trim().trim_start_matches(['^', '~', '=', 'v']);
    Version::parse(trimmed).ok()
}

/// Scores declared packages on advisories, deprecation and staleness
#[derive(Debug, Clone, Copy, Default)]
pub struct DependencyCheck;

#[async_trait::async_trait]
impl CheckProvider for DependencyCheck {
    fn name(&self) -> &str {
        NAME
    }

    async fn run(&self, project: &ProjectHandle) -> Result<CheckResult, CheckError> {
        let Some(facts) = &project.facts.dependencies else {
            return Ok(missing_facts(NAME, "dependency audit"));
        };
        Ok(evaluate(&facts.packages))
    }
}

fn evaluate(packages: &[DependencyFact]) -> CheckResult {
    if packages.is_empty() {
        return CheckResult::pass(NAME, 100, "No dependencies declared");
    }

    let mut score: i64 = 100;
    let mut vulnerable = 0;
    let mut deprecated = 0;
    let mut major = 0;
    let mut minor = 0;
    let mut recommendations = Vec::new();

    for package in packages {
        if package.vulnerable {
            vulnerable += 1;
            score -= VULNERABLE_PENALTY;
            recommendations.push(format!("Upgrade vulnerable package {}", package.name));
        }
        if package.deprecated {
            deprecated += 1;
            score -= DEPRECATED_PENALTY;
            recommendations.push(format!("Replace deprecated package {}", package.name));
        }

        let Some(latest) = &package.latest else {
            continue;
        };
        match update_type(&package.current, latest) {
            Some(UpdateType::Major) => {
                major += 1;
                score -= MAJOR_PENALTY;
                recommendations.push(format!(
                    "Plan a major upgrade of {} to {}",
                    package.name, latest
                ));
            }
            Some(UpdateType::Minor) | Some(UpdateType::Patch) => {
                minor += 1;
                score -= MINOR_PENALTY;
            }
            Some(UpdateType::None) => {}
            None => debug!(
                package = %package.name,
                current = %package.current,
                latest = %latest,
                "unparseable version, skipping staleness check"
            ),
        }
    }

    if minor > 0 {
        recommendations.push(format!("Apply {} minor or patch updates", minor));
    }

    let details = format!(
        "{} dependencies: {} vulnerable, {} deprecated, {} outdated",
        packages.len(),
        vulnerable,
        deprecated,
        major + minor
    );
    let score = clamp_score(score);

    let result = if vulnerable > 0 {
        CheckResult::fail(NAME, score, details)
    } else if deprecated > 0 || major > 0 {
        CheckResult::warning(NAME, score, details)
    } else {
        CheckResult::pass(NAME, score, details)
    };
    result.with_recommendations(recommendations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackcheck_core::{CheckStatus, DependencyFacts, ProjectFacts};

    fn package(name: &str, current: &str, latest: Option<&str>) -> DependencyFact {
        DependencyFact {
            name: name.to_string(),
            current: current.to_string(),
            latest: latest.map(String::from),
            deprecated: false,
            vulnerable: false,
        }
    }

    #[test]
    fn test_update_type() {
        assert_eq!(update_type("1.0.0", "2.0.0"), Some(UpdateType::Major));
        assert_eq!(update_type("^1.0.0", "1.1.0"), Some(UpdateType::Minor));
        assert_eq!(update_type("~1.0.0", "1.0.1"), Some(UpdateType::Patch));
        assert_eq!(update_type("v1.2.0", "1.2.0"), Some(UpdateType::None));
        assert_eq!(update_type("2.0.0", "1.9.0"), Some(UpdateType::None));
        assert_eq!(update_type("1.9.0", "2.0.0-beta.1"), Some(UpdateType::Major));
        assert_eq!(update_type("latest", "1.0.0"), None);
    }

    #[test]
    fn test_up_to_date() {
        let result = evaluate(&[package("react", "18.2.0", Some("18.2.0"))]);
        assert_eq!(result.status, CheckStatus::Pass);
        assert_eq!(result.score, 100);
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn test_minor_updates_still_pass() {
        let result = evaluate(&[
            package("react", "18.1.0", Some("18.2.0")),
            package("zod", "3.22.0", Some("3.22.4")),
        ]);
        assert_eq!(result.status, CheckStatus::Pass);
        assert_eq!(result.score, 96);
        assert_eq!(result.recommendations, vec!["Apply 2 minor or patch updates"]);
    }

    #[test]
    fn test_deprecated_and_major_warn() {
        let mut old = package("request", "2.88.0", None);
        old.deprecated = true;
        let result = evaluate(&[old, package("next", "13.5.0", Some("14.1.0"))]);
        assert_eq!(result.status, CheckStatus::Warning);
        assert_eq!(result.score, 85);
        assert_eq!(result.recommendations.len(), 2);
    }

    #[test]
    fn test_vulnerable_fails() {
        let mut bad = package("lodash", "4.17.10", Some("4.17.21"));
        bad.vulnerable = true;
        let result = evaluate(&[bad]);
        assert_eq!(result.status, CheckStatus::Fail);
        assert_eq!(result.score, 83);
        assert_eq!(result.recommendations[0], "Upgrade vulnerable package lodash");
    }

    #[test]
    fn test_score_floors_at_zero() {
        let packages: Vec<_> = (0..10)
            .map(|i| {
                let mut p = package(&format!("pkg-{}", i), "1.0.0", None);
                p.vulnerable = true;
                p
            })
            .collect();
        assert_eq!(evaluate(&packages).score, 0);
    }

    #[tokio::test]
    async fn test_missing_facts() {
        let result = DependencyCheck.run(&ProjectHandle::default()).await.unwrap();
        assert_eq!(result.status, CheckStatus::Warning);
        assert_eq!(result.score, 50);
        assert_eq!(
            result.recommendations,
            vec!["Provide dependency audit results to enable this check"]
        );
    }

    #[tokio::test]
    async fn test_reads_project_facts() {
        let project = ProjectHandle::new(
            ".",
            ProjectFacts {
                dependencies: Some(DependencyFacts { packages: Vec::new() }),
                ..ProjectFacts::default()
            },
        );
        let result = DependencyCheck.run(&project).await.unwrap();
        assert_eq!(result.name, "dependencies");
        assert_eq!(result.status, CheckStatus::Pass);
    }
}
