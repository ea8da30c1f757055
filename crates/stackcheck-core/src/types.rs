//! Core data types shared by the compatibility and health engines.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordinal impact of a conflict.
///
/// Variants are declared in ascending order so `Ord` follows
/// `low < medium < high < critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Returns all severities, lowest first
    pub fn all() -> &'static [Severity] {
        &[
            Severity::Low,
            Severity::Medium,
            Severity::High,
            Severity::Critical,
        ]
    }

    /// Points subtracted from a compatibility score per conflict of this severity.
    pub fn weight(&self) -> u32 {
        match self {
            Severity::Critical => 30,
            Severity::High => 20,
            Severity::Medium => 10,
            Severity::Low => 5,
        }
    }

    /// Returns the lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of incompatibility a conflict describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictType {
    /// Overlapping or redundant features
    Feature,
    /// Incompatible transitive dependencies
    Dependency,
    /// Module unsupported on the target platform
    Platform,
    /// Module unsupported by the target framework
    Framework,
    /// Version constraints that cannot be satisfied together
    Version,
}

impl ConflictType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictType::Feature => "feature",
            ConflictType::Dependency => "dependency",
            ConflictType::Platform => "platform",
            ConflictType::Framework => "framework",
            ConflictType::Version => "version",
        }
    }
}

impl fmt::Display for ConflictType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered collection of distinct module identifiers.
///
/// Order is preserved for display only; detection semantics never depend on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct ModuleSet(Vec<String>);

impl ModuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a module unless it is already present.
    ///
    /// Returns `false` for duplicates.
    pub fn insert(&mut self, module: impl Into<String>) -> bool {
        let module = module.into();
        if self.contains(&module) {
            return false;
        }
        self.0.push(module);
        true
    }

    pub fn contains(&self, module: &str) -> bool {
        self.0.iter().any(|m| m == module)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for ModuleSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = ModuleSet::new();
        for module in iter {
            set.insert(module);
        }
        set
    }
}

impl From<Vec<String>> for ModuleSet {
    fn from(modules: Vec<String>) -> Self {
        modules.into_iter().collect()
    }
}

impl From<ModuleSet> for Vec<String> {
    fn from(set: ModuleSet) -> Self {
        set.0
    }
}

impl<'a> IntoIterator for &'a ModuleSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ModuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(", "))
    }
}

/// A detected incompatibility between modules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    #[serde(rename = "type")]
    pub conflict_type: ConflictType,
    pub severity: Severity,
    pub description: String,
    /// Modules involved, a subset of the requested module set
    pub affected: ModuleSet,
    /// Suggested resolution, surfaced verbatim as a recommendation
    pub resolution: String,
}

/// Outcome of a compatibility analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityReport {
    /// `true` unless some conflict is critical
    pub compatible: bool,
    /// Severity-weighted score in `0..=100`
    pub score: u8,
    /// Conflicts in rule evaluation order
    pub conflicts: Vec<Conflict>,
    pub recommendations: Vec<String>,
}

/// Result status of a single health check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    Warning,
    Fail,
}

impl CheckStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::Pass => "pass",
            CheckStatus::Warning => "warning",
            CheckStatus::Fail => "fail",
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of one health check provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    /// Expected in `0..=100`; the runner rejects anything larger
    pub score: u32,
    pub details: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl CheckResult {
    pub fn new(
        name: impl Into<String>,
        status: CheckStatus,
        score: u32,
        details: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            status,
            score,
            details: details.into(),
            recommendations: Vec::new(),
        }
    }

    pub fn pass(name: impl Into<String>, score: u32, details: impl Into<String>) -> Self {
        Self::new(name, CheckStatus::Pass, score, details)
    }

    pub fn warning(name: impl Into<String>, score: u32, details: impl Into<String>) -> Self {
        Self::new(name, CheckStatus::Warning, score, details)
    }

    pub fn fail(name: impl Into<String>, score: u32, details: impl Into<String>) -> Self {
        Self::new(name, CheckStatus::Fail, score, details)
    }

    pub fn with_recommendation(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendations.push(recommendation.into());
        self
    }

    pub fn with_recommendations<I, S>(mut self, recommendations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.recommendations
            .extend(recommendations.into_iter().map(Into::into));
        self
    }
}

/// Tally of check results by status.
///
/// `passed_checks + warning_checks + failed_checks == total_checks` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthSummary {
    pub total_checks: usize,
    pub passed_checks: usize,
    pub warning_checks: usize,
    pub failed_checks: usize,
}

/// Tri-state project health derived from all checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    Healthy,
    Warning,
    Critical,
}

impl OverallStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverallStatus::Healthy => "healthy",
            OverallStatus::Warning => "warning",
            OverallStatus::Critical => "critical",
        }
    }
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a health check suite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub overall: OverallStatus,
    /// Mean of check scores, `0.0` for an empty suite
    pub score: f64,
    /// Check results in provider registration order
    pub checks: Vec<CheckResult>,
    pub summary: HealthSummary,
    /// Recommendations from non-passing checks, deduplicated, in check order
    #[serde(default)]
    pub recommendations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
        assert_eq!(Severity::all().iter().max(), Some(&Severity::Critical));
    }

    #[test]
    fn test_severity_weights() {
        assert_eq!(Severity::Critical.weight(), 30);
        assert_eq!(Severity::High.weight(), 20);
        assert_eq!(Severity::Medium.weight(), 10);
        assert_eq!(Severity::Low.weight(), 5);
    }

    #[test]
    fn test_unknown_severity_rejected() {
        let result: Result<Severity, _> = serde_json::from_str("\"severe\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_module_set_drops_duplicates_and_keeps_order() {
        let set: ModuleSet = ["stripe", "auth", "stripe", "paypal"].into_iter().collect();
        assert_eq!(set.len(), 3);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["stripe", "auth", "paypal"]);
    }

    #[test]
    fn test_module_set_deserialize_drops_duplicates() {
        let set: ModuleSet = serde_json::from_str(r#"["stripe", "auth", "stripe"]"#).unwrap();
        assert_eq!(set.as_slice(), ["stripe", "auth"]);
        assert_eq!(serde_json::to_string(&set).unwrap(), r#"["stripe","auth"]"#);
    }

    #[test]
    fn test_conflict_serializes_type_field() {
        let conflict = Conflict {
            conflict_type: ConflictType::Feature,
            severity: Severity::Low,
            description: "Multiple payment providers".to_string(),
            affected: ["stripe", "paypal"].into_iter().collect(),
            resolution: "Consider using payment abstraction layer".to_string(),
        };

        let json = serde_json::to_value(&conflict).unwrap();
        assert_eq!(json["type"], "feature");
        assert_eq!(json["severity"], "low");
        assert_eq!(json["affected"], serde_json::json!(["stripe", "paypal"]));
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let summary = HealthSummary {
            total_checks: 5,
            passed_checks: 4,
            warning_checks: 1,
            failed_checks: 0,
        };
        let json = serde_json::to_value(summary).unwrap();
        assert_eq!(json["totalChecks"], 5);
        assert_eq!(json["warningChecks"], 1);
    }

    #[test]
    fn test_check_result_builders() {
        let result = CheckResult::warning("tests", 70, "Coverage below target")
            .with_recommendation("Increase coverage");
        assert_eq!(result.status, CheckStatus::Warning);
        assert_eq!(result.recommendations, vec!["Increase coverage".to_string()]);
    }
}
