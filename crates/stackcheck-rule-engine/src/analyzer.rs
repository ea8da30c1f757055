//! Compatibility analyzer - turns a module set into a report
//!
//! Ties together conflict detection, scoring and recommendation synthesis.

use crate::recommendations::generate_recommendations;
use crate::scoring::{is_compatible, score_conflicts};
use crate::{load_built_in_rules, ConflictDetector, Result, RuleRegistry};
use stackcheck_core::{CompatibilityReport, ModuleSet};
use tracing::{info, warn};

/// Produces [`CompatibilityReport`]s from a frozen rule set
#[derive(Debug, Clone)]
pub struct CompatibilityAnalyzer {
    detector: ConflictDetector,
}

impl CompatibilityAnalyzer {
    pub fn new(detector: ConflictDetector) -> Self {
        Self { detector }
    }

    /// Freeze a registry and wrap it
    pub fn from_registry(registry: RuleRegistry) -> Self {
        Self::new(registry.freeze())
    }

    /// Analyzer over the embedded rule sets only
    pub fn with_built_in_rules() -> Result<Self> {
        let mut registry = RuleRegistry::new();
        registry.register_toml_rules(load_built_in_rules()?)?;
        Ok(Self::from_registry(registry))
    }

    pub fn detector(&self) -> &ConflictDetector {
        &self.detector
    }

    /// Analyze a module set for the given framework and platform
    pub fn analyze(&self, modules: &ModuleSet, framework: &str, platform: &str) -> CompatibilityReport {
        let (conflicts, errors) = self.detector.detect_with_errors(modules, framework, platform);

        if !errors.is_empty() {
            warn!(
                skipped = errors.len(),
                "some compatibility rules could not be evaluated"
            );
        }

        let report = CompatibilityReport {
            compatible: is_compatible(&conflicts),
            score: score_conflicts(&conflicts),
            recommendations: generate_recommendations(&conflicts, framework),
            conflicts,
        };

        info!(
            modules = modules.len(),
            framework,
            platform,
            conflicts = report.conflicts.len(),
            score = report.score,
            compatible = report.compatible,
            "compatibility analysis complete"
        );

        report
    }
}
