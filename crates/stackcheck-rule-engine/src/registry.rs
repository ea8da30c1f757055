//! Rule registry and conflict detector
//!
//! Rules are registered into a [`RuleRegistry`] first, then the registry is
//! frozen into a [`ConflictDetector`]. The detector owns an immutable rule
//! list, so registration always happens-before any concurrent detection.

use crate::rule::{CompatibilityRule, DeclarativeRule, DetectionContext};
use crate::{Result, RuleError, TomlRule};
use stackcheck_core::{Conflict, ModuleSet};
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, warn};

/// Ordered store of compatibility rules.
#[derive(Default)]
pub struct RuleRegistry {
    rules: Vec<Box<dyn CompatibilityRule>>,
}

impl RuleRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule. Registration order is evaluation order.
    pub fn register<R: CompatibilityRule + 'static>(&mut self, rule: R) {
        self.rules.push(Box::new(rule));
    }

    /// Appends an already boxed rule.
    pub fn register_boxed(&mut self, rule: Box<dyn CompatibilityRule>) {
        self.rules.push(rule);
    }

    /// Compiles and appends TOML rules in the given order.
    ///
    /// # Errors
    ///
    /// Fails on the first rule whose matcher cannot be compiled. Nothing from
    /// the batch is registered in that case.
    pub fn register_toml_rules(&mut self, rules: Vec<TomlRule>) -> Result<()> {
        let compiled = rules
            .into_iter()
            .map(DeclarativeRule::from_toml)
            .collect::<Result<Vec<_>>>()?;

        for rule in compiled {
            self.register(rule);
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rule names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Evaluates every rule in registration order.
    pub fn detect(&self, modules: &ModuleSet, framework: &str, platform: &str) -> Vec<Conflict> {
        evaluate_rules(&self.rules, modules, framework, platform).0
    }

    /// Ends registration and returns a shareable, read-only detector.
    pub fn freeze(self) -> ConflictDetector {
        ConflictDetector {
            rules: Arc::new(self.rules),
        }
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.rules.len())
            .finish()
    }
}

/// Immutable rule list that evaluates module sets.
///
/// Cloning is cheap; clones share the same rules.
#[derive(Clone)]
pub struct ConflictDetector {
    rules: Arc<Vec<Box<dyn CompatibilityRule>>>,
}

impl ConflictDetector {
    /// Evaluates every rule in registration order.
    ///
    /// A rule that errors or panics contributes no conflict; detection
    /// continues with the next rule.
    pub fn detect(&self, modules: &ModuleSet, framework: &str, platform: &str) -> Vec<Conflict> {
        evaluate_rules(&self.rules, modules, framework, platform).0
    }

    /// Like [`ConflictDetector::detect`] but also returns the isolated
    /// evaluation failures.
    pub fn detect_with_errors(
        &self,
        modules: &ModuleSet,
        framework: &str,
        platform: &str,
    ) -> (Vec<Conflict>, Vec<RuleError>) {
        evaluate_rules(&self.rules, modules, framework, platform)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rule names in evaluation order.
    pub fn names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }
}

impl fmt::Debug for ConflictDetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConflictDetector")
            .field("rules", &self.rules.len())
            .finish()
    }
}

fn evaluate_rules(
    rules: &[Box<dyn CompatibilityRule>],
    modules: &ModuleSet,
    framework: &str,
    platform: &str,
) -> (Vec<Conflict>, Vec<RuleError>) {
    let ctx = DetectionContext {
        modules,
        framework,
        platform,
    };
    let mut conflicts = Vec::new();
    let mut errors = Vec::new();

    for rule in rules {
        match evaluate_isolated(rule.as_ref(), &ctx) {
            Ok(Some(conflict)) => {
                debug!(rule = rule.name(), severity = %conflict.severity, "rule matched");
                conflicts.push(conflict);
            }
            Ok(None) => {}
            Err(e) => {
                warn!(rule = rule.name(), error = %e, "skipping rule that failed to evaluate");
                errors.push(e);
            }
        }
    }

    (conflicts, errors)
}

/// Runs one rule, converting errors, panics and out-of-set modules into
/// [`RuleError::Evaluation`].
fn evaluate_isolated(
    rule: &dyn CompatibilityRule,
    ctx: &DetectionContext<'_>,
) -> Result<Option<Conflict>> {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| rule.evaluate(ctx)));

    let conflict = match outcome {
        Ok(Ok(conflict)) => conflict,
        Ok(Err(e @ RuleError::Evaluation { .. })) => return Err(e),
        Ok(Err(e)) => {
            return Err(RuleError::Evaluation {
                rule: rule.name().to_string(),
                message: e.to_string(),
            })
        }
        Err(payload) => {
            return Err(RuleError::Evaluation {
                rule: rule.name().to_string(),
                message: format!("panicked: {}", panic_message(payload.as_ref())),
            })
        }
    };

    if let Some(ref conflict) = conflict {
        if let Some(stray) = conflict.affected.iter().find(|m| !ctx.modules.contains(m)) {
            return Err(RuleError::Evaluation {
                rule: rule.name().to_string(),
                message: format!("affected module '{}' is not in the module set", stray),
            });
        }
    }

    Ok(conflict)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
