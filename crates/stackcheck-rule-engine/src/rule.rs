//! Compatibility rule trait and its implementations.

use crate::{CompiledMatcher, ConflictConfig, Result, TomlRule};
use stackcheck_core::{Conflict, ModuleSet};
use std::fmt;

/// Inputs a rule predicate is evaluated against.
#[derive(Debug, Clone, Copy)]
pub struct DetectionContext<'a> {
    pub modules: &'a ModuleSet,
    /// Target framework identifier (e.g., "nextjs")
    pub framework: &'a str,
    /// Target platform identifier (e.g., "web", "desktop")
    pub platform: &'a str,
}

/// A predicate over a module set plus the conflict to emit when it matches.
///
/// # Thread Safety
///
/// Implementations must be Send + Sync; a frozen registry is shared across
/// threads and evaluated concurrently.
pub trait CompatibilityRule: Send + Sync + fmt::Debug {
    /// Rule name (for debugging/logging)
    fn name(&self) -> &str;

    /// Evaluates the rule.
    ///
    /// # Errors
    ///
    /// An error means the predicate itself could not be evaluated. The
    /// detector logs it and treats the rule as not matching.
    fn evaluate(&self, ctx: &DetectionContext<'_>) -> Result<Option<Conflict>>;
}

/// A rule backed by a compiled TOML matcher
#[derive(Debug, Clone)]
pub struct DeclarativeRule {
    name: String,
    description: Option<String>,
    priority: u32,
    matcher: CompiledMatcher,
    conflict: ConflictConfig,
}

impl DeclarativeRule {
    /// Compile a TOML rule
    pub fn from_toml(rule: TomlRule) -> Result<Self> {
        let matcher = CompiledMatcher::from_toml(&rule.name, &rule.matcher)?;

        Ok(Self {
            name: rule.name,
            description: rule.description,
            priority: rule.priority.unwrap_or(0),
            matcher,
            conflict: rule.conflict,
        })
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn priority(&self) -> u32 {
        self.priority
    }

    pub fn conflict(&self) -> &ConflictConfig {
        &self.conflict
    }
}

impl CompatibilityRule for DeclarativeRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, ctx: &DetectionContext<'_>) -> Result<Option<Conflict>> {
        Ok(self
            .matcher
            .matches(ctx)
            .map(|affected| self.conflict.to_conflict(affected)))
    }
}

/// A rule backed by a closure
///
/// # Example
///
/// ```
/// use stackcheck_rule_engine::{FnRule, RuleRegistry};
/// use stackcheck_core::{Conflict, ConflictType, ModuleSet, Severity};
///
/// let mut registry = RuleRegistry::new();
/// registry.register(FnRule::new("too-many-modules", |ctx| {
///     Ok((ctx.modules.len() > 20).then(|| Conflict {
///         conflict_type: ConflictType::Feature,
///         severity: Severity::Medium,
///         description: "Large module sets slow down scaffolding".to_string(),
///         affected: ctx.modules.clone(),
///         resolution: "Split the project into packages".to_string(),
///     }))
/// }));
/// assert_eq!(registry.len(), 1);
/// ```
pub struct FnRule<F> {
    name: String,
    predicate: F,
}

impl<F> FnRule<F>
where
    F: Fn(&DetectionContext<'_>) -> Result<Option<Conflict>> + Send + Sync,
{
    pub fn new(name: impl Into<String>, predicate: F) -> Self {
        Self {
            name: name.into(),
            predicate,
        }
    }
}

impl<F> fmt::Debug for FnRule<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnRule").field("name", &self.name).finish()
    }
}

impl<F> CompatibilityRule for FnRule<F>
where
    F: Fn(&DetectionContext<'_>) -> Result<Option<Conflict>> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, ctx: &DetectionContext<'_>) -> Result<Option<Conflict>> {
        (self.predicate)(ctx)
    }
}
