//! Stackcheck Rule Engine - module compatibility rules and scoring
//!
//! This crate decides whether a chosen set of feature modules can coexist in a
//! generated project. Conflict logic lives in data, not control flow: every
//! incompatibility is a rule registered into a [`RuleRegistry`], and the
//! detector is a fixed loop over those rules.
//!
//! # Architecture
//!
//! - **TOML Rules**: Declarative module/framework/platform matching
//! - **Compiled Matching**: Globs and regexes compiled once at registration
//! - **Multi-Source Loading**: Built-in rules + user rules + project rules
//! - **Scoring**: Severity-weighted 0-100 score and resolution-based recommendations
//!
//! # Example
//!
//! ```toml
//! # .stackcheck/rules/payments.toml
//! [[rules]]
//! name = "multiple-payment-providers"
//! [rules.match]
//! all_of = ["stripe", "paypal"]
//! [rules.conflict]
//! type = "feature"
//! severity = "low"
//! description = "Multiple payment providers may cause conflicts"
//! resolution = "Consider using payment abstraction layer"
//! ```

pub mod analyzer;
pub mod built_in;
pub mod constants;
#[cfg(feature = "native-fs")]
pub mod loader;
pub mod matcher;
pub mod recommendations;
pub mod registry;
pub mod rule;
pub mod scoring;
pub mod toml_rule;

pub use analyzer::CompatibilityAnalyzer;
pub use built_in::{load_built_in_rules, BUILT_IN_RULE_SETS};
pub use constants::*;
#[cfg(feature = "native-fs")]
pub use loader::RuleLoader;
pub use matcher::CompiledMatcher;
pub use recommendations::{generate_recommendations, ALL_COMPATIBLE_MESSAGE};
pub use registry::{ConflictDetector, RuleRegistry};
pub use rule::{CompatibilityRule, DeclarativeRule, DetectionContext, FnRule};
pub use scoring::{is_compatible, score_conflicts};
pub use toml_rule::{ConflictConfig, RuleMatcher, RuleSetMetadata, TomlRule, TomlRuleFile};

/// Result type for rule operations
pub type Result<T> = std::result::Result<T, RuleError>;

/// Error types for rule engine
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("Invalid rule '{rule}': {message}")]
    InvalidRule { rule: String, message: String },

    #[error("Failed to load rules from {path}: {source}")]
    LoadError {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Invalid TOML: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Regex error: {0}")]
    RegexError(#[from] regex::Error),

    /// A rule's predicate failed while evaluating a module set.
    ///
    /// Never escapes [`ConflictDetector::detect`]; the rule is skipped instead.
    #[error("Rule '{rule}' failed to evaluate: {message}")]
    Evaluation { rule: String, message: String },
}

impl RuleError {
    /// Whether this error means the rule set itself is misconfigured.
    pub fn is_structural(&self) -> bool {
        !matches!(self, RuleError::Evaluation { .. })
    }
}
