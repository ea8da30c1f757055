//! Built-in compatibility rules embedded in the binary
//!
//! These rule sets cover the modules the scaffolder ships with (payments,
//! auth, data, platform). They are embedded at compile time via
//! `include_str!()` for zero-config defaults.

use crate::{Result, RuleError, TomlRule, TomlRuleFile};

/// Payment provider rules (Stripe, PayPal)
pub const PAYMENTS_RULES: &str = include_str!("built_in/payments.toml");

/// Authentication provider rules (NextAuth, Clerk, Auth0)
pub const AUTH_RULES: &str = include_str!("built_in/auth.toml");

/// ORM, database and state management rules
pub const DATA_RULES: &str = include_str!("built_in/data.toml");

/// Framework and platform support rules (Electron, Svelte, PWA)
pub const PLATFORM_RULES: &str = include_str!("built_in/platform.toml");

/// All embedded rule sets, in load order
pub const BUILT_IN_RULE_SETS: &[(&str, &str)] = &[
    ("payments", PAYMENTS_RULES),
    ("auth", AUTH_RULES),
    ("data", DATA_RULES),
    ("platform", PLATFORM_RULES),
];

/// Load all built-in rules
///
/// Rules are ordered by priority (higher first), then by name, giving a
/// stable registration order.
///
/// # Example
///
/// ```
/// use stackcheck_rule_engine::{load_built_in_rules, RuleRegistry};
///
/// let mut registry = RuleRegistry::new();
/// registry
///     .register_toml_rules(load_built_in_rules().expect("built-in rules parse"))
///     .expect("built-in rules compile");
/// assert!(!registry.is_empty());
/// ```
pub fn load_built_in_rules() -> Result<Vec<TomlRule>> {
    let mut rules = Vec::new();

    for (name, toml_str) in BUILT_IN_RULE_SETS {
        let file: TomlRuleFile = toml::from_str(toml_str).map_err(|e| RuleError::LoadError {
            path: format!("built-in:{}", name),
            source: Box::new(e),
        })?;
        rules.extend(file.rules);
    }

    sort_rules(&mut rules);
    Ok(rules)
}

/// Sort by priority (higher priority first), then by name for stable ordering
pub(crate) fn sort_rules(rules: &mut [TomlRule]) {
    rules.sort_by(|a, b| {
        b.priority
            .unwrap_or(0)
            .cmp(&a.priority.unwrap_or(0))
            .then_with(|| a.name.cmp(&b.name))
    });
}
