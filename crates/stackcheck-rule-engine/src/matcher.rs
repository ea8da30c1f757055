//! Compiled rule matchers
//!
//! This module compiles TOML rule matchers into executable form. Globs and
//! regexes are compiled once at registration so detection never compiles.

use crate::constants::{
    MAX_GLOB_LENGTH, MAX_MODULE_PATTERNS, MAX_REGEX_LENGTH, REGEX_DFA_SIZE_LIMIT,
    REGEX_SIZE_LIMIT,
};
use crate::rule::DetectionContext;
use crate::{Result, RuleError, RuleMatcher};
use globset::{Glob, GlobMatcher, GlobSet, GlobSetBuilder};
use regex::{Regex, RegexBuilder};
use stackcheck_core::ModuleSet;

/// Compile a regex with size limits to prevent ReDoS attacks
fn compile_regex_safe(pattern: &str) -> Result<Regex> {
    if pattern.len() > MAX_REGEX_LENGTH {
        return Err(RuleError::InvalidPattern(format!(
            "Pattern exceeds maximum length of {} characters",
            MAX_REGEX_LENGTH
        )));
    }

    RegexBuilder::new(pattern)
        .size_limit(REGEX_SIZE_LIMIT)
        .dfa_size_limit(REGEX_DFA_SIZE_LIMIT)
        .build()
        .map_err(|e| RuleError::InvalidPattern(e.to_string()))
}

/// Compile a module glob, case-insensitively
fn compile_glob_safe(pattern: &str) -> Result<Glob> {
    if pattern.is_empty() {
        return Err(RuleError::InvalidPattern(
            "Module pattern must not be empty".to_string(),
        ));
    }
    if pattern.len() > MAX_GLOB_LENGTH {
        return Err(RuleError::InvalidPattern(format!(
            "Module pattern exceeds maximum length of {} characters",
            MAX_GLOB_LENGTH
        )));
    }

    globset::GlobBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| RuleError::InvalidPattern(e.to_string()))
}

fn compile_glob_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(compile_glob_safe(pattern)?);
    }
    builder
        .build()
        .map_err(|e| RuleError::InvalidPattern(e.to_string()))
}

fn lowercase_all(values: &Option<Vec<String>>) -> Option<Vec<String>> {
    values
        .as_ref()
        .map(|v| v.iter().map(|s| s.to_ascii_lowercase()).collect())
}

fn check_pattern_count(rule: &str, field: &str, patterns: &Option<Vec<String>>) -> Result<()> {
    match patterns {
        Some(p) if p.len() > MAX_MODULE_PATTERNS => Err(RuleError::InvalidRule {
            rule: rule.to_string(),
            message: format!(
                "{} has {} patterns, maximum is {}",
                field,
                p.len(),
                MAX_MODULE_PATTERNS
            ),
        }),
        _ => Ok(()),
    }
}

/// A compiled matcher ready for fast execution
#[derive(Debug, Clone)]
pub struct CompiledMatcher {
    /// One matcher per `all_of` pattern; each must hit some module
    all_of: Vec<GlobMatcher>,

    /// Any of these must hit some module
    any_of: Option<GlobSet>,

    /// None of these may hit any module
    none_of: Option<GlobSet>,

    /// Allowed frameworks (lowercased)
    frameworks: Option<Vec<String>>,

    /// Excluded frameworks (lowercased)
    not_frameworks: Option<Vec<String>>,

    /// Pre-compiled regex for framework matching
    framework_regex: Option<Regex>,

    /// Allowed platforms (lowercased)
    platforms: Option<Vec<String>>,

    /// Excluded platforms (lowercased)
    not_platforms: Option<Vec<String>>,
}

impl CompiledMatcher {
    /// Compile a TOML matcher for the rule named `rule`
    pub fn from_toml(rule: &str, matcher: &RuleMatcher) -> Result<Self> {
        let has_all = matcher.all_of.as_ref().is_some_and(|p| !p.is_empty());
        let has_any = matcher.any_of.as_ref().is_some_and(|p| !p.is_empty());
        if !has_all && !has_any {
            return Err(RuleError::InvalidRule {
                rule: rule.to_string(),
                message: "match must name modules via all_of or any_of".to_string(),
            });
        }

        check_pattern_count(rule, "all_of", &matcher.all_of)?;
        check_pattern_count(rule, "any_of", &matcher.any_of)?;
        check_pattern_count(rule, "none_of", &matcher.none_of)?;

        let all_of = matcher
            .all_of
            .iter()
            .flatten()
            .map(|p| compile_glob_safe(p).map(|g| g.compile_matcher()))
            .collect::<Result<Vec<_>>>()?;

        let any_of = match &matcher.any_of {
            Some(patterns) if !patterns.is_empty() => Some(compile_glob_set(patterns)?),
            _ => None,
        };

        let none_of = match &matcher.none_of {
            Some(patterns) if !patterns.is_empty() => Some(compile_glob_set(patterns)?),
            _ => None,
        };

        let framework_regex = matcher
            .framework_pattern
            .as_deref()
            .map(compile_regex_safe)
            .transpose()?;

        Ok(Self {
            all_of,
            any_of,
            none_of,
            frameworks: lowercase_all(&matcher.frameworks),
            not_frameworks: lowercase_all(&matcher.not_frameworks),
            framework_regex,
            platforms: lowercase_all(&matcher.platforms),
            not_platforms: lowercase_all(&matcher.not_platforms),
        })
    }

    /// Check whether the target framework and platform satisfy this matcher
    pub fn matches_target(&self, framework: &str, platform: &str) -> bool {
        self.framework_allowed(framework) && self.platform_allowed(platform)
    }

    /// Like [`CompiledMatcher::matches_target`], but an absent side is
    /// treated as unconstrained
    pub fn applies_to(&self, framework: Option<&str>, platform: Option<&str>) -> bool {
        framework.is_none_or(|f| self.framework_allowed(f))
            && platform.is_none_or(|p| self.platform_allowed(p))
    }

    fn framework_allowed(&self, framework: &str) -> bool {
        let framework = framework.to_ascii_lowercase();

        if let Some(ref allowed) = self.frameworks {
            if !allowed.contains(&framework) {
                return false;
            }
        }

        if let Some(ref excluded) = self.not_frameworks {
            if excluded.contains(&framework) {
                return false;
            }
        }

        if let Some(ref regex) = self.framework_regex {
            if !regex.is_match(&framework) {
                return false;
            }
        }

        true
    }

    fn platform_allowed(&self, platform: &str) -> bool {
        let platform = platform.to_ascii_lowercase();

        if let Some(ref allowed) = self.platforms {
            if !allowed.contains(&platform) {
                return false;
            }
        }

        if let Some(ref excluded) = self.not_platforms {
            if excluded.contains(&platform) {
                return false;
            }
        }

        true
    }

    /// Evaluate the matcher against a detection context
    ///
    /// Returns the affected modules (in module set order) when every condition
    /// holds, `None` otherwise.
    pub fn matches(&self, ctx: &DetectionContext<'_>) -> Option<ModuleSet> {
        if !self.matches_target(ctx.framework, ctx.platform) {
            return None;
        }

        let modules = ctx.modules;

        for matcher in &self.all_of {
            if !modules.iter().any(|m| matcher.is_match(m)) {
                return None;
            }
        }

        if let Some(ref any_of) = self.any_of {
            if !modules.iter().any(|m| any_of.is_match(m)) {
                return None;
            }
        }

        if let Some(ref none_of) = self.none_of {
            if modules.iter().any(|m| none_of.is_match(m)) {
                return None;
            }
        }

        let affected = modules
            .iter()
            .filter(|m| {
                self.all_of.iter().any(|g| g.is_match(m))
                    || self.any_of.as_ref().is_some_and(|s| s.is_match(m))
            })
            .collect();

        Some(affected)
    }
}
