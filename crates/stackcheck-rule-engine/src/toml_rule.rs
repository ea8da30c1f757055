//! TOML rule definitions and types
//!
//! This module defines the structure of compatibility rules as they appear in
//! TOML files. Severity and conflict type are closed enums, so a rule file
//! with an unknown value fails to parse instead of producing a half-valid rule.

use serde::{Deserialize, Serialize};
use stackcheck_core::{Conflict, ConflictType, ModuleSet, Severity};

/// A complete TOML rule file
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TomlRuleFile {
    /// Rule set metadata (optional)
    #[serde(default)]
    pub ruleset: Option<RuleSetMetadata>,

    /// List of rules
    #[serde(default)]
    pub rules: Vec<TomlRule>,
}

/// Rule set metadata
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RuleSetMetadata {
    /// Rule set name (e.g., "Payments")
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Version of this rule file
    #[serde(default)]
    pub version: Option<String>,
}

/// A single TOML rule
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TomlRule {
    /// Rule name (for debugging/logging)
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Matching conditions
    #[serde(rename = "match")]
    pub matcher: RuleMatcher,

    /// Conflict emitted when the rule matches
    pub conflict: ConflictConfig,

    /// Priority (higher = evaluated first)
    #[serde(default)]
    pub priority: Option<u32>,
}

/// Rule matching conditions
///
/// Module lists hold glob patterns (`"electron-*"`); framework and platform
/// lists hold exact identifiers compared case-insensitively.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RuleMatcher {
    /// Every pattern must match at least one module
    #[serde(default, deserialize_with = "deserialize_string_or_seq")]
    pub all_of: Option<Vec<String>>,

    /// At least one pattern must match a module
    #[serde(default, deserialize_with = "deserialize_string_or_seq")]
    pub any_of: Option<Vec<String>>,

    /// No pattern may match any module
    #[serde(default, deserialize_with = "deserialize_string_or_seq")]
    pub none_of: Option<Vec<String>>,

    /// Target framework must be one of these
    #[serde(default, deserialize_with = "deserialize_string_or_seq")]
    pub frameworks: Option<Vec<String>>,

    /// Target framework must NOT be one of these
    #[serde(default, deserialize_with = "deserialize_string_or_seq")]
    pub not_frameworks: Option<Vec<String>>,

    /// Target framework must match this regex pattern
    #[serde(default)]
    pub framework_pattern: Option<String>,

    /// Target platform must be one of these
    #[serde(default, deserialize_with = "deserialize_string_or_seq")]
    pub platforms: Option<Vec<String>>,

    /// Target platform must NOT be one of these
    #[serde(default, deserialize_with = "deserialize_string_or_seq")]
    pub not_platforms: Option<Vec<String>>,
}

/// Custom deserializer that accepts both String and Vec<String>
fn deserialize_string_or_seq<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct StringOrSeqVisitor;

    impl<'de> Visitor<'de> for StringOrSeqVisitor {
        type Value = Option<Vec<String>>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or array of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(vec![value.to_string()]))
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(vec![value]))
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: de::SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(elem) = seq.next_element()? {
                vec.push(elem);
            }
            Ok(Some(vec))
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            deserializer.deserialize_any(self)
        }
    }

    deserializer.deserialize_any(StringOrSeqVisitor)
}

/// Conflict descriptor from TOML
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ConflictConfig {
    #[serde(rename = "type")]
    pub conflict_type: ConflictType,

    pub severity: Severity,

    pub description: String,

    pub resolution: String,
}

impl ConflictConfig {
    /// Build the conflict emitted for the given affected modules
    pub fn to_conflict(&self, affected: ModuleSet) -> Conflict {
        Conflict {
            conflict_type: self.conflict_type,
            severity: self.severity,
            description: self.description.clone(),
            affected,
            resolution: self.resolution.clone(),
        }
    }
}
