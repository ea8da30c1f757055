use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Current config schema version
pub const CONFIG_VERSION: &str = "1.0";

/// Main configuration structure for stackcheck
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StackcheckConfig {
    /// Schema version for migrations
    pub version: String,

    /// Health check settings
    #[serde(default)]
    pub health: HealthSettings,

    /// Compatibility rule settings
    #[serde(default)]
    pub rules: RuleSettings,
}

impl Default for StackcheckConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION.to_string(),
            health: HealthSettings::default(),
            rules: RuleSettings::default(),
        }
    }
}

/// Settings for `stackcheck health`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthSettings {
    /// Per-check time budget in seconds
    #[serde(default = "default_check_timeout")]
    pub check_timeout_secs: u64,

    /// Checks that are never run
    #[serde(default)]
    pub disabled_checks: Vec<String>,
}

impl Default for HealthSettings {
    fn default() -> Self {
        Self {
            check_timeout_secs: default_check_timeout(),
            disabled_checks: Vec::new(),
        }
    }
}

impl HealthSettings {
    pub fn check_timeout(&self) -> Duration {
        Duration::from_secs(self.check_timeout_secs)
    }

    pub fn is_disabled(&self, check: &str) -> bool {
        self.disabled_checks.iter().any(|c| c == check)
    }
}

/// Settings for `stackcheck compat`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RuleSettings {
    /// Load the rules embedded in the binary
    #[serde(default = "default_true")]
    pub include_builtin: bool,

    /// Additional directories of TOML rule files, loaded after project rules
    #[serde(default)]
    pub extra_rule_dirs: Vec<PathBuf>,
}

impl Default for RuleSettings {
    fn default() -> Self {
        Self {
            include_builtin: default_true(),
            extra_rule_dirs: Vec::new(),
        }
    }
}

fn default_check_timeout() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StackcheckConfig::default();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.health.check_timeout(), Duration::from_secs(30));
        assert!(config.rules.include_builtin);
        assert!(config.rules.extra_rule_dirs.is_empty());
    }

    #[test]
    fn test_config_serialization() {
        let mut config = StackcheckConfig::default();
        config.health.disabled_checks.push("performance".to_string());
        config.rules.extra_rule_dirs.push(PathBuf::from("/opt/rules"));

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: StackcheckConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, parsed);
        assert!(parsed.health.is_disabled("performance"));
        assert!(!parsed.health.is_disabled("build"));
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let parsed: StackcheckConfig = toml::from_str(
            r#"
            version = "1.0"
            [health]
            check_timeout_secs = 5
            "#,
        )
        .unwrap();
        assert_eq!(parsed.health.check_timeout_secs, 5);
        assert!(parsed.health.disabled_checks.is_empty());
        assert_eq!(parsed.rules, RuleSettings::default());
    }
}
