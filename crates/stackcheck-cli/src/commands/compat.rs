use super::{Outcome, RuleSourceArgs};
use crate::formatters::{human, json, OutputFormat};
use anyhow::{Context, Result};
use clap::Args;
use stackcheck_config::StackcheckConfig;
use stackcheck_core::{CompatibilityReport, ModuleSet};
use stackcheck_rule_engine::{CompatibilityAnalyzer, RuleRegistry};

#[derive(Args, Debug)]
pub struct CompatArgs {
    /// Module identifiers to check, e.g. stripe paypal nextauth
    #[arg(value_name = "MODULES", required = true)]
    pub modules: Vec<String>,

    /// Target framework (nextjs, sveltekit, react, ...)
    #[arg(short, long)]
    pub framework: String,

    /// Target platform (web, desktop, mobile, edge, static, ...)
    #[arg(short, long)]
    pub platform: String,

    #[command(flatten)]
    pub sources: RuleSourceArgs,
}

pub fn run_compat(
    args: &CompatArgs,
    config: &StackcheckConfig,
    format: OutputFormat,
) -> Result<Outcome> {
    let modules: ModuleSet = args.modules.iter().map(String::as_str).collect();
    let report = analyze(args, config, &modules)?;

    match format {
        OutputFormat::Human => {
            human::print_compat(&modules, &args.framework, &args.platform, &report)
        }
        OutputFormat::Json => json::print_json("compat", &report)?,
    }

    Ok(if report.compatible {
        Outcome::Clean
    } else {
        Outcome::Failing
    })
}

fn analyze(
    args: &CompatArgs,
    config: &StackcheckConfig,
    modules: &ModuleSet,
) -> Result<CompatibilityReport> {
    let rules = args
        .sources
        .loader(&config.rules)
        .load_all()
        .context("Failed to load compatibility rules")?;

    let mut registry = RuleRegistry::new();
    registry
        .register_toml_rules(rules)
        .context("Invalid compatibility rule")?;

    let analyzer = CompatibilityAnalyzer::from_registry(registry);
    Ok(analyzer.analyze(modules, &args.framework, &args.platform))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn args(project: PathBuf, modules: &[&str]) -> CompatArgs {
        CompatArgs {
            modules: modules.iter().map(|m| m.to_string()).collect(),
            framework: "nextjs".to_string(),
            platform: "web".to_string(),
            sources: RuleSourceArgs {
                project,
                rule_dirs: Vec::new(),
                no_builtin_rules: false,
            },
        }
    }

    #[test]
    fn test_project_rules_are_applied() {
        let temp = TempDir::new().unwrap();
        let rules_dir = temp.path().join(".stackcheck/rules");
        fs::create_dir_all(&rules_dir).unwrap();
        fs::write(
            rules_dir.join("api.toml"),
            r#"
[[rules]]
name = "graphql-and-trpc"
[rules.match]
all_of = ["graphql", "trpc"]
[rules.conflict]
type = "feature"
severity = "critical"
description = "Two API layers"
resolution = "Pick one API layer"
"#,
        )
        .unwrap();

        let args = args(temp.path().to_path_buf(), &["graphql", "trpc"]);
        let modules: ModuleSet = args.modules.iter().map(String::as_str).collect();
        let report = analyze(&args, &StackcheckConfig::default(), &modules).unwrap();

        assert!(!report.compatible);
        assert_eq!(report.score, 70);
        assert_eq!(report.recommendations, vec!["Pick one API layer"]);
    }

    #[test]
    fn test_builtin_rules_can_be_disabled() {
        let temp = TempDir::new().unwrap();
        let mut args = args(temp.path().to_path_buf(), &["stripe", "paypal"]);
        let modules: ModuleSet = args.modules.iter().map(String::as_str).collect();

        let with_builtin = analyze(&args, &StackcheckConfig::default(), &modules).unwrap();
        assert_eq!(with_builtin.conflicts.len(), 1);

        args.sources.no_builtin_rules = true;
        let without = analyze(&args, &StackcheckConfig::default(), &modules).unwrap();
        assert!(without.conflicts.is_empty());
        assert_eq!(without.score, 100);
    }

    #[test]
    fn test_malformed_rule_is_an_error() {
        let temp = TempDir::new().unwrap();
        let extra = temp.path().join("extra");
        fs::create_dir_all(&extra).unwrap();
        fs::write(extra.join("bad.toml"), "[[rules]]\nname = 1\n").unwrap();

        let mut args = args(temp.path().to_path_buf(), &["stripe"]);
        args.sources.rule_dirs.push(extra);
        let modules: ModuleSet = args.modules.iter().map(String::as_str).collect();

        assert!(analyze(&args, &StackcheckConfig::default(), &modules).is_err());
    }
}
