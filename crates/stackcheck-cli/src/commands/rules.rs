use super::{Outcome, RuleSourceArgs};
use crate::formatters::{human, json, OutputFormat};
use anyhow::{Context, Result};
use clap::Args;
use stackcheck_config::StackcheckConfig;
use stackcheck_rule_engine::{CompiledMatcher, TomlRule};

#[derive(Args, Debug)]
pub struct RulesArgs {
    /// Only list rules that can fire for this framework
    #[arg(short, long)]
    pub framework: Option<String>,

    /// Only list rules that can fire on this platform
    #[arg(short, long)]
    pub platform: Option<String>,

    #[command(flatten)]
    pub sources: RuleSourceArgs,
}

pub fn run_rules(
    args: &RulesArgs,
    config: &StackcheckConfig,
    format: OutputFormat,
) -> Result<Outcome> {
    let rules = select_rules(args, config)?;

    match format {
        OutputFormat::Human => human::print_rules(&rules),
        OutputFormat::Json => json::print_json("rules", &rules)?,
    }

    Ok(Outcome::Clean)
}

/// Loaded rules, in registration order, narrowed to the requested target
fn select_rules(args: &RulesArgs, config: &StackcheckConfig) -> Result<Vec<TomlRule>> {
    let rules = args
        .sources
        .loader(&config.rules)
        .load_all()
        .context("Failed to load compatibility rules")?;

    if args.framework.is_none() && args.platform.is_none() {
        return Ok(rules);
    }

    let framework = args.framework.as_deref();
    let platform = args.platform.as_deref();
    let mut selected = Vec::new();

    for rule in rules {
        let matcher = CompiledMatcher::from_toml(&rule.name, &rule.matcher)
            .with_context(|| format!("Invalid compatibility rule '{}'", rule.name))?;
        if matcher.applies_to(framework, platform) {
            selected.push(rule);
        }
    }

    Ok(selected)
}
