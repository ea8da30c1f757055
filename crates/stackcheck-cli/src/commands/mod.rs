pub mod compat;
pub mod config;
pub mod health;
pub mod rules;

pub use compat::{run_compat, CompatArgs};
pub use config::{handle_config_command, load_config, ConfigCommand};
pub use health::{run_health, HealthArgs};
pub use rules::{run_rules, RulesArgs};

use clap::Args;
use stackcheck_config::RuleSettings;
use stackcheck_rule_engine::RuleLoader;
use std::path::PathBuf;
use std::process::ExitCode;

/// Whether a command found something that should fail a CI run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Clean,
    Failing,
}

impl Outcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Outcome::Clean => ExitCode::SUCCESS,
            Outcome::Failing => ExitCode::from(1),
        }
    }
}

/// Where compatibility rules come from
#[derive(Args, Debug, Clone)]
pub struct RuleSourceArgs {
    /// Project root whose .stackcheck/rules directory is loaded
    #[arg(long, value_name = "PATH", default_value = ".")]
    pub project: PathBuf,

    /// Additional rule directory (can be specified multiple times)
    #[arg(long = "rules", value_name = "DIR")]
    pub rule_dirs: Vec<PathBuf>,

    /// Don't load the rules embedded in the binary
    #[arg(long)]
    pub no_builtin_rules: bool,
}

impl RuleSourceArgs {
    /// Loader combining config settings with command-line overrides
    ///
    /// Config directories load before command-line directories.
    pub fn loader(&self, settings: &RuleSettings) -> RuleLoader {
        let mut loader = RuleLoader::new(&self.project)
            .with_builtin(settings.include_builtin && !self.no_builtin_rules);
        for dir in settings.extra_rule_dirs.iter().chain(&self.rule_dirs) {
            loader = loader.with_extra_dir(dir.clone());
        }
        loader
    }
}
