//! stackcheck CLI - module compatibility and project health checks.

mod commands;
mod formatters;
mod logging;

use clap::Parser;
use colored::Colorize;
use formatters::OutputFormat;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "stackcheck")]
#[command(about = "Check feature modules for conflicts and score project health", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Output format
    #[arg(short, long = "output", value_enum, default_value = "human", global = true)]
    format: OutputFormat,

    /// Output JSON format (alias for --output json)
    #[arg(long, global = true)]
    json: bool,

    /// Configuration file path (defaults to ~/.stackcheck/config.toml)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Check a set of modules for conflicts
    Compat(commands::CompatArgs),

    /// Run health checks against a project
    Health(commands::HealthArgs),

    /// List compatibility rules in evaluation order
    Rules(commands::RulesArgs),

    /// Manage stackcheck configuration
    Config {
        #[command(subcommand)]
        command: commands::ConfigCommand,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let format = if cli.json {
        OutputFormat::Json
    } else {
        cli.format
    };

    let config_path = cli.config.as_deref();
    let result = match cli.command {
        Command::Compat(args) => commands::load_config(config_path)
            .and_then(|config| commands::run_compat(&args, &config, format)),
        Command::Health(args) => commands::load_config(config_path)
            .and_then(|config| commands::run_health(&args, &config, format)),
        Command::Rules(args) => commands::load_config(config_path)
            .and_then(|config| commands::run_rules(&args, &config, format)),
        Command::Config { command } => {
            commands::handle_config_command(command, config_path, format)
        }
    };

    match result {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            ExitCode::from(2)
        }
    }
}
