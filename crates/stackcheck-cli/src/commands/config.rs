use super::Outcome;
use crate::formatters::{json, OutputFormat};
use anyhow::{Context, Result};
use clap::Subcommand;
use stackcheck_config::{ConfigManager, StackcheckConfig};
use std::path::{Path, PathBuf};
use tokio::runtime::Runtime;

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Initialize config file at ~/.stackcheck/config.toml
    Init,

    /// Show config file path
    Path,

    /// Print the effective config
    Show,
}

pub fn handle_config_command(
    cmd: ConfigCommand,
    config_path: Option<&Path>,
    format: OutputFormat,
) -> Result<Outcome> {
    let path = resolve_path(config_path)?;
    let runtime = Runtime::new().context("Failed to create tokio runtime")?;

    runtime.block_on(async {
        match cmd {
            ConfigCommand::Init => init_config(&path).await,
            ConfigCommand::Path => {
                println!("{}", path.display());
                Ok(())
            }
            ConfigCommand::Show => show_config(&path, format).await,
        }
    })?;

    Ok(Outcome::Clean)
}

/// Load the config for a command run
///
/// An explicit `--config` file must exist; the default location falls back
/// to built-in defaults when absent.
pub fn load_config(config_path: Option<&Path>) -> Result<StackcheckConfig> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => match ConfigManager::config_path() {
            Ok(path) => path,
            Err(_) => return Ok(StackcheckConfig::default()),
        },
    };

    let runtime = Runtime::new().context("Failed to create tokio runtime")?;
    let manager = runtime
        .block_on(async {
            if config_path.is_some() {
                ConfigManager::load_from(&path).await
            } else {
                ConfigManager::load_or_default(&path).await
            }
        })
        .with_context(|| format!("Failed to load config from {}", path.display()))?;

    Ok(manager.config().clone())
}

fn resolve_path(config_path: Option<&Path>) -> Result<PathBuf> {
    match config_path {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(ConfigManager::config_path()?),
    }
}

async fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        println!("Config already exists at: {}", path.display());
        println!("To reinitialize, please delete the existing config first.");
        return Ok(());
    }

    ConfigManager::init_at(path).await?;
    println!("✓ Initialized config at: {}", path.display());
    Ok(())
}

async fn show_config(path: &Path, format: OutputFormat) -> Result<()> {
    let manager = ConfigManager::load_or_default(path).await?;

    match format {
        OutputFormat::Human => {
            let toml_str = manager.to_toml().context("Failed to render config")?;
            println!("# {}", path.display());
            print!("{}", toml_str);
        }
        OutputFormat::Json => json::print_json("config", manager.config())?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_config_must_exist() {
        let temp = TempDir::new().unwrap();
        assert!(load_config(Some(&temp.path().join("missing.toml"))).is_err());
    }

    #[test]
    fn test_explicit_config_is_read() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "version = \"1.0\"\n[health]\ncheck_timeout_secs = 12\ndisabled_checks = [\"performance\"]\n",
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.health.check_timeout_secs, 12);
        assert!(config.health.is_disabled("performance"));
        assert!(config.rules.include_builtin);
    }

    #[test]
    fn test_init_writes_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");

        handle_config_command(ConfigCommand::Init, Some(&path), OutputFormat::Human).unwrap();
        assert_eq!(load_config(Some(&path)).unwrap(), StackcheckConfig::default());

        // Second init leaves the file alone
        handle_config_command(ConfigCommand::Init, Some(&path), OutputFormat::Human).unwrap();
    }
}
