use crate::types::StackcheckConfig;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during config management
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("Config file not found at {0}")]
    ConfigNotFound(PathBuf),

    #[error("Config file already exists at {0}")]
    ConfigExists(PathBuf),

    #[error("Invalid config: {0}")]
    Invalid(String),

    #[error("Home directory not found")]
    HomeNotFound,
}

/// Manager for stackcheck configuration
///
/// Manages global configuration stored in ~/.stackcheck/config.toml.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
    config: StackcheckConfig,
}

impl ConfigManager {
    /// Get the default config path (~/.stackcheck/config.toml)
    #[cfg(feature = "native-fs")]
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
        Ok(home.join(".stackcheck").join("config.toml"))
    }

    /// Load config from default location
    #[cfg(feature = "native-fs")]
    pub async fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path).await
    }

    /// Load config from specific path (useful for testing)
    pub async fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !tokio::fs::try_exists(path).await? {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let contents = tokio::fs::read_to_string(path).await?;
        let config: StackcheckConfig = toml::from_str(&contents)?;
        validate(&config)?;

        Ok(Self {
            config_path: path.to_path_buf(),
            config,
        })
    }

    /// Load config from `path`, falling back to defaults when the file is
    /// absent. Nothing is written.
    pub async fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load_from(path).await {
            Err(ConfigError::ConfigNotFound(_)) => Ok(Self {
                config_path: path.to_path_buf(),
                config: StackcheckConfig::default(),
            }),
            other => other,
        }
    }

    /// Initialize a new config file at the default location
    #[cfg(feature = "native-fs")]
    pub async fn init() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;
        Self::init_at(&config_path).await
    }

    /// Initialize config at specific path
    ///
    /// Refuses to overwrite an existing file.
    pub async fn init_at(path: &Path) -> Result<Self, ConfigError> {
        if tokio::fs::try_exists(path).await? {
            return Err(ConfigError::ConfigExists(path.to_path_buf()));
        }

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let manager = Self {
            config_path: path.to_path_buf(),
            config: StackcheckConfig::default(),
        };
        manager.save().await?;

        Ok(manager)
    }

    /// Save config to disk atomically
    ///
    /// Uses a temporary file and atomic rename to prevent corruption
    pub async fn save(&self) -> Result<(), ConfigError> {
        validate(&self.config)?;
        let toml_str = self.to_toml()?;

        let temp_path = self.config_path.with_extension("toml.tmp");
        tokio::fs::write(&temp_path, &toml_str).await?;
        set_config_permissions(&temp_path)?;
        tokio::fs::rename(&temp_path, &self.config_path).await?;

        Ok(())
    }

    /// Render the config as it would be saved
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(&self.config)?)
    }

    /// Path this config was loaded from or will be saved to
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Get reference to config
    pub fn config(&self) -> &StackcheckConfig {
        &self.config
    }

    /// Get mutable reference to config (caller must call save())
    pub fn config_mut(&mut self) -> &mut StackcheckConfig {
        &mut self.config
    }
}

fn validate(config: &StackcheckConfig) -> Result<(), ConfigError> {
    if config.health.check_timeout_secs == 0 {
        return Err(ConfigError::Invalid(
            "health.check_timeout_secs must be greater than 0".to_string(),
        ));
    }
    if config.health.disabled_checks.iter().any(|c| c.trim().is_empty()) {
        return Err(ConfigError::Invalid(
            "health.disabled_checks must not contain empty names".to_string(),
        ));
    }
    Ok(())
}

/// Restrict the config file to the current user
#[cfg(unix)]
fn set_config_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = std::fs::metadata(path)?.permissions();
    perms.set_mode(0o600);
    std::fs::set_permissions(path, perms)
}

#[cfg(not(unix))]
fn set_config_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}
