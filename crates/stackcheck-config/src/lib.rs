pub mod manager;
pub mod types;

pub use manager::{ConfigError, ConfigManager};
pub use types::{HealthSettings, RuleSettings, StackcheckConfig, CONFIG_VERSION};
