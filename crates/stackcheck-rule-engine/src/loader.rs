//! Multi-source rule loading
//!
//! Loads TOML rules from multiple sources. The order rules come back in is
//! the order they get registered, and therefore the order conflicts appear.

use crate::built_in::{load_built_in_rules, sort_rules};
use crate::constants::{MAX_DIRECTORY_DEPTH, MAX_TOML_FILE_SIZE};
use crate::{Result, RuleError, TomlRule, TomlRuleFile};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Loads rules from multiple sources
#[derive(Debug, Clone)]
pub struct RuleLoader {
    /// Include rules embedded in the binary
    include_builtin: bool,

    /// User rules (~/.config/stackcheck/rules/)
    user_path: Option<PathBuf>,

    /// Project rules (.stackcheck/rules/)
    project_path: Option<PathBuf>,

    /// Directories given on the command line or in config
    extra_dirs: Vec<PathBuf>,
}

impl RuleLoader {
    /// Create a new rule loader with default paths
    pub fn new(project_root: &Path) -> Self {
        Self {
            include_builtin: true,
            user_path: Self::find_user_rules(),
            project_path: Some(project_root.join(".stackcheck/rules")),
            extra_dirs: Vec::new(),
        }
    }

    /// A loader that reads nothing until configured
    pub fn empty() -> Self {
        Self {
            include_builtin: false,
            user_path: None,
            project_path: None,
            extra_dirs: Vec::new(),
        }
    }

    pub fn with_builtin(mut self, include: bool) -> Self {
        self.include_builtin = include;
        self
    }

    pub fn with_user_path(mut self, path: Option<PathBuf>) -> Self {
        self.user_path = path;
        self
    }

    pub fn with_extra_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.extra_dirs.push(dir.into());
        self
    }

    /// Load all rules from all sources
    ///
    /// Source order:
    /// 1. Built-in rules
    /// 2. User rules
    /// 3. Project rules
    /// 4. Extra directories, in the order they were added
    ///
    /// Within each source rules are sorted by priority (higher first), then
    /// name. Missing directories are skipped; unreadable or malformed files
    /// are errors.
    pub fn load_all(&self) -> Result<Vec<TomlRule>> {
        let mut all_rules = Vec::new();

        if self.include_builtin {
            all_rules.extend(load_built_in_rules()?);
        }

        let dirs = self
            .user_path
            .iter()
            .chain(self.project_path.iter())
            .chain(self.extra_dirs.iter());

        for dir in dirs {
            if !dir.is_dir() {
                debug!(path = %dir.display(), "rule directory not present, skipping");
                continue;
            }
            let mut rules = self.load_from_directory(dir)?;
            sort_rules(&mut rules);
            all_rules.extend(rules);
        }

        Ok(all_rules)
    }

    /// Load rules from a specific directory
    fn load_from_directory(&self, dir: &Path) -> Result<Vec<TomlRule>> {
        let mut rules = Vec::new();

        let walker = WalkDir::new(dir)
            .follow_links(false) // Security: don't follow symlinks
            .max_depth(MAX_DIRECTORY_DEPTH)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry.map_err(|e| RuleError::LoadError {
                path: dir.display().to_string(),
                source: Box::new(e),
            })?;

            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|e| e.to_str()) != Some("toml")
            {
                continue;
            }

            // Security: Check file size before reading
            let metadata = entry.metadata().map_err(|e| RuleError::LoadError {
                path: path.display().to_string(),
                source: Box::new(e),
            })?;

            if metadata.len() > MAX_TOML_FILE_SIZE {
                return Err(RuleError::LoadError {
                    path: path.display().to_string(),
                    source: Box::new(std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        format!(
                            "File exceeds maximum size of {}MB",
                            MAX_TOML_FILE_SIZE / 1_048_576
                        ),
                    )),
                });
            }

            let file_rules = self.load_from_file(path)?;
            debug!(path = %path.display(), rules = file_rules.len(), "loaded rule file");
            rules.extend(file_rules);
        }

        Ok(rules)
    }

    /// Load rules from a single TOML file
    fn load_from_file(&self, path: &Path) -> Result<Vec<TomlRule>> {
        let contents = std::fs::read_to_string(path).map_err(|e| RuleError::LoadError {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;

        let file: TomlRuleFile = toml::from_str(&contents).map_err(|e| RuleError::LoadError {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;

        Ok(file.rules)
    }

    /// Find user rules directory
    fn find_user_rules() -> Option<PathBuf> {
        if let Ok(env_path) = std::env::var("STACKCHECK_RULES_DIR") {
            return Some(PathBuf::from(env_path));
        }
        dirs::config_dir().map(|config| config.join("stackcheck/rules"))
    }
}
