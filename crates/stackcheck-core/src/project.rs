//! Project handle and the collaborator facts health checks read from.
//!
//! The engine never runs build, test, or audit tools itself. Those tools run
//! upstream and drop their results into `.stackcheck/facts.json`; this module
//! only reads them.

use crate::error::{Error, Result};
use crate::types::Severity;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory (relative to the project root) holding stackcheck inputs.
pub const STACKCHECK_DIR: &str = ".stackcheck";

/// File name of the collaborator facts inside [`STACKCHECK_DIR`].
pub const FACTS_FILE: &str = "facts.json";

/// Read-only view of a project handed to health checks.
#[derive(Debug, Clone, Default)]
pub struct ProjectHandle {
    pub root: PathBuf,
    pub facts: ProjectFacts,
}

impl ProjectHandle {
    pub fn new(root: impl Into<PathBuf>, facts: ProjectFacts) -> Self {
        Self {
            root: root.into(),
            facts,
        }
    }

    /// Loads facts from `<root>/.stackcheck/facts.json`.
    ///
    /// A missing facts file yields empty facts; every check then reports
    /// that its input is unavailable.
    pub fn load(root: &Path) -> Result<Self> {
        let root = crate::validation::validate_project_root(root)?;
        let facts_path = root.join(STACKCHECK_DIR).join(FACTS_FILE);

        let facts = if facts_path.is_file() {
            ProjectFacts::from_file(&facts_path)?
        } else {
            ProjectFacts::default()
        };

        Ok(Self { root, facts })
    }

    /// Like [`ProjectHandle::load`] but reads facts from an explicit file.
    pub fn load_with_facts(root: &Path, facts_path: &Path) -> Result<Self> {
        let root = crate::validation::validate_project_root(root)?;
        let facts = ProjectFacts::from_file(facts_path)?;
        Ok(Self { root, facts })
    }
}

/// Facts produced by external collaborators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectFacts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<DependencyFacts>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build: Option<BuildFacts>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tests: Option<TestFacts>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security: Option<SecurityFacts>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance: Option<PerformanceFacts>,
}

impl ProjectFacts {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents).map_err(|source| Error::Json {
            file: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json_str(contents: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(contents)
    }
}

/// Dependency manifest data, one entry per direct dependency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DependencyFacts {
    #[serde(default)]
    pub packages: Vec<DependencyFact>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependencyFact {
    pub name: String,
    /// Installed version
    pub current: String,
    /// Latest published version, if the registry was consulted
    #[serde(default)]
    pub latest: Option<String>,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub vulnerable: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildFacts {
    pub succeeded: bool,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub warnings: u32,
    #[serde(default)]
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestFacts {
    #[serde(default)]
    pub passed: u32,
    #[serde(default)]
    pub failed: u32,
    #[serde(default)]
    pub skipped: u32,
    #[serde(default)]
    pub coverage_percent: Option<f64>,
}

impl TestFacts {
    /// Number of tests that actually ran
    pub fn executed(&self) -> u64 {
        u64::from(self.passed) + u64::from(self.failed)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityFacts {
    #[serde(default)]
    pub findings: Vec<SecurityFinding>,
}

/// A single finding reported by a security scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityFinding {
    pub id: String,
    pub severity: Severity,
    pub title: String,
    #[serde(default)]
    pub fix: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceFacts {
    #[serde(default)]
    pub bundle_size_kb: Option<f64>,
    #[serde(default)]
    pub load_time_ms: Option<f64>,
    #[serde(default)]
    pub memory_mb: Option<f64>,
}
