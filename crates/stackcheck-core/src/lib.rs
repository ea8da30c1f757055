//! Stackcheck Core - shared report types and project facts.
//!
//! This crate provides the data model used by both advisory engines:
//!
//! - Compatibility: [`ModuleSet`], [`Conflict`], [`CompatibilityReport`]
//! - Health: [`ProjectHandle`], [`CheckResult`], [`HealthReport`]
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │  stackcheck-cli  │  (User interface)
//! └────────┬─────────┘
//!          │
//!    ┌─────┴──────────────────────┐
//!    ▼                            ▼
//! ┌────────────────────────┐  ┌───────────────────┐
//! │ stackcheck-rule-engine │  │ stackcheck-health │
//! └───────────┬────────────┘  └─────────┬─────────┘
//!             └───────────┬─────────────┘
//!                         ▼
//!               ┌──────────────────┐
//!               │ stackcheck-core  │  (This crate)
//!               └──────────────────┘
//! ```
//!
//! Reports are plain values. Nothing in this crate retains or persists them.

pub mod error;
pub mod project;
pub mod types;
pub mod validation;

pub use error::{Error, Result};
pub use project::{
    BuildFacts, DependencyFact, DependencyFacts, PerformanceFacts, ProjectFacts, ProjectHandle,
    SecurityFacts, SecurityFinding, TestFacts,
};
pub use types::{
    CheckResult, CheckStatus, CompatibilityReport, Conflict, ConflictType, HealthReport,
    HealthSummary, ModuleSet, OverallStatus, Severity,
};
pub use validation::{clamp_score, validate_check_result, validate_project_root, MAX_SCORE};
