//! Output formatters for compatibility reports, health reports and rule lists.

pub mod human;
pub mod json;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}
