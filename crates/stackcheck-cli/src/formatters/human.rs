//! Human-readable formatter

use colored::{ColoredString, Colorize};
use stackcheck_core::{
    CheckResult, CheckStatus, CompatibilityReport, HealthReport, ModuleSet, OverallStatus,
    Severity,
};
use stackcheck_rule_engine::TomlRule;
use std::fmt;

pub fn print_compat(
    modules: &ModuleSet,
    framework: &str,
    platform: &str,
    report: &CompatibilityReport,
) {
    print!(
        "{}",
        CompatView {
            modules,
            framework,
            platform,
            report,
        }
    );
}

pub fn print_health(report: &HealthReport) {
    print!("{}", HealthView(report));
}

pub fn print_rules(rules: &[TomlRule]) {
    print!("{}", RulesView(rules));
}

struct CompatView<'a> {
    modules: &'a ModuleSet,
    framework: &'a str,
    platform: &'a str,
    report: &'a CompatibilityReport,
}

impl fmt::Display for CompatView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;

        writeln!(f, "\nModule Compatibility")?;
        writeln!(f, "====================\n")?;
        writeln!(f, "  Modules:   {}", self.modules)?;
        writeln!(f, "  Target:    {} on {}", self.framework, self.platform)?;

        let verdict = if report.compatible {
            "compatible".green().bold()
        } else {
            "incompatible".red().bold()
        };
        writeln!(f, "  Score:     {}/100 ({})", report.score, verdict)?;

        if !report.conflicts.is_empty() {
            writeln!(f, "\nConflicts ({}):", report.conflicts.len())?;
            for conflict in &report.conflicts {
                writeln!(
                    f,
                    "  {} [{}] {}",
                    severity_label(conflict.severity),
                    conflict.conflict_type,
                    conflict.description
                )?;
                writeln!(f, "      affects: {}", conflict.affected)?;
            }
        }

        write_recommendations(f, &report.recommendations)
    }
}

struct HealthView<'a>(&'a HealthReport);

impl fmt::Display for HealthView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;

        writeln!(f, "\nProject Health")?;
        writeln!(f, "==============\n")?;
        writeln!(
            f,
            "  Overall:   {} ({:.1}/100)",
            overall_label(report.overall),
            report.score
        )?;

        let width = report
            .checks
            .iter()
            .map(|c| c.name.len())
            .max()
            .unwrap_or(0);

        if !report.checks.is_empty() {
            writeln!(f, "\nChecks:")?;
        }
        for check in &report.checks {
            write_check(f, check, width)?;
        }

        let summary = &report.summary;
        writeln!(
            f,
            "\nSummary: {} checks, {} passed, {} warnings, {} failed",
            summary.total_checks, summary.passed_checks, summary.warning_checks, summary.failed_checks
        )?;

        write_recommendations(f, &report.recommendations)
    }
}

struct RulesView<'a>(&'a [TomlRule]);

impl fmt::Display for RulesView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\nCompatibility Rules ({})", self.0.len())?;
        writeln!(f, "========================\n")?;

        for rule in self.0 {
            writeln!(
                f,
                "  {:>3}  {} {}",
                rule.priority.unwrap_or(0),
                severity_label(rule.conflict.severity),
                rule.name.bold()
            )?;
            let description = rule
                .description
                .as_deref()
                .unwrap_or(&rule.conflict.description);
            writeln!(f, "            {}", description.dimmed())?;
        }

        Ok(())
    }
}

fn write_check(f: &mut fmt::Formatter<'_>, check: &CheckResult, width: usize) -> fmt::Result {
    writeln!(
        f,
        "  {} {:<width$}  {:>3}  {}",
        status_symbol(check.status),
        check.name,
        check.score,
        check.details,
        width = width
    )
}

fn write_recommendations(f: &mut fmt::Formatter<'_>, recommendations: &[String]) -> fmt::Result {
    if recommendations.is_empty() {
        return Ok(());
    }
    writeln!(f, "\nRecommendations:")?;
    for recommendation in recommendations {
        writeln!(f, "  • {}", recommendation)?;
    }
    Ok(())
}

fn severity_label(severity: Severity) -> ColoredString {
    let label = format!("{:<8}", severity.as_str().to_uppercase());
    match severity {
        Severity::Critical => label.red().bold(),
        Severity::High => label.red(),
        Severity::Medium => label.yellow(),
        Severity::Low => label.blue(),
    }
}

fn status_symbol(status: CheckStatus) -> ColoredString {
    match status {
        CheckStatus::Pass => "✓".green(),
        CheckStatus::Warning => "!".yellow(),
        CheckStatus::Fail => "✗".red(),
    }
}

fn overall_label(overall: OverallStatus) -> ColoredString {
    let label = overall.as_str().to_uppercase();
    match overall {
        OverallStatus::Healthy => label.green().bold(),
        OverallStatus::Warning => label.yellow().bold(),
        OverallStatus::Critical => label.red().bold(),
    }
}
