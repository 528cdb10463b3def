//! Pure formatting functions for UI output.
//!
//! `format_*` functions build strings and are testable; `display_*`
//! functions print them.

use std::path::PathBuf;

use console::style;

use crate::analyzer::ModuleReport;
use crate::decision::BumpDecision;
use crate::warnings::AnalysisWarning;

/// How many commits a report lists before summarizing the rest
const MAX_LISTED_COMMITS: usize = 10;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display an analysis warning on stderr.
pub fn display_warning(warning: &AnalysisWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Styled label for a decision: major red, minor yellow, patch green.
pub fn format_decision(decision: BumpDecision) -> String {
    let label = decision.as_str();
    match decision {
        BumpDecision::Major => style(label).red().bold().to_string(),
        BumpDecision::Minor => style(label).yellow().bold().to_string(),
        BumpDecision::Patch => style(label).green().bold().to_string(),
        BumpDecision::None => style(label).dim().to_string(),
    }
}

/// Multi-line summary of one module's analysis.
///
/// Lists up to 10 normalized commits with the level each implies; the
/// original header is shown when the commit was rewritten.
pub fn format_module_report(report: &ModuleReport) -> String {
    let mut out = format!(
        "{} ({}, tag prefix {}): {}\n",
        style(&report.module.title).bold(),
        report.module.commit_scope,
        report.module.tag_prefix,
        format_decision(report.decision)
    );

    for classified in report.commits.iter().take(MAX_LISTED_COMMITS) {
        let commit = &classified.commit;
        out.push_str(&format!(
            "  [{}] {}",
            classified.decision.as_str(),
            commit.header
        ));
        if commit.original_header != commit.header {
            out.push_str(&format!(" (from: {})", commit.original_header));
        }
        out.push('\n');
    }

    if report.commits.len() > MAX_LISTED_COMMITS {
        out.push_str(&format!(
            "  ... and {} more commits\n",
            report.commits.len() - MAX_LISTED_COMMITS
        ));
    }
    out
}

/// Print a module report to stdout.
pub fn display_module_report(report: &ModuleReport) {
    print!("{}", format_module_report(report));
}

/// Display discovered module directories.
pub fn display_modules(modules: &[PathBuf]) {
    println!("{}", style("Modules:").bold());
    for module in modules {
        println!("  - {}", module.display());
    }
}
