use std::fmt;

use crate::analyzer::ModuleReport;
use crate::module_config::ConfigSource;

/// Non-fatal observations about a module analysis.
/// These are reported to the user but never change the decision.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisWarning {
    /// No commit in the history names the module's scope
    NoRelevantCommits { module: String, scope: String },
    /// Relevant commits exist but none of them implies a release
    NoReleaseTriggered { module: String, relevant: usize },
    /// Relevant commits that no release rule matched
    UnmatchedCommits { module: String, count: usize },
    /// Identity was inferred from a legacy config
    LegacyConfig { module: String },
}

impl AnalysisWarning {
    /// Collect the warnings that apply to `report`
    pub fn for_report(report: &ModuleReport) -> Vec<AnalysisWarning> {
        let module = report.module.name.clone();
        let mut warnings = Vec::new();

        if report.source == ConfigSource::Legacy {
            warnings.push(AnalysisWarning::LegacyConfig {
                module: module.clone(),
            });
        }

        if report.commits.is_empty() {
            warnings.push(AnalysisWarning::NoRelevantCommits {
                module,
                scope: report.module.commit_scope.clone(),
            });
            return warnings;
        }

        let unmatched = report
            .commits
            .iter()
            .filter(|c| c.matched_rule.is_none())
            .count();
        if unmatched > 0 {
            warnings.push(AnalysisWarning::UnmatchedCommits {
                module: module.clone(),
                count: unmatched,
            });
        }

        if !report.decision.is_release() {
            warnings.push(AnalysisWarning::NoReleaseTriggered {
                module,
                relevant: report.commits.len(),
            });
        }

        warnings
    }
}

impl fmt::Display for AnalysisWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisWarning::NoRelevantCommits { module, scope } => {
                write!(f, "No commits with scope '{}' for module '{}'", scope, module)
            }
            AnalysisWarning::NoReleaseTriggered { module, relevant } => {
                write!(
                    f,
                    "{} relevant commit(s) for module '{}' but none triggers a release",
                    relevant, module
                )
            }
            AnalysisWarning::UnmatchedCommits { module, count } => {
                write!(
                    f,
                    "{} commit(s) for module '{}' matched no release rule",
                    count, module
                )
            }
            AnalysisWarning::LegacyConfig { module } => {
                write!(
                    f,
                    "Module '{}' has no descriptor; identity inferred from legacy config",
                    module
                )
            }
        }
    }
}
