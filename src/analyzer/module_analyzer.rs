use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::conventional::RawCommit;
use crate::decision::{aggregate, BumpDecision};
use crate::error::ConfigError;
use crate::filter::{filter_commits, NormalizedCommit};
use crate::module_config::{ConfigSource, ModuleConfig, ModuleConfigResolver, ResolvedModule};

/// A normalized commit with the level it implies for its module
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedCommit {
    #[serde(flatten)]
    pub commit: NormalizedCommit,
    pub decision: BumpDecision,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_rule: Option<usize>,
}

/// Outcome of analyzing one module against a commit history
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleReport {
    pub dir: PathBuf,
    pub module: ModuleConfig,
    pub source: ConfigSource,
    pub decision: BumpDecision,
    pub commits: Vec<ClassifiedCommit>,
}

/// Runs the filter, classify and aggregate steps for a single module
pub struct ModuleAnalyzer {
    module: ResolvedModule,
}

impl ModuleAnalyzer {
    pub fn new(module: ResolvedModule) -> Self {
        ModuleAnalyzer { module }
    }

    pub fn module(&self) -> &ResolvedModule {
        &self.module
    }

    /// Analyze a shared, read-only commit history for this module
    pub fn analyze(&self, commits: &[RawCommit]) -> ModuleReport {
        let scope = &self.module.config.commit_scope;
        let rules = &self.module.rules;

        let classified: Vec<ClassifiedCommit> = filter_commits(commits, scope)
            .into_iter()
            .map(|commit| {
                let classification = rules.classify_verbose(&commit);
                ClassifiedCommit {
                    commit,
                    decision: classification.decision,
                    matched_rule: classification.matched_rule,
                }
            })
            .collect();

        let decision = aggregate(classified.iter().map(|c| c.decision));
        info!(
            module = %self.module.config.name,
            scope = %scope,
            %decision,
            "Analyzed {} relevant commits",
            classified.len()
        );

        ModuleReport {
            dir: self.module.dir.clone(),
            module: self.module.config.clone(),
            source: self.module.source,
            decision,
            commits: classified,
        }
    }
}

/// Per-module result of [`analyze_modules`]
#[derive(Debug)]
pub struct ModuleOutcome {
    pub dir: PathBuf,
    pub result: Result<ModuleReport, ConfigError>,
}

/// Resolve and analyze every module directory in parallel.
///
/// Outcomes are returned in the order of `dirs`. A module that fails to
/// resolve yields an error for that module only.
pub fn analyze_modules<P>(
    resolver: &ModuleConfigResolver,
    dirs: &[P],
    commits: &[RawCommit],
) -> Vec<ModuleOutcome>
where
    P: AsRef<Path> + Sync,
{
    dirs.par_iter()
        .map(|dir| {
            let dir = dir.as_ref();
            let result = resolver
                .resolve(dir)
                .map(|module| ModuleAnalyzer::new(module).analyze(commits));
            ModuleOutcome {
                dir: dir.to_path_buf(),
                result,
            }
        })
        .collect()
}
