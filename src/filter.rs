//! Per-module projection of a shared commit history.
//!
//! One commit may name several module scopes (`fix(mod-a,mod-b): ...`). Each
//! module sees its own normalized copy carrying only its scope, so the rule
//! engine never has to reason about multi-scope headers.

use serde::Serialize;
use tracing::{debug, info};

use crate::conventional::{parse_header, RawCommit};

/// A commit narrowed to a single target scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedCommit {
    pub r#type: String,
    pub scope: String,
    pub subject: String,
    /// Rebuilt header: `type(scope): subject`
    pub header: String,
    /// Header as it appeared in history
    pub original_header: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub body: String,
}

/// Keep only commits declaring `target_scope`, rewritten to that single scope.
///
/// Order is preserved. Commits that fail to parse, carry no scope, or do not
/// list the target scope are dropped. The input is only borrowed.
pub fn filter_commits(commits: &[RawCommit], target_scope: &str) -> Vec<NormalizedCommit> {
    let normalized: Vec<NormalizedCommit> = commits
        .iter()
        .filter_map(|commit| normalize(commit, target_scope))
        .collect();

    info!(
        scope = target_scope,
        "Filtered {} commits out of {} total commits",
        normalized.len(),
        commits.len()
    );
    normalized
}

/// Project a single commit onto `target_scope`.
pub fn normalize(commit: &RawCommit, target_scope: &str) -> Option<NormalizedCommit> {
    let Some(parsed) = parse_header(&commit.header) else {
        debug!(header = %commit.header, "Skipping non-conventional commit");
        return None;
    };

    if parsed.scopes.is_empty() {
        debug!(header = %commit.header, "Skipping commit without scope");
        return None;
    }

    if !parsed.scopes.iter().any(|scope| scope == target_scope) {
        debug!(
            header = %commit.header,
            scopes = ?parsed.scopes,
            "Skipping commit - scopes don't include '{}'",
            target_scope
        );
        return None;
    }

    let header = format!("{}({}): {}", parsed.r#type, target_scope, parsed.subject);
    debug!(from = %commit.header, to = %header, "Transformed commit");

    Some(NormalizedCommit {
        r#type: parsed.r#type,
        scope: target_scope.to_string(),
        subject: parsed.subject,
        header,
        original_header: commit.header.clone(),
        body: commit.body.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commits(headers: &[&str]) -> Vec<RawCommit> {
        headers.iter().map(|h| RawCommit::new(*h, "")).collect()
    }

    #[test]
    fn test_filter_keeps_matching_scope_only() {
        let history = commits(&[
            "feat(storage-account): add lifecycle policy",
            "fix(virtual-network): subnet bug",
            "chore: bump deps",
        ]);

        let result = filter_commits(&history, "storage-account");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].header, "feat(storage-account): add lifecycle policy");
        assert_eq!(result[0].r#type, "feat");
        assert_eq!(result[0].subject, "add lifecycle policy");
    }

    #[test]
    fn test_multi_scope_commit_rewritten_per_module() {
        let history = commits(&["fix(mod-a, mod-b): shared bug"]);

        let a = filter_commits(&history, "mod-a");
        let b = filter_commits(&history, "mod-b");

        assert_eq!(a[0].header, "fix(mod-a): shared bug");
        assert_eq!(b[0].header, "fix(mod-b): shared bug");
        assert_eq!(a[0].original_header, "fix(mod-a, mod-b): shared bug");
        assert_eq!(b[0].original_header, "fix(mod-a, mod-b): shared bug");
        assert_eq!(history[0].header, "fix(mod-a, mod-b): shared bug");
    }

    #[test]
    fn test_filter_drops_unparsable_and_unscoped() {
        let history = commits(&[
            "Merge branch 'main'",
            "feat!: breaking without scope",
            "docs: readme",
            "fix(core): real fix",
        ]);

        let result = filter_commits(&history, "core");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].header, "fix(core): real fix");
    }

    #[test]
    fn test_filter_scope_match_is_exact_and_case_sensitive() {
        let history = commits(&[
            "fix(Core): upper",
            "fix(core-utils): prefix",
            "fix(cor): partial",
        ]);
        assert!(filter_commits(&history, "core").is_empty());
    }

    #[test]
    fn test_filter_preserves_order() {
        let history = commits(&[
            "fix(a): first",
            "feat(b): skip",
            "feat(a,b): second",
            "perf(a): third",
        ]);

        let subjects: Vec<_> = filter_commits(&history, "a")
            .into_iter()
            .map(|c| c.subject)
            .collect();
        assert_eq!(subjects, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_filter_carries_body() {
        let history = vec![RawCommit::new("feat(core): x", "BREAKING CHANGE: y")];
        let result = filter_commits(&history, "core");
        assert_eq!(result[0].body, "BREAKING CHANGE: y");
    }

    #[test]
    fn test_filter_empty_history() {
        assert!(filter_commits(&[], "core").is_empty());
    }
}
