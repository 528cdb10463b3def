//! Declarative release rules.
//!
//! A rule is a set of predicates (scope, type, breaking) plus the release it
//! implies. Rules are tried in declaration order and the first match decides,
//! including a match whose release is "no release".

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::conventional::{has_breaking_note, DEFAULT_NOTE_KEYWORDS};
use crate::decision::BumpDecision;
use crate::error::RuleError;
use crate::filter::NormalizedCommit;

/// Types that cut a patch release under the standard rule set.
const PATCH_TYPES: [&str; 5] = ["fix", "perf", "revert", "docs", "refactor"];

/// Scope predicate of a rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeMatcher {
    Is(String),
    /// Written `!scope`: matches any other scope
    IsNot(String),
}

impl ScopeMatcher {
    pub fn parse(raw: &str) -> Self {
        match raw.strip_prefix('!') {
            Some(negated) => ScopeMatcher::IsNot(negated.to_string()),
            None => ScopeMatcher::Is(raw.to_string()),
        }
    }

    pub fn matches(&self, scope: &str) -> bool {
        match self {
            ScopeMatcher::Is(expected) => scope == expected,
            ScopeMatcher::IsNot(excluded) => scope != excluded,
        }
    }

    /// The scope named by a positive matcher
    pub fn positive(&self) -> Option<&str> {
        match self {
            ScopeMatcher::Is(scope) => Some(scope),
            ScopeMatcher::IsNot(_) => None,
        }
    }
}

/// Outcome a rule assigns when it matches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    Major,
    Minor,
    Patch,
    NoRelease,
}

impl From<Release> for BumpDecision {
    fn from(release: Release) -> Self {
        match release {
            Release::Major => BumpDecision::Major,
            Release::Minor => BumpDecision::Minor,
            Release::Patch => BumpDecision::Patch,
            Release::NoRelease => BumpDecision::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRule {
    pub scope: Option<ScopeMatcher>,
    pub commit_type: Option<String>,
    /// `true` requires a breaking-change note; `false` is not checked
    pub breaking: bool,
    pub release: Release,
}

impl ReleaseRule {
    pub fn new(release: Release) -> Self {
        ReleaseRule {
            scope: None,
            commit_type: None,
            breaking: false,
            release,
        }
    }

    pub fn scope(mut self, scope: &str) -> Self {
        self.scope = Some(ScopeMatcher::parse(scope));
        self
    }

    pub fn commit_type(mut self, commit_type: &str) -> Self {
        self.commit_type = Some(commit_type.to_string());
        self
    }

    pub fn breaking(mut self) -> Self {
        self.breaking = true;
        self
    }

    fn matches(&self, commit: &NormalizedCommit, breaking: bool) -> bool {
        if let Some(matcher) = &self.scope {
            if !matcher.matches(&commit.scope) {
                return false;
            }
        }
        if let Some(commit_type) = &self.commit_type {
            if commit_type != &commit.r#type {
                return false;
            }
        }
        !self.breaking || breaking
    }
}

/// Rule record as written in descriptor or legacy files.
///
/// Both TOML and JSON sources deserialize into this shape before being
/// validated into a [`ReleaseRule`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub commit_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breaking: Option<bool>,
    #[serde(default)]
    pub release: Option<ReleaseValue>,
}

/// `release` as written: a level name or a boolean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReleaseValue {
    Level(String),
    Flag(bool),
}

impl RuleRecord {
    /// Validate a record at position `index` of its list.
    pub fn into_rule(self, index: usize) -> Result<ReleaseRule, RuleError> {
        let release = match self.release {
            None => return Err(RuleError::MissingRelease { index }),
            Some(ReleaseValue::Flag(false)) => Release::NoRelease,
            Some(ReleaseValue::Flag(true)) => {
                return Err(RuleError::InvalidRelease {
                    index,
                    value: "true".to_string(),
                })
            }
            Some(ReleaseValue::Level(level)) => match level.as_str() {
                "major" => Release::Major,
                "minor" => Release::Minor,
                "patch" => Release::Patch,
                _ => {
                    return Err(RuleError::InvalidRelease {
                        index,
                        value: format!("\"{}\"", level),
                    })
                }
            },
        };

        // An empty scope constrains nothing; a bare `!` negates nothing and is rejected.
        let scope = match self.scope.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) if raw.trim_start_matches('!').trim().is_empty() => {
                return Err(RuleError::EmptyScope { index })
            }
            Some(raw) => Some(ScopeMatcher::parse(raw)),
        };

        Ok(ReleaseRule {
            scope,
            commit_type: self.commit_type,
            breaking: self.breaking.unwrap_or(false),
            release,
        })
    }
}

/// Ordered rules plus the note keywords used for breaking detection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<ReleaseRule>,
    note_keywords: Vec<String>,
}

/// A classification together with the rule that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub decision: BumpDecision,
    pub matched_rule: Option<usize>,
}

impl RuleSet {
    pub fn new(rules: Vec<ReleaseRule>) -> Self {
        RuleSet {
            rules,
            note_keywords: DEFAULT_NOTE_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// Validate raw records in order, failing on the first malformed one.
    pub fn from_records(records: Vec<RuleRecord>) -> Result<Self, RuleError> {
        let rules = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| record.into_rule(index))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(RuleSet::new(rules))
    }

    /// Standard rules for a module that releases only on its own scope.
    pub fn scoped_defaults(scope: &str) -> Self {
        let mut rules = vec![
            ReleaseRule::new(Release::Major).scope(scope).breaking(),
            ReleaseRule::new(Release::Minor).scope(scope).commit_type("feat"),
        ];
        rules.extend(
            PATCH_TYPES
                .iter()
                .map(|t| ReleaseRule::new(Release::Patch).scope(scope).commit_type(t)),
        );
        rules.push(ReleaseRule::new(Release::NoRelease).scope(&format!("!{}", scope)));
        RuleSet::new(rules)
    }

    pub fn with_note_keywords(mut self, keywords: Vec<String>) -> Self {
        if !keywords.is_empty() {
            self.note_keywords = keywords;
        }
        self
    }

    pub fn rules(&self) -> &[ReleaseRule] {
        &self.rules
    }

    pub fn note_keywords(&self) -> &[String] {
        &self.note_keywords
    }

    /// Scope of the first rule with a positive (non-negated) scope.
    pub fn first_positive_scope(&self) -> Option<&str> {
        self.rules
            .iter()
            .find_map(|rule| rule.scope.as_ref().and_then(ScopeMatcher::positive))
    }

    /// Release level implied by one commit; first matching rule wins.
    pub fn classify(&self, commit: &NormalizedCommit) -> BumpDecision {
        self.classify_verbose(commit).decision
    }

    pub fn classify_verbose(&self, commit: &NormalizedCommit) -> Classification {
        let breaking = has_breaking_note(&commit.body, &self.note_keywords);

        for (index, rule) in self.rules.iter().enumerate() {
            if rule.matches(commit, breaking) {
                let decision = BumpDecision::from(rule.release);
                debug!(header = %commit.header, rule = index, %decision, "Matched release rule");
                return Classification {
                    decision,
                    matched_rule: Some(index),
                };
            }
        }

        debug!(header = %commit.header, "No release rule matched");
        Classification {
            decision: BumpDecision::None,
            matched_rule: None,
        }
    }
}
