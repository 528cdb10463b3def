//! Conventional-commit header parsing.
//!
//! Only the header grammar is understood here: `type(scope, scope): subject`
//! or `type: subject`. The body is carried as opaque text and only inspected
//! for breaking-change notes.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

#[allow(clippy::unwrap_used)] // Compile-time constant regex pattern
static HEADER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z0-9_]+)(?:\(([^)]+)\))?:\s*(.+)").unwrap());

/// Note keywords that mark a commit body as breaking when none are configured.
pub const DEFAULT_NOTE_KEYWORDS: [&str; 2] = ["BREAKING CHANGE", "BREAKING CHANGES"];

/// A commit as read from history: header line plus opaque body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CommitInput")]
pub struct RawCommit {
    pub header: String,
    pub body: String,
}

/// Accepted input shapes: a full message string or an explicit header/body pair.
#[derive(Deserialize)]
#[serde(untagged)]
enum CommitInput {
    Message(String),
    Parts {
        header: String,
        #[serde(default)]
        body: String,
    },
}

impl From<CommitInput> for RawCommit {
    fn from(input: CommitInput) -> Self {
        match input {
            CommitInput::Message(message) => RawCommit::from_message(&message),
            CommitInput::Parts { header, body } => RawCommit::new(header, body),
        }
    }
}

impl RawCommit {
    pub fn new(header: impl Into<String>, body: impl Into<String>) -> Self {
        RawCommit {
            header: header.into(),
            body: body.into(),
        }
    }

    /// Split a full commit message into its first line and the remainder.
    pub fn from_message(message: &str) -> Self {
        match message.split_once('\n') {
            Some((header, body)) => RawCommit::new(
                header.trim_end_matches('\r'),
                body.trim_start_matches(['\r', '\n']),
            ),
            None => RawCommit::new(message, ""),
        }
    }
}

/// Structured view of a conventional-commit header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommit {
    pub r#type: String,
    pub scopes: Vec<String>,
    pub subject: String,
}

/// Parse a commit header.
///
/// Returns `None` when the header does not follow the grammar; callers skip
/// such commits. A scope group is split on `,`, each piece is trimmed and
/// empty pieces are dropped.
pub fn parse_header(header: &str) -> Option<ParsedCommit> {
    let captures = HEADER_PATTERN.captures(header)?;

    let r#type = captures.get(1)?.as_str().to_string();
    let subject = captures.get(3)?.as_str().to_string();
    let scopes = captures
        .get(2)
        .map(|m| {
            m.as_str()
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Some(ParsedCommit {
        r#type,
        scopes,
        subject,
    })
}

/// Whether `body` carries a breaking-change note.
///
/// A note is a line that starts with one of `keywords` immediately followed
/// by `:`. Leading whitespace on the line is ignored.
pub fn has_breaking_note<S: AsRef<str>>(body: &str, keywords: &[S]) -> bool {
    body.lines().any(|line| {
        let line = line.trim_start();
        keywords.iter().any(|keyword| {
            line.strip_prefix(keyword.as_ref())
                .is_some_and(|rest| rest.starts_with(':'))
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_scope() {
        let parsed = parse_header("feat(storage-account): add lifecycle policy").unwrap();
        assert_eq!(parsed.r#type, "feat");
        assert_eq!(parsed.scopes, vec!["storage-account"]);
        assert_eq!(parsed.subject, "add lifecycle policy");
    }

    #[test]
    fn test_parse_multiple_scopes_trimmed() {
        let parsed = parse_header("fix(mod-a, mod-b ,mod-c): shared bug").unwrap();
        assert_eq!(parsed.scopes, vec!["mod-a", "mod-b", "mod-c"]);
        assert_eq!(parsed.subject, "shared bug");
    }

    #[test]
    fn test_parse_drops_empty_scope_pieces() {
        let parsed = parse_header("fix(a,, ,b): x").unwrap();
        assert_eq!(parsed.scopes, vec!["a", "b"]);
    }

    #[test]
    fn test_parse_without_scope() {
        let parsed = parse_header("chore: bump deps").unwrap();
        assert_eq!(parsed.r#type, "chore");
        assert!(parsed.scopes.is_empty());
        assert_eq!(parsed.subject, "bump deps");
    }

    #[test]
    fn test_parse_rejects_non_conventional() {
        assert_eq!(parse_header("Update README"), None);
        assert_eq!(parse_header(""), None);
        assert_eq!(parse_header("feat(core) missing colon"), None);
        assert_eq!(parse_header("feat(core):"), None);
    }

    #[test]
    fn test_parse_rejects_bang_marker() {
        assert_eq!(parse_header("feat(core)!: drop api"), None);
        assert_eq!(parse_header("feat!: drop api"), None);
    }

    #[test]
    fn test_parse_without_space_after_colon() {
        let parsed = parse_header("docs(key-vault):tidy readme").unwrap();
        assert_eq!(parsed.subject, "tidy readme");
    }

    #[test]
    fn test_raw_commit_from_message() {
        let commit = RawCommit::from_message("feat(core): x\n\nBREAKING CHANGE: y");
        assert_eq!(commit.header, "feat(core): x");
        assert_eq!(commit.body, "BREAKING CHANGE: y");

        let single = RawCommit::from_message("fix: y");
        assert_eq!(single.header, "fix: y");
        assert_eq!(single.body, "");
    }

    #[test]
    fn test_raw_commit_deserializes_both_shapes() {
        let commits: Vec<RawCommit> = serde_json::from_str(
            r#"["fix(a): one\n\nbody text", {"header": "feat(b): two"}, {"header": "feat(c): three", "body": "more"}]"#,
        )
        .unwrap();
        assert_eq!(commits[0], RawCommit::new("fix(a): one", "body text"));
        assert_eq!(commits[1], RawCommit::new("feat(b): two", ""));
        assert_eq!(commits[2], RawCommit::new("feat(c): three", "more"));
    }

    #[test]
    fn test_breaking_note_detection() {
        let keywords = DEFAULT_NOTE_KEYWORDS;
        assert!(has_breaking_note("BREAKING CHANGE: drops legacy param", &keywords));
        assert!(has_breaking_note("intro\n\nBREAKING CHANGES: many", &keywords));
        assert!(has_breaking_note("  BREAKING CHANGE: indented", &keywords));
        assert!(!has_breaking_note("mentions BREAKING CHANGE: mid-line", &keywords));
        assert!(!has_breaking_note("BREAKING CHANGE without colon", &keywords));
        assert!(!has_breaking_note("", &keywords));
    }

    #[test]
    fn test_breaking_note_custom_keywords() {
        let keywords = vec!["BREAKING-CHANGE".to_string()];
        assert!(has_breaking_note("BREAKING-CHANGE: x", &keywords));
        assert!(!has_breaking_note("BREAKING CHANGE: x", &keywords));
    }
}
