use std::fs;
use std::io::{self, Read};
use std::path::Path;

use crate::conventional::RawCommit;
use crate::error::{Result, ScopeReleaseError};

/// Read a commit list from a file, or from stdin when `path` is `-`.
pub fn read_commits(path: &Path) -> Result<Vec<RawCommit>> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(path)?
    };
    parse_commits(&content)
}

/// Parse a JSON array of commit messages or `{header, body}` objects.
pub fn parse_commits(content: &str) -> Result<Vec<RawCommit>> {
    if content.trim().is_empty() {
        return Err(ScopeReleaseError::input("commit list is empty; expected a JSON array"));
    }
    Ok(serde_json::from_str(content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_shapes() {
        let commits = parse_commits(
            r#"["chore: bump deps", {"header": "feat(core): x", "body": "BREAKING CHANGE: y"}]"#,
        )
        .unwrap();
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[1].body, "BREAKING CHANGE: y");
    }

    #[test]
    fn test_empty_input_is_an_error() {
        assert!(matches!(parse_commits("  \n"), Err(ScopeReleaseError::Input(_))));
    }

    #[test]
    fn test_non_array_is_an_error() {
        assert!(matches!(
            parse_commits(r#"{"header": "fix: x"}"#),
            Err(ScopeReleaseError::Json(_))
        ));
    }
}
