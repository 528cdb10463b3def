use std::path::PathBuf;

use thiserror::Error;

/// Failures while resolving a module's identity.
///
/// Every variant names the file or value that could not be resolved so a
/// caller can report it without re-reading the module directory.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("no module configuration found in {}", .dir.display())]
    NotFound { dir: PathBuf },

    #[error("{} is missing required field(s): {}", .path.display(), .fields.join(", "))]
    MissingFields {
        path: PathBuf,
        fields: Vec<&'static str>,
    },

    #[error(
        "could not determine {field} from module config (found: tag_prefix=\"{tag_prefix}\", commit_scope=\"{commit_scope}\")"
    )]
    Unresolved {
        field: &'static str,
        tag_prefix: String,
        commit_scope: String,
    },

    #[error("invalid module descriptor {}: {reason}", .path.display())]
    InvalidDescriptor { path: PathBuf, reason: String },

    #[error("invalid legacy config {}: {reason}", .path.display())]
    InvalidLegacy { path: PathBuf, reason: String },

    #[error("release rules in {}: {source}", .path.display())]
    Rules {
        path: PathBuf,
        #[source]
        source: RuleError,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Malformed release rule lists. These are never defaulted away.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("rule #{index} has no `release` field")]
    MissingRelease { index: usize },

    #[error("rule #{index} has invalid release value {value} (expected \"major\", \"minor\", \"patch\" or false)")]
    InvalidRelease { index: usize, value: String },

    #[error("rule #{index} negates an empty scope")]
    EmptyScope { index: usize },
}

/// Unified error type for scope-release operations
#[derive(Error, Debug)]
pub enum ScopeReleaseError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Release rule error: {0}")]
    Rule(#[from] RuleError),

    #[error("Commit input error: {0}")]
    Input(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results in scope-release
pub type Result<T> = std::result::Result<T, ScopeReleaseError>;

impl ScopeReleaseError {
    /// Create a commit input error with context
    pub fn input(msg: impl Into<String>) -> Self {
        ScopeReleaseError::Input(msg.into())
    }
}
