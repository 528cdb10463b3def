//! Backward-compatible identity inference from semantic-release configs.
//!
//! Legacy modules carry no explicit identity. The tag prefix comes from the
//! `tagFormat` template and the commit scope from the order of the
//! commit-analyzer release rules: the first rule with a positive scope names
//! the module. Keep this path isolated from descriptor resolution.

use std::fs;
use std::path::Path;

use serde::de::IgnoredAny;
use serde::Deserialize;
use tracing::warn;

use super::ModuleConfig;
use crate::error::ConfigError;
use crate::rules::{RuleRecord, RuleSet};

const COMMIT_ANALYZER: &str = "@semantic-release/commit-analyzer";

/// The parts of a `.releaserc.json` that identify a module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacySource {
    pub tag_format: Option<String>,
    pub rules: RuleSet,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReleaseRc {
    tag_format: Option<String>,
    #[serde(default)]
    plugins: Vec<PluginEntry>,
}

/// A `plugins` entry: `[name, options]`, or anything else (a bare name).
#[derive(Deserialize)]
#[serde(untagged)]
enum PluginEntry {
    WithOptions(String, serde_json::Value),
    #[allow(dead_code)]
    Other(IgnoredAny),
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct AnalyzerOptions {
    #[serde(default)]
    release_rules: Vec<RuleRecord>,
    #[serde(default)]
    parser_opts: ParserOptions,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ParserOptions {
    #[serde(default)]
    note_keywords: Vec<String>,
}

impl LegacySource {
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let rc: ReleaseRc =
            serde_json::from_str(content).map_err(|e| ConfigError::InvalidLegacy {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let options = rc
            .plugins
            .into_iter()
            .find_map(|entry| match entry {
                PluginEntry::WithOptions(name, options) if name.contains(COMMIT_ANALYZER) => {
                    Some(options)
                }
                _ => None,
            })
            .map(serde_json::from_value::<AnalyzerOptions>)
            .transpose()
            .map_err(|e| ConfigError::InvalidLegacy {
                path: path.to_path_buf(),
                reason: format!("commit-analyzer options: {}", e),
            })?
            .unwrap_or_default();

        let rules = RuleSet::from_records(options.release_rules)
            .map_err(|source| ConfigError::Rules {
                path: path.to_path_buf(),
                source,
            })?
            .with_note_keywords(options.parser_opts.note_keywords);

        Ok(LegacySource {
            tag_format: rc.tag_format,
            rules,
        })
    }
}

/// Tag prefix: the tag template with the version placeholder removed.
pub fn derive_tag_prefix(tag_format: Option<&str>, placeholder: &str) -> String {
    tag_format
        .map(|format| format.replacen(placeholder, "", 1))
        .unwrap_or_default()
}

/// Commit scope: the first rule scope that is not a negation.
pub fn derive_commit_scope(rules: &RuleSet) -> String {
    rules.first_positive_scope().unwrap_or_default().to_string()
}

/// Human title from a module directory name (`azurerm_key_vault` -> `Azurerm Key Vault`).
pub fn humanize(name: &str) -> String {
    name.split(['_', '-'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Derive the four identity values for a legacy module.
pub fn derive_config(
    module_name: &str,
    source: &LegacySource,
    placeholder: &str,
) -> Result<ModuleConfig, ConfigError> {
    let tag_prefix = derive_tag_prefix(source.tag_format.as_deref(), placeholder);
    let commit_scope = derive_commit_scope(&source.rules);

    let field = match (tag_prefix.is_empty(), commit_scope.is_empty()) {
        (false, false) => None,
        (true, false) => Some("tag_prefix"),
        (false, true) => Some("commit_scope"),
        (true, true) => Some("tag_prefix and commit_scope"),
    };
    if let Some(field) = field {
        return Err(ConfigError::Unresolved {
            field,
            tag_prefix,
            commit_scope,
        });
    }

    let name = if module_name.is_empty() {
        warn!(scope = %commit_scope, "Legacy module has no directory name; using commit scope");
        commit_scope.clone()
    } else {
        module_name.to_string()
    };

    Ok(ModuleConfig {
        title: humanize(&name),
        name,
        commit_scope,
        tag_prefix,
    })
}
