//! Module identity resolution.
//!
//! A module is identified by its name, title, commit scope and tag prefix.
//! Two sources are supported, in order of precedence:
//!
//! 1. A declarative descriptor (`module.toml`). When present it is
//!    authoritative: a descriptor missing a required field is fatal and the
//!    legacy source is never consulted.
//! 2. A legacy semantic-release config (`.releaserc.json`) from which the
//!    identity is inferred, see [`legacy`].

pub mod cache;
pub mod legacy;

pub use cache::LegacySourceCache;
pub use legacy::LegacySource;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ConfigError;
use crate::rules::{RuleRecord, RuleSet};
use crate::settings::Settings;

/// Identity of an independently-versioned module
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleConfig {
    pub name: String,
    pub title: String,
    pub commit_scope: String,
    pub tag_prefix: String,
}

/// Which file a module's identity came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Descriptor,
    Legacy,
}

/// Everything the release pipeline needs about one module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModule {
    pub dir: PathBuf,
    pub config: ModuleConfig,
    pub source: ConfigSource,
    pub rules: RuleSet,
}

#[derive(Deserialize)]
struct Descriptor {
    name: Option<String>,
    title: Option<String>,
    commit_scope: Option<String>,
    tag_prefix: Option<String>,
    #[serde(default)]
    note_keywords: Vec<String>,
    release_rules: Option<Vec<RuleRecord>>,
}

/// Resolves module directories into [`ResolvedModule`]s.
///
/// Safe to share across threads; the only interior state is the legacy
/// source cache.
#[derive(Debug, Default)]
pub struct ModuleConfigResolver {
    settings: Settings,
    legacy_cache: LegacySourceCache,
}

impl ModuleConfigResolver {
    pub fn new(settings: Settings) -> Self {
        ModuleConfigResolver {
            settings,
            legacy_cache: LegacySourceCache::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Resolve only the identity of the module in `dir`.
    pub fn resolve_config(&self, dir: &Path) -> Result<ModuleConfig, ConfigError> {
        self.resolve(dir).map(|module| module.config)
    }

    /// Resolve identity and release rules of the module in `dir`.
    pub fn resolve(&self, dir: &Path) -> Result<ResolvedModule, ConfigError> {
        let descriptor_path = dir.join(&self.settings.descriptor_file);
        if descriptor_path.is_file() {
            debug!(path = %descriptor_path.display(), "Resolving module from descriptor");
            let (config, rules) = self.load_descriptor(&descriptor_path)?;
            return Ok(ResolvedModule {
                dir: dir.to_path_buf(),
                config,
                source: ConfigSource::Descriptor,
                rules,
            });
        }

        let legacy_path = dir.join(&self.settings.legacy_file);
        if legacy_path.is_file() {
            info!(
                path = %legacy_path.display(),
                "No {} found; inferring module identity from legacy config",
                self.settings.descriptor_file
            );
            let source = self.legacy_cache.reload(&legacy_path)?;
            let config =
                legacy::derive_config(&dir_name(dir), &source, &self.settings.version_placeholder)?;
            return Ok(ResolvedModule {
                dir: dir.to_path_buf(),
                config,
                source: ConfigSource::Legacy,
                rules: source.rules.clone(),
            });
        }

        Err(ConfigError::NotFound {
            dir: dir.to_path_buf(),
        })
    }

    fn load_descriptor(&self, path: &Path) -> Result<(ModuleConfig, RuleSet), ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let descriptor: Descriptor =
            toml::from_str(&content).map_err(|e| ConfigError::InvalidDescriptor {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let name = trimmed(descriptor.name);
        let title = trimmed(descriptor.title);
        let commit_scope = trimmed(descriptor.commit_scope);
        let tag_prefix = trimmed(descriptor.tag_prefix);

        let required = [
            ("name", &name),
            ("title", &title),
            ("commit_scope", &commit_scope),
            ("tag_prefix", &tag_prefix),
        ];
        let missing: Vec<&'static str> = required
            .iter()
            .filter(|(_, value)| value.is_none())
            .map(|(field, _)| *field)
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::MissingFields {
                path: path.to_path_buf(),
                fields: missing,
            });
        }

        let config = ModuleConfig {
            name: name.unwrap_or_default(),
            title: title.unwrap_or_default(),
            commit_scope: commit_scope.unwrap_or_default(),
            tag_prefix: tag_prefix.unwrap_or_default(),
        };

        let rules = match descriptor.release_rules {
            Some(records) => RuleSet::from_records(records).map_err(|source| ConfigError::Rules {
                path: path.to_path_buf(),
                source,
            })?,
            None => RuleSet::scoped_defaults(&config.commit_scope),
        };
        let keywords = if descriptor.note_keywords.is_empty() {
            self.settings.note_keywords.clone()
        } else {
            descriptor.note_keywords
        };

        Ok((config, rules.with_note_keywords(keywords)))
    }
}

/// Resolve a module's identity with default settings.
pub fn resolve_module_config(dir: &Path) -> Result<ModuleConfig, ConfigError> {
    ModuleConfigResolver::default().resolve_config(dir)
}

/// Immediate subdirectories of `root` that carry either config source, sorted.
pub fn discover_modules(root: &Path, settings: &Settings) -> std::io::Result<Vec<PathBuf>> {
    let mut modules = Vec::new();
    for entry in fs::read_dir(root)? {
        let path = entry?.path();
        if path.is_dir()
            && (path.join(&settings.descriptor_file).is_file()
                || path.join(&settings.legacy_file).is_file())
        {
            modules.push(path);
        }
    }
    modules.sort();
    Ok(modules)
}

/// Surrounding whitespace is dropped; a blank value counts as absent.
fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn dir_name(dir: &Path) -> String {
    dir.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
