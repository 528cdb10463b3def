use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::conventional::DEFAULT_NOTE_KEYWORDS;

/// File names and defaults used when resolving modules.
///
/// Loaded from `scope-release.toml`; every key is optional.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Settings {
    /// Declarative descriptor looked up in each module directory
    #[serde(default = "default_descriptor_file")]
    pub descriptor_file: String,

    /// Legacy semantic-release config looked up when no descriptor exists
    #[serde(default = "default_legacy_file")]
    pub legacy_file: String,

    /// Token removed from a legacy `tagFormat` to obtain the tag prefix
    #[serde(default = "default_version_placeholder")]
    pub version_placeholder: String,

    /// Breaking-change keywords for modules that declare none
    #[serde(default = "default_note_keywords")]
    pub note_keywords: Vec<String>,
}

fn default_descriptor_file() -> String {
    "module.toml".to_string()
}

fn default_legacy_file() -> String {
    ".releaserc.json".to_string()
}

fn default_version_placeholder() -> String {
    "${version}".to_string()
}

fn default_note_keywords() -> Vec<String> {
    DEFAULT_NOTE_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            descriptor_file: default_descriptor_file(),
            legacy_file: default_legacy_file(),
            version_placeholder: default_version_placeholder(),
            note_keywords: default_note_keywords(),
        }
    }
}

/// Loads settings from file or returns defaults.
///
/// Attempts to load settings in the following order:
/// 1. Custom path provided as parameter
/// 2. `scope-release.toml` in current directory
/// 3. `.scope-release.toml` in the user config directory
/// 4. Default settings if no file found
///
/// # Returns
/// * `Ok(Settings)` - Loaded or default settings
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_settings(settings_path: Option<&Path>) -> anyhow::Result<Settings> {
    let settings_str = if let Some(path) = settings_path {
        fs::read_to_string(path)?
    } else if Path::new("./scope-release.toml").exists() {
        fs::read_to_string("./scope-release.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let settings_path = config_dir.join(".scope-release.toml");
        if settings_path.exists() {
            fs::read_to_string(settings_path)?
        } else {
            return Ok(Settings::default());
        }
    } else {
        return Ok(Settings::default());
    };

    let settings: Settings = toml::from_str(&settings_str)?;
    Ok(settings)
}
