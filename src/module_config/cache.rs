use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::trace;

use super::legacy::LegacySource;
use crate::error::ConfigError;

/// Last parsed legacy config per file path.
///
/// This is a reload guard rather than a read-through cache: resolution goes
/// through [`reload`](Self::reload), which drops any previous parse of the
/// path before reading the file again. A long-lived resolver therefore never
/// answers from a file that changed on disk, and the last good parse stays
/// inspectable through [`get`](Self::get).
#[derive(Debug, Default)]
pub struct LegacySourceCache {
    entries: Mutex<HashMap<PathBuf, Arc<LegacySource>>>,
}

impl LegacySourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-read `path`, replacing any earlier parse.
    ///
    /// On failure the earlier parse is gone too, so a broken file is never
    /// masked by a stale one.
    pub fn reload(&self, path: &Path) -> Result<Arc<LegacySource>, ConfigError> {
        if self.invalidate(path) {
            trace!(path = %path.display(), "Dropped previous legacy config parse");
        }

        let source = Arc::new(LegacySource::read(path)?);
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.to_path_buf(), Arc::clone(&source));
        Ok(source)
    }

    /// Last successful parse of `path`, if any.
    pub fn get(&self, path: &Path) -> Option<Arc<LegacySource>> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .cloned()
    }

    /// Drop any cached parse of `path`. Returns whether an entry existed.
    pub fn invalidate(&self, path: &Path) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(path)
            .is_some()
    }
}
