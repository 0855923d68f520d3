//! Single-slot local cache for the last successfully loaded collection.
//!
//! The slot holds whatever was saved last: no versioning, expiry, or schema
//! migration. Reads are opportunistic; an unreadable slot is a miss.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::feature::FeatureCollection;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cache serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct FeatureCache {
    path: PathBuf,
}

impl FeatureCache {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the cached collection. Missing or corrupt files return `None`.
    #[must_use]
    pub fn load(&self) -> Option<FeatureCollection> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "cache read failed");
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(collection) => Some(collection),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "cache contents unreadable");
                None
            }
        }
    }

    /// Overwrites the slot with `collection`.
    ///
    /// The slot is replaced by renaming a sibling temp file, never written
    /// in place.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Serialize`] if the collection cannot be encoded
    /// and [`CacheError::Io`] if the directory, temp file, or rename fails.
    pub fn store(&self, collection: &FeatureCollection) -> Result<(), CacheError> {
        let body = serde_json::to_vec(collection)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, body).map_err(|e| io_error(&tmp, e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| io_error(&self.path, e))?;

        tracing::debug!(
            path = %self.path.display(),
            features = collection.len(),
            "cache slot written"
        );
        Ok(())
    }
}

fn io_error(path: &Path, source: std::io::Error) -> CacheError {
    CacheError::Io {
        path: path.to_path_buf(),
        source,
    }
}
