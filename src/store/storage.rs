use super::StoreError;
use crate::paths::config_file_path;
use serde::Serialize;
use serde_json::Value;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// A single JSON configuration document bound to one on-disk file.
///
/// The document is loaded (or seeded from the default) once at construction
/// and written back in full after every mutating operation. There is no
/// cross-process locking; concurrent writers race and the last one wins.
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    default: Value,
    document: Value,
}

impl ConfigStore {
    /// Open the store backed by `base_dir`/`filename`.
    ///
    /// If the file exists it is parsed as JSON and adopted as the in-memory
    /// document. If it does not exist, the default document is persisted
    /// there and a copy of it adopted; a failed first write is logged and
    /// the store still opens with the in-memory default.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when an existing file cannot be read or does
    /// not contain valid JSON. There is no repair or fallback once a file is
    /// present but corrupt.
    pub fn open(base_dir: &Path, filename: &str, default: Value) -> Result<Self, StoreError> {
        let path = config_file_path(base_dir, filename);

        let document = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let document: Value = serde_json::from_str(&content)?;
            debug!("Loaded config from {}", path.display());
            document
        } else {
            write_document(&path, &default);
            default.clone()
        };

        Ok(Self {
            path,
            default,
            document,
        })
    }

    /// Absolute path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The current in-memory document.
    #[must_use]
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Value stored under `key` at the top level, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.document.get(key)
    }

    /// Insert or overwrite `key` at the top level and persist.
    ///
    /// Returns whether the write to disk succeeded. The in-memory document
    /// keeps the new value either way.
    pub fn set(&mut self, key: &str, value: Value) -> bool {
        let Some(map) = self.document.as_object_mut() else {
            warn!(
                "Cannot set key '{key}': document at {} is not a JSON object",
                self.path.display()
            );
            return false;
        };
        map.insert(key.to_string(), value);
        self.save()
    }

    /// Delete `key` from the top level and persist.
    ///
    /// Returns whether the persist succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::KeyNotFound`] when `key` is not present; no
    /// existence pre-check is performed on behalf of the caller.
    pub fn remove(&mut self, key: &str) -> Result<bool, StoreError> {
        let former = self
            .document
            .as_object_mut()
            .and_then(|map| map.remove(key))
            .ok_or_else(|| StoreError::KeyNotFound(key.to_string()))?;
        info!("Key '{key}' removed (was {former})");
        Ok(self.save())
    }

    /// Persist the current in-memory document.
    ///
    /// Returns `false` (after logging a diagnostic) if the write fails; the
    /// in-memory document is unchanged regardless of the outcome.
    pub fn save(&self) -> bool {
        write_document(&self.path, &self.document)
    }

    /// Persist the original default document instead of the current one.
    pub fn save_default(&self) -> bool {
        write_document(&self.path, &self.default)
    }
}

/// Serialize `value` as pretty-printed JSON and write it to `path`
/// atomically. Failures are logged and reported as `false`.
fn write_document(path: &Path, value: &Value) -> bool {
    match try_write_document(path, value) {
        Ok(()) => true,
        Err(e) => {
            warn!("Failed to save config to {}: {e}", path.display());
            false
        }
    }
}

fn try_write_document(path: &Path, value: &Value) -> Result<(), StoreError> {
    let content = to_pretty_json(value)?;

    let parent = path.parent().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "Path has no parent directory",
        )
    })?;

    // Temp file in the same directory as the target so the rename is atomic.
    // The temp file cleans itself up if any step before persist fails.
    let mut temp_file = NamedTempFile::new_in(parent)?;
    temp_file.write_all(&content)?;
    temp_file.flush()?;
    temp_file.persist(path).map_err(|e| e.error)?;

    Ok(())
}

/// Pretty-print with 4-space indentation; the on-disk format is meant to be
/// hand-editable.
fn to_pretty_json(value: &Value) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(buf)
}

#[cfg(test)]
#[path = "storage_tests.rs"]
mod tests;
