//! Process-wide configuration store.

use crate::paths::default_base_dir;
use crate::store::{ConfigStore, StoreError};
use serde_json::{json, Value};
use std::path::Path;

/// Filename of the process-wide config document.
pub const GLOBAL_CONFIG_FILENAME: &str = "global_config.json";

/// A fresh copy of the default global document.
///
/// Built anew on every call so no two stores ever share a template value.
#[must_use]
pub fn default_document() -> Value {
    json!({
        "PRODUCTION_PATH": "/",
        "MACHINES": ["4.02", "4.03", "4.61", "4.62", "4.11", "5.25", "5.26", "5.27"],
        "SUBFOLDERS": ["Pressendaten", "SSG-PBS", "SSG-PBS-CSV", "TagesCSV"],
        "UPDATING": false,
        "LAST_UPDATE": ""
    })
}

/// Flat key-value configuration shared by every user of the installation,
/// backed by `global_config.json` next to the executable.
#[derive(Debug)]
pub struct GlobalConfigStore {
    store: ConfigStore,
}

impl GlobalConfigStore {
    /// Open the global store rooted at `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when an existing config file cannot be read or
    /// parsed.
    pub fn open(base_dir: &Path) -> Result<Self, StoreError> {
        let store = ConfigStore::open(base_dir, GLOBAL_CONFIG_FILENAME, default_document())?;
        Ok(Self { store })
    }

    /// Open the global store colocated with the running executable.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the base directory cannot be resolved or
    /// an existing config file cannot be read or parsed.
    pub fn open_default() -> Result<Self, StoreError> {
        Self::open(&default_base_dir()?)
    }

    /// Value stored under `key`, if any. No side effects.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        self.store.get(key).cloned()
    }

    /// Insert or overwrite `key` and persist the document.
    ///
    /// Returns whether the write to disk succeeded.
    pub fn set(&mut self, key: &str, value: Value) -> bool {
        self.store.set(key, value)
    }

    /// Delete `key` and persist, returning whether the persist succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::KeyNotFound`] when `key` is not present.
    pub fn remove(&mut self, key: &str) -> Result<bool, StoreError> {
        self.store.remove(key)
    }

    /// Stamp `LAST_UPDATE` with the current time and persist.
    pub fn touch_last_update(&mut self) -> bool {
        self.set("LAST_UPDATE", Value::String(now_iso()))
    }

    /// Absolute path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.store.path()
    }

    /// The current in-memory document.
    #[must_use]
    pub fn document(&self) -> &Value {
        self.store.document()
    }
}

/// Current timestamp in ISO 8601 format.
fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339()
}

#[cfg(test)]
#[path = "global_tests.rs"]
mod tests;
