//! Per-user configuration store.
//!
//! One document maps encoded user names to that user's attributes. Each user
//! gets a fresh copy of the attribute template the first time they are seen;
//! existing entries are never reset.

use crate::encoding::encode_item;
use crate::paths::default_base_dir;
use crate::store::{ConfigStore, StoreError};
use serde_json::{json, Map, Value};
use std::path::Path;
use tracing::debug;

/// Filename of the per-user config document.
pub const USER_CONFIG_FILENAME: &str = "user_config.json";

/// A fresh copy of the per-user attribute template.
#[must_use]
pub fn default_attributes() -> Value {
    json!({
        "Favorites": [],
        "Theme": "normal",
        "Email": "",
        "Notifications": false
    })
}

/// Current OS login name, from `USER` (or `USERNAME` on Windows).
///
/// # Errors
///
/// Returns [`StoreError::UsernameNotFound`] when neither variable is set.
pub fn current_username() -> Result<String, StoreError> {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .map_err(|_| StoreError::UsernameNotFound)
}

/// Per-user settings backed by `user_config.json`, keyed by the encoded
/// login name of the user the store was opened for.
#[derive(Debug)]
pub struct UserConfigStore {
    store: ConfigStore,
    user_key: String,
}

impl UserConfigStore {
    /// Open the user store rooted at `base_dir`, scoped to `username`.
    ///
    /// The store-level default is an empty document; if `username` has no
    /// entry yet, a fresh attribute template is inserted under its encoded
    /// key and persisted.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when an existing config file cannot be read or
    /// parsed.
    pub fn open(base_dir: &Path, username: &str) -> Result<Self, StoreError> {
        let mut store = ConfigStore::open(base_dir, USER_CONFIG_FILENAME, json!({}))?;

        let user_key = encode_item(username);
        if store.get(&user_key).is_none() {
            debug!("Seeding attribute template for user key '{user_key}'");
            store.set(&user_key, default_attributes());
        }

        Ok(Self { store, user_key })
    }

    /// Open the user store colocated with the running executable, scoped to
    /// the invoking OS user.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the base directory or login name cannot
    /// be resolved, or an existing config file cannot be read or parsed.
    pub fn open_default() -> Result<Self, StoreError> {
        Self::open(&default_base_dir()?, &current_username()?)
    }

    /// The encoded user name used as this store's top-level key.
    #[must_use]
    pub fn user_key(&self) -> &str {
        &self.user_key
    }

    /// Value stored under `key` for this user, if any.
    ///
    /// `Email` is kept encoded on disk and is returned re-encoded here, so
    /// callers receive a doubly encoded value; apply
    /// [`decode_item`](crate::encoding::decode_item) twice to recover the
    /// original address. An empty stored email is returned as-is.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        let user_data = self.store.get(&self.user_key);

        if key == "Email" {
            if let Some(email) = user_data
                .and_then(|data| data.get("Email"))
                .and_then(Value::as_str)
            {
                if !email.is_empty() {
                    return Some(Value::String(encode_item(email)));
                }
            }
        }

        user_data.and_then(|data| data.get(key)).cloned()
    }

    /// Insert or overwrite `key` in this user's attributes and persist.
    ///
    /// A non-empty string `Email` is stored encoded; every other value is
    /// stored verbatim. Returns whether the write to disk succeeded.
    pub fn set(&mut self, key: &str, value: Value) -> bool {
        let mut user_data: Map<String, Value> = self
            .store
            .get(&self.user_key)
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        let stored = match value {
            Value::String(s) if key == "Email" && !s.is_empty() => {
                Value::String(encode_item(&s))
            }
            other => other,
        };
        user_data.insert(key.to_string(), stored);

        self.store.set(&self.user_key, Value::Object(user_data))
    }

    /// Absolute path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.store.path()
    }

    /// The current in-memory document (all users).
    #[must_use]
    pub fn document(&self) -> &Value {
        self.store.document()
    }
}

#[cfg(test)]
#[path = "user_tests.rs"]
mod tests;
