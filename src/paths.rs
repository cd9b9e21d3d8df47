//! Config file path resolution.
//!
//! Config files are colocated with the running program, not the caller's
//! working directory, so resolution is deterministic no matter where the
//! process was launched from.

use crate::store::StoreError;
use std::path::{Path, PathBuf};

/// Environment variable overriding the directory config files live in.
///
/// Lets tests and CI point the stores at an isolated directory instead of
/// the real install location.
pub const CONFSTORE_HOME_ENV: &str = "CONFSTORE_HOME";

/// Resolve the directory config files are stored in.
///
/// If `CONFSTORE_HOME` is set, that directory is used. Otherwise this is the
/// directory containing the running executable.
///
/// # Errors
///
/// Returns [`StoreError`] when the executable path cannot be determined or
/// has no parent directory.
pub fn default_base_dir() -> Result<PathBuf, StoreError> {
    if let Ok(home) = std::env::var(CONFSTORE_HOME_ENV) {
        return Ok(PathBuf::from(home));
    }
    let exe = std::env::current_exe()?;
    let dir = exe.parent().ok_or(StoreError::BaseDirNotFound)?;
    Ok(dir.to_path_buf())
}

/// Full path of the config file named `filename` under `base_dir`.
#[must_use]
pub fn config_file_path(base_dir: &Path, filename: &str) -> PathBuf {
    base_dir.join(filename)
}
