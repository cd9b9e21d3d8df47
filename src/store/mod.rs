mod storage;

pub use storage::ConfigStore;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to determine executable directory")]
    BaseDirNotFound,

    #[error("Failed to determine current user name")]
    UsernameNotFound,

    #[error("Key not found: {0}")]
    KeyNotFound(String),
}
