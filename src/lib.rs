pub mod encoding;
pub mod global;
pub mod paths;
pub mod store;
pub mod user;

// Re-export commonly used types
pub use encoding::{decode_item, encode_item, DecodeItemError};
pub use global::{GlobalConfigStore, GLOBAL_CONFIG_FILENAME};
pub use paths::{config_file_path, default_base_dir, CONFSTORE_HOME_ENV};
pub use store::{ConfigStore, StoreError};
pub use user::{current_username, UserConfigStore, USER_CONFIG_FILENAME};
