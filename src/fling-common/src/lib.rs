//! Common utilities shared across Fling crates.

pub mod config;
pub mod dirs;
pub mod error;
pub mod file_type;

pub use config::{CONFIG_FILE_NAME, FlingConfig};
pub use self::dirs::{expand_home_path, get_fling_home, resolve_config_path};
pub use error::{FlingError, Result};
pub use file_type::{ArchiveKind, FileCategory, classify};
