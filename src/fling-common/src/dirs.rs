//! Application directories for Fling.
//!
//! Linux/macOS default to `~/.fling`. Overridable with `FLING_HOME`; the
//! configuration file can also be named directly with `FLING_CONFIG`.

use std::path::{Path, PathBuf};

use crate::config::CONFIG_FILE_NAME;

/// Primary home directory name.
pub const HOME_DIR_NAME: &str = ".fling";

/// Environment variable overriding the Fling home directory.
pub const HOME_ENV: &str = "FLING_HOME";

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "FLING_CONFIG";

/// Get the Fling home directory, respecting `FLING_HOME`.
///
/// A relative `FLING_HOME` is resolved against the current directory.
pub fn get_fling_home() -> Option<PathBuf> {
    if let Ok(home) = std::env::var(HOME_ENV) {
        let home = PathBuf::from(home);
        if home.is_relative() {
            return std::env::current_dir().ok().map(|cwd| cwd.join(home));
        }
        return Some(home);
    }
    ::dirs::home_dir().map(|h| h.join(HOME_DIR_NAME))
}

/// Where the configuration file was found and whether it was asked for by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLocation {
    pub path: PathBuf,
    /// `true` when named by `--config` or `FLING_CONFIG`; such a file must exist.
    pub explicit: bool,
}

/// Resolve the configuration file location.
///
/// Priority: `cli_path` > `FLING_CONFIG` > `<fling home>/config.toml`.
pub fn resolve_config_path(cli_path: Option<&Path>) -> Option<ConfigLocation> {
    if let Some(path) = cli_path {
        return Some(ConfigLocation {
            path: path.to_path_buf(),
            explicit: true,
        });
    }
    if let Ok(path) = std::env::var(CONFIG_ENV)
        && !path.is_empty()
    {
        return Some(ConfigLocation {
            path: PathBuf::from(path),
            explicit: true,
        });
    }
    get_fling_home().map(|home| ConfigLocation {
        path: home.join(CONFIG_FILE_NAME),
        explicit: false,
    })
}

/// Expand a leading `~` or `~/` against the user's home directory.
///
/// `~user/...` forms are returned unchanged, as is any path when the home
/// directory cannot be determined.
pub fn expand_home_path(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    if !path_str.starts_with('~') {
        return path.to_path_buf();
    }

    let Some(home) = ::dirs::home_dir() else {
        tracing::warn!("Cannot expand {}: home directory unknown", path.display());
        return path.to_path_buf();
    };

    if path_str == "~" {
        home
    } else if let Some(rest) = path_str.strip_prefix("~/") {
        home.join(rest)
    } else {
        path.to_path_buf()
    }
}
