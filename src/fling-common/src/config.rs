//! Fling configuration.
//!
//! Every program Fling launches, the editor server names and the history
//! file location live here instead of being baked into the handlers.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::dirs::{ConfigLocation, expand_home_path};
use crate::error::{FlingError, Result};

/// Configuration file name inside the Fling home directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Programs and defaults used by the command handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlingConfig {
    /// Editor launched by `edit` and `fmgr`.
    pub editor: String,
    /// Editor launched by `diff`.
    pub diff_editor: String,
    /// Server name used by `edit` when none is given.
    pub editor_server: String,
    /// Server name used by `diff`.
    pub diff_server: String,
    /// Server name used by `fmgr`.
    pub file_manager_server: String,
    /// Terminal emulator launched by `term`.
    pub terminal: String,
    /// IDE launched by `ide`.
    pub ide: String,
    /// Flag telling the IDE to open a file.
    pub ide_open_flag: String,
    /// Generic opener used by `openf` and `lopenf`.
    pub opener: String,
    /// Player for audio files and directories.
    pub audio_player: String,
    /// Player for video files.
    pub video_player: String,
    /// File `hist` appends to. A leading `~` is expanded.
    pub history_file: PathBuf,
    /// Deadline for blocking invocations; unset waits forever.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocking_timeout_secs: Option<u64>,
}

impl Default for FlingConfig {
    fn default() -> Self {
        Self {
            editor: "gvim".to_string(),
            diff_editor: "gvimdiff".to_string(),
            editor_server: "EDITOR".to_string(),
            diff_server: "DIFF".to_string(),
            file_manager_server: "FILEMANAGER".to_string(),
            terminal: "xfce4-terminal".to_string(),
            ide: "eclipse".to_string(),
            ide_open_flag: "-e".to_string(),
            opener: "exo-open".to_string(),
            audio_player: "audacious".to_string(),
            video_player: "mpv".to_string(),
            history_file: PathBuf::from("~/.bash_history"),
            blocking_timeout_secs: None,
        }
    }
}

impl FlingConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str, path: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|e| FlingError::Config {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })
    }

    /// Load the configuration at `location`.
    ///
    /// A missing file is only an error when it was named explicitly;
    /// otherwise defaults are used.
    pub fn load(location: Option<&ConfigLocation>) -> Result<Self> {
        let Some(location) = location else {
            tracing::debug!("No config location, using defaults");
            return Ok(Self::default());
        };

        match std::fs::read_to_string(&location.path) {
            Ok(text) => {
                tracing::debug!("Loading config from {}", location.path.display());
                Self::from_toml_str(&text, &location.path)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !location.explicit => {
                tracing::debug!(
                    "No config at {}, using defaults",
                    location.path.display()
                );
                Ok(Self::default())
            }
            Err(e) => Err(FlingError::io(&location.path, e)),
        }
    }

    /// Render the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| FlingError::Config {
            path: PathBuf::new(),
            message: e.to_string(),
        })
    }

    /// History file with `~` expanded.
    pub fn history_path(&self) -> PathBuf {
        expand_home_path(&self.history_file)
    }

    /// Deadline for blocking invocations.
    pub fn blocking_timeout(&self) -> Option<Duration> {
        self.blocking_timeout_secs.map(Duration::from_secs)
    }
}
