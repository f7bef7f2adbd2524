//! Error types shared by every Fling crate.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Result alias used across Fling.
pub type Result<T> = std::result::Result<T, FlingError>;

/// Errors that can occur while dispatching a command.
#[derive(Debug, Error)]
pub enum FlingError {
    /// A blocking invocation exited with a non-zero status.
    #[error("command exited with status {code}")]
    NonZeroExit {
        /// Exit code, or -1 when the child was killed by a signal.
        code: i32,
        /// Merged stdout/stderr lines captured before exit.
        output: Vec<String>,
    },

    /// No category matches the file name.
    #[error("unknown file type: {filename}")]
    UnknownFileType { filename: String },

    /// Filesystem or process-launch failure.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A blocking invocation outlived its deadline and was killed.
    #[error("{program} did not finish within {}s", timeout.as_secs_f64())]
    Timeout { program: String, timeout: Duration },

    /// The configuration file could not be loaded.
    #[error("invalid configuration {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl FlingError {
    /// Build an [`FlingError::Io`] for `path`.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Exit code carried by a failed external process, if any.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::NonZeroExit { code, .. } => Some(*code),
            _ => None,
        }
    }
}
