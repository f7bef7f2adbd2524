//! Captured outcome of a blocking invocation.

use fling_common::{FlingError, Result};

/// Exit code and merged output of a finished child process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Exit code, or -1 when the child was terminated by a signal.
    pub exit_code: i32,
    /// Stdout and stderr lines, interleaved as produced, without line endings.
    pub output_lines: Vec<String>,
}

impl ExecutionResult {
    pub fn new(exit_code: i32, output_lines: Vec<String>) -> Self {
        Self {
            exit_code,
            output_lines,
        }
    }

    /// Whether the child exited with status 0.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Return the output lines, or [`FlingError::NonZeroExit`] when the
    /// child failed.
    pub fn require_success(self) -> Result<Vec<String>> {
        if self.success() {
            Ok(self.output_lines)
        } else {
            Err(FlingError::NonZeroExit {
                code: self.exit_code,
                output: self.output_lines,
            })
        }
    }
}
