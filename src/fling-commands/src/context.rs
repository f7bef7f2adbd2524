//! Shared state handed to every handler.

use std::io::Write;
use std::time::Duration;

use fling_common::{FlingConfig, FlingError, Result};
use fling_exec::{ExecutionRequest, ProcessRunner};

/// Handlers for every subcommand.
///
/// Generic over the process runner and the sink that receives printed
/// command output.
pub struct CommandHandlers<'a, R: ProcessRunner, W: Write> {
    pub(crate) config: &'a FlingConfig,
    pub(crate) runner: &'a R,
    pub(crate) out: W,
    pub(crate) timeout: Option<Duration>,
}

impl<'a, R: ProcessRunner, W: Write> CommandHandlers<'a, R, W> {
    /// Create handlers using the configured blocking timeout.
    pub fn new(config: &'a FlingConfig, runner: &'a R, out: W) -> Self {
        Self {
            config,
            runner,
            out,
            timeout: config.blocking_timeout(),
        }
    }

    /// Builder: override the blocking timeout.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Consume the handlers, returning the output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Run `request` to completion and print its output, failing on a
    /// non-zero exit.
    pub(crate) fn run_and_print(&mut self, request: ExecutionRequest) -> Result<()> {
        let request = request.timeout(self.timeout);
        let lines = self.runner.run_blocking(&request)?.require_success()?;
        self.print_lines(&lines)
    }

    pub(crate) fn print_lines(&mut self, lines: &[String]) -> Result<()> {
        for line in lines {
            writeln!(self.out, "{line}").map_err(|e| FlingError::io("<stdout>", e))?;
        }
        self.out.flush().map_err(|e| FlingError::io("<stdout>", e))
    }
}
