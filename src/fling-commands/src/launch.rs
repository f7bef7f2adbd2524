//! Fire-and-forget launches: `exec` and `term`.

use std::io::Write;

use fling_common::Result;
use fling_exec::{ExecutionRequest, ProcessRunner};

use crate::context::CommandHandlers;

impl<R: ProcessRunner, W: Write> CommandHandlers<'_, R, W> {
    /// `exec`: start `program` detached.
    pub fn exec(&mut self, program: &str, args: &[String]) -> Result<()> {
        self.runner
            .start_detached(&ExecutionRequest::new(program).args(args))
    }

    /// `term`: start the configured terminal emulator.
    pub fn term(&mut self) -> Result<()> {
        self.runner
            .start_detached(&ExecutionRequest::new(&self.config.terminal))
    }
}
