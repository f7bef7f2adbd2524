//! Blocking invocations whose output is printed: `shell`, `ide`, `openf`
//! and `lopenf`.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use fling_common::{FlingError, Result};
use fling_exec::{ExecutionRequest, ProcessRunner};

use crate::context::CommandHandlers;

impl<R: ProcessRunner, W: Write> CommandHandlers<'_, R, W> {
    /// `shell`: run `program` with `args`, print its output.
    ///
    /// Arguments go to the program as-is; no shell is involved.
    pub fn shell(&mut self, program: &str, args: &[String]) -> Result<()> {
        self.run_and_print(ExecutionRequest::new(program).args(args))
    }

    /// `ide`: open `file` in the IDE.
    pub fn ide(&mut self, file: &str) -> Result<()> {
        let request = ExecutionRequest::new(&self.config.ide)
            .arg(&self.config.ide_open_flag)
            .arg(file);
        self.run_and_print(request)
    }

    /// `openf`: hand `target` (file or URL) to the generic opener.
    pub fn openf(&mut self, target: &str) -> Result<()> {
        self.run_and_print(ExecutionRequest::new(&self.config.opener).arg(target))
    }

    /// `lopenf`: `openf` each of the first `limit` lines of `link_file`.
    ///
    /// Stops early at end of file.
    pub fn lopenf(&mut self, link_file: &Path, limit: usize) -> Result<()> {
        let file = File::open(link_file).map_err(|e| FlingError::io(link_file, e))?;

        for line in BufReader::new(file).lines().take(limit) {
            let line = line.map_err(|e| FlingError::io(link_file, e))?;
            tracing::debug!("Opening link {line:?} from {}", link_file.display());
            self.openf(&line)?;
        }
        Ok(())
    }
}
