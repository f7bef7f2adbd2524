//! `hist`: append commands to the history file.

use std::fs::OpenOptions;
use std::io::Write;

use fling_common::{FlingError, Result};
use fling_exec::ProcessRunner;

use crate::context::CommandHandlers;

impl<R: ProcessRunner, W: Write> CommandHandlers<'_, R, W> {
    /// `hist`: append each command, newline-terminated, to the history file.
    ///
    /// The whole batch goes out in a single append so short entries from
    /// concurrent invocations do not interleave.
    pub fn hist(&mut self, commands: &[String]) -> Result<()> {
        if commands.is_empty() {
            return Ok(());
        }
        let path = self.config.history_path();

        let mut entry = commands.join("\n");
        entry.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| FlingError::io(&path, e))?;
        file.write_all(entry.as_bytes())
            .map_err(|e| FlingError::io(&path, e))?;

        tracing::info!("Appended {} entries to {}", commands.len(), path.display());
        Ok(())
    }
}
