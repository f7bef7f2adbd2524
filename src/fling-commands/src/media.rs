//! `play`: pick a player from the file type.

use std::io::Write;
use std::path::Path;

use fling_common::{FileCategory, FlingError, Result, classify};
use fling_exec::{ExecutionRequest, ProcessRunner};

use crate::context::CommandHandlers;

impl<R: ProcessRunner, W: Write> CommandHandlers<'_, R, W> {
    /// `play`: start the audio or video player on `file`.
    ///
    /// Directories go to the audio player. Anything else that is not audio
    /// or video fails with [`FlingError::UnknownFileType`].
    pub fn play(&mut self, file: &str) -> Result<()> {
        let player = match classify(Path::new(file))? {
            FileCategory::Audio => &self.config.audio_player,
            FileCategory::Video => &self.config.video_player,
            FileCategory::Archive(_) | FileCategory::Unknown => {
                return Err(FlingError::UnknownFileType {
                    filename: file.to_string(),
                });
            }
        };
        self.runner
            .start_detached(&ExecutionRequest::new(player).arg(file))
    }
}
