//! `decomp`: extract an archive into its own directory.

use std::io::Write;
use std::path::{Path, PathBuf};

use fling_common::{ArchiveKind, FlingError, Result};
use fling_exec::{ExecutionRequest, ProcessRunner};

use crate::context::CommandHandlers;

/// Suffix appended to the archive name for the default target directory.
const TARGET_DIR_SUFFIX: &str = ".dir";

/// Extraction command for `kind`, reading `archive`.
fn extraction_request(kind: ArchiveKind, archive: &str) -> ExecutionRequest {
    match kind {
        ArchiveKind::Tar => ExecutionRequest::new("tar").args(["xvf", archive]),
        ArchiveKind::TarGz => ExecutionRequest::new("tar").args(["xvzf", archive]),
        ArchiveKind::TarBz2 => ExecutionRequest::new("tar").args(["xvjf", archive]),
        ArchiveKind::Zip => ExecutionRequest::new("unzip").arg(archive),
        ArchiveKind::Rar => ExecutionRequest::new("unrar").args(["x", archive]),
    }
}

impl<R: ProcessRunner, W: Write> CommandHandlers<'_, R, W> {
    /// `decomp`: extract `file` into `target` (default `<file>.dir`).
    ///
    /// The archiver runs inside the target directory.
    pub fn decomp(&mut self, file: &str, target: Option<&Path>) -> Result<()> {
        let kind = ArchiveKind::from_file_name(file).ok_or_else(|| FlingError::UnknownFileType {
            filename: file.to_string(),
        })?;

        let (target, archive) = match target {
            Some(dir) => {
                let absolute =
                    std::path::absolute(file).map_err(|e| FlingError::io(file, e))?;
                (dir.to_path_buf(), absolute.to_string_lossy().into_owned())
            }
            None => (
                PathBuf::from(format!("{file}{TARGET_DIR_SUFFIX}")),
                sibling_path(file),
            ),
        };

        std::fs::create_dir_all(&target).map_err(|e| FlingError::io(&target, e))?;
        tracing::info!("Extracting {kind} archive {file} into {}", target.display());

        self.run_and_print(extraction_request(kind, &archive).current_dir(target))
    }
}

/// Path of `file` as seen from its `<file>.dir` sibling.
fn sibling_path(file: &str) -> String {
    let name = Path::new(file)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.to_string());
    format!("../{name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sibling_path() {
        assert_eq!(sibling_path("archive.tar.gz"), "../archive.tar.gz");
        assert_eq!(sibling_path("downloads/pkg.zip"), "../pkg.zip");
    }

    #[test]
    fn test_extraction_requests() {
        let req = extraction_request(ArchiveKind::TarBz2, "../a.tbz");
        assert_eq!(req.program, "tar");
        assert_eq!(req.args, vec!["xvjf", "../a.tbz"]);

        let req = extraction_request(ArchiveKind::Rar, "../a.rar");
        assert_eq!(req.program, "unrar");
        assert_eq!(req.args, vec!["x", "../a.rar"]);

        let req = extraction_request(ArchiveKind::Zip, "../a.zip");
        assert_eq!(req.program, "unzip");
        assert_eq!(req.args, vec!["../a.zip"]);
    }
}
