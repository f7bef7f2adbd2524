//! File classification by name suffix.
//!
//! Matching is a case-sensitive suffix comparison against fixed allow-lists.
//! Existing directories are treated as playable audio collections.

use std::fmt;
use std::path::Path;

use crate::error::{FlingError, Result};

const AUDIO_EXTENSIONS: &[&str] = &["mp3", "ogg", "wav", "flac"];
const VIDEO_EXTENSIONS: &[&str] = &["mpg", "mp4", "mkv", "avi"];

const ARCHIVE_SUFFIXES: &[(&str, ArchiveKind)] = &[
    ("tar", ArchiveKind::Tar),
    ("tar.gz", ArchiveKind::TarGz),
    ("tgz", ArchiveKind::TarGz),
    ("tar.bz2", ArchiveKind::TarBz2),
    ("tbz", ArchiveKind::TarBz2),
    ("tbz2", ArchiveKind::TarBz2),
    ("tb2", ArchiveKind::TarBz2),
    ("zip", ArchiveKind::Zip),
    ("rar", ArchiveKind::Rar),
];

/// Container/compression format of an archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchiveKind {
    Tar,
    TarGz,
    TarBz2,
    Zip,
    Rar,
}

impl ArchiveKind {
    /// Archive kind for a file name, by suffix only.
    pub fn from_file_name(name: &str) -> Option<Self> {
        ARCHIVE_SUFFIXES
            .iter()
            .find(|(suffix, _)| has_extension(name, suffix))
            .map(|(_, kind)| *kind)
    }
}

impl fmt::Display for ArchiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArchiveKind::Tar => "tar",
            ArchiveKind::TarGz => "tar.gz",
            ArchiveKind::TarBz2 => "tar.bz2",
            ArchiveKind::Zip => "zip",
            ArchiveKind::Rar => "rar",
        };
        f.write_str(name)
    }
}

/// Category a file falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileCategory {
    Audio,
    Video,
    Archive(ArchiveKind),
    Unknown,
}

impl FileCategory {
    /// Detect the category of `path` without failing.
    ///
    /// The only I/O performed is the directory check.
    pub fn detect(path: &Path) -> Self {
        if path.is_dir() {
            return FileCategory::Audio;
        }

        let name = path.to_string_lossy();
        if AUDIO_EXTENSIONS.iter().any(|ext| has_extension(&name, ext)) {
            FileCategory::Audio
        } else if VIDEO_EXTENSIONS.iter().any(|ext| has_extension(&name, ext)) {
            FileCategory::Video
        } else if let Some(kind) = ArchiveKind::from_file_name(&name) {
            FileCategory::Archive(kind)
        } else {
            FileCategory::Unknown
        }
    }
}

/// Classify `path`, failing with [`FlingError::UnknownFileType`] when no
/// category matches.
pub fn classify(path: impl AsRef<Path>) -> Result<FileCategory> {
    let path = path.as_ref();
    match FileCategory::detect(path) {
        FileCategory::Unknown => Err(FlingError::UnknownFileType {
            filename: path.display().to_string(),
        }),
        category => Ok(category),
    }
}

/// Whether the final path component of `name` is `<stem>.<ext>` with a
/// non-empty stem.
fn has_extension(name: &str, ext: &str) -> bool {
    let Some(file_name) = Path::new(name).file_name() else {
        return false;
    };
    file_name
        .to_string_lossy()
        .strip_suffix(ext)
        .and_then(|stem| stem.strip_suffix('.'))
        .is_some_and(|stem| !stem.is_empty())
}
