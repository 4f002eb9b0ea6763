//! Core types shared by the store and its filesystem backends.

use std::path::{Path, PathBuf};

/// Type of a filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    /// Regular file.
    File,
    /// Directory.
    Directory,
}

/// Metadata for a filesystem entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    /// Type of the entry.
    pub file_type: FileType,
}

impl Metadata {
    /// Returns `true` if this is a regular file.
    #[inline]
    pub fn is_file(&self) -> bool {
        self.file_type == FileType::File
    }

    /// Returns `true` if this is a directory.
    #[inline]
    pub fn is_dir(&self) -> bool {
        self.file_type == FileType::Directory
    }
}

/// A directory entry returned from `read_dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Name of the entry (file name only, not full path).
    pub name: String,
    /// Full path to the entry.
    pub path: PathBuf,
    /// Type of the entry.
    pub file_type: FileType,
}

/// Outcome of resolving a bare store path that may name a resource file
/// (with the `.json` suffix implied) or a collection directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// Neither the literal path nor its suffixed form exists.
    Missing,
    /// A regular file exists at the contained path.
    File(PathBuf),
    /// A directory exists at the contained path.
    Directory(PathBuf),
}

impl Resolved {
    /// The path that matched, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Resolved::Missing => None,
            Resolved::File(p) | Resolved::Directory(p) => Some(p),
        }
    }

    /// Returns `true` for [`Resolved::Missing`].
    pub fn is_missing(&self) -> bool {
        matches!(self, Resolved::Missing)
    }
}
