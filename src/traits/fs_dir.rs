//! Directory operations for store backends.

use std::path::Path;

use crate::{DirEntry, StoreError};

/// Directory operations for a store backend.
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn FsDir`.
pub trait FsDir: Send + Sync {
    /// List directory contents.
    ///
    /// The outer `Result` indicates whether the directory could be opened;
    /// each item's `Result` indicates whether that entry could be read.
    /// Order is whatever the backend enumerates; it is not sorted.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`] if the path does not exist
    /// - [`StoreError::NotADirectory`] if the path is not a directory
    fn read_dir(&self, path: &Path) -> Result<ReadDirIter, StoreError>;

    /// Create a directory and all parent directories.
    ///
    /// Idempotent: succeeds if the directory already exists.
    fn create_dir_all(&self, path: &Path) -> Result<(), StoreError>;

    /// Remove a directory and all its contents recursively.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`] if the path does not exist
    fn remove_dir_all(&self, path: &Path) -> Result<(), StoreError>;
}

/// Iterator over directory entries.
///
/// Wraps a boxed iterator so each backend can stream entries its own way.
///
/// - Outer `Result` (from [`FsDir::read_dir`]) = "can I open this directory?"
/// - Inner `Result` (per item) = "can I read this entry?"
pub struct ReadDirIter(Box<dyn Iterator<Item = Result<DirEntry, StoreError>> + Send + 'static>);

impl ReadDirIter {
    /// Create from any compatible iterator.
    pub fn new<I>(iter: I) -> Self
    where
        I: Iterator<Item = Result<DirEntry, StoreError>> + Send + 'static,
    {
        Self(Box::new(iter))
    }

    /// Create from a pre-collected vector.
    pub fn from_vec(entries: Vec<Result<DirEntry, StoreError>>) -> Self {
        Self(Box::new(entries.into_iter()))
    }
}

impl Iterator for ReadDirIter {
    type Item = Result<DirEntry, StoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FileType;
    use std::path::PathBuf;

    fn entry(name: &str, file_type: FileType) -> DirEntry {
        DirEntry {
            name: name.into(),
            path: PathBuf::from("/db/users").join(name),
            file_type,
        }
    }

    #[test]
    fn read_dir_iter_from_vec() {
        let iter = ReadDirIter::from_vec(vec![
            Ok(entry("alice.json", FileType::File)),
            Ok(entry("archive", FileType::Directory)),
        ]);
        let collected: Vec<_> = iter.collect();
        assert_eq!(collected.len(), 2);
    }

    #[test]
    fn read_dir_iter_collects_into_result() {
        let iter = ReadDirIter::from_vec(vec![Ok(entry("alice.json", FileType::File))]);
        let entries: Vec<DirEntry> = iter.collect::<Result<_, _>>().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "alice.json");
    }

    #[test]
    fn read_dir_iter_collect_stops_at_error() {
        let iter = ReadDirIter::from_vec(vec![
            Ok(entry("alice.json", FileType::File)),
            Err(StoreError::NotFound {
                path: PathBuf::from("/db/users/bob.json"),
            }),
        ]);
        assert!(iter.collect::<Result<Vec<_>, _>>().is_err());
    }

    #[test]
    fn read_dir_iter_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<ReadDirIter>();
    }
}
