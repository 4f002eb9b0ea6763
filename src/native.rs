//! # Native Backend
//!
//! [`NativeFs`] implements the backend traits directly on top of `std::fs`.
//! Paths are used as given; the store hands it absolute or root-relative
//! paths already joined by the [`PathResolver`](crate::PathResolver).

use std::fs;
use std::path::Path;

use crate::{
    DirEntry, FileType, FsDir, FsRead, FsSync, FsWrite, Metadata, ReadDirIter, StoreError,
};

/// Backend over the host filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeFs;

impl NativeFs {
    /// Create a native backend.
    pub fn new() -> Self {
        Self
    }
}

fn file_type_of(ft: fs::FileType) -> FileType {
    if ft.is_dir() {
        FileType::Directory
    } else {
        FileType::File
    }
}

impl FsRead for NativeFs {
    fn read(&self, path: &Path) -> Result<Vec<u8>, StoreError> {
        fs::read(path).map_err(|e| StoreError::io("read", path, e))
    }

    fn metadata(&self, path: &Path) -> Result<Metadata, StoreError> {
        let meta = fs::metadata(path).map_err(|e| StoreError::io("metadata", path, e))?;
        Ok(Metadata {
            file_type: file_type_of(meta.file_type()),
        })
    }
}

impl FsWrite for NativeFs {
    fn write(&self, path: &Path, data: &[u8]) -> Result<(), StoreError> {
        fs::write(path, data).map_err(|e| StoreError::io("write", path, e))
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<(), StoreError> {
        fs::rename(from, to).map_err(|e| StoreError::io("rename", from, e))
    }

    fn remove_file(&self, path: &Path) -> Result<(), StoreError> {
        fs::remove_file(path).map_err(|e| StoreError::io("remove_file", path, e))
    }
}

impl FsDir for NativeFs {
    fn read_dir(&self, path: &Path) -> Result<ReadDirIter, StoreError> {
        let meta = self.metadata(path)?;
        if !meta.is_dir() {
            return Err(StoreError::NotADirectory {
                path: path.to_path_buf(),
            });
        }
        let dir = path.to_path_buf();
        let entries = fs::read_dir(path).map_err(|e| StoreError::io("read_dir", path, e))?;
        Ok(ReadDirIter::new(entries.map(move |entry| {
            let entry = entry.map_err(|e| StoreError::io("read_dir", &dir, e))?;
            let file_type = entry
                .file_type()
                .map_err(|e| StoreError::io("read_dir", entry.path(), e))?;
            Ok(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: entry.path(),
                file_type: file_type_of(file_type),
            })
        })))
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), StoreError> {
        fs::create_dir_all(path).map_err(|e| StoreError::io("create_dir_all", path, e))
    }

    fn remove_dir_all(&self, path: &Path) -> Result<(), StoreError> {
        fs::remove_dir_all(path).map_err(|e| StoreError::io("remove_dir_all", path, e))
    }
}

impl FsSync for NativeFs {
    // Windows refuses FlushFileBuffers on a read-only handle.
    fn fsync(&self, path: &Path) -> Result<(), StoreError> {
        let file = fs::OpenOptions::new()
            .write(true)
            .open(path)
            .map_err(|e| StoreError::io("fsync", path, e))?;
        file.sync_all().map_err(|e| StoreError::io("fsync", path, e))
    }

    // Directories can only be opened read-only.
    #[cfg(unix)]
    fn sync_dir(&self, path: &Path) -> Result<(), StoreError> {
        let dir = fs::File::open(path).map_err(|e| StoreError::io("sync_dir", path, e))?;
        dir.sync_all().map_err(|e| StoreError::io("sync_dir", path, e))
    }

    // Directories cannot be opened for syncing on Windows; rename durability
    // there is the filesystem's business.
    #[cfg(not(unix))]
    fn sync_dir(&self, _path: &Path) -> Result<(), StoreError> {
        Ok(())
    }
}
