//! Durability operations.

use std::path::Path;

use crate::StoreError;

/// Flush written data to stable storage.
pub trait FsSync: Send + Sync {
    /// Flush a file's contents and metadata.
    fn fsync(&self, path: &Path) -> Result<(), StoreError>;

    /// Flush a directory so renames and unlinks inside it survive a crash.
    ///
    /// Backends without a meaningful notion of this may return `Ok(())`.
    fn sync_dir(&self, path: &Path) -> Result<(), StoreError>;
}
