//! Read operations for store backends.

use std::path::Path;

use crate::{Metadata, StoreError};

/// Read operations for a store backend.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync`. Methods use `&self` so one
/// backend can serve concurrent readers.
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn FsRead`.
pub trait FsRead: Send + Sync {
    /// Read the entire contents of a file.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`] if the file does not exist
    fn read(&self, path: &Path) -> Result<Vec<u8>, StoreError>;

    /// Get metadata, following symlinks.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`] if the path does not exist
    fn metadata(&self, path: &Path) -> Result<Metadata, StoreError>;

    /// Check if a path exists.
    ///
    /// Returns `Ok(false)` for a missing path; `Err` only for real I/O failures.
    fn exists(&self, path: &Path) -> Result<bool, StoreError> {
        match self.metadata(path) {
            Ok(_) => Ok(true),
            Err(StoreError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
