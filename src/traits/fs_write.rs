//! Write operations for store backends.

use std::path::Path;

use crate::StoreError;

/// Write operations for a store backend.
///
/// All methods use `&self`. Backends manage their own synchronization; the
/// store serializes mutations per collection on top of that.
pub trait FsWrite: Send + Sync {
    /// Write data to a file (creates if not exists, truncates if exists).
    ///
    /// Parent directories must exist.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`] if the parent directory does not exist
    fn write(&self, path: &Path, data: &[u8]) -> Result<(), StoreError>;

    /// Rename `from` onto `to`, replacing `to` if it exists.
    ///
    /// The store relies on this being atomic: an observer of `to` sees either
    /// the old or the new file, never a mix.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`] if `from` does not exist
    fn rename(&self, from: &Path, to: &Path) -> Result<(), StoreError>;

    /// Remove a file.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`] if the file does not exist
    fn remove_file(&self, path: &Path) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_write_is_object_safe() {
        fn _check(_: &dyn FsWrite) {}
    }
}
