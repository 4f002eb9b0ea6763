//! # Backend Traits
//!
//! The filesystem seam the store is written against.
//!
//! ```text
//! FsRead + FsWrite + FsDir + FsSync = Fs
//! ```
//!
//! [`Fs`] has a blanket implementation: implement the four component traits
//! and a type is usable as a store backend. [`NativeFs`](crate::NativeFs) is
//! the `std::fs` implementation; tests plug in in-memory backends.
//!
//! ## Thread Safety
//!
//! All traits require `Send + Sync` and take `&self`, so one backend is shared
//! by every thread using the store.

mod fs_dir;
mod fs_read;
mod fs_sync;
mod fs_write;

pub use fs_dir::{FsDir, ReadDirIter};
pub use fs_read::FsRead;
pub use fs_sync::FsSync;
pub use fs_write::FsWrite;

/// Everything the store needs from a filesystem.
///
/// Automatically implemented for any type that implements the component
/// traits.
pub trait Fs: FsRead + FsWrite + FsDir + FsSync {}

impl<T: FsRead + FsWrite + FsDir + FsSync + ?Sized> Fs for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_is_object_safe() {
        fn _check(_: &dyn Fs) {}
    }
}
