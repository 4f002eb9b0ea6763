//! # Document Store
//!
//! [`Store`] ties the pieces together: names are validated, paths come from
//! the [`PathResolver`], mutations take the collection's lock from the
//! [`MutexRegistry`], and bytes go through the [`Fs`] backend.
//!
//! ## Consistency
//!
//! - `write`, `delete` and `delete_collection` on the same collection run one
//!   at a time. Different collections never wait on each other.
//! - `read`, `read_all` and `documents` take no lock. A read racing a write
//!   to the same resource returns the old or the new value in full; the
//!   staged-file-then-rename write path never exposes a partial file.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::path_resolver::validate_name;
use crate::{
    Documents, Fs, Logger, MutexRegistry, NativeFs, Options, PathResolver, RawDocument, Resolved,
    StoreError, codec,
};

/// An embedded document store rooted at one directory.
///
/// `Store` is `Send + Sync`; share it between threads with `Arc<Store>` or
/// scoped borrows.
///
/// # Example
///
/// ```rust
/// use docstore::{Options, Store};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, PartialEq, Serialize, Deserialize)]
/// struct User {
///     name: String,
///     age: u32,
/// }
///
/// # fn main() -> Result<(), docstore::StoreError> {
/// let dir = tempfile::tempdir().unwrap();
/// let store = Store::open(dir.path(), Options::default())?;
///
/// let alice = User { name: "alice".into(), age: 30 };
/// store.write("users", "alice", &alice)?;
///
/// let back: User = store.read("users", "alice")?;
/// assert_eq!(back, alice);
/// assert_eq!(store.read_all("users")?.len(), 1);
///
/// store.delete("users", "alice")?;
/// assert!(store.read::<User>("users", "alice").unwrap_err().is_not_found());
/// # Ok(())
/// # }
/// ```
pub struct Store<B: Fs = NativeFs> {
    backend: B,
    resolver: PathResolver,
    locks: MutexRegistry,
    logger: Arc<dyn Logger>,
    sync_writes: bool,
}

impl Store<NativeFs> {
    /// Open (creating if needed) a store rooted at `root` on the host
    /// filesystem.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotADirectory`] if `root` exists and is not a directory
    /// - [`StoreError::Io`] if `root` cannot be created
    pub fn open(root: impl AsRef<Path>, options: Options) -> Result<Self, StoreError> {
        Self::with_backend(NativeFs::new(), root, options)
    }
}

impl<B: Fs> Store<B> {
    /// Open a store rooted at `root` on an arbitrary backend.
    pub fn with_backend(
        backend: B,
        root: impl AsRef<Path>,
        options: Options,
    ) -> Result<Self, StoreError> {
        let resolver = PathResolver::new(root);
        let logger = options.logger_or_default();
        let root = resolver.root();

        match backend.metadata(root) {
            Ok(meta) if meta.is_dir() => {
                logger.debug(format_args!(
                    "Using '{}' (database already exists)",
                    root.display()
                ));
            }
            Ok(_) => {
                return Err(StoreError::NotADirectory {
                    path: root.to_path_buf(),
                });
            }
            Err(StoreError::NotFound { .. }) => {
                logger.debug(format_args!(
                    "Creating the database at '{}'...",
                    root.display()
                ));
                backend.create_dir_all(root)?;
            }
            Err(e) => return Err(e),
        }

        Ok(Self {
            backend,
            resolver,
            locks: MutexRegistry::new(),
            logger,
            sync_writes: options.sync_writes,
        })
    }

    /// The (normalized) store root.
    pub fn root(&self) -> &Path {
        self.resolver.root()
    }

    /// The underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Canonical file path of a resource. Does not check existence.
    pub fn resource_path(&self, collection: &str, resource: &str) -> PathBuf {
        self.resolver.resource_path(collection, resource)
    }

    /// Persist `value` as `<collection>/<resource>.json`, replacing any
    /// previous value.
    ///
    /// The collection directory is created on demand. The encoded value is
    /// staged in `<resource>.json.tmp` and renamed over the canonical file,
    /// so the canonical file always holds a complete document.
    ///
    /// # Errors
    ///
    /// - [`StoreError::InvalidArgument`] for an empty or unusable name; nothing is touched on disk
    /// - [`StoreError::Serialization`] if `value` cannot be encoded
    /// - [`StoreError::Io`] if creating, writing or renaming fails
    pub fn write<T: Serialize + ?Sized>(
        &self,
        collection: &str,
        resource: &str,
        value: &T,
    ) -> Result<(), StoreError> {
        validate_name("write", "collection", collection)?;
        validate_name("write", "resource", resource)?;

        let lock = self.locks.acquire(collection);
        let _guard = lock.lock();

        let dir = self.resolver.collection_dir(collection);
        let final_path = self.resolver.resource_path(collection, resource);
        let temp_path = self.resolver.temp_path(collection, resource);

        self.backend.create_dir_all(&dir)?;
        let bytes = codec::encode(value)?;

        if let Err(e) = self.commit(&dir, &temp_path, &final_path, &bytes) {
            self.discard_staged(&temp_path);
            return Err(e);
        }

        self.logger.trace(format_args!(
            "wrote {} ({} bytes)",
            final_path.display(),
            bytes.len()
        ));
        Ok(())
    }

    fn commit(
        &self,
        dir: &Path,
        temp_path: &Path,
        final_path: &Path,
        bytes: &[u8],
    ) -> Result<(), StoreError> {
        self.backend.write(temp_path, bytes)?;
        if self.sync_writes {
            self.backend.fsync(temp_path)?;
        }
        self.backend.rename(temp_path, final_path)?;
        if self.sync_writes {
            self.backend.sync_dir(dir)?;
        }
        Ok(())
    }

    fn discard_staged(&self, temp_path: &Path) {
        match self.backend.remove_file(temp_path) {
            Ok(()) | Err(StoreError::NotFound { .. }) => {}
            Err(e) => self.logger.warn(format_args!(
                "could not remove staged file {}: {}",
                temp_path.display(),
                e
            )),
        }
    }

    /// Read and decode `<collection>/<resource>.json`.
    ///
    /// Takes no lock: a concurrent `write` to the same resource may or may
    /// not be visible, but the value returned is always one complete write.
    ///
    /// # Errors
    ///
    /// - [`StoreError::InvalidArgument`] for an empty or unusable name
    /// - [`StoreError::NotFound`] if the resource does not exist
    /// - [`StoreError::Deserialization`] if the file is not a valid `T`
    pub fn read<T: DeserializeOwned>(
        &self,
        collection: &str,
        resource: &str,
    ) -> Result<T, StoreError> {
        validate_name("read", "collection", collection)?;
        validate_name("read", "resource", resource)?;

        let entry = self.resolver.entry_path(collection, resource);
        if let Resolved::Missing = self.resolver.resolve(&self.backend, &entry)? {
            return Err(StoreError::NotFound { path: entry });
        }

        let path = self.resolver.resource_path(collection, resource);
        let bytes = self.backend.read(&path)?;
        self.logger
            .trace(format_args!("read {} ({} bytes)", path.display(), bytes.len()));
        codec::decode(&path, &bytes)
    }

    /// Lazily iterate the documents of `collection`.
    ///
    /// # Errors
    ///
    /// - [`StoreError::InvalidArgument`] for an empty or unusable name
    /// - [`StoreError::NotFound`] if the collection does not exist
    pub fn documents(&self, collection: &str) -> Result<Documents<'_>, StoreError> {
        validate_name("read_all", "collection", collection)?;

        let dir = self.resolver.collection_dir(collection);
        match self.resolver.stat(&self.backend, &dir)? {
            Resolved::Directory(path) => {
                let entries = self.backend.read_dir(&path)?;
                Ok(Documents::new(&self.backend, entries))
            }
            Resolved::File(_) | Resolved::Missing => Err(StoreError::NotFound { path: dir }),
        }
    }

    /// Read every document of `collection` as raw JSON text.
    ///
    /// Documents are returned in directory order and are not decoded, so a
    /// collection may mix value shapes. The first unreadable file aborts the
    /// call. An existing but empty collection yields an empty vector.
    ///
    /// # Errors
    ///
    /// - [`StoreError::InvalidArgument`] for an empty or unusable name
    /// - [`StoreError::NotFound`] if the collection does not exist
    pub fn read_all(&self, collection: &str) -> Result<Vec<String>, StoreError> {
        self.documents(collection)?
            .map(|doc| doc.map(|d| d.content))
            .collect()
    }

    /// Read and decode every document of `collection` as `T`.
    pub fn read_all_as<T: DeserializeOwned>(
        &self,
        collection: &str,
    ) -> Result<Vec<T>, StoreError> {
        self.documents(collection)?
            .map(|doc| doc.and_then(|d: RawDocument| d.decode()))
            .collect()
    }

    /// Remove one resource.
    ///
    /// If `<collection>/<resource>` names a directory it is removed
    /// recursively; otherwise the canonical `.json` file is removed. When
    /// only the unsuffixed file exists, there is no canonical file to remove
    /// and the call succeeds without touching anything.
    ///
    /// # Errors
    ///
    /// - [`StoreError::InvalidArgument`] for an empty or unusable name; use
    ///   [`delete_collection`](Self::delete_collection) to drop a whole collection
    /// - [`StoreError::NotFound`] if nothing exists at that address
    pub fn delete(&self, collection: &str, resource: &str) -> Result<(), StoreError> {
        validate_name("delete", "collection", collection)?;
        validate_name("delete", "resource", resource)?;

        let lock = self.locks.acquire(collection);
        let _guard = lock.lock();

        let entry = self.resolver.entry_path(collection, resource);
        match self.resolver.resolve(&self.backend, &entry)? {
            Resolved::Missing => Err(StoreError::NotFound { path: entry }),
            Resolved::Directory(path) => {
                self.backend.remove_dir_all(&path)?;
                self.logger
                    .debug(format_args!("deleted directory {}", path.display()));
                Ok(())
            }
            Resolved::File(_) => {
                let path = self.resolver.resource_path(collection, resource);
                match self.backend.remove_file(&path) {
                    Ok(()) => {
                        self.logger.debug(format_args!("deleted {}", path.display()));
                        Ok(())
                    }
                    Err(StoreError::NotFound { .. }) => Ok(()),
                    Err(e) => Err(e),
                }
            }
        }
    }

    /// Remove a collection and every resource in it.
    ///
    /// # Errors
    ///
    /// - [`StoreError::InvalidArgument`] for an empty or unusable name
    /// - [`StoreError::NotFound`] if the collection does not exist
    pub fn delete_collection(&self, collection: &str) -> Result<(), StoreError> {
        validate_name("delete_collection", "collection", collection)?;

        let lock = self.locks.acquire(collection);
        let _guard = lock.lock();

        let dir = self.resolver.collection_dir(collection);
        match self.resolver.stat(&self.backend, &dir)? {
            Resolved::Directory(path) => {
                self.backend.remove_dir_all(&path)?;
                self.logger
                    .debug(format_args!("deleted collection {}", path.display()));
                Ok(())
            }
            Resolved::File(_) | Resolved::Missing => Err(StoreError::NotFound { path: dir }),
        }
    }
}

impl<B: Fs + fmt::Debug> fmt::Debug for Store<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("backend", &self.backend)
            .field("root", &self.resolver.root())
            .field("collections_locked", &self.locks.len())
            .field("sync_writes", &self.sync_writes)
            .finish()
    }
}
