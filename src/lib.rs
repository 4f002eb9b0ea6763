//! # docstore
//!
//! A minimal **embedded document store**: any `serde` value is persisted as
//! one JSON file, files are grouped into collections (directories), writes
//! are crash-safe, and mutations are serialized per collection.
//!
//! ---
//!
//! ## Quick Start
//!
//! ```rust
//! use docstore::{Options, Store};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), docstore::StoreError> {
//! let dir = tempfile::tempdir().unwrap();
//! let store = Store::open(dir.path().join("db"), Options::default())?;
//!
//! store.write("users", "alice", &json!({ "age": 30 }))?;
//! store.write("users", "bob", &json!({ "age": 40 }))?;
//!
//! let alice: serde_json::Value = store.read("users", "alice")?;
//! assert_eq!(alice["age"], 30);
//! assert_eq!(store.read_all("users")?.len(), 2);
//!
//! store.delete_collection("users")?;
//! # Ok(())
//! # }
//! ```
//!
//! ---
//!
//! ## On-Disk Layout
//!
//! ```text
//! <root>/
//!   <collection>/
//!     <resource>.json        tab-indented JSON, trailing newline
//! ```
//!
//! A write encodes the value, stages it in `<resource>.json.tmp` and renames
//! it over `<resource>.json`. Readers therefore never see a half-written file.
//!
//! ---
//!
//! ## Core Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Store`] | `write`, `read`, `read_all`, `documents`, `delete`, `delete_collection` |
//! | [`Options`] | Logger and durability settings |
//! | [`StoreError`] | Error type with path and operation context |
//! | [`PathResolver`] | Layout rules and file-or-directory resolution |
//! | [`MutexRegistry`] | Lazily created per-collection locks |
//! | [`Fs`] | Backend seam; [`NativeFs`] is the `std::fs` implementation |
//! | [`Logger`] | Leveled diagnostics; [`TracingLogger`] is the default |
//!
//! ---
//!
//! ## Thread Safety
//!
//! [`Store`] is `Send + Sync`. Writes and deletes to one collection take that
//! collection's lock; different collections proceed in parallel. Reads take
//! no lock and rely on rename atomicity instead.

mod codec;
mod documents;
mod error;
mod logger;
mod mutex_registry;
mod native;
mod options;
mod path_resolver;
mod store;
mod traits;
mod types;

// Public re-exports - error types
pub use error::StoreError;

// Public re-exports - core types
pub use types::{DirEntry, FileType, Metadata, Resolved};

// Public re-exports - store
pub use documents::{Documents, RawDocument};
pub use options::Options;
pub use store::Store;

// Public re-exports - building blocks
pub use codec::{decode, encode};
pub use logger::{LogLevel, Logger, TracingLogger};
pub use mutex_registry::{CollectionLock, MutexRegistry};
pub use path_resolver::{DOCUMENT_SUFFIX, PathResolver, TEMP_SUFFIX};

// Public re-exports - backends
pub use native::NativeFs;
pub use traits::{Fs, FsDir, FsRead, FsSync, FsWrite, ReadDirIter};
