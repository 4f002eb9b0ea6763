//! Error types for the document store.

use std::io;
use std::path::{Path, PathBuf};

/// Store error type with contextual variants.
///
/// Every variant carries the path or operation that failed where one exists.
/// Uses `#[non_exhaustive]` for forward compatibility.
///
/// # Examples
///
/// ```rust
/// use docstore::StoreError;
/// use std::path::PathBuf;
///
/// let err = StoreError::NotFound { path: PathBuf::from("db/users/alice") };
/// assert_eq!(err.to_string(), "not found: db/users/alice");
/// ```
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A collection or resource name was empty or unusable as a path segment.
    #[error("{operation}: invalid argument: {details}")]
    InvalidArgument {
        /// The operation that rejected the argument.
        operation: &'static str,
        /// What was wrong with it.
        details: String,
    },

    /// Resource or collection does not exist.
    #[error("not found: {path}")]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// Expected a directory but found something else.
    #[error("not a directory: {path}")]
    NotADirectory {
        /// The path that is not a directory.
        path: PathBuf,
    },

    /// The value could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Stored bytes are not a valid encoded value.
    #[error("deserialization error: {path} ({details})")]
    Deserialization {
        /// The file holding the bad bytes.
        path: PathBuf,
        /// Decoder message.
        details: String,
    },

    /// I/O error with context.
    #[error("{operation} failed for {path}: {source}")]
    Io {
        /// The operation that failed.
        operation: &'static str,
        /// The path involved in the operation.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    /// Wrap an I/O error with the operation and path it came from.
    ///
    /// `io::ErrorKind::NotFound` becomes [`StoreError::NotFound`] so callers
    /// can match on a missing document regardless of which call noticed it.
    pub fn io(operation: &'static str, path: impl AsRef<Path>, source: io::Error) -> Self {
        let path = path.as_ref().to_path_buf();
        match source.kind() {
            io::ErrorKind::NotFound => StoreError::NotFound { path },
            _ => StoreError::Io {
                operation,
                path,
                source,
            },
        }
    }

    pub(crate) fn invalid(operation: &'static str, details: impl Into<String>) -> Self {
        StoreError::InvalidArgument {
            operation,
            details: details.into(),
        }
    }

    /// Returns `true` for [`StoreError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}
