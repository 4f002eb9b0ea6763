//! Lazy iteration over the raw documents of one collection.

use std::path::PathBuf;

use serde::de::DeserializeOwned;

use crate::path_resolver::DOCUMENT_SUFFIX;
use crate::{FileType, Fs, ReadDirIter, StoreError, codec};

/// One stored document, undecoded.
///
/// Collections may hold differently shaped values, so listing hands back the
/// raw text and lets the caller pick the type per document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    /// Resource name (file name without the `.json` suffix).
    pub resource: String,
    /// Canonical path the document was read from.
    pub path: PathBuf,
    /// File content, including the trailing newline.
    pub content: String,
}

impl RawDocument {
    /// Decode the content as `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        codec::decode(&self.path, self.content.as_bytes())
    }
}

/// Iterator returned by [`Store::documents`](crate::Store::documents).
///
/// Reads one file per call to `next`. Only regular files ending in `.json`
/// are yielded; staged `.tmp` files and subdirectories are skipped. Order is
/// the backend's directory enumeration order.
pub struct Documents<'a> {
    fs: &'a dyn Fs,
    entries: ReadDirIter,
}

impl<'a> Documents<'a> {
    pub(crate) fn new(fs: &'a dyn Fs, entries: ReadDirIter) -> Self {
        Self { fs, entries }
    }
}

impl Iterator for Documents<'_> {
    type Item = Result<RawDocument, StoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(e) => return Some(Err(e)),
            };
            if entry.file_type != FileType::File {
                continue;
            }
            let Some(resource) = entry.name.strip_suffix(DOCUMENT_SUFFIX) else {
                continue;
            };
            let resource = resource.to_owned();
            return Some(self.fs.read(&entry.path).and_then(|bytes| {
                let content = String::from_utf8(bytes).map_err(|e| StoreError::Deserialization {
                    path: entry.path.clone(),
                    details: e.to_string(),
                })?;
                Ok(RawDocument {
                    resource,
                    path: entry.path,
                    content,
                })
            }));
        }
    }
}
