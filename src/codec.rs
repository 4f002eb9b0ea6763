//! # Document Codec
//!
//! Canonical on-disk encoding: JSON indented with one tab per level, fields
//! in the order `serde` produces them, terminated by a single `\n`.
//! Encoding the same value twice yields the same bytes.

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::PrettyFormatter;

use crate::StoreError;

/// Encode `value` in the canonical document form.
///
/// # Errors
///
/// - [`StoreError::Serialization`] if `value` cannot be represented as JSON
///   (for example a map with non-string keys)
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, StoreError> {
    let mut buf = Vec::with_capacity(128);
    let formatter = PrettyFormatter::with_indent(b"\t");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut ser)
        .map_err(|e| StoreError::Serialization(e.to_string()))?;
    buf.push(b'\n');
    Ok(buf)
}

/// Decode a document read from `path`.
///
/// # Errors
///
/// - [`StoreError::Deserialization`] if the bytes are not valid JSON for `T`
pub fn decode<T: DeserializeOwned>(path: &Path, bytes: &[u8]) -> Result<T, StoreError> {
    serde_json::from_slice(bytes).map_err(|e| StoreError::Deserialization {
        path: path.to_path_buf(),
        details: e.to_string(),
    })
}
