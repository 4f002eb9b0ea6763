//! # Path Resolver
//!
//! Maps `(collection, resource)` pairs onto the on-disk layout:
//!
//! ```text
//! <root>/
//!   <collection>/
//!     <resource>.json        canonical document
//!     <resource>.json.tmp    staged write, renamed over the canonical file
//! ```
//!
//! ## Responsibility
//! - Derive collection, canonical, staging and bare entry paths
//! - Resolve a bare path that may name a resource file or a directory
//! - Reject names that are not a single plain path segment

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use crate::{Fs, Resolved, StoreError};

/// Suffix of every stored document.
pub const DOCUMENT_SUFFIX: &str = ".json";

/// Suffix appended to the canonical path while a write is staged.
pub const TEMP_SUFFIX: &str = ".tmp";

/// Derives store paths below a fixed root.
#[derive(Debug, Clone)]
pub struct PathResolver {
    root: PathBuf,
}

impl PathResolver {
    /// Create a resolver rooted at `root`.
    ///
    /// The root is normalized lexically: `.` components and trailing
    /// separators are dropped. `..` is kept as written.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: normalize(root.as_ref()),
        }
    }

    /// The store root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/<collection>`
    pub fn collection_dir(&self, collection: &str) -> PathBuf {
        self.root.join(collection)
    }

    /// `<root>/<collection>/<resource>`, the unsuffixed form used for
    /// dual-mode resolution.
    pub fn entry_path(&self, collection: &str, resource: &str) -> PathBuf {
        self.collection_dir(collection).join(resource)
    }

    /// `<root>/<collection>/<resource>.json`
    pub fn resource_path(&self, collection: &str, resource: &str) -> PathBuf {
        with_suffix(&self.entry_path(collection, resource), DOCUMENT_SUFFIX)
    }

    /// `<root>/<collection>/<resource>.json.tmp`
    pub fn temp_path(&self, collection: &str, resource: &str) -> PathBuf {
        with_suffix(&self.resource_path(collection, resource), TEMP_SUFFIX)
    }

    /// Resolve `path` as-is, falling back to `path` + `.json`.
    ///
    /// The fallback only ever yields [`Resolved::File`]: a directory named
    /// `<name>.json` is a different collection, not this entry. Returns
    /// [`Resolved::Missing`] when neither lookup finds a match. Any other
    /// metadata failure is returned as an error.
    pub fn resolve(&self, fs: &dyn Fs, path: &Path) -> Result<Resolved, StoreError> {
        match self.stat(fs, path)? {
            Resolved::Missing => {}
            found => return Ok(found),
        }
        let suffixed = with_suffix(path, DOCUMENT_SUFFIX);
        match self.stat(fs, &suffixed)? {
            file @ Resolved::File(_) => Ok(file),
            Resolved::Directory(_) | Resolved::Missing => Ok(Resolved::Missing),
        }
    }

    /// Stat `path` exactly as given, with no suffix fallback.
    ///
    /// Collection-level operations use this so `users` never resolves to the
    /// `users.json` collection.
    pub fn stat(&self, fs: &dyn Fs, path: &Path) -> Result<Resolved, StoreError> {
        match fs.metadata(path) {
            Ok(meta) if meta.is_dir() => Ok(Resolved::Directory(path.to_path_buf())),
            Ok(_) => Ok(Resolved::File(path.to_path_buf())),
            Err(StoreError::NotFound { .. }) => Ok(Resolved::Missing),
            Err(e) => Err(e),
        }
    }
}

/// Append `suffix` to the final component without treating it as an
/// extension (`a.b` + `.json` is `a.b.json`, not `a.json`).
pub(crate) fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut os: OsString = path.as_os_str().to_owned();
    os.push(suffix);
    PathBuf::from(os)
}

fn normalize(path: &Path) -> PathBuf {
    let normalized: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    if normalized.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        normalized
    }
}

/// Check that `name` can be used verbatim as one path segment.
///
/// `kind` is `"collection"` or `"resource"` and only shapes the message.
pub(crate) fn validate_name(
    operation: &'static str,
    kind: &'static str,
    name: &str,
) -> Result<(), StoreError> {
    if name.is_empty() {
        return Err(StoreError::invalid(operation, format!("missing {kind}")));
    }
    if name == "." || name == ".." {
        return Err(StoreError::invalid(
            operation,
            format!("{kind} name {name:?} is reserved"),
        ));
    }
    if name.contains(['/', '\\', '\0']) {
        return Err(StoreError::invalid(
            operation,
            format!("{kind} name {name:?} must be a single path segment"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NativeFs;
    use tempfile::TempDir;

    #[test]
    fn derives_layout_paths() {
        let resolver = PathResolver::new("/db");
        assert_eq!(resolver.collection_dir("users"), PathBuf::from("/db/users"));
        assert_eq!(
            resolver.entry_path("users", "alice"),
            PathBuf::from("/db/users/alice")
        );
        assert_eq!(
            resolver.resource_path("users", "alice"),
            PathBuf::from("/db/users/alice.json")
        );
        assert_eq!(
            resolver.temp_path("users", "alice"),
            PathBuf::from("/db/users/alice.json.tmp")
        );
    }

    #[test]
    fn suffix_is_appended_not_substituted() {
        let resolver = PathResolver::new("/db");
        assert_eq!(
            resolver.resource_path("logs", "2024.01"),
            PathBuf::from("/db/logs/2024.01.json")
        );
    }

    #[test]
    fn root_is_normalized() {
        assert_eq!(PathResolver::new("./data/./db/").root(), Path::new("data/db"));
        assert_eq!(PathResolver::new("./").root(), Path::new("."));
        assert_eq!(PathResolver::new("/db/../x").root(), Path::new("/db/../x"));
    }

    #[test]
    fn resolve_prefers_literal_then_suffixed() {
        let tmp = TempDir::new().unwrap();
        let fs = NativeFs::new();
        let resolver = PathResolver::new(tmp.path());
        std::fs::create_dir_all(resolver.collection_dir("users")).unwrap();
        std::fs::write(resolver.resource_path("users", "alice"), b"{}\n").unwrap();

        let dir = resolver
            .resolve(&fs, &resolver.collection_dir("users"))
            .unwrap();
        assert_eq!(dir, Resolved::Directory(resolver.collection_dir("users")));

        let file = resolver
            .resolve(&fs, &resolver.entry_path("users", "alice"))
            .unwrap();
        assert_eq!(file, Resolved::File(resolver.resource_path("users", "alice")));

        let missing = resolver
            .resolve(&fs, &resolver.entry_path("users", "bob"))
            .unwrap();
        assert!(missing.is_missing());
    }

    #[test]
    fn suffixed_directory_is_not_a_fallback_match() {
        let tmp = TempDir::new().unwrap();
        let fs = NativeFs::new();
        let resolver = PathResolver::new(tmp.path());
        std::fs::create_dir_all(resolver.collection_dir("users.json")).unwrap();

        let users = resolver.collection_dir("users");
        assert!(resolver.resolve(&fs, &users).unwrap().is_missing());
        assert!(resolver.stat(&fs, &users).unwrap().is_missing());
        assert_eq!(
            resolver
                .stat(&fs, &resolver.collection_dir("users.json"))
                .unwrap(),
            Resolved::Directory(resolver.collection_dir("users.json"))
        );
    }

    #[test]
    fn stat_does_not_append_suffix() {
        let tmp = TempDir::new().unwrap();
        let fs = NativeFs::new();
        let resolver = PathResolver::new(tmp.path());
        std::fs::create_dir_all(resolver.collection_dir("users")).unwrap();
        std::fs::write(resolver.resource_path("users", "alice"), b"{}\n").unwrap();

        let entry = resolver.entry_path("users", "alice");
        assert!(resolver.stat(&fs, &entry).unwrap().is_missing());
        assert!(!resolver.resolve(&fs, &entry).unwrap().is_missing());
    }

    #[test]
    fn validate_name_rules() {
        assert!(validate_name("write", "resource", "alice").is_ok());
        assert!(validate_name("write", "resource", "alice.v2").is_ok());

        let err = validate_name("write", "collection", "").unwrap_err();
        assert_eq!(err.to_string(), "write: invalid argument: missing collection");

        for bad in [".", "..", "a/b", "a\\b", "a\0b"] {
            assert!(
                matches!(
                    validate_name("read", "resource", bad),
                    Err(StoreError::InvalidArgument { .. })
                ),
                "{bad:?} should be rejected"
            );
        }
    }
}
