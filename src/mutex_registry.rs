//! # Mutex Registry
//!
//! One exclusive lock per collection, created on first use.
//!
//! ```text
//! registry guard (held for lookup/insert only)
//!     └── "users"  -> Arc<Mutex<()>>   held for a whole write/delete
//!     └── "orders" -> Arc<Mutex<()>>
//! ```
//!
//! The registry guard is never held while a collection lock is being waited
//! on, so a long write to one collection does not slow down lookups for
//! another. Entries are never evicted.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Per-collection lock table owned by a store instance.
#[derive(Debug, Default)]
pub struct MutexRegistry {
    table: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl MutexRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the lock handle for `collection`, creating it if needed.
    ///
    /// Every call with the same name, from any thread, returns a handle to
    /// the same mutex.
    pub fn acquire(&self, collection: &str) -> CollectionLock {
        let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        let inner = match table.get(collection) {
            Some(existing) => Arc::clone(existing),
            None => {
                let created = Arc::new(Mutex::new(()));
                table.insert(collection.to_owned(), Arc::clone(&created));
                created
            }
        };
        CollectionLock { inner }
    }

    /// Number of collections that have been locked at least once.
    pub fn len(&self) -> usize {
        self.table
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if no collection has been locked yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle to one collection's exclusive lock.
#[derive(Debug, Clone)]
pub struct CollectionLock {
    inner: Arc<Mutex<()>>,
}

impl CollectionLock {
    /// Block until the collection is free, then hold it until the guard drops.
    ///
    /// The mutex guards no data, so a guard dropped during a panic leaves
    /// nothing inconsistent; poisoning is ignored.
    pub fn lock(&self) -> MutexGuard<'_, ()> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Try to take the lock without blocking.
    pub fn try_lock(&self) -> Option<MutexGuard<'_, ()>> {
        match self.inner.try_lock() {
            Ok(guard) => Some(guard),
            Err(std::sync::TryLockError::Poisoned(p)) => Some(p.into_inner()),
            Err(std::sync::TryLockError::WouldBlock) => None,
        }
    }

    /// Returns `true` if both handles refer to the same collection lock.
    pub fn same_lock(&self, other: &CollectionLock) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn same_name_same_lock() {
        let registry = MutexRegistry::new();
        let a = registry.acquire("users");
        let b = registry.acquire("users");
        assert!(a.same_lock(&b));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn different_names_different_locks() {
        let registry = MutexRegistry::new();
        let a = registry.acquire("users");
        let b = registry.acquire("orders");
        assert!(!a.same_lock(&b));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn held_lock_excludes_same_collection_only() {
        let registry = MutexRegistry::new();
        let users = registry.acquire("users");
        let _guard = users.lock();

        assert!(registry.acquire("users").try_lock().is_none());
        assert!(registry.acquire("orders").try_lock().is_some());
    }

    #[test]
    fn concurrent_acquire_agrees_on_one_lock() {
        let registry = Arc::new(MutexRegistry::new());
        let first = registry.acquire("users");

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || registry.acquire("users"))
            })
            .collect();

        for h in handles {
            assert!(h.join().unwrap().same_lock(&first));
        }
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn poisoned_lock_is_still_usable() {
        let registry = Arc::new(MutexRegistry::new());
        let r = Arc::clone(&registry);
        let _ = thread::spawn(move || {
            let lock = r.acquire("users");
            let _guard = lock.lock();
            panic!("writer died");
        })
        .join();

        let lock = registry.acquire("users");
        drop(lock.lock());
        assert!(lock.try_lock().is_some());
    }

    #[test]
    fn registry_is_empty_until_used() {
        let registry = MutexRegistry::new();
        assert!(registry.is_empty());
        let _ = registry.acquire("users");
        assert!(!registry.is_empty());
    }
}
