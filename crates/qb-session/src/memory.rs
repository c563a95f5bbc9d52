//! In-memory session storage.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use uuid::Uuid;

use crate::Store;

/// An in-memory store: a map behind a read-write lock.
///
/// Reads clone the stored value out so the lock is never held across
/// caller code. A poisoned lock is recovered rather than propagated.
#[derive(Debug, Default)]
pub struct MemoryStore<T> {
    map: RwLock<HashMap<String, T>>,
}

impl<T> MemoryStore<T> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            map: RwLock::new(HashMap::new()),
        }
    }

    /// Number of sessions currently stored.
    pub fn len(&self) -> usize {
        self.map
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// True if no sessions are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone> Store<T> for MemoryStore<T> {
    fn get(&self, id: &str) -> Option<T> {
        self.map
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    fn put(&self, id: &str, value: T) {
        self.map
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.to_string(), value);
    }

    fn new_id(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn get_missing_is_none() {
        let store: MemoryStore<i32> = MemoryStore::new();
        assert!(store.get("nope").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn put_then_get() {
        let store = MemoryStore::new();
        store.put("a", 7);
        assert_eq!(store.get("a"), Some(7));
        store.put("a", 9);
        assert_eq!(store.get("a"), Some(9));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn new_ids_are_unique() {
        let store: MemoryStore<i32> = MemoryStore::new();
        let a = store.new_id();
        let b = store.new_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 32);
    }

    #[test]
    fn concurrent_puts_to_distinct_keys() {
        let store = Arc::new(MemoryStore::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for j in 0..100 {
                        store.put(&format!("{i}:{j}"), i * 100 + j);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(store.len(), 800);
        assert_eq!(store.get("3:42"), Some(342));
    }
}
