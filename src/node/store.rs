//! Cache Node Store
//!
//! Concurrent in-memory key/value map backing one cache node. DashMap
//! shards its locks internally, so reads and writes on different keys
//! proceed in parallel without a global lock.

use dashmap::DashMap;
use std::sync::Arc;

/// Concurrent in-memory key-value store
#[derive(Debug, Clone)]
pub struct Store {
    inner: Arc<DashMap<String, String>>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
        }
    }

    /// Get value by key
    #[inline]
    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key).map(|entry| entry.value().clone())
    }

    /// Set key-value pair, overwriting any previous value
    #[inline]
    pub fn set(&self, key: String, value: String) {
        self.inner.insert(key, value);
    }

    /// Delete key, returns true if key existed
    #[inline]
    pub fn del(&self, key: &str) -> bool {
        self.inner.remove(key).is_some()
    }

    /// Check if key exists
    #[inline]
    pub fn exists(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    /// Get the number of keys
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if store is empty
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Snapshot all entries
    pub fn entries(&self) -> Vec<(String, String)> {
        self.inner
            .iter()
            .map(|r| (r.key().clone(), r.value().clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_basic_operations() {
        let store = Store::new();

        store.set("key".to_string(), "value".to_string());
        assert_eq!(store.get("key"), Some("value".to_string()));
        assert!(store.exists("key"));

        assert!(store.del("key"));
        assert!(!store.exists("key"));
        assert_eq!(store.get("key"), None);
        assert!(!store.del("key"));
    }

    #[test]
    fn test_overwrite() {
        let store = Store::new();
        store.set("key".to_string(), "old".to_string());
        store.set("key".to_string(), "new".to_string());
        assert_eq!(store.get("key"), Some("new".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_entries_snapshot() {
        let store = Store::new();
        for i in 0..5 {
            store.set(format!("key{i}"), format!("value{i}"));
        }

        let mut entries = store.entries();
        entries.sort();
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0], ("key0".to_string(), "value0".to_string()));
    }

    #[test]
    fn test_concurrent_access() {
        let store = Store::new();

        let handles: Vec<_> = (0..10)
            .map(|i| {
                let s = store.clone();
                thread::spawn(move || {
                    for j in 0..100 {
                        let key = format!("key-{i}-{j}");
                        s.set(key.clone(), format!("value-{i}-{j}"));
                        assert!(s.exists(&key));
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(store.len(), 1000);
    }
}
