use std::collections::HashMap;
use std::sync::RwLock;

use bytes::Bytes;
use coffer_types::ObjectKey;

use crate::error::{BlobError, BlobResult};
use crate::traits::BlobStore;

/// In-memory, HashMap-based blob store.
///
/// Intended for tests and embedding. All blobs are held in memory behind a
/// `RwLock`. `Bytes` payloads are reference-counted, so reads are cheap.
pub struct InMemoryBlobStore {
    blobs: RwLock<HashMap<ObjectKey, Bytes>>,
}

impl InMemoryBlobStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            blobs: RwLock::new(HashMap::new()),
        }
    }

    /// Number of blobs currently stored.
    pub fn len(&self) -> usize {
        self.blobs.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.blobs.read().expect("lock poisoned").is_empty()
    }

    /// Total bytes across all stored blobs.
    pub fn total_bytes(&self) -> u64 {
        self.blobs
            .read()
            .expect("lock poisoned")
            .values()
            .map(|b| b.len() as u64)
            .sum()
    }

    /// Return a sorted list of all keys in the store. Used by GC scans and
    /// tests.
    pub fn keys(&self) -> Vec<ObjectKey> {
        let map = self.blobs.read().expect("lock poisoned");
        let mut keys: Vec<ObjectKey> = map.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Remove all blobs from the store.
    pub fn clear(&self) {
        self.blobs.write().expect("lock poisoned").clear();
    }
}

impl Default for InMemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BlobStore for InMemoryBlobStore {
    fn put(&self, key: &ObjectKey, content: Bytes) -> BlobResult<()> {
        let mut map = self.blobs.write().expect("lock poisoned");
        match map.get(key) {
            // Idempotent: identical content under the same key is a no-op.
            Some(existing) if *existing == content => Ok(()),
            Some(_) => Err(BlobError::KeyOccupied { key: key.clone() }),
            None => {
                map.insert(key.clone(), content);
                Ok(())
            }
        }
    }

    fn get(&self, key: &ObjectKey) -> BlobResult<Option<Bytes>> {
        let map = self.blobs.read().expect("lock poisoned");
        Ok(map.get(key).cloned())
    }

    fn exists(&self, key: &ObjectKey) -> BlobResult<bool> {
        let map = self.blobs.read().expect("lock poisoned");
        Ok(map.contains_key(key))
    }

    fn delete(&self, key: &ObjectKey) -> BlobResult<bool> {
        let mut map = self.blobs.write().expect("lock poisoned");
        Ok(map.remove(key).is_some())
    }
}

impl std::fmt::Debug for InMemoryBlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.len();
        f.debug_struct("InMemoryBlobStore")
            .field("blob_count", &count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> ObjectKey {
        ObjectKey::new(s).unwrap()
    }

    // -----------------------------------------------------------------------
    // Core put/get
    // -----------------------------------------------------------------------

    #[test]
    fn put_and_get() {
        let store = InMemoryBlobStore::new();
        let k = key("v/a/1/aa");
        store.put(&k, Bytes::from_static(b"encrypted")).unwrap();

        let read_back = store.get(&k).unwrap().expect("should exist");
        assert_eq!(read_back, Bytes::from_static(b"encrypted"));
    }

    #[test]
    fn get_missing_returns_none() {
        let store = InMemoryBlobStore::new();
        assert!(store.get(&key("v/none")).unwrap().is_none());
    }

    // -----------------------------------------------------------------------
    // Put idempotency and key occupation
    // -----------------------------------------------------------------------

    #[test]
    fn put_same_content_is_idempotent() {
        let store = InMemoryBlobStore::new();
        let k = key("v/a/1/aa");
        store.put(&k, Bytes::from_static(b"same")).unwrap();
        store.put(&k, Bytes::from_static(b"same")).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn put_different_content_is_rejected() {
        let store = InMemoryBlobStore::new();
        let k = key("v/a/1/aa");
        store.put(&k, Bytes::from_static(b"first")).unwrap();

        let err = store.put(&k, Bytes::from_static(b"second")).unwrap_err();
        assert!(matches!(err, BlobError::KeyOccupied { .. }));
        assert!(!err.is_retryable());

        // Original content is untouched.
        let read_back = store.get(&k).unwrap().unwrap();
        assert_eq!(read_back, Bytes::from_static(b"first"));
    }

    // -----------------------------------------------------------------------
    // Exists / Delete
    // -----------------------------------------------------------------------

    #[test]
    fn exists_tracks_presence() {
        let store = InMemoryBlobStore::new();
        let k = key("v/a/1/aa");
        assert!(!store.exists(&k).unwrap());
        store.put(&k, Bytes::from_static(b"x")).unwrap();
        assert!(store.exists(&k).unwrap());
    }

    #[test]
    fn delete_present_blob() {
        let store = InMemoryBlobStore::new();
        let k = key("v/a/1/aa");
        store.put(&k, Bytes::from_static(b"x")).unwrap();

        assert!(store.delete(&k).unwrap()); // was present
        assert!(!store.exists(&k).unwrap()); // now gone
        assert!(!store.delete(&k).unwrap()); // second delete = false
    }

    #[test]
    fn delete_missing_blob() {
        let store = InMemoryBlobStore::new();
        assert!(!store.delete(&key("v/ghost")).unwrap());
    }

    // -----------------------------------------------------------------------
    // Utility methods
    // -----------------------------------------------------------------------

    #[test]
    fn len_and_is_empty() {
        let store = InMemoryBlobStore::new();
        assert!(store.is_empty());
        store.put(&key("v/a"), Bytes::from_static(b"a")).unwrap();
        assert!(!store.is_empty());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn total_bytes() {
        let store = InMemoryBlobStore::new();
        store.put(&key("v/a"), Bytes::from_static(b"12345")).unwrap(); // 5 bytes
        store.put(&key("v/b"), Bytes::from_static(b"123456789")).unwrap(); // 9 bytes
        assert_eq!(store.total_bytes(), 14);
    }

    #[test]
    fn keys_are_sorted() {
        let store = InMemoryBlobStore::new();
        store.put(&key("v/c"), Bytes::from_static(b"3")).unwrap();
        store.put(&key("v/a"), Bytes::from_static(b"1")).unwrap();
        store.put(&key("v/b"), Bytes::from_static(b"2")).unwrap();

        let keys = store.keys();
        assert_eq!(keys.len(), 3);
        for w in keys.windows(2) {
            assert!(w[0] <= w[1]);
        }
    }

    #[test]
    fn clear_removes_all() {
        let store = InMemoryBlobStore::new();
        store.put(&key("v/a"), Bytes::from_static(b"a")).unwrap();
        store.put(&key("v/b"), Bytes::from_static(b"b")).unwrap();
        store.clear();
        assert!(store.is_empty());
    }

    // -----------------------------------------------------------------------
    // Concurrent access
    // -----------------------------------------------------------------------

    #[test]
    fn concurrent_reads_are_safe() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(InMemoryBlobStore::new());
        let k = key("v/shared");
        store.put(&k, Bytes::from_static(b"shared data")).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                let k = k.clone();
                thread::spawn(move || {
                    let result = store.get(&k).unwrap();
                    assert_eq!(result.unwrap(), Bytes::from_static(b"shared data"));
                })
            })
            .collect();

        for h in handles {
            h.join().expect("thread should not panic");
        }
    }

    #[test]
    fn parallel_puts_on_distinct_keys() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(InMemoryBlobStore::new());
        let handles: Vec<_> = (0..8u8)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    let k = ObjectKey::new(format!("v/parallel/{i}")).unwrap();
                    store.put(&k, Bytes::from(vec![i; 16])).unwrap();
                })
            })
            .collect();

        for h in handles {
            h.join().expect("thread should not panic");
        }
        assert_eq!(store.len(), 8);
    }

    // -----------------------------------------------------------------------
    // Debug
    // -----------------------------------------------------------------------

    #[test]
    fn debug_format() {
        let store = InMemoryBlobStore::new();
        store.put(&key("v/x"), Bytes::from_static(b"x")).unwrap();
        let debug = format!("{store:?}");
        assert!(debug.contains("InMemoryBlobStore"));
        assert!(debug.contains("blob_count"));
    }
}
