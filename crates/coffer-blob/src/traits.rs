use bytes::Bytes;
use coffer_types::ObjectKey;

use crate::error::BlobResult;

/// Durable key-addressed storage of version content.
///
/// All implementations must satisfy these invariants:
/// - `put` with the same key and identical content is a no-op (idempotent);
///   `put` with the same key and different content fails with
///   `KeyOccupied` -- keys are unique per version attempt.
/// - Strong read-after-write consistency per key: a successful `put` is
///   immediately visible to `get` and `exists`.
/// - Concurrent reads are always safe (blobs are immutable once written).
/// - The store never interprets blob contents.
/// - All backend errors are propagated, never silently ignored.
pub trait BlobStore: Send + Sync {
    /// Write content under the given key.
    fn put(&self, key: &ObjectKey, content: Bytes) -> BlobResult<()>;

    /// Read content by key.
    ///
    /// Returns `Ok(None)` if no blob exists under the key.
    /// Returns `Err` on backend failure.
    fn get(&self, key: &ObjectKey) -> BlobResult<Option<Bytes>>;

    /// Check whether a blob exists under the key.
    fn exists(&self, key: &ObjectKey) -> BlobResult<bool>;

    /// Delete a blob by key. Returns `true` if the blob existed.
    ///
    /// This is intended for retention/garbage collection only. Deleting a
    /// blob still referenced by a ledger entry corrupts the vault.
    fn delete(&self, key: &ObjectKey) -> BlobResult<bool>;
}
