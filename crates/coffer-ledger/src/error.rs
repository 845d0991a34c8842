use coffer_types::{ObjectKey, VaultId, VersionId};

/// Errors produced by ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// The client's expected head is stale. Carries the stream's true
    /// current head so the client can fetch-and-merge, then retry.
    #[error("head conflict: expected {expected:?}, actual {actual:?}")]
    Conflict {
        expected: Option<VersionId>,
        actual: Option<VersionId>,
    },

    /// The vault's stream has been retired (soft-deleted).
    #[error("vault not found: {vault}")]
    VaultNotFound { vault: VaultId },

    /// Append attempted against a retired stream.
    #[error("vault is retired: {vault}")]
    VaultRetired { vault: VaultId },

    /// The candidate's object key is already bound to another version.
    /// Keys are unique per version; the blob is never reused.
    #[error("object key already bound to a version: {key}")]
    DuplicateObjectKey { key: ObjectKey },

    /// Malformed pagination request.
    #[error("invalid page: {reason}")]
    InvalidPage { reason: String },

    /// Stream audit failure: gapless ordering, back-references, or key
    /// uniqueness violated. Indicates corruption, not a caller error.
    #[error("stream integrity violation at version {version}: {reason}")]
    Integrity { version: u64, reason: String },

    /// Internal invariant failure (e.g. a poisoned lock).
    #[error("internal ledger error: {0}")]
    Internal(String),
}
