use coffer_blob::BlobError;
use coffer_ledger::LedgerError;
use coffer_types::{Checksum, ObjectKey, VaultId, VersionId};

/// Errors surfaced by the vault coordinator.
#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    /// The client's expected head is stale. Carries the vault's true
    /// current head so the client can fetch-and-merge, then retry.
    #[error("version conflict: current head is {actual_head:?}")]
    Conflict { actual_head: Option<VersionId> },

    /// Supplied checksum does not match content. A hard validation failure
    /// on upload; storage corruption when raised on a content read.
    #[error("checksum mismatch: expected {expected}, computed {computed}")]
    Integrity {
        expected: Checksum,
        computed: Checksum,
    },

    /// The vault does not exist (or has been deleted).
    #[error("unknown vault: {vault}")]
    UnknownVault { vault: VaultId },

    /// The vault exists but has no versions yet.
    #[error("vault {vault} has no versions")]
    NoVersions { vault: VaultId },

    /// The requested version does not exist in the vault's stream.
    #[error("version {version} not found in vault {vault}")]
    VersionNotFound { vault: VaultId, version: VersionId },

    /// A ledger-committed version's blob is missing from the store. This
    /// violates the commit invariant and indicates backend data loss.
    #[error("blob missing for committed version: {key}")]
    MissingBlob { key: ObjectKey },

    /// Malformed request, rejected before any side effect.
    #[error("invalid request: {0}")]
    Validation(String),

    /// Ledger failure other than a head conflict.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Blob store failure.
    #[error(transparent)]
    Store(#[from] BlobError),
}

impl VaultError {
    /// Returns `true` if the operation may succeed on retry with backoff.
    /// Conflicts are recoverable too, but only after the client refreshes
    /// its head -- they are deliberately not marked retryable here.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Store(err) => err.is_retryable(),
            Self::Ledger(LedgerError::Internal(_)) => true,
            _ => false,
        }
    }
}
