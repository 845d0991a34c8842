use std::fmt;

use bytes::Bytes;

use coffer_types::{Checksum, Timestamp, VaultId, VersionId};

/// A client's request to store a new vault version.
#[derive(Clone, Debug)]
pub struct UploadRequest {
    /// Target vault.
    pub vault_id: VaultId,
    /// Optimistic-concurrency token: the last version id this client
    /// observed, or `None` for a first upload.
    pub expected_head: Option<VersionId>,
    /// Client-computed checksum of `content`, verified server-side before
    /// being trusted.
    pub checksum: Option<Checksum>,
    /// When the client last changed the underlying vault content.
    /// Advisory metadata, stored verbatim.
    pub content_modified_at: Option<Timestamp>,
    /// The encrypted vault payload.
    pub content: Bytes,
}

impl UploadRequest {
    /// A minimal request: content plus the concurrency token.
    pub fn new(vault_id: VaultId, expected_head: Option<VersionId>, content: Bytes) -> Self {
        Self {
            vault_id,
            expected_head,
            checksum: None,
            content_modified_at: None,
            content,
        }
    }
}

/// Phase of an upload as it moves through the coordinator.
///
/// Every upload ends in one of the terminal phases; a blob written during
/// an upload that ends in `RolledBack` is orphaned and queued for garbage
/// collection, never referenced by the ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UploadPhase {
    /// Request accepted for processing; nothing validated yet.
    Received,
    /// Content digest computed and any supplied checksum matched.
    ChecksumVerified,
    /// Content is durable in the blob store under a fresh key.
    BlobWritten,
    /// The ledger accepted the append and advanced the head.
    LedgerCommitted,
    /// Terminal: the persisted version was returned to the caller.
    Done,
    /// Terminal: validation or checksum failure before any side effect.
    Rejected,
    /// Terminal: ledger append failed after the blob write; the blob is
    /// orphaned and eligible for collection.
    RolledBack,
}

impl UploadPhase {
    /// Returns `true` for phases an upload can end in.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Rejected | Self::RolledBack)
    }
}

impl fmt::Display for UploadPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Received => "received",
            Self::ChecksumVerified => "checksum-verified",
            Self::BlobWritten => "blob-written",
            Self::LedgerCommitted => "ledger-committed",
            Self::Done => "done",
            Self::Rejected => "rejected",
            Self::RolledBack => "rolled-back",
        };
        write!(f, "{name}")
    }
}
