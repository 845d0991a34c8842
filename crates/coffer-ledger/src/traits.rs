use coffer_types::{ObjectKey, VaultId, VaultVersion, VersionId};

use crate::error::LedgerError;
use crate::records::{CandidateVersion, Page, VersionPage};

/// Write boundary for version ledger append operations.
pub trait LedgerWriter: Send + Sync {
    /// Append a new version to the vault's stream.
    ///
    /// `expected_head` is the client's optimistic-concurrency token: the
    /// last version id it observed, or `None` for a first upload. If it
    /// does not match the stream's real head, the append fails with
    /// [`LedgerError::Conflict`] carrying the true head, and nothing is
    /// written.
    ///
    /// On success the ledger assigns the next sequential id and a
    /// server timestamp, stores the record, and advances the head pointer --
    /// as a single atomic unit. No reader ever observes a partial append.
    fn append(
        &self,
        vault: VaultId,
        candidate: CandidateVersion,
        expected_head: Option<VersionId>,
    ) -> Result<VaultVersion, LedgerError>;

    /// Retire a vault's stream (soft-delete).
    ///
    /// All versions are logically retired at once; subsequent reads answer
    /// [`LedgerError::VaultNotFound`]. Returns the blob keys of the retired
    /// versions so the caller can queue them for garbage collection.
    fn retire(&self, vault: VaultId) -> Result<Vec<ObjectKey>, LedgerError>;
}

/// Read boundary for version ledger queries.
pub trait LedgerReader: Send + Sync {
    /// The most recently appended version, or `Ok(None)` if the vault has
    /// no versions yet.
    fn head(&self, vault: VaultId) -> Result<Option<VaultVersion>, LedgerError>;

    /// A specific historical version, or `Ok(None)` if it does not exist.
    fn get(&self, vault: VaultId, version: VersionId)
        -> Result<Option<VaultVersion>, LedgerError>;

    /// One page of version metadata, descending by id. Restartable via the
    /// returned cursor; never touches blob content.
    fn list(&self, vault: VaultId, page: Page) -> Result<VersionPage, LedgerError>;

    /// Total number of versions in the vault's stream.
    fn version_count(&self, vault: VaultId) -> Result<u64, LedgerError>;
}
