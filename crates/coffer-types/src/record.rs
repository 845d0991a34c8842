use serde::{Deserialize, Serialize};

use crate::checksum::Checksum;
use crate::error::TypeError;
use crate::id::{UserId, VaultId, VersionId};
use crate::key::ObjectKey;
use crate::temporal::Timestamp;

/// A user's logical password-database container.
///
/// Immutable after creation except for soft-delete (retirement), which is
/// handled by the ledger and coordinator -- the record itself never changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vault {
    pub id: VaultId,
    pub owner: UserId,
    pub created_at: Timestamp,
}

impl Vault {
    /// Create a vault record owned by the given user, stamped now.
    pub fn new(owner: UserId) -> Self {
        Self {
            id: VaultId::new(),
            owner,
            created_at: Timestamp::now(),
        }
    }
}

/// One immutable snapshot of a vault's encrypted content.
///
/// Created only through the coordinator's upload operation; the ledger
/// assigns `id` and `created_at`, and no field is ever updated in place.
/// Changing vault content means appending a new version.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultVersion {
    /// Ledger-assigned, strictly increasing within the vault.
    pub id: VersionId,
    /// Back-reference to the owning vault (lookup only, no ownership).
    pub vault_id: VaultId,
    /// Locator of the encrypted content in the blob store. Unique across
    /// all versions; never reused.
    pub object_key: ObjectKey,
    /// Content digest, present once computed.
    pub checksum: Option<Checksum>,
    /// Byte length of the underlying blob.
    pub size_bytes: Option<u64>,
    /// Server-assigned commit time, set once by the ledger.
    pub created_at: Timestamp,
    /// Client-supplied "content last changed" time. Advisory only -- the
    /// ledger orders by id, and conflicts are detected by head id alone.
    pub content_modified_at: Option<Timestamp>,
}

impl VaultVersion {
    /// Project this version into its persisted-row shape.
    pub fn to_storage_row(&self) -> VersionRow {
        VersionRow {
            id: self.id.get(),
            vault_id: *self.vault_id.as_uuid(),
            object_key: self.object_key.as_str().to_string(),
            checksum: self.checksum.map(|c| *c.as_bytes()),
            size_bytes: self.size_bytes,
            created_at_ms: self.created_at.millis(),
            content_modified_at_ms: self.content_modified_at.map(|t| t.millis()),
        }
    }

    /// Rebuild the canonical record from a persisted row.
    pub fn from_storage_row(row: VersionRow) -> Result<Self, TypeError> {
        Ok(Self {
            id: VersionId::from_u64(row.id),
            vault_id: VaultId::from_uuid(row.vault_id),
            object_key: ObjectKey::new(row.object_key)?,
            checksum: row.checksum.map(Checksum::from_raw),
            size_bytes: row.size_bytes,
            created_at: Timestamp::from_millis(row.created_at_ms),
            content_modified_at: row.content_modified_at_ms.map(Timestamp::from_millis),
        })
    }

    /// Project this version into its wire (API) shape.
    ///
    /// The wire payload deliberately diverges from the storage row: string
    /// ids, hex-encoded checksum, absent optionals omitted entirely, and no
    /// object key -- the locator is internal to the store and clients fetch
    /// content through the coordinator, never by raw key.
    pub fn to_wire_payload(&self) -> VersionPayload {
        VersionPayload {
            version: self.id.get(),
            vault_id: self.vault_id.to_string(),
            checksum: self.checksum.map(|c| c.to_hex()),
            size_bytes: self.size_bytes,
            created_at_ms: self.created_at.millis(),
            content_modified_at_ms: self.content_modified_at.map(|t| t.millis()),
        }
    }
}

/// Persisted-row projection of a [`VaultVersion`].
///
/// Raw ids and raw digest bytes -- the shape the relational store persists.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRow {
    pub id: u64,
    pub vault_id: uuid::Uuid,
    pub object_key: String,
    pub checksum: Option<[u8; 32]>,
    pub size_bytes: Option<u64>,
    pub created_at_ms: u64,
    pub content_modified_at_ms: Option<u64>,
}

/// Wire (API) projection of a [`VaultVersion`].
///
/// What sync clients see: hex checksum, string vault id, no object key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionPayload {
    pub version: u64,
    pub vault_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    pub created_at_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_modified_at_ms: Option<u64>,
}
