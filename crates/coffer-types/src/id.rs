use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Unique identifier for a vault (UUID v7 for time-ordering).
///
/// A `VaultId` names the logical container independently of its content;
/// it is generated server-side when the vault is created and never reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VaultId(uuid::Uuid);

impl VaultId {
    /// Generate a new time-ordered vault ID (UUID v7).
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7())
    }

    /// Create from an existing UUID.
    pub fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// Parse from the canonical hyphenated string form.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        uuid::Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| TypeError::InvalidUuid(e.to_string()))
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }

    /// Short representation (first 8 characters of UUID).
    pub fn short_id(&self) -> String {
        self.0.to_string()[..8].to_string()
    }
}

impl Default for VaultId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for VaultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VaultId({})", self.short_id())
    }
}

impl fmt::Display for VaultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the user owning a vault (UUID v7).
///
/// Opaque to this subsystem: authentication and account management live in
/// an external collaborator, the vault store only records ownership.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(uuid::Uuid);

impl UserId {
    /// Generate a new time-ordered user ID (UUID v7).
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7())
    }

    /// Create from an existing UUID.
    pub fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserId({})", &self.0.to_string()[..8])
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Version number within a single vault's stream.
///
/// Assigned only by the ledger: 1-based, strictly increasing, gapless.
/// Clients echo a `VersionId` back as their optimistic-concurrency token
/// but never mint one.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VersionId(u64);

impl VersionId {
    /// The first version in any stream.
    pub const fn first() -> Self {
        Self(1)
    }

    /// Wrap a raw version number (e.g. one echoed back by a client).
    pub const fn from_u64(n: u64) -> Self {
        Self(n)
    }

    /// The next sequential version number.
    pub const fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    /// The raw version number.
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VersionId({})", self.0)
    }
}

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vault_id_is_unique() {
        let id1 = VaultId::new();
        let id2 = VaultId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn vault_id_parse_roundtrip() {
        let id = VaultId::new();
        let parsed = VaultId::parse(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn vault_id_parse_rejects_garbage() {
        let err = VaultId::parse("not-a-uuid").unwrap_err();
        assert!(matches!(err, TypeError::InvalidUuid(_)));
    }

    #[test]
    fn vault_ids_are_time_ordered() {
        // UUID v7 embeds a millisecond timestamp; ids minted in sequence
        // never sort backwards.
        let id1 = VaultId::new();
        let id2 = VaultId::new();
        assert!(id1 <= id2);
    }

    #[test]
    fn short_id_is_8_chars() {
        let id = VaultId::new();
        assert_eq!(id.short_id().len(), 8);
    }

    #[test]
    fn version_id_sequence() {
        let first = VersionId::first();
        assert_eq!(first.get(), 1);
        assert_eq!(first.next().get(), 2);
        assert_eq!(first.next().next().get(), 3);
    }

    #[test]
    fn version_id_ordering() {
        assert!(VersionId::from_u64(1) < VersionId::from_u64(2));
        assert_eq!(VersionId::from_u64(5), VersionId::first().next().next().next().next());
    }

    #[test]
    fn version_id_serde_roundtrip() {
        let id = VersionId::from_u64(42);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "42");
        let parsed: VersionId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn user_id_serde_roundtrip() {
        let id = UserId::new();
        let json = serde_json::to_string(&id).unwrap();
        let parsed: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn debug_formats_are_short() {
        let vid = VaultId::new();
        assert!(format!("{vid:?}").starts_with("VaultId("));
        let ver = VersionId::from_u64(7);
        assert_eq!(format!("{ver:?}"), "VersionId(7)");
    }
}
