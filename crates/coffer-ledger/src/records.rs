use serde::{Deserialize, Serialize};

use coffer_types::{Checksum, ObjectKey, Timestamp, VaultVersion, VersionId};

/// Input to [`crate::LedgerWriter::append`]: everything the caller knows
/// about the version-to-be. The ledger assigns `id` and `created_at`;
/// neither is ever caller-supplied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateVersion {
    /// Blob locator, already written by the coordinator. Must be unique
    /// across all versions.
    pub object_key: ObjectKey,
    /// Content digest, if computed.
    pub checksum: Option<Checksum>,
    /// Byte length of the blob.
    pub size_bytes: Option<u64>,
    /// Client-supplied "content last changed" time. Stored verbatim, never
    /// consulted for conflict detection.
    pub content_modified_at: Option<Timestamp>,
}

impl CandidateVersion {
    /// A candidate carrying only the blob locator.
    pub fn new(object_key: ObjectKey) -> Self {
        Self {
            object_key,
            checksum: None,
            size_bytes: None,
            content_modified_at: None,
        }
    }
}

/// One page of a version listing.
///
/// `limit` bounds the page size; `before` resumes a prior listing: only
/// versions with id strictly below it are returned. `None` starts from the
/// head.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub limit: usize,
    pub before: Option<VersionId>,
}

impl Page {
    /// The first page of a listing.
    pub const fn first(limit: usize) -> Self {
        Self {
            limit,
            before: None,
        }
    }

    /// The page resuming below the given cursor.
    pub const fn before(limit: usize, cursor: VersionId) -> Self {
        Self {
            limit,
            before: Some(cursor),
        }
    }
}

/// Result of one [`crate::LedgerReader::list`] call: version metadata in
/// descending id order, plus the cursor to resume from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionPage {
    /// Version metadata, descending by id. Never includes blob content.
    pub versions: Vec<VaultVersion>,
    /// Cursor for the next page; `None` when the listing is exhausted.
    pub next: Option<VersionId>,
}

impl VersionPage {
    /// An empty, exhausted page.
    pub fn empty() -> Self {
        Self {
            versions: Vec::new(),
            next: None,
        }
    }

    /// Returns `true` if no further pages remain.
    pub fn is_last(&self) -> bool {
        self.next.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_new_has_no_metadata() {
        let key = ObjectKey::new("v/a/1/aa").unwrap();
        let candidate = CandidateVersion::new(key.clone());
        assert_eq!(candidate.object_key, key);
        assert!(candidate.checksum.is_none());
        assert!(candidate.size_bytes.is_none());
        assert!(candidate.content_modified_at.is_none());
    }

    #[test]
    fn page_constructors() {
        let first = Page::first(20);
        assert_eq!(first.limit, 20);
        assert!(first.before.is_none());

        let resumed = Page::before(20, VersionId::from_u64(7));
        assert_eq!(resumed.before, Some(VersionId::from_u64(7)));
    }

    #[test]
    fn empty_page_is_last() {
        let page = VersionPage::empty();
        assert!(page.is_last());
        assert!(page.versions.is_empty());
    }
}
