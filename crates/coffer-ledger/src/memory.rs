use std::collections::{HashMap, HashSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use coffer_types::{ObjectKey, Timestamp, VaultId, VaultVersion, VersionId};

use crate::error::LedgerError;
use crate::records::{CandidateVersion, Page, VersionPage};
use crate::traits::{LedgerReader, LedgerWriter};

/// In-memory version ledger for tests, local demos, and embedding.
///
/// One `RwLock` guards the whole stream map: the write lock is the
/// per-vault serialization point, so the expected-head check, id
/// assignment, record insert, and head advance happen as one atomic unit.
/// Readers take the read lock and always observe complete appends.
pub struct InMemoryLedger {
    inner: RwLock<LedgerState>,
}

#[derive(Default)]
struct LedgerState {
    streams: HashMap<VaultId, Stream>,
    /// Every object key ever bound to a version. Keys stay bound after
    /// retirement -- a key is never reused, even across vault lifetimes.
    bound_keys: HashSet<ObjectKey>,
}

#[derive(Default)]
struct Stream {
    versions: Vec<VaultVersion>,
    retired: bool,
}

impl Stream {
    fn head_id(&self) -> Option<VersionId> {
        self.versions.last().map(|v| v.id)
    }

    fn last_created_at(&self) -> Timestamp {
        self.versions
            .last()
            .map(|v| v.created_at)
            .unwrap_or(Timestamp::zero())
    }
}

impl InMemoryLedger {
    /// Create a new empty ledger.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(LedgerState::default()),
        }
    }

    fn read_state(&self) -> Result<RwLockReadGuard<'_, LedgerState>, LedgerError> {
        self.inner
            .read()
            .map_err(|_| LedgerError::Internal("ledger read lock poisoned".into()))
    }

    fn write_state(&self) -> Result<RwLockWriteGuard<'_, LedgerState>, LedgerError> {
        self.inner
            .write()
            .map_err(|_| LedgerError::Internal("ledger write lock poisoned".into()))
    }

    /// Audit a vault's stream: gapless 1-based ids, matching back-references,
    /// non-decreasing `created_at`, and unique object keys.
    pub fn validate_stream(&self, vault: VaultId) -> Result<(), LedgerError> {
        let state = self.read_state()?;
        let Some(stream) = state.streams.get(&vault) else {
            return Ok(());
        };

        let mut seen_keys = HashSet::new();
        let mut prev_created = Timestamp::zero();

        for (index, version) in stream.versions.iter().enumerate() {
            let expected_id = (index + 1) as u64;
            if version.id.get() != expected_id {
                return Err(LedgerError::Integrity {
                    version: version.id.get(),
                    reason: format!("expected id {expected_id}, found {}", version.id),
                });
            }
            if version.vault_id != vault {
                return Err(LedgerError::Integrity {
                    version: version.id.get(),
                    reason: "back-reference names a different vault".into(),
                });
            }
            if version.created_at < prev_created {
                return Err(LedgerError::Integrity {
                    version: version.id.get(),
                    reason: "created_at moved backwards".into(),
                });
            }
            if !seen_keys.insert(version.object_key.clone()) {
                return Err(LedgerError::Integrity {
                    version: version.id.get(),
                    reason: format!("object key reused: {}", version.object_key),
                });
            }
            prev_created = version.created_at;
        }

        Ok(())
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerWriter for InMemoryLedger {
    fn append(
        &self,
        vault: VaultId,
        candidate: CandidateVersion,
        expected_head: Option<VersionId>,
    ) -> Result<VaultVersion, LedgerError> {
        let mut guard = self.write_state()?;
        let state = &mut *guard;

        if let Some(stream) = state.streams.get(&vault) {
            if stream.retired {
                return Err(LedgerError::VaultRetired { vault });
            }
        }

        // The optimistic-concurrency check: the client's claim about the
        // head must match reality, else it is about to overwrite changes it
        // never saw.
        let actual = state.streams.get(&vault).and_then(Stream::head_id);
        if expected_head != actual {
            return Err(LedgerError::Conflict {
                expected: expected_head,
                actual,
            });
        }

        if state.bound_keys.contains(&candidate.object_key) {
            return Err(LedgerError::DuplicateObjectKey {
                key: candidate.object_key,
            });
        }

        // Commit point. Still inside the same critical section as the
        // check above: id assignment and head advance are atomic with it.
        let stream = state.streams.entry(vault).or_default();
        let id = actual.map(|head| head.next()).unwrap_or(VersionId::first());
        let created_at = Timestamp::now().max(stream.last_created_at());

        let version = VaultVersion {
            id,
            vault_id: vault,
            object_key: candidate.object_key.clone(),
            checksum: candidate.checksum,
            size_bytes: candidate.size_bytes,
            created_at,
            content_modified_at: candidate.content_modified_at,
        };

        stream.versions.push(version.clone());
        state.bound_keys.insert(candidate.object_key);

        debug!(vault = %vault, version = id.get(), "version appended");
        Ok(version)
    }

    fn retire(&self, vault: VaultId) -> Result<Vec<ObjectKey>, LedgerError> {
        let mut state = self.write_state()?;
        let stream = state
            .streams
            .get_mut(&vault)
            .filter(|s| !s.retired)
            .ok_or(LedgerError::VaultNotFound { vault })?;

        stream.retired = true;
        let keys: Vec<ObjectKey> = stream
            .versions
            .iter()
            .map(|v| v.object_key.clone())
            .collect();

        debug!(vault = %vault, versions = keys.len(), "stream retired");
        Ok(keys)
    }
}

impl LedgerReader for InMemoryLedger {
    fn head(&self, vault: VaultId) -> Result<Option<VaultVersion>, LedgerError> {
        let state = self.read_state()?;
        match state.streams.get(&vault) {
            None => Ok(None),
            Some(stream) if stream.retired => Err(LedgerError::VaultNotFound { vault }),
            Some(stream) => Ok(stream.versions.last().cloned()),
        }
    }

    fn get(
        &self,
        vault: VaultId,
        version: VersionId,
    ) -> Result<Option<VaultVersion>, LedgerError> {
        let state = self.read_state()?;
        match state.streams.get(&vault) {
            None => Ok(None),
            Some(stream) if stream.retired => Err(LedgerError::VaultNotFound { vault }),
            Some(stream) => {
                // Ids are gapless and 1-based: version N is at index N-1.
                let index = version.get().checked_sub(1).map(|i| i as usize);
                Ok(index.and_then(|i| stream.versions.get(i)).cloned())
            }
        }
    }

    fn list(&self, vault: VaultId, page: Page) -> Result<VersionPage, LedgerError> {
        if page.limit == 0 {
            return Err(LedgerError::InvalidPage {
                reason: "limit must be at least 1".into(),
            });
        }

        let state = self.read_state()?;
        let stream = match state.streams.get(&vault) {
            None => return Ok(VersionPage::empty()),
            Some(stream) if stream.retired => {
                return Err(LedgerError::VaultNotFound { vault })
            }
            Some(stream) => stream,
        };

        let versions: Vec<VaultVersion> = stream
            .versions
            .iter()
            .rev()
            .filter(|v| page.before.map_or(true, |cursor| v.id < cursor))
            .take(page.limit)
            .cloned()
            .collect();

        // The stream is gapless, so more versions remain exactly when a
        // full page was returned and its oldest entry is not version 1.
        let next = match versions.last() {
            Some(oldest) if versions.len() == page.limit && oldest.id > VersionId::first() => {
                Some(oldest.id)
            }
            _ => None,
        };

        Ok(VersionPage { versions, next })
    }

    fn version_count(&self, vault: VaultId) -> Result<u64, LedgerError> {
        let state = self.read_state()?;
        match state.streams.get(&vault) {
            None => Ok(0),
            Some(stream) if stream.retired => Err(LedgerError::VaultNotFound { vault }),
            Some(stream) => Ok(stream.versions.len() as u64),
        }
    }
}

impl std::fmt::Debug for InMemoryLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self
            .inner
            .read()
            .map(|state| state.streams.len())
            .unwrap_or(0);
        f.debug_struct("InMemoryLedger")
            .field("stream_count", &count)
            .finish()
    }
}
