use std::collections::HashMap;
use std::sync::{Mutex, RwLock};

use bytes::Bytes;
use rand::Rng;
use tracing::{debug, info};

use coffer_blob::BlobStore;
use coffer_digest::ContentDigest;
use coffer_ledger::{CandidateVersion, LedgerError, LedgerReader, LedgerWriter, Page, VersionPage};
use coffer_types::{ObjectKey, UserId, Vault, VaultId, VaultVersion, VersionId};

use crate::config::CoordinatorConfig;
use crate::error::VaultError;
use crate::upload::{UploadPhase, UploadRequest};

/// The only client entry point into the vault store.
///
/// Composes the checksum engine, blob store, and version ledger into the
/// upload workflow and the read paths. Holds the vault registry and the
/// orphan-key queue for garbage collection.
///
/// The coordinator itself takes no per-vault locks: blob writes proceed in
/// parallel (keys are unique per attempt) and the ledger's append is the
/// sole serialization point.
pub struct VaultCoordinator<L, B> {
    ledger: L,
    blobs: B,
    vaults: RwLock<HashMap<VaultId, Vault>>,
    orphans: Mutex<Vec<ObjectKey>>,
    config: CoordinatorConfig,
}

/// Log and perform one state-machine transition.
fn advance(vault: VaultId, phase: &mut UploadPhase, next: UploadPhase) {
    debug!(vault = %vault, from = %phase, to = %next, "upload phase");
    *phase = next;
}

impl<L, B> VaultCoordinator<L, B>
where
    L: LedgerWriter + LedgerReader,
    B: BlobStore,
{
    /// Create a coordinator over the given ledger and blob store.
    pub fn new(ledger: L, blobs: B, config: CoordinatorConfig) -> Self {
        Self {
            ledger,
            blobs,
            vaults: RwLock::new(HashMap::new()),
            orphans: Mutex::new(Vec::new()),
            config,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Vault lifecycle
    // -----------------------------------------------------------------------

    /// Register a new vault owned by the given user.
    pub fn create_vault(&self, owner: UserId) -> Vault {
        let vault = Vault::new(owner);
        self.vaults
            .write()
            .expect("vault registry lock poisoned")
            .insert(vault.id, vault.clone());
        info!(vault = %vault.id, owner = %owner, "vault created");
        vault
    }

    /// Look up a vault record.
    pub fn vault(&self, vault: VaultId) -> Option<Vault> {
        self.vaults
            .read()
            .expect("vault registry lock poisoned")
            .get(&vault)
            .cloned()
    }

    /// All vaults owned by the given user, oldest first.
    pub fn vaults_for(&self, owner: UserId) -> Vec<Vault> {
        let mut vaults: Vec<Vault> = self
            .vaults
            .read()
            .expect("vault registry lock poisoned")
            .values()
            .filter(|v| v.owner == owner)
            .cloned()
            .collect();
        vaults.sort_by_key(|v| (v.created_at, v.id));
        vaults
    }

    /// Delete a vault: retire its version stream, unregister it, and queue
    /// every version's blob key for garbage collection. Returns the number
    /// of versions retired.
    pub fn delete_vault(&self, vault: VaultId) -> Result<u64, VaultError> {
        self.require_vault(vault)?;

        // A vault that never received an upload has no stream to retire.
        let keys = match self.ledger.retire(vault) {
            Ok(keys) => keys,
            Err(LedgerError::VaultNotFound { .. }) => Vec::new(),
            Err(err) => return Err(err.into()),
        };

        self.vaults
            .write()
            .expect("vault registry lock poisoned")
            .remove(&vault);

        let retired = keys.len() as u64;
        if !keys.is_empty() {
            self.orphans
                .lock()
                .expect("orphan queue lock poisoned")
                .extend(keys);
        }

        info!(vault = %vault, versions = retired, "vault deleted");
        Ok(retired)
    }

    // -----------------------------------------------------------------------
    // Upload
    // -----------------------------------------------------------------------

    /// Store a new vault version.
    ///
    /// Runs the upload state machine; see the crate docs for the phase
    /// diagram. On a head conflict the already-written blob is queued for
    /// garbage collection and the error carries the vault's true current
    /// head so the client can fetch-and-merge, then retry.
    pub fn upload(&self, request: UploadRequest) -> Result<VaultVersion, VaultError> {
        let vault = request.vault_id;
        let mut phase = UploadPhase::Received;
        debug!(vault = %vault, phase = %phase, size = request.content.len(), "upload received");

        // Validation: no side effects before this point.
        if self.vault(vault).is_none() {
            advance(vault, &mut phase, UploadPhase::Rejected);
            return Err(VaultError::UnknownVault { vault });
        }
        if request.content.is_empty() {
            advance(vault, &mut phase, UploadPhase::Rejected);
            return Err(VaultError::Validation("content must not be empty".into()));
        }
        if request.content.len() > self.config.max_content_bytes {
            advance(vault, &mut phase, UploadPhase::Rejected);
            return Err(VaultError::Validation(format!(
                "content of {} bytes exceeds limit of {} bytes",
                request.content.len(),
                self.config.max_content_bytes
            )));
        }

        // The digest is always computed server-side; a client-supplied
        // checksum is a claim to verify, never a value to trust.
        let computed = ContentDigest::VAULT.compute(&request.content);
        if let Some(supplied) = request.checksum {
            if supplied != computed {
                advance(vault, &mut phase, UploadPhase::Rejected);
                return Err(VaultError::Integrity {
                    expected: supplied,
                    computed,
                });
            }
        }
        advance(vault, &mut phase, UploadPhase::ChecksumVerified);

        let key = self.next_object_key(vault);
        if let Err(err) = self.blobs.put(&key, request.content.clone()) {
            // Nothing durable was written; no orphan to queue.
            advance(vault, &mut phase, UploadPhase::Rejected);
            return Err(err.into());
        }
        advance(vault, &mut phase, UploadPhase::BlobWritten);

        let candidate = CandidateVersion {
            object_key: key.clone(),
            checksum: Some(computed),
            size_bytes: Some(request.content.len() as u64),
            content_modified_at: request.content_modified_at,
        };

        match self.ledger.append(vault, candidate, request.expected_head) {
            Ok(version) => {
                advance(vault, &mut phase, UploadPhase::LedgerCommitted);
                advance(vault, &mut phase, UploadPhase::Done);
                Ok(version)
            }
            Err(LedgerError::Conflict { actual, .. }) => {
                // The blob stays in place -- deleting it here would block
                // the response on another storage round trip. It is inert
                // until the next orphan sweep.
                self.queue_orphan(key);
                advance(vault, &mut phase, UploadPhase::RolledBack);
                Err(VaultError::Conflict {
                    actual_head: actual,
                })
            }
            Err(err) => {
                self.queue_orphan(key);
                advance(vault, &mut phase, UploadPhase::RolledBack);
                Err(err.into())
            }
        }
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// The most recent version of the vault.
    pub fn latest(&self, vault: VaultId) -> Result<VaultVersion, VaultError> {
        self.require_vault(vault)?;
        self.ledger
            .head(vault)?
            .ok_or(VaultError::NoVersions { vault })
    }

    /// A specific historical version.
    pub fn version(
        &self,
        vault: VaultId,
        version: VersionId,
    ) -> Result<VaultVersion, VaultError> {
        self.require_vault(vault)?;
        self.ledger
            .get(vault, version)?
            .ok_or(VaultError::VersionNotFound { vault, version })
    }

    /// One page of version metadata, descending by id. Never touches blob
    /// storage.
    pub fn list_versions(&self, vault: VaultId, page: Page) -> Result<VersionPage, VaultError> {
        self.require_vault(vault)?;
        Ok(self.ledger.list(vault, page)?)
    }

    /// The content bytes of a specific version, re-verified against the
    /// version's checksum before being returned.
    pub fn content(&self, vault: VaultId, version: VersionId) -> Result<Bytes, VaultError> {
        let meta = self.version(vault, version)?;
        let bytes = self
            .blobs
            .get(&meta.object_key)?
            .ok_or(VaultError::MissingBlob {
                key: meta.object_key.clone(),
            })?;

        if let Some(expected) = meta.checksum {
            if !ContentDigest::VAULT.verify(&bytes, &expected) {
                return Err(VaultError::Integrity {
                    expected,
                    computed: ContentDigest::VAULT.compute(&bytes),
                });
            }
        }
        Ok(bytes)
    }

    // -----------------------------------------------------------------------
    // Garbage collection
    // -----------------------------------------------------------------------

    /// Number of blob keys currently queued for collection.
    pub fn orphan_count(&self) -> usize {
        self.orphans.lock().expect("orphan queue lock poisoned").len()
    }

    /// Delete queued orphan blobs from the store. Already-absent keys are
    /// tolerated. On a backend failure the unprocessed keys are re-queued
    /// and the error is surfaced for retry. Returns the number of blobs
    /// actually removed.
    pub fn collect_orphans(&self) -> Result<u64, VaultError> {
        let queued: Vec<ObjectKey> = {
            let mut queue = self.orphans.lock().expect("orphan queue lock poisoned");
            std::mem::take(&mut *queue)
        };

        let mut removed = 0u64;
        for (index, key) in queued.iter().enumerate() {
            match self.blobs.delete(key) {
                Ok(true) => removed += 1,
                Ok(false) => {}
                Err(err) => {
                    self.orphans
                        .lock()
                        .expect("orphan queue lock poisoned")
                        .extend(queued[index..].iter().cloned());
                    return Err(err.into());
                }
            }
        }

        info!(removed, "orphan sweep completed");
        Ok(removed)
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn require_vault(&self, vault: VaultId) -> Result<(), VaultError> {
        if self.vault(vault).is_none() {
            return Err(VaultError::UnknownVault { vault });
        }
        Ok(())
    }

    /// A fresh, collision-free blob key. Unique per upload attempt so
    /// parallel uploads to one vault never contend in the blob store.
    fn next_object_key(&self, vault: VaultId) -> ObjectKey {
        let suffix: u128 = rand::thread_rng().gen();
        let raw = format!("{}/{}/{suffix:032x}", self.config.key_namespace, vault);
        ObjectKey::new(raw).expect("generated object key is never empty")
    }

    fn queue_orphan(&self, key: ObjectKey) {
        debug!(key = %key, "blob orphaned");
        self.orphans
            .lock()
            .expect("orphan queue lock poisoned")
            .push(key);
    }
}

impl<L, B> std::fmt::Debug for VaultCoordinator<L, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let vault_count = self.vaults.read().map(|v| v.len()).unwrap_or(0);
        f.debug_struct("VaultCoordinator")
            .field("vault_count", &vault_count)
            .finish()
    }
}
