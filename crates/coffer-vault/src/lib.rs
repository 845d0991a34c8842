//! Vault coordinator for Coffer.
//!
//! The coordinator is the only entry point for clients. It composes the
//! checksum engine, blob store, and version ledger into the upload workflow
//! and the read paths, and owns the vault registry and orphan-blob
//! bookkeeping.
//!
//! # Upload state machine
//!
//! ```text
//! Received -> ChecksumVerified -> BlobWritten -> LedgerCommitted -> Done
//!     |                                |
//!     v                                v
//!  Rejected                       RolledBack
//! ```
//!
//! - `Rejected`: validation or checksum failure before any side effect.
//! - `RolledBack`: the blob was written but the ledger append failed (head
//!   conflict, most commonly). The blob is left in place and queued for
//!   garbage collection -- it is inert, referenced by no ledger entry, and
//!   the response never waits on a second storage round trip.
//!
//! Every upload reaches a terminal state; no partial version (missing id
//! or timestamp) is ever returned to a caller.

pub mod config;
pub mod coordinator;
pub mod error;
pub mod upload;

pub use config::CoordinatorConfig;
pub use coordinator::VaultCoordinator;
pub use error::VaultError;
pub use upload::{UploadPhase, UploadRequest};
