//! Key-addressed blob storage for Coffer.
//!
//! This crate is the adapter boundary to the content backend that holds
//! encrypted vault version payloads. The store is a pure key/value blob
//! interface with strong read-after-write consistency per key -- it never
//! interprets content and carries no business logic.
//!
//! # Design Rules
//!
//! 1. Keys are generated by the coordinator, unique per upload attempt.
//! 2. `put` is idempotent for identical key+content; overwriting a key with
//!    different content is a caller error, not a silent replace.
//! 3. Blobs are never mutated; a new version means a new key.
//! 4. `delete` exists for retention/garbage collection only -- normal
//!    version creation never deletes.
//! 5. Transient backend failures surface as [`BlobError::Backend`] and are
//!    retryable by the caller; nothing is silently swallowed.
//!
//! # Backends
//!
//! All backends implement the [`BlobStore`] trait:
//!
//! - [`InMemoryBlobStore`] -- `HashMap`-based store for tests and embedding

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{BlobError, BlobResult};
pub use memory::InMemoryBlobStore;
pub use traits::BlobStore;
