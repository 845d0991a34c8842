//! Checksum engine for Coffer.
//!
//! Computes and verifies content digests for vault version payloads. Pure
//! functions over input bytes -- no side effects, no I/O. The coordinator
//! uses this crate to validate client-supplied checksums before trusting
//! them and to re-verify content served back from the blob store.

pub mod digest;

pub use digest::{ContentDigest, DigestWriter};
