//! Foundation types for Coffer, the versioned vault store.
//!
//! This crate provides the identifiers, timestamps, and record types used
//! throughout the Coffer system. Every other Coffer crate depends on
//! `coffer-types`.
//!
//! # Key Types
//!
//! - [`VaultId`] / [`UserId`] -- UUID v7 identifiers (time-ordered)
//! - [`VersionId`] -- ledger-assigned, strictly increasing version number
//! - [`ObjectKey`] -- opaque locator for a content blob
//! - [`Checksum`] -- 32-byte BLAKE3 content digest
//! - [`Timestamp`] -- milliseconds since UNIX epoch
//! - [`Vault`] / [`VaultVersion`] -- the canonical records
//! - [`VersionRow`] / [`VersionPayload`] -- explicit storage-row and
//!   wire-payload projections of a [`VaultVersion`]

pub mod checksum;
pub mod error;
pub mod id;
pub mod key;
pub mod record;
pub mod temporal;

pub use checksum::Checksum;
pub use error::TypeError;
pub use id::{UserId, VaultId, VersionId};
pub use key::ObjectKey;
pub use record::{Vault, VaultVersion, VersionPayload, VersionRow};
pub use temporal::Timestamp;
