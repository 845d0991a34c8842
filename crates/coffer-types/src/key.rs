use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Opaque locator for a content blob in the underlying object store.
///
/// Keys are generated by the vault coordinator, unique per upload attempt,
/// and never derived from content. The blob store treats them as plain
/// strings; the ledger enforces that a key maps to exactly one version.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Wrap a key string. Fails on the empty string -- an empty key can
    /// never address a blob.
    pub fn new(key: impl Into<String>) -> Result<Self, TypeError> {
        let key = key.into();
        if key.is_empty() {
            return Err(TypeError::EmptyObjectKey);
        }
        Ok(Self(key))
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the key, returning the underlying string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectKey({})", self.0)
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_non_empty() {
        let key = ObjectKey::new("v/abc/0001/deadbeef").unwrap();
        assert_eq!(key.as_str(), "v/abc/0001/deadbeef");
    }

    #[test]
    fn new_rejects_empty() {
        let err = ObjectKey::new("").unwrap_err();
        assert_eq!(err, TypeError::EmptyObjectKey);
    }

    #[test]
    fn serde_is_transparent() {
        let key = ObjectKey::new("v/x/1/ff").unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"v/x/1/ff\"");
        let parsed: ObjectKey = serde_json::from_str(&json).unwrap();
        assert_eq!(key, parsed);
    }

    #[test]
    fn display_is_raw_key() {
        let key = ObjectKey::new("v/x/1/ff").unwrap();
        assert_eq!(format!("{key}"), "v/x/1/ff");
    }
}
