use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Wall-clock timestamp: milliseconds since UNIX epoch.
///
/// Server-assigned `created_at` values are produced inside the ledger's
/// per-vault critical section and are monotonically non-decreasing within a
/// stream. Client-supplied `content_modified_at` values are carried
/// verbatim as advisory metadata -- ordering is by version id, never by
/// timestamp.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Create a timestamp from explicit epoch milliseconds.
    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    /// The current wall-clock time.
    pub fn now() -> Self {
        let ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;
        Self(ms)
    }

    /// The zero timestamp (epoch).
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Milliseconds since UNIX epoch.
    pub const fn millis(&self) -> u64 {
        self.0
    }

    /// The later of `self` and `other`. Used by the ledger to keep
    /// `created_at` non-decreasing even if the wall clock steps backwards.
    pub fn max(self, other: Self) -> Self {
        if other.0 > self.0 {
            other
        } else {
            self
        }
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({}ms)", self.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_produces_reasonable_timestamp() {
        let ts = Timestamp::now();
        // Should be after 2020-01-01 (1577836800000 ms)
        assert!(ts.millis() > 1_577_836_800_000);
    }

    #[test]
    fn zero_is_smallest() {
        let zero = Timestamp::zero();
        let any = Timestamp::from_millis(1);
        assert!(zero < any);
    }

    #[test]
    fn max_picks_later() {
        let a = Timestamp::from_millis(100);
        let b = Timestamp::from_millis(200);
        assert_eq!(a.max(b), b);
        assert_eq!(b.max(a), b);
        assert_eq!(a.max(a), a);
    }

    #[test]
    fn ordering_is_by_millis() {
        assert!(Timestamp::from_millis(5) < Timestamp::from_millis(6));
    }

    #[test]
    fn serde_roundtrip() {
        let ts = Timestamp::from_millis(1234567890);
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "1234567890");
        let parsed: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(ts, parsed);
    }
}
