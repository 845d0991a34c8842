use coffer_types::Checksum;

/// Domain-separated BLAKE3 content digester.
///
/// Each digester carries a domain tag (e.g. `"coffer-vault-v1"`) that is
/// prepended to every computation. This prevents cross-type collisions: a
/// vault payload and any other record with identical bytes will produce
/// different checksums.
pub struct ContentDigest {
    domain: &'static str,
}

impl ContentDigest {
    /// Digester for encrypted vault payload blobs.
    pub const VAULT: Self = Self {
        domain: "coffer-vault-v1",
    };

    /// Create a digester with a custom domain tag.
    pub const fn new(domain: &'static str) -> Self {
        Self { domain }
    }

    /// Compute the checksum of `data` with domain separation.
    ///
    /// Deterministic: the same input always yields the same checksum.
    pub fn compute(&self, data: &[u8]) -> Checksum {
        let mut writer = self.writer();
        writer.update(data);
        writer.finalize()
    }

    /// Verify that `data` produces the expected checksum.
    ///
    /// Fails closed: returns `false` on mismatch and on empty input,
    /// never panics. An empty payload can never be a valid vault snapshot,
    /// so an empty stream verifies against nothing.
    pub fn verify(&self, data: &[u8], expected: &Checksum) -> bool {
        if data.is_empty() {
            return false;
        }
        self.compute(data) == *expected
    }

    /// Start a streaming digest for content that arrives in chunks.
    pub fn writer(&self) -> DigestWriter {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        DigestWriter { hasher }
    }

    /// The domain tag used by this digester.
    pub fn domain(&self) -> &str {
        self.domain
    }
}

/// Incremental digest over a byte stream.
///
/// Created by [`ContentDigest::writer`]; the domain tag is already mixed in.
pub struct DigestWriter {
    hasher: blake3::Hasher,
}

impl DigestWriter {
    /// Feed a chunk of content.
    pub fn update(&mut self, chunk: &[u8]) {
        self.hasher.update(chunk);
    }

    /// Finish and produce the checksum.
    pub fn finalize(self) -> Checksum {
        Checksum::from_raw(*self.hasher.finalize().as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn compute_is_deterministic() {
        let data = b"encrypted vault bytes";
        let c1 = ContentDigest::VAULT.compute(data);
        let c2 = ContentDigest::VAULT.compute(data);
        assert_eq!(c1, c2);
    }

    #[test]
    fn different_domains_produce_different_checksums() {
        let data = b"same content";
        let vault = ContentDigest::VAULT.compute(data);
        let other = ContentDigest::new("coffer-test-v1").compute(data);
        assert_ne!(vault, other);
    }

    #[test]
    fn verify_correct_data() {
        let data = b"payload";
        let checksum = ContentDigest::VAULT.compute(data);
        assert!(ContentDigest::VAULT.verify(data, &checksum));
    }

    #[test]
    fn verify_tampered_data() {
        let checksum = ContentDigest::VAULT.compute(b"original");
        assert!(!ContentDigest::VAULT.verify(b"tampered", &checksum));
    }

    #[test]
    fn verify_empty_stream_fails_closed() {
        // Even the "correct" checksum of the empty string must not verify.
        let checksum = ContentDigest::VAULT.compute(b"");
        assert!(!ContentDigest::VAULT.verify(b"", &checksum));
    }

    #[test]
    fn streaming_matches_one_shot() {
        let mut writer = ContentDigest::VAULT.writer();
        writer.update(b"part one ");
        writer.update(b"part two");
        let streamed = writer.finalize();
        let one_shot = ContentDigest::VAULT.compute(b"part one part two");
        assert_eq!(streamed, one_shot);
    }

    #[test]
    fn domain_tag_is_exposed() {
        assert_eq!(ContentDigest::VAULT.domain(), "coffer-vault-v1");
    }

    proptest! {
        #[test]
        fn verify_accepts_own_checksum(data in proptest::collection::vec(any::<u8>(), 1..512)) {
            let checksum = ContentDigest::VAULT.compute(&data);
            prop_assert!(ContentDigest::VAULT.verify(&data, &checksum));
        }

        #[test]
        fn distinct_inputs_rarely_collide(
            a in proptest::collection::vec(any::<u8>(), 1..128),
            b in proptest::collection::vec(any::<u8>(), 1..128),
        ) {
            prop_assume!(a != b);
            let ca = ContentDigest::VAULT.compute(&a);
            let cb = ContentDigest::VAULT.compute(&b);
            prop_assert_ne!(ca, cb);
        }
    }
}
