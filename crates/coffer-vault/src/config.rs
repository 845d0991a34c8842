/// Configuration for the [`crate::VaultCoordinator`].
#[derive(Clone, Debug)]
pub struct CoordinatorConfig {
    /// Maximum accepted content size per upload, in bytes. Uploads above
    /// this are rejected before any side effect.
    pub max_content_bytes: usize,
    /// Prefix for generated object keys. Lets multiple deployments share
    /// one blob backend without key collisions.
    pub key_namespace: String,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            // Encrypted KDBX files are typically well under a megabyte;
            // 64 MiB leaves room for large attachment-heavy vaults.
            max_content_bytes: 64 * 1024 * 1024,
            key_namespace: "v".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let config = CoordinatorConfig::default();
        assert_eq!(config.max_content_bytes, 64 * 1024 * 1024);
        assert_eq!(config.key_namespace, "v");
    }
}
