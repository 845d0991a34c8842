use coffer_types::ObjectKey;

/// Errors from blob store operations.
#[derive(Debug, thiserror::Error)]
pub enum BlobError {
    /// The key already holds different content. Keys are unique per upload
    /// attempt, so this is a caller bug, never a retry candidate.
    #[error("key already occupied with different content: {key}")]
    KeyOccupied { key: ObjectKey },

    /// Transient backend failure. Retryable by the caller with backoff.
    #[error("blob backend error: {0}")]
    Backend(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BlobError {
    /// Returns `true` if the operation may succeed on retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Backend(_) | Self::Io(_))
    }
}

/// Result alias for blob store operations.
pub type BlobResult<T> = Result<T, BlobError>;
