//! Error types for the interception layer.

use thiserror::Error;

/// Errors surfaced by the interception layer.
///
/// A lookup that finds nothing is the defined cache-miss path and an absent
/// directive or key prefix is the defined bypass path; neither is an error.
/// These variants cover genuine backend failures and failures to encode or
/// decode a stored entry. The layer never retries a failed backend
/// operation and never falls back to a second invocation of the real logic.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The backend reported a failure for a get or set operation.
    #[error("cache backend operation failed: {message}")]
    Backend { message: String },

    /// A result could not be encoded for storage, or a stored entry could
    /// not be decoded as the expected result type.
    #[error("cache entry codec failed for key '{key}'")]
    Codec {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl CacheError {
    /// Backend failure carrying the backend's own description.
    pub fn backend(message: impl ToString) -> Self {
        CacheError::Backend {
            message: message.to_string(),
        }
    }
}
