//! In-process backend with per-entry expiration.

use std::time::{Duration, Instant};

use dashmap::DashMap;

use crate::backend::CacheBackend;
use crate::error::CacheError;

struct StoredEntry {
    value: Vec<u8>,
    expires_at: Instant,
}

impl StoredEntry {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Concurrent in-process store honoring the per-entry expiration hint.
///
/// Expired entries are swept lazily, when their key is next looked up.
#[derive(Default)]
pub struct MemoryBackend {
    entries: DashMap<String, StoredEntry>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, counting expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CacheBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        self.entries.remove_if(key, |_, entry| entry.is_expired());
        Ok(self.entries.get(key).map(|entry| entry.value.clone()))
    }

    fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError> {
        let entry = StoredEntry {
            value,
            expires_at: Instant::now() + ttl,
        };
        self.entries.insert(key.to_string(), entry);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set() {
        let cache = MemoryBackend::new();
        cache
            .set("key", b"value".to_vec(), Duration::from_secs(60))
            .unwrap();
        assert_eq!(cache.get("key").unwrap(), Some(b"value".to_vec()));
    }

    #[test]
    fn test_missing_key_is_a_miss() {
        let cache = MemoryBackend::new();
        assert_eq!(cache.get("absent").unwrap(), None);
    }

    #[test]
    fn test_expired_entry_is_swept_on_lookup() {
        let cache = MemoryBackend::new();
        cache
            .set("key", b"value".to_vec(), Duration::from_millis(30))
            .unwrap();
        assert_eq!(cache.get("key").unwrap(), Some(b"value".to_vec()));

        std::thread::sleep(Duration::from_millis(60));
        assert_eq!(cache.get("key").unwrap(), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_overwrite_replaces_the_entry() {
        let cache = MemoryBackend::new();
        cache
            .set("key", b"first".to_vec(), Duration::from_secs(60))
            .unwrap();
        cache
            .set("key", b"second".to_vec(), Duration::from_secs(60))
            .unwrap();
        assert_eq!(cache.get("key").unwrap(), Some(b"second".to_vec()));
        assert_eq!(cache.len(), 1);
    }
}
