//! Backend that stores nothing.
//!
//! Useful for hosts that keep interception wired while disabling storage:
//! every lookup is a miss and every store is dropped.

use std::time::Duration;

use crate::backend::CacheBackend;
use crate::error::CacheError;

/// A backend that never stores and never hits.
#[derive(Default)]
pub struct NoopBackend;

impl NoopBackend {
    pub fn new() -> Self {
        Self
    }
}

impl CacheBackend for NoopBackend {
    fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: Vec<u8>, _ttl: Duration) -> Result<(), CacheError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_values_are_dropped() {
        let cache = NoopBackend::new();
        cache
            .set("key", b"value".to_vec(), Duration::from_secs(60))
            .unwrap();
        assert_eq!(cache.get("key").unwrap(), None);
    }
}
