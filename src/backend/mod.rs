//! Cache storage contract and bundled backends.
//!
//! The interception core consumes storage through [`CacheBackend`] and
//! places no constraint on what sits behind it, whether an in-process map,
//! a disk store, or a distributed cache. Two bundled implementations are
//! provided: [`MemoryBackend`] for in-process caching and [`NoopBackend`]
//! for keeping interception wired while storing nothing.

mod memory;
mod noop;

pub use memory::MemoryBackend;
pub use noop::NoopBackend;

use std::time::Duration;

use crate::error::CacheError;

/// Storage consumed by the interception core.
///
/// Both operations may be called concurrently from any number of call
/// sites. The core treats them as fast and non-blocking, and the
/// asynchronous interception path never suspends around them, so an
/// implementation backed by remote I/O owns its own bridging; that latency
/// is opaque to the core.
pub trait CacheBackend: Send + Sync {
    /// Look up an entry. `Ok(None)` is the defined cache miss, not a
    /// failure.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Store an entry with the expiration already resolved by the caller.
    ///
    /// The expiration is a hint; eviction mechanics belong to the backend.
    fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError>;
}
