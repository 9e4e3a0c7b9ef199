//! Transparent result caching for synchronous and asynchronous calls.
//!
//! `callcache` wraps expensive call logic so that repeated calls with
//! identical arguments are served from a cache backend instead of being
//! re-executed. The interception core derives a deterministic string key
//! from the call's declared name and its positional arguments, consults a
//! pluggable [`CacheBackend`], and either short-circuits with the stored
//! value or runs the real logic once and stores its result.
//!
//! Callables opt in through a [`DirectiveRegistry`] populated while wiring
//! the interceptor. Undeclared callables pass through untouched, as does
//! every callable when the [`CachePolicy`] carries no key prefix.
//! Failures of the real logic are propagated unchanged and never cached.
//!
//! The core is runtime-agnostic: the asynchronous entry points are generic
//! over `std::future::Future` and never spawn or block, so the layer works
//! the same under OS threads and under any cooperative scheduler.
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//!
//! use callcache::backend::MemoryBackend;
//! use callcache::{
//!     CacheDirective, CacheError, CacheInterceptor, CachePolicy, CallSite, DirectiveRegistry,
//! };
//!
//! let mut directives = DirectiveRegistry::new();
//! directives.declare("GetAnswer", CacheDirective::with_ttl(60));
//!
//! let interceptor = CacheInterceptor::new(
//!     CachePolicy::prefixed("app"),
//!     directives,
//!     Arc::new(MemoryBackend::new()),
//! );
//!
//! let answer: Result<u32, CacheError> =
//!     interceptor.intercept_sync(CallSite::new("GetAnswer"), || Ok(42));
//! assert_eq!(answer.unwrap(), 42);
//! ```
//!
//! # Configuration
//!
//! Policy and directives are plain serde types, so hosts can keep them in
//! their own configuration files:
//!
//! ```toml
//! [cache]
//! key_prefix = "app"
//! default_ttl_seconds = 30
//!
//! [directives.GetCustomers]
//! ttl_seconds = 60
//! ```
//!
//! String-derived keys carry two precision boundaries: arguments
//! participate through their `Display` form, so distinct values with equal
//! renderings share an entry, and a literal argument rendering as the null
//! sentinel collides with an absent one. Both are documented on [`key`],
//! not detected at runtime.

pub mod backend;
pub mod config;
pub mod directive;
pub mod error;
pub mod interceptor;
pub mod key;

pub use backend::CacheBackend;
pub use config::CachePolicy;
pub use directive::{CacheDirective, DirectiveRegistry};
pub use error::CacheError;
pub use interceptor::{CacheInterceptor, CallSite};
pub use key::{KeyPart, NULL_TOKEN, cache_key};
