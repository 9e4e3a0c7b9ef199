//! Call interception: bypass, serve from cache, or execute and store.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::backend::CacheBackend;
use crate::config::CachePolicy;
use crate::directive::{CacheDirective, DirectiveRegistry};
use crate::error::CacheError;
use crate::key::{KeyPart, cache_key};

/// One intercepted call: the target's declared name plus its positional
/// arguments, rendered in call order.
///
/// Arguments participate in key derivation by value, not by parameter
/// name; append them in the order the real call receives them.
#[derive(Debug, Clone)]
pub struct CallSite<'a> {
    target: &'a str,
    args: Vec<KeyPart>,
}

impl<'a> CallSite<'a> {
    pub fn new(target: &'a str) -> Self {
        Self {
            target,
            args: Vec::new(),
        }
    }

    /// Append a positional argument.
    pub fn arg(mut self, value: impl Display) -> Self {
        self.args.push(KeyPart::of(value));
        self
    }

    /// Append an optional positional argument; `None` renders as the null
    /// sentinel.
    pub fn arg_opt(mut self, value: Option<impl Display>) -> Self {
        self.args.push(KeyPart::of_opt(value));
        self
    }

    pub fn target(&self) -> &str {
        self.target
    }

    pub fn args(&self) -> &[KeyPart] {
        &self.args
    }
}

/// The interception core.
///
/// Wraps real call logic with a cache decision: calls whose target has no
/// registered directive, or that are owned by a policy without a key
/// prefix, run unmodified; everything else is served from the backend on a
/// hit, or executed once and stored on a miss.
///
/// The interceptor holds no mutable state of its own; shared state lives
/// entirely behind the backend. Clones are cheap, and any number of calls
/// may run through one instance concurrently, threaded or cooperatively
/// scheduled. Two concurrent misses on the same key both execute the real
/// logic and both store, last write winning at the backend; the layer
/// makes no single-flight guarantee.
#[derive(Clone)]
pub struct CacheInterceptor {
    policy: CachePolicy,
    directives: DirectiveRegistry,
    backend: Arc<dyn CacheBackend>,
}

impl CacheInterceptor {
    pub fn new(
        policy: CachePolicy,
        directives: DirectiveRegistry,
        backend: Arc<dyn CacheBackend>,
    ) -> Self {
        Self {
            policy,
            directives,
            backend,
        }
    }

    /// The wired policy.
    pub fn policy(&self) -> &CachePolicy {
        &self.policy
    }

    /// The wired backend.
    pub fn backend(&self) -> &Arc<dyn CacheBackend> {
        &self.backend
    }

    /// True when the policy carries a key prefix. Without one every call
    /// bypasses caching, registered or not.
    pub fn is_enabled(&self) -> bool {
        self.policy.key_prefix.is_some()
    }

    /// Intercept a synchronous call.
    ///
    /// With no directive registered for `site.target()`, or no key prefix
    /// on the policy, this is a strict pass-through of `call`. Otherwise a
    /// hit returns the stored value without running `call`; a miss runs it
    /// once and, on success, stores the result under the directive's
    /// expiration override or the policy default. An `Err` from `call`
    /// propagates unchanged and nothing is stored.
    pub fn intercept_sync<T, E, F>(&self, site: CallSite<'_>, call: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        E: From<CacheError>,
        F: FnOnce() -> Result<T, E>,
    {
        let Some((prefix, directive)) = self.resolve(site.target()) else {
            tracing::trace!(callable = site.target(), "caching bypassed");
            return call();
        };

        let key = cache_key(prefix, site.target(), site.args());
        if let Some(value) = self.lookup(&key)? {
            return Ok(value);
        }

        let value = call()?;
        self.store(&key, &value, self.resolve_ttl(directive))?;
        Ok(value)
    }

    /// Intercept an asynchronous call that produces a value.
    ///
    /// Decision rule and failure handling match
    /// [`intercept_sync`](Self::intercept_sync); the only suspension point
    /// is the await of `call`'s future. Dropping the returned future before
    /// that await completes stores nothing.
    pub async fn intercept<T, E, F, Fut>(&self, site: CallSite<'_>, call: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        E: From<CacheError>,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let Some((prefix, directive)) = self.resolve(site.target()) else {
            tracing::trace!(callable = site.target(), "caching bypassed");
            return call().await;
        };

        let key = cache_key(prefix, site.target(), site.args());
        if let Some(value) = self.lookup(&key)? {
            return Ok(value);
        }

        let value = call().await?;
        self.store(&key, &value, self.resolve_ttl(directive))?;
        Ok(value)
    }

    /// Forward an asynchronous call that completes without a payload.
    ///
    /// There is no value to store, so the cache is never consulted.
    pub async fn intercept_unit<E, F, Fut>(&self, call: F) -> Result<(), E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(), E>>,
    {
        call().await
    }

    /// Directive-and-prefix gate: both present, or the call bypasses
    /// caching.
    fn resolve(&self, target: &str) -> Option<(&str, &CacheDirective)> {
        let prefix = self.policy.key_prefix.as_deref()?;
        let directive = self.directives.get(target)?;
        Some((prefix, directive))
    }

    fn resolve_ttl(&self, directive: &CacheDirective) -> Duration {
        Duration::from_secs(
            directive
                .ttl_seconds
                .unwrap_or(self.policy.default_ttl_seconds),
        )
    }

    fn lookup<T, E>(&self, key: &str) -> Result<Option<T>, E>
    where
        T: DeserializeOwned,
        E: From<CacheError>,
    {
        let Some(bytes) = self.backend.get(key).map_err(E::from)? else {
            tracing::debug!(key = %key, "cache miss");
            return Ok(None);
        };

        let value = serde_json::from_slice(&bytes)
            .map_err(|source| CacheError::Codec {
                key: key.to_string(),
                source,
            })
            .map_err(E::from)?;
        tracing::debug!(key = %key, "cache hit");
        Ok(Some(value))
    }

    fn store<T, E>(&self, key: &str, value: &T, ttl: Duration) -> Result<(), E>
    where
        T: Serialize,
        E: From<CacheError>,
    {
        let bytes = serde_json::to_vec(value)
            .map_err(|source| CacheError::Codec {
                key: key.to_string(),
                source,
            })
            .map_err(E::from)?;
        self.backend.set(key, bytes, ttl).map_err(E::from)?;
        tracing::trace!(key = %key, ttl_seconds = ttl.as_secs(), "stored result");
        Ok(())
    }
}
