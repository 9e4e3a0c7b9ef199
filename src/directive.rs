//! Cache-eligibility declarations and their registry.
//!
//! A callable is opted into caching by declaring a [`CacheDirective`] for
//! its name in a [`DirectiveRegistry`] while wiring the interceptor. The
//! registry is a plain declarative table, populated at setup time and read
//! only afterwards. Callables without an entry are never cached, whatever
//! the policy says.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Opts one callable into caching, optionally overriding the policy's
/// default expiration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CacheDirective {
    /// Expiration override in seconds; `None` falls back to the policy
    /// default.
    pub ttl_seconds: Option<u64>,
}

impl CacheDirective {
    /// Directive using the policy's default expiration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Directive with an explicit expiration override.
    pub fn with_ttl(seconds: u64) -> Self {
        Self {
            ttl_seconds: Some(seconds),
        }
    }
}

/// Setup-time table mapping callable names to their directives.
///
/// Serializes as a plain map, so a registry can live in host configuration:
///
/// ```toml
/// [directives.GetCustomers]
/// ttl_seconds = 60
///
/// # Default expiration applies when no override is given.
/// [directives.GetRegions]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DirectiveRegistry {
    entries: HashMap<String, CacheDirective>,
}

impl DirectiveRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare caching for a callable.
    pub fn declare(&mut self, target: impl Into<String>, directive: CacheDirective) -> &mut Self {
        self.entries.insert(target.into(), directive);
        self
    }

    /// Look up the directive declared for a callable, if any.
    pub fn get(&self, target: &str) -> Option<&CacheDirective> {
        self.entries.get(target)
    }

    /// Number of declared callables.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no callable is declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
