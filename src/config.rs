//! Interceptor policy configuration.
//!
//! A [`CachePolicy`] is supplied once per interceptor instance and never
//! mutated afterwards. It is a plain serde struct with field defaults, so
//! hosts can embed it in their own configuration files.

use serde::{Deserialize, Serialize};

fn default_ttl_seconds() -> u64 {
    30
}

/// Caching policy for one interceptor instance.
///
/// An absent `key_prefix` disables caching for every call the owning
/// interceptor sees, turning the layer into a strict pass-through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachePolicy {
    /// Namespace prefix for derived keys. `None` disables caching.
    #[serde(default)]
    pub key_prefix: Option<String>,

    /// Expiration in seconds for entries whose directive carries no
    /// override.
    #[serde(default = "default_ttl_seconds")]
    pub default_ttl_seconds: u64,
}

impl CachePolicy {
    /// Policy with the given key prefix and the default expiration.
    pub fn prefixed(prefix: impl Into<String>) -> Self {
        Self {
            key_prefix: Some(prefix.into()),
            default_ttl_seconds: default_ttl_seconds(),
        }
    }

    /// Replace the default expiration.
    pub fn with_default_ttl(mut self, seconds: u64) -> Self {
        self.default_ttl_seconds = seconds;
        self
    }
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            key_prefix: None,
            default_ttl_seconds: default_ttl_seconds(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_policy_defaults() {
        let policy = CachePolicy::default();
        assert_eq!(policy.key_prefix, None);
        assert_eq!(policy.default_ttl_seconds, 30);
    }

    #[test]
    fn test_prefixed_keeps_default_expiration() {
        let policy = CachePolicy::prefixed("app");
        assert_eq!(policy.key_prefix.as_deref(), Some("app"));
        assert_eq!(policy.default_ttl_seconds, 30);
    }

    #[test]
    fn test_with_default_ttl() {
        let policy = CachePolicy::prefixed("app").with_default_ttl(120);
        assert_eq!(policy.default_ttl_seconds, 120);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let policy: CachePolicy = toml::from_str("key_prefix = \"app\"").unwrap();
        assert_eq!(policy.key_prefix.as_deref(), Some("app"));
        assert_eq!(policy.default_ttl_seconds, 30);

        let policy: CachePolicy = toml::from_str("").unwrap();
        assert_eq!(policy.key_prefix, None);
    }

    fn arb_cache_policy() -> impl Strategy<Value = CachePolicy> {
        (
            prop::option::of("[a-z][a-z0-9-]{0,12}"), // key_prefix
            0u64..=86_400u64,                         // default_ttl_seconds
        )
            .prop_map(|(key_prefix, default_ttl_seconds)| CachePolicy {
                key_prefix,
                default_ttl_seconds,
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_policy_round_trip_serialization(policy in arb_cache_policy()) {
            let toml_str = toml::to_string(&policy)
                .expect("policy should serialize to TOML");

            let deserialized: CachePolicy = toml::from_str(&toml_str)
                .expect("TOML should deserialize back to a policy");

            prop_assert_eq!(policy, deserialized);
        }
    }
}
