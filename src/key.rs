//! Deterministic cache-key derivation from call identity and arguments.

use std::fmt::Display;

/// Sentinel rendered in place of an absent argument value, so that a call
/// passing `None` never shares a key with a call omitting the argument.
pub const NULL_TOKEN: &str = "**NULL**";

/// Separator between the prefix, the target name, and argument renderings.
const SEGMENT_SEPARATOR: &str = "--";

/// One positional argument, rendered for key derivation.
///
/// Rendering collapses a value to its `Display` form: two distinct values
/// with equal renderings share a cache entry, and a literal argument whose
/// text equals [`NULL_TOKEN`] collides with a genuinely absent one. Both
/// are accepted precision boundaries of string-derived keys, not conditions
/// the layer detects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyPart {
    /// An absent value; renders as [`NULL_TOKEN`].
    Null,
    /// A present value, captured through its `Display` form.
    Value(String),
}

impl KeyPart {
    /// Capture a present argument value.
    pub fn of(value: impl Display) -> Self {
        KeyPart::Value(value.to_string())
    }

    /// Capture an optional argument value; `None` becomes [`KeyPart::Null`].
    pub fn of_opt(value: Option<impl Display>) -> Self {
        match value {
            Some(value) => KeyPart::of(value),
            None => KeyPart::Null,
        }
    }

    fn render(&self) -> &str {
        match self {
            KeyPart::Null => NULL_TOKEN,
            KeyPart::Value(text) => text,
        }
    }
}

/// Derive the cache key for one call.
///
/// Keys are deterministic: equal inputs produce byte-equal keys across
/// calls and across process runs. Zero-argument calls are keyed by the
/// target name alone, so interceptor instances with different prefixes
/// share zero-argument keys whenever they share a backend.
pub fn cache_key(prefix: &str, target: &str, args: &[KeyPart]) -> String {
    if args.is_empty() {
        return target.to_string();
    }

    let mut key = String::with_capacity(prefix.len() + target.len() + args.len() * 8);
    key.push_str(prefix);
    key.push_str(SEGMENT_SEPARATOR);
    key.push_str(target);
    for part in args {
        key.push_str(SEGMENT_SEPARATOR);
        key.push_str(part.render());
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero_arguments_keys_by_bare_name() {
        assert_eq!(cache_key("app", "GetCustomers", &[]), "GetCustomers");
    }

    #[test]
    fn test_arguments_join_with_separator() {
        let args = [KeyPart::of(1), KeyPart::of("east")];
        assert_eq!(cache_key("app", "GetOrders", &args), "app--GetOrders--1--east");
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let args = [KeyPart::of(1), KeyPart::of(2)];
        assert_eq!(cache_key("app", "Foo", &args), cache_key("app", "Foo", &args));
    }

    #[test]
    fn test_null_renders_sentinel() {
        let key = cache_key("app", "Foo", &[KeyPart::Null]);
        assert!(key.contains(NULL_TOKEN));
        assert_eq!(key, "app--Foo--**NULL**");
    }

    #[test]
    fn test_trailing_null_distinct_from_omitted_argument() {
        let with_null = cache_key("app", "Foo", &[KeyPart::of(1), KeyPart::Null]);
        let without = cache_key("app", "Foo", &[KeyPart::of(1)]);
        assert_ne!(with_null, without);
    }

    #[test]
    fn test_literal_sentinel_text_collides_with_null() {
        // Known precision boundary: a value rendering as the sentinel text
        // is indistinguishable from an absent value.
        let literal = cache_key("app", "Foo", &[KeyPart::of(NULL_TOKEN)]);
        let absent = cache_key("app", "Foo", &[KeyPart::Null]);
        assert_eq!(literal, absent);
    }

    #[test]
    fn test_equal_renderings_collide() {
        // Distinct values with equal `Display` forms share a key.
        let as_number = cache_key("app", "Foo", &[KeyPart::of(7)]);
        let as_text = cache_key("app", "Foo", &[KeyPart::of("7")]);
        assert_eq!(as_number, as_text);
    }

    fn arb_args() -> impl Strategy<Value = Vec<KeyPart>> {
        prop::collection::vec(
            prop::option::of("[a-zA-Z0-9]{0,6}").prop_map(|value| KeyPart::of_opt(value)),
            0..5,
        )
    }

    proptest! {
        #[test]
        fn prop_derivation_is_deterministic(
            prefix in "[a-z]{1,8}",
            target in "[A-Za-z]{1,12}",
            args in arb_args(),
        ) {
            prop_assert_eq!(
                cache_key(&prefix, &target, &args),
                cache_key(&prefix, &target, &args)
            );
        }

        #[test]
        fn prop_dropping_an_argument_changes_the_key(
            prefix in "[a-z]{1,8}",
            target in "[A-Za-z]{1,12}",
            args in arb_args(),
        ) {
            prop_assume!(!args.is_empty());
            let full = cache_key(&prefix, &target, &args);
            let shorter = cache_key(&prefix, &target, &args[..args.len() - 1]);
            prop_assert_ne!(full, shorter);
        }
    }
}
