//! Semantic type classification for raw JSON values
//!
//! The classifier inspects a value's shape and emits the type tags it
//! matches, in a fixed priority order. The order is load-bearing: the
//! replacement engine takes the first tag whose generator resolves, so a
//! 10-digit string is `timestamp` before it is `hash` before it is
//! `string`. The order must not be rearranged without breaking existing
//! configurations.

use serde_json::Value;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static IP_RE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^(\d{1,3}\.){3}\d{1,3}$").unwrap());
static TIMESTAMP_RE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^\d{10}$").unwrap());
static GUID_RE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(
        r"^[a-fA-F0-9]{8}-[a-fA-F0-9]{4}-[a-fA-F0-9]{4}-[a-fA-F0-9]{4}-[a-fA-F0-9]{12}$",
    )
    .unwrap()
});
static HASH_RE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^[a-fA-F0-9]+$").unwrap());

/// A semantic classification inferred from a raw value's shape
///
/// Variants are declared in classification priority order: most specific
/// first. `Str` matches any string and always comes last, so it acts as the
/// catch-all fallback for string values.
///
/// No tag exists for date-like values: the upstream JSON parser never
/// produces one (there is no date shape in JSON), so the `date` generator is
/// only reachable through an explicit override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTag {
    /// Any numeric literal
    Natural,
    /// A boolean literal
    Bool,
    /// A string shaped like an email address
    Email,
    /// Four dot-separated 1-3 digit groups (no octet-range validation)
    Ip,
    /// A string of exactly 10 digits
    Timestamp,
    /// Canonical 8-4-4-4-12 hexadecimal UUID shape
    Guid,
    /// A non-empty string of only hexadecimal characters
    Hash,
    /// A string containing at least one space
    Sentence,
    /// Any string
    Str,
}

impl TypeTag {
    /// The generator name this tag resolves to in the registry
    pub fn generator_name(self) -> &'static str {
        match self {
            TypeTag::Natural => "natural",
            TypeTag::Bool => "bool",
            TypeTag::Email => "email",
            TypeTag::Ip => "ip",
            TypeTag::Timestamp => "timestamp",
            TypeTag::Guid => "guid",
            TypeTag::Hash => "hash",
            TypeTag::Sentence => "sentence",
            TypeTag::Str => "string",
        }
    }
}

/// Classify a raw JSON value into the ordered list of type tags it matches
///
/// Non-matching tags are simply absent from the result; matching tags
/// appear in priority order, most specific first. Classification is pure:
/// the same value always yields the same sequence.
pub fn classify(value: &Value) -> Vec<TypeTag> {
    let mut tags = Vec::new();

    if value.is_number() {
        tags.push(TypeTag::Natural);
    }
    if value.is_boolean() {
        tags.push(TypeTag::Bool);
    }
    if let Value::String(s) = value {
        if EMAIL_RE.is_match(s) {
            tags.push(TypeTag::Email);
        }
        if IP_RE.is_match(s) {
            tags.push(TypeTag::Ip);
        }
        if TIMESTAMP_RE.is_match(s) {
            tags.push(TypeTag::Timestamp);
        }
        if GUID_RE.is_match(s) {
            tags.push(TypeTag::Guid);
        }
        if HASH_RE.is_match(s) {
            tags.push(TypeTag::Hash);
        }
        if s.contains(' ') {
            tags.push(TypeTag::Sentence);
        }
        tags.push(TypeTag::Str);
    }

    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test_case(json!(42), &[TypeTag::Natural]; "integer")]
    #[test_case(json!(3.25), &[TypeTag::Natural]; "float")]
    #[test_case(json!(true), &[TypeTag::Bool]; "boolean")]
    #[test_case(json!(null), &[]; "null")]
    #[test_case(json!([1, 2]), &[]; "array")]
    #[test_case(json!({"a": 1}), &[]; "object")]
    #[test_case(json!("a@b.com"), &[TypeTag::Email, TypeTag::Str]; "email")]
    #[test_case(json!("10.0.0.1"), &[TypeTag::Ip, TypeTag::Str]; "ip address")]
    #[test_case(
        json!("1234567890"),
        &[TypeTag::Timestamp, TypeTag::Hash, TypeTag::Str];
        "ten digits are timestamp then hash"
    )]
    #[test_case(
        json!("deadbeef"),
        &[TypeTag::Hash, TypeTag::Str];
        "hex string"
    )]
    #[test_case(
        json!("1e6a2f38-96ac-4bb0-b2e4-0c727847d3b9"),
        &[TypeTag::Guid, TypeTag::Str];
        "uuid"
    )]
    #[test_case(
        json!("hello there"),
        &[TypeTag::Sentence, TypeTag::Str];
        "sentence"
    )]
    #[test_case(json!("hello"), &[TypeTag::Str]; "plain string")]
    #[test_case(json!(""), &[TypeTag::Str]; "empty string is not hash")]
    fn test_classify(value: Value, expected: &[TypeTag]) {
        assert_eq!(classify(&value), expected);
    }

    #[test]
    fn test_classification_is_idempotent() {
        let value = json!("1234567890");
        let first = classify(&value);
        let second = classify(&value);
        assert_eq!(first, second);
    }

    #[test]
    fn test_ip_shape_allows_out_of_range_octets() {
        // Octet ranges are deliberately not validated
        assert_eq!(classify(&json!("999.999.999.999"))[0], TypeTag::Ip);
    }

    #[test]
    fn test_generator_names() {
        assert_eq!(TypeTag::Natural.generator_name(), "natural");
        assert_eq!(TypeTag::Str.generator_name(), "string");
    }
}
