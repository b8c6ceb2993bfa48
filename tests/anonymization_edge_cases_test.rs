//! Edge case tests for the streaming anonymizer

use jsonymize::core::{Anonymizer, AnonymizerOptions};
use jsonymize::domain::JsonymizeError;
use serde_json::{json, Value};

fn anonymizer(fields: &[&str]) -> Anonymizer {
    Anonymizer::new(AnonymizerOptions {
        fields: fields.iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    })
}

#[test]
fn test_empty_object() {
    let output = anonymizer(&["email"]).anonymize(b"{}".as_slice()).unwrap();
    assert_eq!(output, json!({}));
}

#[test]
fn test_empty_array() {
    let output = anonymizer(&["email"]).anonymize(b"[]".as_slice()).unwrap();
    assert_eq!(output, json!([]));
}

#[test]
fn test_scalar_roots() {
    let a = anonymizer(&["email"]);
    assert_eq!(a.anonymize(b"42".as_slice()).unwrap(), json!(42));
    assert_eq!(a.anonymize(b"-3.5".as_slice()).unwrap(), json!(-3.5));
    assert_eq!(a.anonymize(b"true".as_slice()).unwrap(), json!(true));
    assert_eq!(a.anonymize(b"null".as_slice()).unwrap(), json!(null));
    assert_eq!(
        a.anonymize(br#""a@b.com""#.as_slice()).unwrap(),
        json!("a@b.com"),
        "root values have no field name and are never targeted"
    );
}

#[test]
fn test_targeted_field_inside_array_elements() {
    let input = r#"[{"email": "a@b.com"}, {"email": "c@d.com"}, {"id": 5}]"#;
    let output = anonymizer(&["email"]).anonymize(input.as_bytes()).unwrap();

    assert_ne!(output[0]["email"], json!("a@b.com"));
    assert_ne!(output[1]["email"], json!("c@d.com"));
    assert_eq!(output[2], json!({"id": 5}));
}

#[test]
fn test_targeted_object_valued_field_passes_through() {
    // an object matches no type tag; without an override it is untouched,
    // but keys inside it are still visited
    let input = r#"{"payload": {"email": "a@b.com", "kind": "contact"}}"#;
    let output = anonymizer(&["payload", "email"])
        .anonymize(input.as_bytes())
        .unwrap();

    assert_eq!(output["payload"]["kind"], json!("contact"));
    assert_ne!(output["payload"]["email"], json!("a@b.com"));
}

#[test]
fn test_unicode_and_escapes_preserved() {
    let input = r#"{"note": "héllo \"wörld\" \n", "email": "a@b.com"}"#;
    let output = anonymizer(&["email"]).anonymize(input.as_bytes()).unwrap();
    assert_eq!(output["note"], json!("héllo \"wörld\" \n"));
}

#[test]
fn test_unterminated_object_rejects_with_fragment() {
    let result = anonymizer(&["email"]).anonymize(br#"{"email": "a@b"#.as_slice());
    match result {
        Err(JsonymizeError::Parse { fragment, .. }) => {
            assert!(!fragment.is_empty());
        }
        other => panic!("expected parse rejection, got {other:?}"),
    }
}

#[test]
fn test_bare_garbage_rejects() {
    let result = anonymizer(&["email"]).anonymize(b"not json at all".as_slice());
    assert!(matches!(result, Err(JsonymizeError::Parse { .. })));
}

#[test]
fn test_malformed_input_after_valid_prefix_rejects() {
    // the valid prefix must not leak out as partial output
    let result = anonymizer(&["email"]).anonymize(br#"{"a": 1, "b": }"#.as_slice());
    assert!(matches!(result, Err(JsonymizeError::Parse { .. })));
}

#[test]
fn test_large_flat_document() {
    let mut input = String::from("{");
    for i in 0..5000 {
        if i > 0 {
            input.push(',');
        }
        input.push_str(&format!("\"key{i}\": {i}"));
    }
    input.push('}');

    let output = anonymizer(&["email"]).anonymize(input.as_bytes()).unwrap();
    assert_eq!(output.as_object().unwrap().len(), 5000);
    assert_eq!(output["key4999"], json!(4999));
}

#[test]
fn test_replacement_type_follows_classified_value() {
    let a = anonymizer(&["v"]);

    // string value with no specific shape -> string generator
    let output = a.anonymize(br#"{"v": "plain"}"#.as_slice()).unwrap();
    assert!(output["v"].is_string());

    // ip-shaped string -> ip generator
    let output = a.anonymize(br#"{"v": "10.0.0.1"}"#.as_slice()).unwrap();
    let re = regex::Regex::new(r"^(\d{1,3}\.){3}\d{1,3}$").unwrap();
    assert!(re.is_match(output["v"].as_str().unwrap()));

    // uuid-shaped string -> guid generator
    let output = a
        .anonymize(br#"{"v": "1e6a2f38-96ac-4bb0-b2e4-0c727847d3b9"}"#.as_slice())
        .unwrap();
    assert!(uuid::Uuid::parse_str(output["v"].as_str().unwrap()).is_ok());

    // sentence -> sentence generator (contains a space, ends with a period)
    let output = a.anonymize(br#"{"v": "hello there"}"#.as_slice()).unwrap();
    let sentence = output["v"].as_str().unwrap();
    assert!(sentence.contains(' '));
    assert!(sentence.ends_with('.'));
}

#[test]
fn test_same_field_name_replaced_everywhere() {
    let input = r#"{"email": "a@b.com", "nested": {"email": "c@d.com"}}"#;
    let output = anonymizer(&["email"]).anonymize(input.as_bytes()).unwrap();
    assert_ne!(output["email"], json!("a@b.com"));
    assert_ne!(output["nested"]["email"], json!("c@d.com"));
}

#[test]
fn test_output_structure_matches_input_structure() {
    let input = r#"{"a": [1, {"b": [true, null]}, "s"], "email": "a@b.com"}"#;
    let output = anonymizer(&["email"]).anonymize(input.as_bytes()).unwrap();

    let expected: Value = serde_json::from_str(input).unwrap();
    // everything except the targeted leaf is structurally identical
    assert_eq!(output["a"], expected["a"]);
    assert!(output["email"].is_string());
}
