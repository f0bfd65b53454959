//! Multi-valued attribute tests.

use serde_json::json;

use crate::common::builders::UserBuilder;
use crate::common::{user_schema, validate};
use crate::{assert_specific_validation_error, assert_validation_success};

use scim_core::{
    Attribute, AttributeType, AttributeValue, Schema, ValidationError, ValidationMode,
};

fn tags_schema(required: bool) -> Schema {
    let mut tags = Attribute::new("tags", AttributeType::String).multi_valued();
    tags.required = required;
    Schema {
        id: "urn:example:Tagged".to_string(),
        name: None,
        description: None,
        attributes: vec![tags],
    }
}

#[test]
fn test_single_value_for_multi_valued() {
    let user = UserBuilder::new()
        .with_emails(json!({"value": "bjensen@example.com"}))
        .build();
    match validate(&user_schema(), &user, ValidationMode::Write) {
        Err(scim_core::ScimError::Validation(ValidationError::ArrayExpected { attribute })) => {
            assert_eq!(attribute, "emails");
        }
        other => panic!("Expected ArrayExpected, got {:?}", other),
    }
}

#[test]
fn test_empty_array() {
    let optional = tags_schema(false);
    let attributes = optional
        .validate(br#"{"tags": []}"#, ValidationMode::Write)
        .unwrap();
    assert!(!attributes.contains_key("tags"));

    let required = tags_schema(true);
    assert_specific_validation_error!(
        required.validate(br#"{"tags": []}"#, ValidationMode::Write),
        ValidationError::EmptyRequiredArray { .. }
    );
}

#[test]
fn test_element_order_is_preserved() {
    let schema = tags_schema(true);
    let attributes = schema
        .validate(br#"{"tags": ["c", "a", "b"]}"#, ValidationMode::Write)
        .unwrap();
    let tags: Vec<&str> = attributes
        .get("tags")
        .and_then(AttributeValue::as_multi)
        .unwrap()
        .iter()
        .filter_map(AttributeValue::as_str)
        .collect();
    assert_eq!(tags, ["c", "a", "b"]);
}

#[test]
fn test_bad_element_fails_whole_array() {
    let schema = tags_schema(false);
    assert_specific_validation_error!(
        schema.validate(br#"{"tags": ["a", 2, "c"]}"#, ValidationMode::Write),
        ValidationError::TypeMismatch { .. }
    );
}

#[test]
fn test_multi_valued_complex() {
    let user = UserBuilder::new()
        .with_emails(json!([
            {"value": "bjensen@example.com", "type": "work", "primary": true},
            {"value": "babs@jensen.org", "type": "home", "label": "ignored"}
        ]))
        .build();
    let attributes =
        assert_validation_success!(validate(&user_schema(), &user, ValidationMode::Write));

    let emails = attributes.get("emails").and_then(AttributeValue::as_multi).unwrap();
    assert_eq!(emails.len(), 2);
    let second = emails[1].as_complex().unwrap();
    assert_eq!(second.get_str("value"), Some("babs@jensen.org"));
    assert!(!second.contains_key("label"));
}

#[test]
fn test_multi_valued_complex_element_errors() {
    let user = UserBuilder::new()
        .with_emails(json!([{"value": "a@example.com"}, "b@example.com"]))
        .build();
    assert_specific_validation_error!(
        validate(&user_schema(), &user, ValidationMode::Write),
        ValidationError::TypeMismatch { .. }
    );

    let user = UserBuilder::new()
        .with_emails(json!([{"value": "a@example.com", "primary": "yes"}]))
        .build();
    assert_specific_validation_error!(
        validate(&user_schema(), &user, ValidationMode::Write),
        ValidationError::TypeMismatch { .. }
    );
}

#[test]
fn test_read_only_multi_valued_on_replace() {
    let user = UserBuilder::new()
        .with_attribute("groups", json!([{"value": "e9e30dba", "display": "Tour Guides"}]))
        .build();

    let written =
        assert_validation_success!(validate(&user_schema(), &user, ValidationMode::Write));
    assert!(written.contains_key("groups"));

    // Every element is dropped, so no key is emitted at all.
    let replaced =
        assert_validation_success!(validate(&user_schema(), &user, ValidationMode::Replace));
    assert!(!replaced.contains_key("groups"));
}
