//! Schema definition loading tests.
//!
//! Definitions are checked against the meta-schema before they are
//! deserialized, then checked for structural consistency.

use serde_json::json;

use crate::common::builders::SchemaBuilder;
use crate::{assert_error_message_contains, assert_specific_validation_error};

use scim_core::{
    AttributeType, Mutability, Returned, ScimError, Schema, SchemaRegistry, Uniqueness,
    ValidationError, ValidationMode,
};

#[test]
fn test_minimal_schema_loads_with_defaults() {
    let schema = SchemaBuilder::new("urn:example:Minimal")
        .attribute("label", "string")
        .load()
        .unwrap();

    let label = &schema.attributes[0];
    assert_eq!(label.data_type, AttributeType::String);
    assert!(!label.multi_valued);
    assert!(!label.required);
    assert_eq!(label.mutability, Mutability::ReadWrite);
    assert_eq!(label.returned, Returned::Default);
    assert_eq!(label.uniqueness, Uniqueness::None);
}

#[test]
fn test_missing_id() {
    let result = SchemaBuilder::new("urn:example:NoId")
        .attribute("label", "string")
        .without("id")
        .load();
    match result {
        Err(ScimError::Validation(ValidationError::RequiredFieldMissing { attribute })) => {
            assert_eq!(attribute, "id");
        }
        other => panic!("Expected RequiredFieldMissing, got {:?}", other),
    }
}

#[test]
fn test_empty_attributes_rejected() {
    assert_specific_validation_error!(
        SchemaBuilder::new("urn:example:Empty").load(),
        ValidationError::EmptyRequiredArray { .. }
    );
}

#[test]
fn test_attribute_without_type() {
    let result = SchemaBuilder::new("urn:example:NoType")
        .raw_attribute(json!({"name": "label"}))
        .load();
    assert_specific_validation_error!(result, ValidationError::RequiredFieldMissing { .. });
}

#[test]
fn test_characteristic_type_errors() {
    let result = SchemaBuilder::new("urn:example:BadFlag")
        .raw_attribute(json!({"name": "label", "type": "string", "required": "yes"}))
        .load();
    assert_specific_validation_error!(result, ValidationError::TypeMismatch { .. });
}

#[test]
fn test_unknown_characteristic_value() {
    let result = SchemaBuilder::new("urn:example:BadMutability")
        .raw_attribute(json!({"name": "label", "type": "string", "mutability": "sometimes"}))
        .load();
    assert!(matches!(result, Err(ScimError::Json(_))));
}

#[test]
fn test_complex_requires_sub_attributes() {
    let result = SchemaBuilder::new("urn:example:Hollow")
        .attribute("address", "complex")
        .load();
    assert!(matches!(result, Err(ScimError::InvalidSchema { .. })));
    assert_error_message_contains!(
        SchemaBuilder::new("urn:example:Hollow")
            .attribute("address", "complex")
            .load(),
        "address"
    );

    let result = SchemaBuilder::new("urn:example:Stray")
        .raw_attribute(json!({
            "name": "label",
            "type": "string",
            "subAttributes": [{"name": "inner", "type": "string"}]
        }))
        .load();
    assert!(matches!(result, Err(ScimError::InvalidSchema { .. })));
}

#[test]
fn test_unsupported_type_fails_at_validation() {
    let schema = SchemaBuilder::new("urn:example:Future")
        .attribute("shape", "geometry")
        .load()
        .unwrap();
    assert_eq!(
        schema.attributes[0].data_type,
        AttributeType::Unsupported("geometry".to_string())
    );

    // Absent values never reach the type check.
    assert!(schema.validate(b"{}", ValidationMode::Write).is_ok());
    match schema.validate(br#"{"shape": "circle"}"#, ValidationMode::Write) {
        Err(ScimError::Validation(ValidationError::UnsupportedAttributeType {
            attribute,
            data_type,
        })) => {
            assert_eq!(attribute, "shape");
            assert_eq!(data_type, "geometry");
        }
        other => panic!("Expected UnsupportedAttributeType, got {:?}", other),
    }
}

#[test]
fn test_malformed_json() {
    assert!(matches!(
        "{\"id\": ".parse::<Schema>(),
        Err(ScimError::Json(_))
    ));
    assert!(matches!(
        Schema::from_bytes(b"[]"),
        Err(ScimError::Validation(ValidationError::TypeMismatch { .. }))
    ));
}

#[test]
fn test_schema_serialization_reloads() {
    let registry = SchemaRegistry::with_embedded_schemas().unwrap();
    for schema in registry.get_schemas() {
        let json = serde_json::to_value(schema).unwrap();
        let reloaded = Schema::from_value(json).unwrap();
        assert_eq!(&reloaded, schema);
    }
}

#[test]
fn test_registry_from_schema_dir() {
    let dir = std::env::temp_dir().join(format!("scim-core-schemas-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("Device.json"),
        SchemaBuilder::new("urn:example:Device")
            .attribute("serial", "string")
            .build_json()
            .to_string(),
    )
    .unwrap();
    std::fs::write(dir.join("notes.txt"), "not a schema").unwrap();

    let registry = SchemaRegistry::from_schema_dir(&dir).unwrap();
    assert_eq!(registry.len(), 1);
    assert!(registry.get_schema("urn:example:Device").is_some());

    std::fs::write(dir.join("Broken.json"), "{").unwrap();
    assert!(SchemaRegistry::from_schema_dir(&dir).is_err());

    std::fs::remove_dir_all(&dir).unwrap();
}
