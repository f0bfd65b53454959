//! Schema construction from JSON definitions.
//!
//! A definition is trusted only after it validates against the schema
//! meta-schema and its attribute tree is structurally consistent.

use super::meta;
use super::types::{Attribute, AttributeType, Schema};
use super::validation::ValidationMode;
use crate::error::{ScimError, ScimResult};
use log::debug;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::str::FromStr;

impl Schema {
    /// Build a schema from a JSON definition.
    pub fn from_bytes(raw: &[u8]) -> ScimResult<Self> {
        let document: Value = serde_json::from_slice(raw)?;
        Self::from_value(document)
    }

    /// Build a schema from a decoded JSON definition.
    pub fn from_value(document: Value) -> ScimResult<Self> {
        let meta = meta::bootstrap()?;
        meta.schema.validate_value(&document, ValidationMode::Read)?;

        let schema: Schema = serde_json::from_value(document)?;
        check_attribute_tree(&schema.id, &schema.attributes)?;

        debug!(
            "Loaded schema {} with {} top-level attributes",
            schema.id,
            schema.attributes.len()
        );
        Ok(schema)
    }

    /// Read and build a schema from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ScimResult<Self> {
        let raw = fs::read(path.as_ref())?;
        debug!("Read schema definition from {}", path.as_ref().display());
        Self::from_bytes(&raw)
    }
}

impl FromStr for Schema {
    type Err = ScimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bytes(s.as_bytes())
    }
}

/// Sub-attributes must be present exactly when the type is complex.
fn check_attribute_tree(schema_id: &str, attributes: &[Attribute]) -> ScimResult<()> {
    for attribute in attributes {
        let is_complex = attribute.data_type == AttributeType::Complex;
        if is_complex && attribute.sub_attributes.is_empty() {
            return Err(ScimError::invalid_schema(
                schema_id,
                format!("complex attribute '{}' has no sub-attributes", attribute.name),
            ));
        }
        if !is_complex && !attribute.sub_attributes.is_empty() {
            return Err(ScimError::invalid_schema(
                schema_id,
                format!(
                    "attribute '{}' of type {} cannot have sub-attributes",
                    attribute.name, attribute.data_type
                ),
            ));
        }
        check_attribute_tree(schema_id, &attribute.sub_attributes)?;
    }
    Ok(())
}
