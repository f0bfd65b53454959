//! Resource type descriptors (RFC 7643 §6).
//!
//! A resource type binds an endpoint to a base schema and any number of
//! schema extensions. Validating a document for a resource type validates
//! the base schema over the whole document and each extension over the
//! object stored under the extension's URI.

use crate::error::{ScimError, ScimResult, ValidationError};
use crate::schema::validation::eq_ignore_case;
use crate::schema::{
    AttributeValue, CoreAttributes, SchemaRegistry, ValidationMode, embedded, meta,
};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// A SCIM resource type definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Resource type name, e.g. "User"
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Endpoint relative to the base URL, e.g. "/Users"
    pub endpoint: String,
    /// URI of the base schema
    pub schema: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schema_extensions: Vec<SchemaExtension>,
}

/// Reference to a schema extension of a resource type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaExtension {
    /// URI of the extension schema
    pub schema: String,
    /// Whether every resource must carry the extension
    pub required: bool,
}

impl ResourceType {
    /// Build a resource type from a JSON definition.
    pub fn from_bytes(raw: &[u8]) -> ScimResult<Self> {
        let document: Value = serde_json::from_slice(raw)?;
        let meta = meta::bootstrap()?;
        meta.resource_type
            .validate_value(&document, ValidationMode::Read)?;

        let resource_type: ResourceType = serde_json::from_value(document)?;
        debug!(
            "Loaded resource type {} at {} (schema {})",
            resource_type.name, resource_type.endpoint, resource_type.schema
        );
        Ok(resource_type)
    }

    /// Read and build a resource type from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ScimResult<Self> {
        let raw = fs::read(path.as_ref())?;
        Self::from_bytes(&raw)
    }

    /// The embedded User resource type (with the optional enterprise extension).
    pub fn user() -> ScimResult<Self> {
        embedded::user_resource_type().parse()
    }

    /// The embedded Group resource type.
    pub fn group() -> ScimResult<Self> {
        embedded::group_resource_type().parse()
    }

    /// Whether `reference` names this resource type by name or endpoint.
    pub fn matches(&self, reference: &str) -> bool {
        let reference = reference.trim_start_matches('/');
        self.name == reference || self.endpoint.trim_start_matches('/') == reference
    }

    /// Decode `raw` and validate it for this resource type.
    pub fn validate(
        &self,
        registry: &SchemaRegistry,
        raw: &[u8],
        mode: ValidationMode,
    ) -> ScimResult<CoreAttributes> {
        let document: Value = serde_json::from_slice(raw)?;
        self.validate_value(registry, &document, mode)
    }

    /// Validate a decoded document against the base schema and every extension.
    ///
    /// Extension projections are emitted under their schema URI.
    pub fn validate_value(
        &self,
        registry: &SchemaRegistry,
        document: &Value,
        mode: ValidationMode,
    ) -> ScimResult<CoreAttributes> {
        let base = registry.require_schema(&self.schema)?;
        let mut attributes = base.validate_value(document, mode)?;

        // The base schema has already rejected non-object documents.
        let Some(object) = document.as_object() else {
            return Ok(attributes);
        };

        for extension in &self.schema_extensions {
            let schema = registry.require_schema(&extension.schema)?;
            let matched = find_extension(object, &extension.schema)?;
            let value = match matched {
                None | Some(Value::Null) if extension.required => {
                    return Err(ValidationError::missing_required(&extension.schema).into());
                }
                None | Some(Value::Null) => continue,
                Some(value) => value,
            };

            let projection = schema.validate_value(value, mode)?;
            if mode != ValidationMode::Read {
                attributes.insert(extension.schema.clone(), AttributeValue::Complex(projection));
            }
        }
        Ok(attributes)
    }
}

impl FromStr for ResourceType {
    type Err = ScimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bytes(s.as_bytes())
    }
}

fn find_extension<'a>(
    object: &'a serde_json::Map<String, Value>,
    uri: &str,
) -> Result<Option<&'a Value>, ValidationError> {
    let mut matches = object
        .iter()
        .filter(|(key, _)| eq_ignore_case(key, uri));
    let hit = matches.next().map(|(_, value)| value);
    if let Some((key, _)) = matches.next() {
        return Err(ValidationError::DuplicateKey { key: key.clone() });
    }
    Ok(hit)
}
