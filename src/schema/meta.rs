//! Meta-schemas used to vet schema and resource type definitions.
//!
//! Both meta-schemas are embedded at build time and constructed once by
//! [`bootstrap`]. Every loading entry point calls it, so hosts only need to
//! call it themselves to fail fast before accepting traffic.

use super::embedded;
use super::types::Schema;
use crate::error::MetaSchemaError;
use std::sync::OnceLock;

static META_SCHEMAS: OnceLock<MetaSchemas> = OnceLock::new();

/// The constructed meta-schemas. Read-only after bootstrap.
#[derive(Debug)]
pub struct MetaSchemas {
    /// Validates `urn:ietf:params:scim:schemas:core:2.0:Schema` definitions
    pub schema: Schema,
    /// Validates `urn:ietf:params:scim:schemas:core:2.0:ResourceType` definitions
    pub resource_type: Schema,
}

/// Construct the meta-schemas, or return the ones already constructed.
///
/// Idempotent and safe to call from several threads; if two callers race,
/// both receive the instance that was stored first.
pub fn bootstrap() -> Result<&'static MetaSchemas, MetaSchemaError> {
    if let Some(meta) = META_SCHEMAS.get() {
        return Ok(meta);
    }

    let constructed = MetaSchemas {
        schema: parse("Schema", embedded::schema_meta_schema())?,
        resource_type: parse("ResourceType", embedded::resource_type_meta_schema())?,
    };
    Ok(META_SCHEMAS.get_or_init(|| constructed))
}

// The meta-schemas cannot vet themselves, so they are deserialized directly.
fn parse(name: &'static str, raw: &str) -> Result<Schema, MetaSchemaError> {
    serde_json::from_str(raw).map_err(|e| MetaSchemaError {
        name,
        message: e.to_string(),
    })
}
