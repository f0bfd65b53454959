//! Schema registry for loading, managing, and accessing SCIM schemas.
//!
//! The registry is filled once during start-up and is read-only afterwards,
//! so it can be shared freely between threads serving validation traffic.

use super::embedded;
use super::types::Schema;
use crate::error::{ScimError, ScimResult};
use log::{info, warn};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Registry of schemas keyed by their URI.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, Schema>,
}

/// URI of the core User schema.
pub const USER_SCHEMA: &str = "urn:ietf:params:scim:schemas:core:2.0:User";
/// URI of the core Group schema.
pub const GROUP_SCHEMA: &str = "urn:ietf:params:scim:schemas:core:2.0:Group";
/// URI of the enterprise User extension.
pub const ENTERPRISE_USER_SCHEMA: &str = "urn:ietf:params:scim:schemas:extension:enterprise:2.0:User";

impl SchemaRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the embedded core User and Group schemas
    /// plus the enterprise User extension.
    pub fn with_embedded_schemas() -> ScimResult<Self> {
        let mut registry = Self::new();
        for raw in [
            embedded::core_user_schema(),
            embedded::core_group_schema(),
            embedded::enterprise_user_schema(),
        ] {
            registry.add_schema(raw.parse()?);
        }
        Ok(registry)
    }

    /// Create a registry from every `*.json` file directly inside `schema_dir`.
    ///
    /// Any file that fails to load aborts the whole load.
    pub fn from_schema_dir<P: AsRef<Path>>(schema_dir: P) -> ScimResult<Self> {
        let mut paths = Vec::new();
        for entry in fs::read_dir(schema_dir.as_ref())? {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut registry = Self::new();
        for path in paths {
            registry.add_schema(Schema::from_file(&path)?);
        }
        info!(
            "Loaded {} schemas from {}",
            registry.schemas.len(),
            schema_dir.as_ref().display()
        );
        Ok(registry)
    }

    /// Add a schema, replacing any schema previously registered under its id.
    pub fn add_schema(&mut self, schema: Schema) {
        if self.schemas.contains_key(&schema.id) {
            warn!("Replacing previously registered schema {}", schema.id);
        }
        self.schemas.insert(schema.id.clone(), schema);
    }

    /// Get a specific schema by ID.
    pub fn get_schema(&self, id: &str) -> Option<&Schema> {
        self.schemas.get(id)
    }

    /// Get a schema by ID, failing with `SchemaNotFound`.
    pub fn require_schema(&self, id: &str) -> ScimResult<&Schema> {
        self.get_schema(id)
            .ok_or_else(|| ScimError::schema_not_found(id))
    }

    /// Get all schemas, ordered by id.
    pub fn get_schemas(&self) -> Vec<&Schema> {
        let mut schemas: Vec<&Schema> = self.schemas.values().collect();
        schemas.sort_by(|a, b| a.id.cmp(&b.id));
        schemas
    }

    /// Get the core User schema, if registered.
    pub fn get_user_schema(&self) -> Option<&Schema> {
        self.get_schema(USER_SCHEMA)
    }

    /// Get the core Group schema, if registered.
    pub fn get_group_schema(&self) -> Option<&Schema> {
        self.get_schema(GROUP_SCHEMA)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
