//! In-memory resource handler.
//!
//! Thread-safe `HashMap` storage behind a tokio `RwLock`, keyed by
//! `resource_type` → `id` → resource. Intended for tests, demos and
//! development servers where persistence is not required.
//!
//! # Example Usage
//!
//! ```rust
//! use scim_core::resource::{InMemoryHandler, ResourceHandler};
//! use scim_core::schema::{SchemaRegistry, ValidationMode};
//!
//! # tokio_test::block_on(async {
//! let registry = SchemaRegistry::with_embedded_schemas().unwrap();
//! let schema = registry.get_user_schema().expect("embedded");
//! let attributes = schema
//!     .validate(br#"{"userName": "bjensen"}"#, ValidationMode::Write)
//!     .unwrap();
//!
//! let handler = InMemoryHandler::new().with_unique_attribute("User", "userName");
//! let created = handler.create("User", attributes).await.unwrap();
//! let fetched = handler.get("User", &created.id).await.unwrap();
//! assert_eq!(fetched.attributes.get_str("userName"), Some("bjensen"));
//! # });
//! ```

use super::{ListParams, Meta, Page, Resource, ResourceHandler};
use crate::error::ResourceError;
use crate::schema::validation::eq_ignore_case;
use crate::schema::{AttributeValue, CoreAttributes};
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use chrono::Utc;
use log::{debug, warn};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

type Store = HashMap<String, HashMap<String, Resource>>;

/// In-memory [`ResourceHandler`] with optional per-type uniqueness checks.
#[derive(Clone, Default)]
pub struct InMemoryHandler {
    data: Arc<RwLock<Store>>,
    // resource_type -> attribute names that must be unique within the type
    unique_attributes: HashMap<String, Vec<String>>,
}

impl InMemoryHandler {
    /// Create an empty handler with no uniqueness constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require values of `attribute` to be unique among resources of
    /// `resource_type`. Strings compare case-insensitively.
    pub fn with_unique_attribute(
        mut self,
        resource_type: impl Into<String>,
        attribute: impl Into<String>,
    ) -> Self {
        self.unique_attributes
            .entry(resource_type.into())
            .or_default()
            .push(attribute.into());
        self
    }

    /// Number of stored resources of a type.
    pub async fn count(&self, resource_type: &str) -> usize {
        let data = self.data.read().await;
        data.get(resource_type).map_or(0, HashMap::len)
    }

    /// Clear all data (useful for testing).
    pub async fn clear(&self) {
        self.data.write().await.clear();
    }

    fn check_uniqueness(
        &self,
        store: &Store,
        resource_type: &str,
        attributes: &CoreAttributes,
        exclude_id: Option<&str>,
    ) -> Result<(), ResourceError> {
        let Some(unique) = self.unique_attributes.get(resource_type) else {
            return Ok(());
        };
        let Some(existing) = store.get(resource_type) else {
            return Ok(());
        };

        for name in unique {
            let Some(candidate) = attributes.get(name) else {
                continue;
            };
            let taken = existing
                .values()
                .filter(|resource| Some(resource.id.as_str()) != exclude_id)
                .filter_map(|resource| resource.attributes.get(name))
                .any(|stored| values_collide(stored, candidate));
            if taken {
                warn!("Rejected duplicate {} for {}", name, resource_type);
                return Err(ResourceError::Uniqueness {
                    message: format!("{} '{}' is already in use", name, display_value(candidate)),
                });
            }
        }
        Ok(())
    }
}

impl ResourceHandler for InMemoryHandler {
    async fn create(
        &self,
        resource_type: &str,
        attributes: CoreAttributes,
    ) -> Result<Resource, ResourceError> {
        // Identifiers are always server-assigned.
        let attributes = attributes.without("id");
        let mut data = self.data.write().await;
        self.check_uniqueness(&data, resource_type, &attributes, None)?;

        let version = version_of(&attributes)?;
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        let resource = Resource {
            schemas: Vec::new(),
            id: id.clone(),
            meta: Meta {
                resource_type: resource_type.to_string(),
                created: now,
                last_modified: now,
                version,
                location: None,
            },
            attributes,
        };

        data.entry(resource_type.to_string())
            .or_default()
            .insert(id.clone(), resource.clone());
        debug!("Created {} {}", resource_type, id);
        Ok(resource)
    }

    async fn get(&self, resource_type: &str, id: &str) -> Result<Resource, ResourceError> {
        let data = self.data.read().await;
        data.get(resource_type)
            .and_then(|resources| resources.get(id))
            .cloned()
            .ok_or_else(|| ResourceError::not_found(resource_type, id))
    }

    async fn get_all(
        &self,
        resource_type: &str,
        params: &ListParams,
    ) -> Result<Page, ResourceError> {
        if let Some(filter) = &params.filter {
            return Err(ResourceError::InvalidFilter {
                message: format!("filtering is not supported: {}", filter),
            });
        }

        let data = self.data.read().await;
        let mut resources: Vec<Resource> = data
            .get(resource_type)
            .map(|resources| resources.values().cloned().collect())
            .unwrap_or_default();
        resources.sort_by(|a, b| {
            a.meta
                .created
                .cmp(&b.meta.created)
                .then_with(|| a.id.cmp(&b.id))
        });

        Ok(Page {
            total: resources.len(),
            resources,
        })
    }

    async fn replace(
        &self,
        resource_type: &str,
        id: &str,
        attributes: CoreAttributes,
    ) -> Result<Resource, ResourceError> {
        let attributes = attributes.without("id");
        let mut data = self.data.write().await;
        self.check_uniqueness(&data, resource_type, &attributes, Some(id))?;

        let resource = data
            .get_mut(resource_type)
            .and_then(|resources| resources.get_mut(id))
            .ok_or_else(|| ResourceError::not_found(resource_type, id))?;

        resource.meta.version = version_of(&attributes)?;
        resource.meta.last_modified = Utc::now();
        resource.attributes = attributes;
        debug!("Replaced {} {}", resource_type, id);
        Ok(resource.clone())
    }

    async fn delete(&self, resource_type: &str, id: &str) -> Result<(), ResourceError> {
        let mut data = self.data.write().await;
        let removed = data
            .get_mut(resource_type)
            .and_then(|resources| resources.remove(id));
        if removed.is_none() {
            return Err(ResourceError::not_found(resource_type, id));
        }
        debug!("Deleted {} {}", resource_type, id);
        Ok(())
    }
}

fn values_collide(stored: &AttributeValue, candidate: &AttributeValue) -> bool {
    match (stored, candidate) {
        (AttributeValue::String(a), AttributeValue::String(b)) => eq_ignore_case(a, b),
        (a, b) => a == b,
    }
}

fn display_value(value: &AttributeValue) -> String {
    match value {
        AttributeValue::String(s) => s.clone(),
        other => serde_json::Value::from(other.clone()).to_string(),
    }
}

/// Weak entity tag derived from the resource content.
fn version_of(attributes: &CoreAttributes) -> Result<String, ResourceError> {
    let content = serde_json::to_vec(attributes).map_err(|e| ResourceError::Storage {
        message: format!("failed to serialize attributes for versioning: {}", e),
    })?;
    let hash = Sha256::digest(&content);
    Ok(format!("W/\"{}\"", BASE64.encode(&hash[..8])))
}
