//! Operation layer tying schemas, resource types and a handler together.
//!
//! [`ScimServer`] is transport-agnostic: it takes raw request bodies,
//! validates them under the mode matching the operation, and forwards the
//! validated projection to its [`ResourceHandler`]. Mapping results onto
//! HTTP is left to the host via [`ScimError::status_code`].
//!
//! | Operation | Validation mode |
//! |---|---|
//! | `create` | [`ValidationMode::Write`] |
//! | `replace` | [`ValidationMode::Replace`] |

use crate::error::{ScimError, ScimResult};
use crate::resource::{ListParams, Resource, ResourceHandler};
use crate::resource_type::ResourceType;
use crate::schema::{Schema, SchemaRegistry, ValidationMode, meta};
use crate::service_provider::ServiceProviderConfig;
use log::{debug, info};
use serde::Serialize;

/// Endpoint configuration used to stamp `meta.location`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Base URL, e.g. "https://scim.example.com"
    pub base_url: String,
    /// SCIM protocol version path segment. Defaults to "v2".
    pub scim_version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "https://localhost".to_string(),
            scim_version: "v2".to_string(),
        }
    }
}

impl ServerConfig {
    /// Location URL of a resource served at `endpoint`.
    pub fn location(&self, endpoint: &str, id: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.scim_version,
            endpoint.trim_matches('/'),
            id
        )
    }

    /// Ensure the base URL and version are usable.
    pub fn validate(&self) -> ScimResult<()> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ScimError::InvalidConfiguration {
                message: format!("base URL must start with http:// or https://: {}", self.base_url),
            });
        }
        if self.scim_version.is_empty() {
            return Err(ScimError::InvalidConfiguration {
                message: "SCIM version cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Response body for list operations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse {
    pub schemas: Vec<String>,
    pub total_results: usize,
    pub items_per_page: usize,
    /// 1-based index of the first returned resource
    pub start_index: usize,
    #[serde(rename = "Resources")]
    pub resources: Vec<Resource>,
}

impl ListResponse {
    /// A single unpaged result set starting at index 1.
    pub fn new(total_results: usize, resources: Vec<Resource>) -> Self {
        Self {
            schemas: vec![LIST_RESPONSE_SCHEMA.to_string()],
            total_results,
            items_per_page: resources.len(),
            start_index: 1,
            resources,
        }
    }
}

/// URI identifying list responses.
pub const LIST_RESPONSE_SCHEMA: &str = "urn:ietf:params:scim:api:messages:2.0:ListResponse";

/// Builder for [`ScimServer`].
///
/// # Examples
///
/// ```rust
/// use scim_core::ScimServerBuilder;
/// use scim_core::resource::InMemoryHandler;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let server = ScimServerBuilder::new(InMemoryHandler::new())
///     .with_base_url("https://scim.example.com")
///     .with_embedded_schemas()?
///     .build()?;
/// assert_eq!(server.resource_types().len(), 2);
/// # Ok(())
/// # }
/// ```
pub struct ScimServerBuilder<H> {
    handler: H,
    config: ServerConfig,
    service_provider_config: ServiceProviderConfig,
    registry: SchemaRegistry,
    resource_types: Vec<ResourceType>,
}

impl<H: ResourceHandler> ScimServerBuilder<H> {
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            config: ServerConfig::default(),
            service_provider_config: ServiceProviderConfig::default(),
            registry: SchemaRegistry::new(),
            resource_types: Vec::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    pub fn with_scim_version(mut self, version: impl Into<String>) -> Self {
        self.config.scim_version = version.into();
        self
    }

    pub fn with_service_provider_config(mut self, config: ServiceProviderConfig) -> Self {
        self.service_provider_config = config;
        self
    }

    /// Register the embedded core schemas and the User and Group resource
    /// types, and use the embedded service provider configuration.
    pub fn with_embedded_schemas(mut self) -> ScimResult<Self> {
        self.service_provider_config = ServiceProviderConfig::embedded()?;
        for schema in SchemaRegistry::with_embedded_schemas()?.get_schemas() {
            self.registry.add_schema(schema.clone());
        }
        self.resource_types.push(ResourceType::user()?);
        self.resource_types.push(ResourceType::group()?);
        Ok(self)
    }

    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.registry.add_schema(schema);
        self
    }

    pub fn with_resource_type(mut self, resource_type: ResourceType) -> Self {
        self.resource_types.push(resource_type);
        self
    }

    /// Check the configuration and that every resource type's schemas are
    /// registered, then build the server.
    pub fn build(self) -> ScimResult<ScimServer<H>> {
        meta::bootstrap()?;
        self.config.validate()?;

        for resource_type in &self.resource_types {
            self.registry.require_schema(&resource_type.schema)?;
            for extension in &resource_type.schema_extensions {
                self.registry.require_schema(&extension.schema)?;
            }
        }

        info!(
            "SCIM server ready with {} schemas and {} resource types",
            self.registry.len(),
            self.resource_types.len()
        );
        Ok(ScimServer {
            handler: self.handler,
            config: self.config,
            service_provider_config: self.service_provider_config,
            registry: self.registry,
            resource_types: self.resource_types,
        })
    }
}

/// Transport-agnostic SCIM service over a [`ResourceHandler`].
pub struct ScimServer<H> {
    handler: H,
    config: ServerConfig,
    service_provider_config: ServiceProviderConfig,
    registry: SchemaRegistry,
    resource_types: Vec<ResourceType>,
}

impl<H: ResourceHandler> ScimServer<H> {
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn service_provider_config(&self) -> &ServiceProviderConfig {
        &self.service_provider_config
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// All registered schemas, ordered by id.
    pub fn schemas(&self) -> Vec<&Schema> {
        self.registry.get_schemas()
    }

    pub fn schema(&self, id: &str) -> ScimResult<&Schema> {
        self.registry.require_schema(id)
    }

    pub fn resource_types(&self) -> &[ResourceType] {
        &self.resource_types
    }

    /// Look up a resource type by name ("User") or endpoint ("/Users").
    pub fn resource_type(&self, reference: &str) -> ScimResult<&ResourceType> {
        self.resource_types
            .iter()
            .find(|resource_type| resource_type.matches(reference))
            .ok_or_else(|| ScimError::resource_type_not_found(reference))
    }

    /// Validate `raw` for creation and store it.
    pub async fn create(&self, resource_type: &str, raw: &[u8]) -> ScimResult<Resource> {
        let resource_type = self.resource_type(resource_type)?;
        let attributes = resource_type.validate(&self.registry, raw, ValidationMode::Write)?;
        let resource = self
            .handler
            .create(&resource_type.name, attributes)
            .await?;
        info!("Created {} {}", resource_type.name, resource.id);
        Ok(self.locate(resource_type, resource))
    }

    pub async fn get(&self, resource_type: &str, id: &str) -> ScimResult<Resource> {
        let resource_type = self.resource_type(resource_type)?;
        let resource = self.handler.get(&resource_type.name, id).await?;
        Ok(self.locate(resource_type, resource))
    }

    pub async fn list(&self, resource_type: &str, params: &ListParams) -> ScimResult<ListResponse> {
        let resource_type = self.resource_type(resource_type)?;
        let page = self.handler.get_all(&resource_type.name, params).await?;
        debug!(
            "Listed {} of {} {} resources",
            page.resources.len(),
            page.total,
            resource_type.name
        );

        let resources = page
            .resources
            .into_iter()
            .map(|resource| self.locate(resource_type, resource))
            .collect();
        Ok(ListResponse::new(page.total, resources))
    }

    /// Validate `raw` as a full replacement and store it.
    pub async fn replace(&self, resource_type: &str, id: &str, raw: &[u8]) -> ScimResult<Resource> {
        let resource_type = self.resource_type(resource_type)?;
        let attributes = resource_type.validate(&self.registry, raw, ValidationMode::Replace)?;
        let resource = self
            .handler
            .replace(&resource_type.name, id, attributes)
            .await?;
        info!("Replaced {} {}", resource_type.name, id);
        Ok(self.locate(resource_type, resource))
    }

    pub async fn delete(&self, resource_type: &str, id: &str) -> ScimResult<()> {
        let resource_type = self.resource_type(resource_type)?;
        self.handler.delete(&resource_type.name, id).await?;
        info!("Deleted {} {}", resource_type.name, id);
        Ok(())
    }

    /// Stamp `meta.location` and the `schemas` URIs the resource carries.
    fn locate(&self, resource_type: &ResourceType, mut resource: Resource) -> Resource {
        resource.meta.location = Some(self.config.location(&resource_type.endpoint, &resource.id));
        resource.schemas = std::iter::once(resource_type.schema.clone())
            .chain(
                resource_type
                    .schema_extensions
                    .iter()
                    .filter(|extension| resource.attributes.contains_key(&extension.schema))
                    .map(|extension| extension.schema.clone()),
            )
            .collect();
        resource
    }
}
