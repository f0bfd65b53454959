//! SCIM 2.0 attribute and schema validation engine.
//!
//! Validates arbitrary JSON documents against SCIM schema definitions and
//! produces a policy-filtered projection ([`CoreAttributes`]) suitable for
//! storage or response, under one of three operation contexts.
//!
//! # Core Components
//!
//! - [`Schema`] - Schema model with the recursive validation engine
//! - [`SchemaRegistry`] - Loaded schemas keyed by URI
//! - [`ResourceType`] - Endpoint binding of a base schema and its extensions
//! - [`ScimServer`] - Operation layer over a pluggable [`ResourceHandler`]
//!
//! # Quick Start
//!
//! ```rust
//! use scim_core::{SchemaRegistry, ValidationMode};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = SchemaRegistry::with_embedded_schemas()?;
//! let user = registry.get_user_schema().expect("embedded");
//!
//! let projection = user.validate(
//!     br#"{"userName": "bjensen", "password": "t1meMa$heen"}"#,
//!     ValidationMode::Write,
//! )?;
//! assert_eq!(projection.get_str("userName"), Some("bjensen"));
//! assert!(!projection.contains_key("password"));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod resource;
pub mod resource_type;
pub mod schema;
pub mod server;
pub mod service_provider;

// Re-export commonly used types for convenience
pub use error::{
    MetaSchemaError, ResourceError, ScimError, ScimResult, ValidationError, ValidationResult,
};
pub use resource::{InMemoryHandler, ListParams, Meta, Resource, ResourceHandler};
pub use resource_type::{ResourceType, SchemaExtension};
pub use schema::{
    Attribute, AttributeType, AttributeValue, CoreAttributes, Mutability, Returned, Schema,
    SchemaRegistry, Uniqueness, ValidationMode,
};
pub use server::{ListResponse, ScimServer, ScimServerBuilder, ServerConfig};
pub use service_provider::{AuthenticationScheme, ServiceProviderConfig};
