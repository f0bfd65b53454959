//! Schema definitions and validation for SCIM resources.
//!
//! This module provides the schema model from RFC 7643, the recursive
//! validation engine that checks documents against it, and the registry
//! that holds loaded schemas.
//!
//! # Key Types
//!
//! - [`Schema`] - SCIM schema definition with attributes and metadata
//! - [`Attribute`] - Individual attribute specification and characteristics
//! - [`ValidationMode`] - Operation context a document is validated under
//! - [`CoreAttributes`] - Validated, policy-filtered projection of a document
//! - [`SchemaRegistry`] - Registry for managing and accessing schemas
//!
//! # Examples
//!
//! ```rust
//! use scim_core::schema::{SchemaRegistry, ValidationMode};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = SchemaRegistry::with_embedded_schemas()?;
//! let user_schema = registry.get_user_schema().expect("embedded");
//!
//! let attributes = user_schema.validate(br#"{"USERNAME": "bjensen"}"#, ValidationMode::Write)?;
//! assert_eq!(attributes.get_str("userName"), Some("bjensen"));
//! # Ok(())
//! # }
//! ```

pub mod core_attributes;
pub mod embedded;
mod loader;
pub mod meta;
pub mod registry;
pub mod types;
pub mod validation;


// Re-export the main types for convenience
pub use core_attributes::{AttributeValue, CoreAttributes};
pub use meta::{MetaSchemas, bootstrap};
pub use registry::{ENTERPRISE_USER_SCHEMA, GROUP_SCHEMA, SchemaRegistry, USER_SCHEMA};
pub use types::{Attribute, AttributeType, Mutability, Returned, Schema, Uniqueness};
pub use validation::{ValidationMode, validate_object};
