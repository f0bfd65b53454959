//! Resources and the handler boundary for storing them.
//!
//! The validation core never touches storage. The operation layer in
//! [`crate::server`] validates a document first and then hands the resulting
//! [`CoreAttributes`] to a [`ResourceHandler`].

pub mod in_memory;

use crate::error::ResourceError;
use crate::schema::CoreAttributes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::future::Future;

pub use in_memory::InMemoryHandler;

/// A stored SCIM resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resource {
    /// Schema URIs of the representation, stamped by the operation layer
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub schemas: Vec<String>,
    pub id: String,
    #[serde(flatten)]
    pub attributes: CoreAttributes,
    pub meta: Meta,
}

/// Resource metadata maintained by the handler.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub resource_type: String,
    pub created: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    /// Weak entity tag, e.g. `W/"3694e05e9dff590"`
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Parameters passed through to [`ResourceHandler::get_all`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    /// Filter expression, forwarded verbatim to the handler
    pub filter: Option<String>,
}

/// One result set from [`ResourceHandler::get_all`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub resources: Vec<Resource>,
    /// Total number of matching resources
    pub total: usize,
}

/// Storage collaborator for validated resources.
///
/// Implementations own identifier assignment, metadata and uniqueness
/// enforcement. Every method is scoped by resource type name.
pub trait ResourceHandler {
    /// Store a new resource built from validated attributes.
    fn create(
        &self,
        resource_type: &str,
        attributes: CoreAttributes,
    ) -> impl Future<Output = Result<Resource, ResourceError>> + Send;

    /// Fetch a resource by identifier.
    fn get(
        &self,
        resource_type: &str,
        id: &str,
    ) -> impl Future<Output = Result<Resource, ResourceError>> + Send;

    /// Fetch every resource of a type.
    fn get_all(
        &self,
        resource_type: &str,
        params: &ListParams,
    ) -> impl Future<Output = Result<Page, ResourceError>> + Send;

    /// Replace the attributes of an existing resource.
    fn replace(
        &self,
        resource_type: &str,
        id: &str,
        attributes: CoreAttributes,
    ) -> impl Future<Output = Result<Resource, ResourceError>> + Send;

    /// Delete a resource by identifier.
    fn delete(
        &self,
        resource_type: &str,
        id: &str,
    ) -> impl Future<Output = Result<(), ResourceError>> + Send;
}
