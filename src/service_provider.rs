//! Service provider configuration (RFC 7643 §5).
//!
//! Describes which optional protocol features a service provider offers so
//! that clients can discover them before issuing requests.

use crate::error::{ScimError, ScimResult};
use crate::schema::embedded;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// URI identifying service provider configuration documents.
pub const SERVICE_PROVIDER_CONFIG_SCHEMA: &str =
    "urn:ietf:params:scim:schemas:core:2.0:ServiceProviderConfig";

/// Service provider capabilities.
///
/// # Examples
///
/// ```rust
/// use scim_core::ServiceProviderConfig;
///
/// let config = ServiceProviderConfig::embedded().unwrap();
/// assert!(config.etag.supported);
/// assert!(!config.patch.supported);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceProviderConfig {
    #[serde(default = "default_schemas")]
    pub schemas: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation_uri: Option<String>,
    pub patch: Supported,
    pub bulk: BulkConfig,
    pub filter: FilterConfig,
    pub change_password: Supported,
    pub sort: Supported,
    pub etag: Supported,
    pub authentication_schemes: Vec<AuthenticationScheme>,
}

/// Feature flag with no further options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supported {
    pub supported: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkConfig {
    pub supported: bool,
    /// Maximum number of operations in one bulk request
    pub max_operations: u32,
    /// Maximum bulk payload size in bytes
    pub max_payload_size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterConfig {
    pub supported: bool,
    /// Maximum number of resources returned in one response
    pub max_results: u32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            supported: false,
            max_results: 200,
        }
    }
}

/// Authentication scheme advertised to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationScheme {
    /// Scheme type, e.g. "oauthbearertoken" or "httpbasic"
    #[serde(rename = "type")]
    pub auth_type: String,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation_uri: Option<String>,
    #[serde(default)]
    pub primary: bool,
}

fn default_schemas() -> Vec<String> {
    vec![SERVICE_PROVIDER_CONFIG_SCHEMA.to_string()]
}

impl Default for ServiceProviderConfig {
    fn default() -> Self {
        Self {
            schemas: default_schemas(),
            documentation_uri: None,
            patch: Supported::default(),
            bulk: BulkConfig::default(),
            filter: FilterConfig::default(),
            change_password: Supported::default(),
            sort: Supported::default(),
            etag: Supported { supported: true },
            authentication_schemes: Vec::new(),
        }
    }
}

impl ServiceProviderConfig {
    /// Build a configuration from a JSON document.
    pub fn from_bytes(raw: &[u8]) -> ScimResult<Self> {
        let config: ServiceProviderConfig = serde_json::from_slice(raw)?;
        if !config
            .schemas
            .iter()
            .any(|uri| uri == SERVICE_PROVIDER_CONFIG_SCHEMA)
        {
            return Err(ScimError::InvalidConfiguration {
                message: format!(
                    "service provider configuration must list {}",
                    SERVICE_PROVIDER_CONFIG_SCHEMA
                ),
            });
        }
        debug!(
            "Loaded service provider configuration with {} authentication schemes",
            config.authentication_schemes.len()
        );
        Ok(config)
    }

    /// Read and build a configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ScimResult<Self> {
        let raw = fs::read(path.as_ref())?;
        Self::from_bytes(&raw)
    }

    /// The configuration shipped with the library.
    pub fn embedded() -> ScimResult<Self> {
        embedded::service_provider_config().parse()
    }
}

impl FromStr for ServiceProviderConfig {
    type Err = ScimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bytes(s.as_bytes())
    }
}
