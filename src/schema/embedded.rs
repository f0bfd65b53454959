//! Schema definitions embedded in the library.
//!
//! Provides the meta-schemas plus the RFC 7643 core schemas and resource
//! types, so that a registry can be built without any schema files on disk.

/// Meta-schema for schema definitions.
pub fn schema_meta_schema() -> &'static str {
    include_str!("../../schemas/meta/Schema.json")
}

/// Meta-schema for resource type definitions.
pub fn resource_type_meta_schema() -> &'static str {
    include_str!("../../schemas/meta/ResourceType.json")
}

/// Returns the core User schema as a JSON string.
pub fn core_user_schema() -> &'static str {
    include_str!("../../schemas/User.json")
}

/// Returns the core Group schema as a JSON string.
pub fn core_group_schema() -> &'static str {
    include_str!("../../schemas/Group.json")
}

/// Returns the enterprise User extension schema as a JSON string.
pub fn enterprise_user_schema() -> &'static str {
    include_str!("../../schemas/EnterpriseUser.json")
}

pub fn user_resource_type() -> &'static str {
    include_str!("../../schemas/resource_types/User.json")
}

pub fn group_resource_type() -> &'static str {
    include_str!("../../schemas/resource_types/Group.json")
}

/// Returns the default service provider configuration as a JSON string.
pub fn service_provider_config() -> &'static str {
    include_str!("../../schemas/config/ServiceProviderConfig.json")
}
