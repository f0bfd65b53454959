//! Error types for SCIM schema validation and resource operations.
//!
//! Validation failures are reported through [`ValidationError`]; everything
//! surrounding validation (decoding, schema loading, resource handlers) is
//! folded into [`ScimError`], which also knows how it maps onto a SCIM
//! response status.

/// Main error type for SCIM operations.
#[derive(Debug, thiserror::Error)]
pub enum ScimError {
    /// Document does not conform to its schema
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// JSON decoding or (de)serialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Schema or resource type file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The embedded meta-schema could not be constructed
    #[error("Meta-schema error: {0}")]
    MetaSchema(#[from] MetaSchemaError),

    /// Schema definition passed the meta-schema but is structurally inconsistent
    #[error("Invalid schema '{schema_id}': {message}")]
    InvalidSchema { schema_id: String, message: String },

    /// Schema not registered
    #[error("Schema not found: {schema_id}")]
    SchemaNotFound { schema_id: String },

    /// Resource type not registered
    #[error("Resource type not found: {name}")]
    ResourceTypeNotFound { name: String },

    /// Error reported by a resource handler
    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    /// Server configuration is unusable
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

/// Validation errors produced while checking a document against a schema.
///
/// Every variant is terminal: the first one encountered anywhere in the
/// recursive descent aborts the whole validation call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Required attribute is absent or null
    #[error("Required attribute '{attribute}' is missing")]
    RequiredFieldMissing { attribute: String },

    /// Value kind does not match the declared attribute type
    #[error("Attribute '{attribute}' has invalid type, expected {expected}, got {actual}")]
    TypeMismatch {
        attribute: String,
        expected: String,
        actual: String,
    },

    /// Multi-valued attribute given a non-array value
    #[error("Attribute '{attribute}' must be multi-valued (array)")]
    ArrayExpected { attribute: String },

    /// Required multi-valued attribute given an empty array
    #[error("Required attribute '{attribute}' cannot be an empty array")]
    EmptyRequiredArray { attribute: String },

    /// Two object keys match the same attribute name case-insensitively
    #[error("Duplicate key '{key}'")]
    DuplicateKey { key: String },

    /// Immutable attribute present in a replace operation
    #[error("Attribute '{attribute}' is immutable and cannot be modified")]
    ImmutableFieldModified { attribute: String },

    /// Schema declares a type keyword the validator does not know
    #[error("Attribute '{attribute}' has unsupported type '{data_type}'")]
    UnsupportedAttributeType {
        attribute: String,
        data_type: String,
    },

    /// String literal does not follow the lexical form of its type
    #[error("Attribute '{attribute}' has invalid {expected} value: {value}")]
    InvalidFormat {
        attribute: String,
        expected: String,
        value: String,
    },
}

/// Failure to construct the embedded meta-schemas.
///
/// This is a configuration defect in the build itself; hosts should refuse to
/// start when they see it.
#[derive(Debug, Clone, thiserror::Error)]
#[error("embedded meta-schema '{name}' is malformed: {message}")]
pub struct MetaSchemaError {
    pub name: &'static str,
    pub message: String,
}

/// Errors reported by a [`ResourceHandler`](crate::resource::ResourceHandler).
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    /// No resource with the given identifier
    #[error("{resource_type} with ID {id} not found")]
    NotFound { resource_type: String, id: String },

    /// One or more attribute values are already in use or reserved
    #[error("Uniqueness violation: {message}")]
    Uniqueness { message: String },

    /// Modification incompatible with an attribute's mutability or current state
    #[error("Mutability violation: {message}")]
    Mutability { message: String },

    /// Filter expression rejected by the handler
    #[error("Invalid filter: {message}")]
    InvalidFilter { message: String },

    /// Backend failure
    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl ScimError {
    /// Create a schema not found error
    pub fn schema_not_found(schema_id: impl Into<String>) -> Self {
        Self::SchemaNotFound {
            schema_id: schema_id.into(),
        }
    }

    /// Create a resource type not found error
    pub fn resource_type_not_found(name: impl Into<String>) -> Self {
        Self::ResourceTypeNotFound { name: name.into() }
    }

    /// Create an invalid schema error
    pub fn invalid_schema(schema_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSchema {
            schema_id: schema_id.into(),
            message: message.into(),
        }
    }

    /// HTTP status a transport layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::Json(_) => 400,
            Self::SchemaNotFound { .. } | Self::ResourceTypeNotFound { .. } => 404,
            Self::Resource(err) => match err {
                ResourceError::NotFound { .. } => 404,
                ResourceError::Uniqueness { .. } => 409,
                ResourceError::Mutability { .. } | ResourceError::InvalidFilter { .. } => 400,
                ResourceError::Storage { .. } => 500,
            },
            Self::Io(_)
            | Self::MetaSchema(_)
            | Self::InvalidSchema { .. }
            | Self::InvalidConfiguration { .. } => 500,
        }
    }

    /// RFC 7644 `scimType` detail keyword, when the status has one.
    pub fn scim_type(&self) -> Option<&'static str> {
        match self {
            Self::Validation(ValidationError::ImmutableFieldModified { .. }) => Some("mutability"),
            Self::Validation(_) => Some("invalidValue"),
            Self::Json(_) => Some("invalidSyntax"),
            Self::Resource(ResourceError::Uniqueness { .. }) => Some("uniqueness"),
            Self::Resource(ResourceError::Mutability { .. }) => Some("mutability"),
            Self::Resource(ResourceError::InvalidFilter { .. }) => Some("invalidFilter"),
            _ => None,
        }
    }
}

impl ValidationError {
    /// Create a required field missing error
    pub fn missing_required(attribute: impl Into<String>) -> Self {
        Self::RequiredFieldMissing {
            attribute: attribute.into(),
        }
    }

    /// Create a type mismatch error
    pub fn type_mismatch(
        attribute: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            attribute: attribute.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create an invalid format error
    pub fn invalid_format(
        attribute: impl Into<String>,
        expected: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidFormat {
            attribute: attribute.into(),
            expected: expected.into(),
            value: value.into(),
        }
    }
}

impl ResourceError {
    /// Create a not found error
    pub fn not_found(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            id: id.into(),
        }
    }
}

// Result type aliases for convenience
pub type ScimResult<T> = Result<T, ScimError>;
pub type ValidationResult<T> = Result<T, ValidationError>;
