//! Core schema type definitions for SCIM resources.
//!
//! This module contains the data structures that describe SCIM schemas and
//! attribute definitions with their characteristics as specified in RFC 7643.
//! They are built once from trusted definitions and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A SCIM schema definition.
///
/// Wraps one ordered attribute tree under a globally unique URI. Construct
/// it through [`Schema::from_str`](Schema::from_str) and friends so the
/// definition is checked against the meta-schema first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Unique schema identifier (URI)
    pub id: String,
    /// Human-readable schema name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Schema description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Ordered attribute definitions
    pub attributes: Vec<Attribute>,
}

/// Definition of a single SCIM attribute.
///
/// A complex attribute owns its sub-attributes outright, so a schema is
/// always a tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    /// Attribute name
    pub name: String,
    /// Data type of the attribute
    #[serde(rename = "type")]
    pub data_type: AttributeType,
    /// Sub-attributes for complex types
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_attributes: Vec<Attribute>,
    /// Whether this attribute holds an array of values
    #[serde(default)]
    pub multi_valued: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether this attribute must be present
    #[serde(default)]
    pub required: bool,
    /// Suggested values; advisory only, never enforced
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub canonical_values: Vec<String>,
    /// Whether string comparison is case-sensitive
    #[serde(default)]
    pub case_exact: bool,
    #[serde(default)]
    pub mutability: Mutability,
    #[serde(default)]
    pub returned: Returned,
    #[serde(default)]
    pub uniqueness: Uniqueness,
    /// Resource types a reference attribute may point at
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reference_types: Vec<String>,
}

impl Attribute {
    /// Create a single-valued, optional, read-write attribute of the given type.
    pub fn new(name: impl Into<String>, data_type: AttributeType) -> Self {
        Self {
            name: name.into(),
            data_type,
            sub_attributes: Vec::new(),
            multi_valued: false,
            description: None,
            required: false,
            canonical_values: Vec::new(),
            case_exact: false,
            mutability: Mutability::default(),
            returned: Returned::default(),
            uniqueness: Uniqueness::default(),
            reference_types: Vec::new(),
        }
    }

    /// Create a complex attribute owning the given sub-attributes.
    pub fn complex(name: impl Into<String>, sub_attributes: Vec<Attribute>) -> Self {
        Self {
            sub_attributes,
            ..Self::new(name, AttributeType::Complex)
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn multi_valued(mut self) -> Self {
        self.multi_valued = true;
        self
    }

    pub fn with_mutability(mut self, mutability: Mutability) -> Self {
        self.mutability = mutability;
        self
    }

    pub fn with_returned(mut self, returned: Returned) -> Self {
        self.returned = returned;
        self
    }

    pub fn with_uniqueness(mut self, uniqueness: Uniqueness) -> Self {
        self.uniqueness = uniqueness;
        self
    }

    /// Whether the attribute's value belongs in a validated projection.
    pub fn is_returnable(&self) -> bool {
        matches!(self.returned, Returned::Always | Returned::Default)
    }
}

/// SCIM attribute data types.
///
/// Keywords outside RFC 7643 are kept verbatim as [`AttributeType::Unsupported`]
/// so that a schema using them still loads; values for such attributes are
/// rejected at validation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AttributeType {
    String,
    Boolean,
    Decimal,
    Integer,
    /// DateTime in RFC3339 format
    DateTime,
    /// URI reference
    Reference,
    /// Complex attribute with sub-attributes
    Complex,
    /// Binary data (base64 encoded)
    Binary,
    Unsupported(String),
}

impl AttributeType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Decimal => "decimal",
            Self::Integer => "integer",
            Self::DateTime => "dateTime",
            Self::Reference => "reference",
            Self::Complex => "complex",
            Self::Binary => "binary",
            Self::Unsupported(keyword) => keyword,
        }
    }
}

impl From<String> for AttributeType {
    fn from(keyword: String) -> Self {
        match keyword.as_str() {
            "string" => Self::String,
            "boolean" => Self::Boolean,
            "decimal" => Self::Decimal,
            "integer" => Self::Integer,
            "dateTime" => Self::DateTime,
            "reference" => Self::Reference,
            "complex" => Self::Complex,
            "binary" => Self::Binary,
            _ => Self::Unsupported(keyword),
        }
    }
}

impl From<AttributeType> for String {
    fn from(data_type: AttributeType) -> Self {
        match data_type {
            AttributeType::Unsupported(keyword) => keyword,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Circumstances under which an attribute's value may be (re)defined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mutability {
    /// Managed by the server; client values are ignored on replace
    ReadOnly,
    #[default]
    ReadWrite,
    /// Set once at creation, never modified
    Immutable,
    /// Passwords and similar
    WriteOnly,
}

/// When an attribute's value is included in a validated projection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Returned {
    Always,
    #[default]
    Default,
    Never,
    Request,
}

/// Scope in which attribute values must be unique.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Uniqueness {
    #[default]
    None,
    Server,
    Global,
}
