//! Validated output projection of a SCIM document.
//!
//! A [`CoreAttributes`] map is produced fresh by every validation call and
//! only contains values that passed type, mutability and returnability
//! checks, keyed by the attribute name as declared in the schema.

use serde::Serialize;
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;
use std::collections::btree_map;

/// A single validated value.
///
/// Mirrors the shape of the attribute it was validated against: scalars for
/// simple types, a nested map for complex attributes, a list for
/// multi-valued ones.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Boolean(bool),
    String(String),
    /// Number kept as its original literal
    Number(Number),
    Complex(CoreAttributes),
    Multi(Vec<AttributeValue>),
}

impl AttributeValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_complex(&self) -> Option<&CoreAttributes> {
        match self {
            Self::Complex(attributes) => Some(attributes),
            _ => None,
        }
    }

    pub fn as_multi(&self) -> Option<&[AttributeValue]> {
        match self {
            Self::Multi(values) => Some(values),
            _ => None,
        }
    }
}

impl From<AttributeValue> for Value {
    fn from(value: AttributeValue) -> Self {
        match value {
            AttributeValue::Boolean(b) => Value::Bool(b),
            AttributeValue::String(s) => Value::String(s),
            AttributeValue::Number(n) => Value::Number(n),
            AttributeValue::Complex(attributes) => attributes.into(),
            AttributeValue::Multi(values) => {
                Value::Array(values.into_iter().map(Value::from).collect())
            }
        }
    }
}

/// String-keyed mapping of validated attribute values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CoreAttributes(BTreeMap<String, AttributeValue>);

impl CoreAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a value by its exact declared name.
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.0.get(name)
    }

    /// Look up a string value by its exact declared name.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(AttributeValue::as_str)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, AttributeValue> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Consume the map and return it without `name`.
    pub fn without(mut self, name: &str) -> Self {
        self.0.remove(name);
        self
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, value: AttributeValue) {
        self.0.insert(name.into(), value);
    }

    /// Key union with `other`. Each attribute owns exactly one key, so
    /// sibling results never collide.
    pub(crate) fn merge(&mut self, other: CoreAttributes) {
        self.0.extend(other.0);
    }

    /// Re-serialize into a JSON value.
    pub fn to_json(&self) -> Value {
        self.clone().into()
    }
}

impl From<CoreAttributes> for Value {
    fn from(attributes: CoreAttributes) -> Self {
        Value::Object(
            attributes
                .0
                .into_iter()
                .map(|(name, value)| (name, Value::from(value)))
                .collect::<Map<String, Value>>(),
        )
    }
}

impl<'a> IntoIterator for &'a CoreAttributes {
    type Item = (&'a String, &'a AttributeValue);
    type IntoIter = btree_map::Iter<'a, String, AttributeValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
