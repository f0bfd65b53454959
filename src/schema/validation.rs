//! Schema validation logic for SCIM documents.
//!
//! Validation walks the schema tree alongside the decoded document:
//! [`Schema`] hands the top-level object to [`validate_object`], which
//! matches keys to declared attributes and delegates each one to
//! [`Attribute::validate`]. Complex attributes recurse back into
//! [`validate_object`]. The first error anywhere aborts the whole call.
//!
//! The same walk produces the [`CoreAttributes`] projection: only values
//! that survive the mutability gate and whose attribute is returnable are
//! emitted, and only outside [`ValidationMode::Read`].

use super::core_attributes::{AttributeValue, CoreAttributes};
use super::types::{Attribute, AttributeType, Mutability, Schema};
use crate::error::{ScimResult, ValidationError, ValidationResult};
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use chrono::{DateTime, FixedOffset};
use serde_json::{Map, Number, Value};

/// Operation context a document is validated under.
///
/// | Mode | Mutability gate | Output |
/// |---|---|---|
/// | `Read` | no | never |
/// | `Write` | no | returnable values |
/// | `Replace` | yes | returnable values that pass the gate |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationMode {
    /// Shape and presence only, e.g. existence or reference checks
    Read,
    /// Resource creation
    Write,
    /// Full replacement of an existing resource
    Replace,
}

impl Schema {
    /// Decode `raw` and validate it against this schema.
    ///
    /// Numbers keep their literal form through decoding, so `1`, `1.0` and
    /// `1e2` stay distinguishable for integer attributes.
    pub fn validate(&self, raw: &[u8], mode: ValidationMode) -> ScimResult<CoreAttributes> {
        let document: Value = serde_json::from_slice(raw)?;
        Ok(self.validate_value(&document, mode)?)
    }

    /// Validate an already decoded document against this schema.
    pub fn validate_value(
        &self,
        document: &Value,
        mode: ValidationMode,
    ) -> ValidationResult<CoreAttributes> {
        validate_object(&self.attributes, &self.id, document, mode)
    }
}

/// Validate `value` as an object against an ordered attribute set.
///
/// Keys are matched to attribute names case-insensitively. Keys that match
/// no declared attribute are ignored. `context` names the enclosing
/// attribute (or schema) in type errors.
pub fn validate_object(
    attributes: &[Attribute],
    context: &str,
    value: &Value,
    mode: ValidationMode,
) -> ValidationResult<CoreAttributes> {
    let Value::Object(object) = value else {
        return Err(ValidationError::type_mismatch(
            context,
            AttributeType::Complex.as_str(),
            value_kind(value),
        ));
    };

    let mut result = CoreAttributes::new();
    for attribute in attributes {
        let matched = find_member(object, &attribute.name)?;
        result.merge(attribute.validate(matched, mode)?);
    }
    Ok(result)
}

impl Attribute {
    /// Validate one candidate value (`None` when the key is absent).
    ///
    /// Returns a map holding at most this attribute's own key.
    pub fn validate(
        &self,
        value: Option<&Value>,
        mode: ValidationMode,
    ) -> ValidationResult<CoreAttributes> {
        let mut result = CoreAttributes::new();

        let value = match value {
            None | Some(Value::Null) if self.required => {
                return Err(ValidationError::missing_required(&self.name));
            }
            None | Some(Value::Null) => return Ok(result),
            Some(value) => value,
        };

        if !self.multi_valued {
            if let Some(emitted) = self.validate_singular(value, mode)? {
                result.insert(&self.name, emitted);
            }
            return Ok(result);
        }

        let Value::Array(elements) = value else {
            return Err(ValidationError::ArrayExpected {
                attribute: self.name.clone(),
            });
        };
        if elements.is_empty() && self.required {
            return Err(ValidationError::EmptyRequiredArray {
                attribute: self.name.clone(),
            });
        }

        let mut collected = Vec::with_capacity(elements.len());
        for element in elements {
            if let Some(emitted) = self.validate_singular(element, mode)? {
                collected.push(emitted);
            }
        }
        if mode != ValidationMode::Read && !collected.is_empty() {
            result.insert(&self.name, AttributeValue::Multi(collected));
        }
        Ok(result)
    }

    /// Mutability gate, type check, then returnability gate for one value.
    fn validate_singular(
        &self,
        value: &Value,
        mode: ValidationMode,
    ) -> ValidationResult<Option<AttributeValue>> {
        if mode == ValidationMode::Replace {
            match self.mutability {
                Mutability::Immutable => {
                    return Err(ValidationError::ImmutableFieldModified {
                        attribute: self.name.clone(),
                    });
                }
                // Resending a server-assigned value is allowed, but it is ignored.
                Mutability::ReadOnly => return Ok(None),
                Mutability::ReadWrite | Mutability::WriteOnly => {}
            }
        }

        let checked = self.check_type(value, mode)?;

        if mode != ValidationMode::Read && self.is_returnable() {
            Ok(Some(checked))
        } else {
            Ok(None)
        }
    }

    fn check_type(&self, value: &Value, mode: ValidationMode) -> ValidationResult<AttributeValue> {
        match (&self.data_type, value) {
            (AttributeType::Boolean, Value::Bool(b)) => Ok(AttributeValue::Boolean(*b)),
            (AttributeType::String | AttributeType::Reference, Value::String(s)) => {
                Ok(AttributeValue::String(s.clone()))
            }
            (AttributeType::Integer, Value::Number(n)) => {
                if is_integer_literal(n) {
                    Ok(AttributeValue::Number(n.clone()))
                } else {
                    Err(ValidationError::type_mismatch(&self.name, "integer", "decimal"))
                }
            }
            (AttributeType::Decimal, Value::Number(n)) => Ok(AttributeValue::Number(n.clone())),
            (AttributeType::DateTime, Value::String(s)) => {
                if DateTime::<FixedOffset>::parse_from_rfc3339(s).is_ok() {
                    Ok(AttributeValue::String(s.clone()))
                } else {
                    Err(ValidationError::invalid_format(&self.name, "dateTime", s))
                }
            }
            (AttributeType::Binary, Value::String(s)) => {
                if BASE64.decode(s).is_ok() {
                    Ok(AttributeValue::String(s.clone()))
                } else {
                    Err(ValidationError::invalid_format(&self.name, "binary", s))
                }
            }
            (AttributeType::Complex, _) => {
                validate_object(&self.sub_attributes, &self.name, value, mode)
                    .map(AttributeValue::Complex)
            }
            (AttributeType::Unsupported(keyword), _) => {
                Err(ValidationError::UnsupportedAttributeType {
                    attribute: self.name.clone(),
                    data_type: keyword.clone(),
                })
            }
            (expected, actual) => Err(ValidationError::type_mismatch(
                &self.name,
                expected.as_str(),
                value_kind(actual),
            )),
        }
    }
}

/// Find the single member whose key equals `name` ignoring case.
fn find_member<'a>(object: &'a Map<String, Value>, name: &str) -> ValidationResult<Option<&'a Value>> {
    let mut hit = None;
    for (key, value) in object {
        if !eq_ignore_case(key, name) {
            continue;
        }
        if hit.is_some() {
            return Err(ValidationError::DuplicateKey { key: key.clone() });
        }
        hit = Some(value);
    }
    Ok(hit)
}

/// Compare under simple Unicode case folding, one char at a time.
///
/// "uſerName" matches "userName" (ſ folds to s) and the Kelvin sign matches
/// "k". Multi-char expansions such as ß to "ss" never match.
pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars().map(fold_case).eq(b.chars().map(fold_case))
}

fn fold_case(c: char) -> char {
    let upper = single(c.to_uppercase()).unwrap_or(c);
    single(upper.to_lowercase()).unwrap_or(upper)
}

fn single(mut chars: impl Iterator<Item = char>) -> Option<char> {
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Integer literals carry neither a fraction nor an exponent. Checked on the
/// literal text so that large or precise values are never rounded first.
fn is_integer_literal(number: &Number) -> bool {
    !number.to_string().contains(['.', 'e', 'E'])
}

/// Get the type name of a JSON value for error messages.
fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if is_integer_literal(n) => "integer",
        Value::Number(_) => "decimal",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "complex",
    }
}
