//! Test data builders for creating valid and invalid SCIM documents.
//!
//! Builders start from a valid document and expose targeted modifications,
//! so each test states only the defect it is about.

use scim_core::{Schema, ScimResult};
use serde_json::{Value, json};

/// Builder for User documents
#[derive(Debug, Clone)]
pub struct UserBuilder {
    data: Value,
}

impl UserBuilder {
    /// Minimal valid User
    pub fn new() -> Self {
        Self {
            data: json!({
                "schemas": ["urn:ietf:params:scim:schemas:core:2.0:User"],
                "userName": "bjensen@example.com"
            }),
        }
    }

    /// RFC 7643 §8.2 style full User
    pub fn new_full() -> Self {
        Self {
            data: super::fixtures::rfc_examples::user_full(),
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.data["id"] = json!(id);
        self
    }

    pub fn without_username(mut self) -> Self {
        self.remove("userName");
        self
    }

    pub fn with_username(mut self, value: Value) -> Self {
        self.data["userName"] = value;
        self
    }

    pub fn with_attribute(mut self, name: &str, value: Value) -> Self {
        self.data[name] = value;
        self
    }

    pub fn with_emails(mut self, emails: Value) -> Self {
        self.data["emails"] = emails;
        self
    }

    pub fn with_password(mut self, password: &str) -> Self {
        self.data["password"] = json!(password);
        self
    }

    pub fn with_enterprise(mut self, extension: Value) -> Self {
        self.data["urn:ietf:params:scim:schemas:extension:enterprise:2.0:User"] = extension;
        self
    }

    pub fn remove(&mut self, name: &str) {
        if let Some(object) = self.data.as_object_mut() {
            object.remove(name);
        }
    }

    pub fn build(self) -> Value {
        self.data
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        serde_json::to_vec(&self.data).expect("serializable document")
    }
}

impl Default for UserBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for Group documents
#[derive(Debug, Clone)]
pub struct GroupBuilder {
    data: Value,
}

impl GroupBuilder {
    pub fn new() -> Self {
        Self {
            data: json!({
                "schemas": ["urn:ietf:params:scim:schemas:core:2.0:Group"],
                "displayName": "Tour Guides"
            }),
        }
    }

    pub fn with_member(mut self, value: &str, display: &str) -> Self {
        let member = json!({"value": value, "display": display});
        match self.data.get_mut("members").and_then(Value::as_array_mut) {
            Some(members) => members.push(member),
            None => self.data["members"] = json!([member]),
        }
        self
    }

    pub fn without_display_name(mut self) -> Self {
        if let Some(object) = self.data.as_object_mut() {
            object.remove("displayName");
        }
        self
    }

    pub fn build(self) -> Value {
        self.data
    }
}

impl Default for GroupBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for schema definition documents
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    data: Value,
}

impl SchemaBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            data: json!({
                "id": id,
                "name": "Test",
                "attributes": []
            }),
        }
    }

    /// Append a simple attribute definition.
    pub fn attribute(self, name: &str, data_type: &str) -> Self {
        self.raw_attribute(json!({"name": name, "type": data_type}))
    }

    /// Append an attribute definition given as JSON.
    pub fn raw_attribute(mut self, attribute: Value) -> Self {
        if let Some(attributes) = self.data["attributes"].as_array_mut() {
            attributes.push(attribute);
        }
        self
    }

    pub fn without(mut self, key: &str) -> Self {
        if let Some(object) = self.data.as_object_mut() {
            object.remove(key);
        }
        self
    }

    pub fn build_json(self) -> Value {
        self.data
    }

    /// Load the definition through the library's schema loader.
    pub fn load(self) -> ScimResult<Schema> {
        Schema::from_value(self.data)
    }
}
