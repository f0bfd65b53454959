//! Create, read, list, replace and delete through [`ScimServer`].

use serde_json::json;

use crate::common::builders::{GroupBuilder, UserBuilder};
use crate::common::fixtures::rfc_examples;

use scim_core::schema::ENTERPRISE_USER_SCHEMA;
use scim_core::{
    AttributeValue, InMemoryHandler, ListParams, ResourceError, ScimError, ScimServer,
    ScimServerBuilder, ServiceProviderConfig, ValidationError,
};

fn server() -> ScimServer<InMemoryHandler> {
    let handler = InMemoryHandler::new()
        .with_unique_attribute("User", "userName")
        .with_unique_attribute("Group", "displayName");
    ScimServerBuilder::new(handler)
        .with_base_url("https://example.com")
        .with_scim_version("v2")
        .with_embedded_schemas()
        .expect("embedded schemas")
        .build()
        .expect("server builds")
}

#[tokio::test]
async fn test_user_lifecycle() {
    let server = server();
    let raw = UserBuilder::new_full()
        .with_enterprise(rfc_examples::enterprise_extension())
        .to_bytes();

    let created = server.create("Users", &raw).await.unwrap();
    // Client-supplied id is replaced by the server.
    assert_ne!(created.id, "2819c223-7f76-453a-919d-413861904646");
    assert_eq!(created.meta.resource_type, "User");
    assert_eq!(
        created.meta.location,
        Some(format!("https://example.com/v2/Users/{}", created.id))
    );
    assert!(created.attributes.contains_key(ENTERPRISE_USER_SCHEMA));
    assert!(!created.attributes.contains_key("password"));

    let fetched = server.get("User", &created.id).await.unwrap();
    assert_eq!(fetched.attributes, created.attributes);

    let replacement = json!({
        "userName": "bjensen@example.com",
        "displayName": "Barbara Jensen",
        "groups": [{"value": "ignored"}]
    });
    let replaced = server
        .replace("User", &created.id, replacement.to_string().as_bytes())
        .await
        .unwrap();
    assert_eq!(replaced.attributes.get_str("displayName"), Some("Barbara Jensen"));
    assert!(!replaced.attributes.contains_key("groups"));
    assert!(!replaced.attributes.contains_key(ENTERPRISE_USER_SCHEMA));
    assert_ne!(replaced.meta.version, created.meta.version);

    server.delete("User", &created.id).await.unwrap();
    let listed = server.list("User", &ListParams::default()).await.unwrap();
    assert_eq!(listed.total_results, 0);
}

#[tokio::test]
async fn test_resource_json_shape() {
    let server = server();
    let created = server
        .create("User", br#"{"userName": "bjensen", "active": true}"#)
        .await
        .unwrap();

    let body = serde_json::to_value(&created).unwrap();
    assert_eq!(body["id"], json!(created.id));
    assert_eq!(body["userName"], "bjensen");
    assert_eq!(body["active"], true);
    assert_eq!(body["meta"]["resourceType"], "User");
    assert!(body["meta"]["version"].as_str().unwrap().starts_with("W/"));
    assert_eq!(body["schemas"], json!(["urn:ietf:params:scim:schemas:core:2.0:User"]));
}

#[test]
fn test_service_provider_config_from_file() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("schemas/config/ServiceProviderConfig.json");
    let config = ServiceProviderConfig::from_file(path).unwrap();

    let server = ScimServerBuilder::new(InMemoryHandler::new())
        .with_embedded_schemas()
        .unwrap()
        .with_service_provider_config(config.clone())
        .build()
        .unwrap();
    let body = serde_json::to_value(server.service_provider_config()).unwrap();
    assert_eq!(body["etag"]["supported"], true);
    assert_eq!(body["patch"]["supported"], false);
    assert_eq!(server.service_provider_config(), &config);
}

#[tokio::test]
async fn test_group_members() {
    let server = server();
    let group = GroupBuilder::new()
        .with_member("2819c223", "Babs Jensen")
        .with_member("902c246b", "Mandy Pepperidge")
        .build();
    let created = server
        .create("Groups", group.to_string().as_bytes())
        .await
        .unwrap();

    let members = created
        .attributes
        .get("members")
        .and_then(AttributeValue::as_multi)
        .unwrap();
    assert_eq!(members.len(), 2);

    // Member references are immutable once written.
    let result = server
        .replace("Groups", &created.id, group.to_string().as_bytes())
        .await;
    assert!(matches!(
        result,
        Err(ScimError::Validation(ValidationError::ImmutableFieldModified { .. }))
    ));

    let renamed = server
        .replace("Groups", &created.id, br#"{"displayName": "Tour Leads"}"#)
        .await
        .unwrap();
    assert_eq!(renamed.attributes.get_str("displayName"), Some("Tour Leads"));
}

#[tokio::test]
async fn test_error_status_mapping() {
    let server = server();

    let invalid = server.create("User", br#"{"userName": 7}"#).await.unwrap_err();
    assert_eq!(invalid.status_code(), 400);
    assert_eq!(invalid.scim_type(), Some("invalidValue"));

    let malformed = server.create("User", b"{not json").await.unwrap_err();
    assert_eq!(malformed.status_code(), 400);
    assert_eq!(malformed.scim_type(), Some("invalidSyntax"));

    let unknown = server.get("Devices", "1").await.unwrap_err();
    assert_eq!(unknown.status_code(), 404);

    let missing = server.delete("User", "does-not-exist").await.unwrap_err();
    assert!(matches!(
        missing,
        ScimError::Resource(ResourceError::NotFound { .. })
    ));
    assert_eq!(missing.status_code(), 404);

    server.create("User", br#"{"userName": "alice"}"#).await.unwrap();
    let taken = server
        .create("User", br#"{"userName": "Alice"}"#)
        .await
        .unwrap_err();
    assert_eq!(taken.status_code(), 409);
    assert_eq!(taken.scim_type(), Some("uniqueness"));

    let filtered = server
        .list(
            "User",
            &ListParams {
                filter: Some("userName eq \"alice\"".to_string()),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(filtered.scim_type(), Some("invalidFilter"));
}
