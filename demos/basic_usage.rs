//! # Basic Usage Example
//!
//! Validates documents directly against the embedded User schema, then runs
//! the same documents through a [`ScimServer`] backed by the in-memory
//! handler.
//!
//! ```bash
//! RUST_LOG=debug cargo run --example basic_usage
//! ```

use scim_core::{
    InMemoryHandler, ListParams, ScimServerBuilder, SchemaRegistry, ValidationMode,
};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    // Direct validation against a schema
    let registry = SchemaRegistry::with_embedded_schemas()?;
    let user_schema = registry
        .get_user_schema()
        .ok_or("embedded User schema missing")?;

    let document = json!({
        "schemas": ["urn:ietf:params:scim:schemas:core:2.0:User"],
        "id": "2819c223-7f76-453a-919d-413861904646",
        "USERNAME": "bjensen@example.com",
        "name": {"givenName": "Barbara", "familyName": "Jensen", "nickname": "ignored"},
        "emails": [{"value": "bjensen@example.com", "type": "work", "primary": true}],
        "password": "t1meMa$heen"
    });

    for mode in [ValidationMode::Read, ValidationMode::Write, ValidationMode::Replace] {
        let projection = user_schema.validate_value(&document, mode)?;
        println!("{:?} projection: {}", mode, projection.to_json());
    }

    let invalid = json!({"userName": "bjensen", "active": "yes"});
    if let Err(e) = user_schema.validate_value(&invalid, ValidationMode::Write) {
        println!("Rejected document: {}", e);
    }

    // Full resource lifecycle through the operation layer
    let server = ScimServerBuilder::new(InMemoryHandler::new().with_unique_attribute("User", "userName"))
        .with_base_url("https://scim.example.com")
        .with_embedded_schemas()?
        .build()?;

    let created = server.create("Users", document.to_string().as_bytes()).await?;
    println!("Created: {}", serde_json::to_string_pretty(&created)?);

    let replaced = server
        .replace(
            "Users",
            &created.id,
            br#"{"userName": "bjensen@example.com", "displayName": "Babs Jensen"}"#,
        )
        .await?;
    println!("Replaced version: {}", replaced.meta.version);

    match server.create("Users", br#"{"userName": "BJENSEN@example.com"}"#).await {
        Ok(_) => println!("Unexpected duplicate accepted"),
        Err(e) => println!("Duplicate rejected with status {}: {}", e.status_code(), e),
    }

    let listed = server.list("Users", &ListParams::default()).await?;
    println!("{} user(s) stored", listed.total_results);

    server.delete("Users", &created.id).await?;
    Ok(())
}
