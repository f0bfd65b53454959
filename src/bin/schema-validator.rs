//! # SCIM Schema Validator
//!
//! A command-line utility that checks SCIM schema definition files by loading
//! them through the same path the library uses: meta-schema validation,
//! deserialization and the structural consistency check.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin schema-validator schemas/User.json
//! cargo run --bin schema-validator ./schemas/
//! ```
//!
//! ## Output
//!
//! ```text
//! Validating schema file: schemas/User.json
//! ✓ Schema is valid!
//!
//! Schema Summary:
//!   ID: urn:ietf:params:scim:schemas:core:2.0:User
//!   Name: User
//!   Attributes: 18
//!   Required attributes: 1
//!   Multi-valued attributes: 5
//! ```
//!
//! ## Exit Codes
//!
//! - `0`: All schemas are valid
//! - `1`: One or more schemas are invalid or a file could not be read

use scim_core::schema::{Attribute, Schema, SchemaRegistry};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <schema-file-or-directory>", args[0]);
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  {} schemas/User.json", args[0]);
        eprintln!("  {} ./schemas/", args[0]);
        process::exit(1);
    }

    let path = Path::new(&args[1]);
    if path.is_file() {
        validate_single_file(path);
    } else if path.is_dir() {
        validate_directory(path);
    } else {
        eprintln!(
            "Error: '{}' is not a valid file or directory",
            path.display()
        );
        process::exit(1);
    }
}

fn validate_single_file(file_path: &Path) {
    println!("Validating schema file: {}", file_path.display());

    match Schema::from_file(file_path) {
        Ok(schema) => {
            println!("✓ Schema is valid!");
            print_schema_summary(&schema);
        }
        Err(e) => {
            eprintln!("❌ Schema validation failed: {}", e);
            process::exit(1);
        }
    }
}

fn validate_directory(dir_path: &Path) {
    println!("Validating schemas in directory: {}", dir_path.display());

    let paths = match json_files(dir_path) {
        Ok(paths) => paths,
        Err(e) => {
            eprintln!("Error reading directory: {}", e);
            process::exit(1);
        }
    };

    let mut valid_count = 0;
    let mut error_count = 0;
    for path in &paths {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        println!("\nValidating: {}", file_name);

        match Schema::from_file(path) {
            Ok(schema) => {
                println!("  ✓ Valid - {} ({})", display_name(&schema), schema.id);
                valid_count += 1;
            }
            Err(e) => {
                eprintln!("  ❌ Invalid - {}", e);
                error_count += 1;
            }
        }
    }

    println!("\nValidation Summary:");
    println!("  Valid schemas: {}", valid_count);
    println!("  Invalid schemas: {}", error_count);

    if error_count > 0 {
        process::exit(1);
    }

    println!("\nTesting schema registry loading...");
    match SchemaRegistry::from_schema_dir(dir_path) {
        Ok(registry) => {
            println!("✓ Schema registry loaded successfully");
            let schemas = registry.get_schemas();
            println!("  Total schemas loaded: {}", schemas.len());
            for schema in schemas {
                println!("    - {} ({})", display_name(schema), schema.id);
            }
        }
        Err(e) => {
            eprintln!("❌ Failed to load schema registry: {}", e);
            process::exit(1);
        }
    }
}

fn json_files(dir_path: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir_path)? {
        let path = entry?.path();
        if path.extension().and_then(|s| s.to_str()) == Some("json") {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

fn display_name(schema: &Schema) -> &str {
    schema.name.as_deref().unwrap_or("<unnamed>")
}

fn print_schema_summary(schema: &Schema) {
    println!();
    println!("Schema Summary:");
    println!("  ID: {}", schema.id);
    println!("  Name: {}", display_name(schema));
    if let Some(description) = &schema.description {
        println!("  Description: {}", description);
    }
    println!("  Attributes: {}", schema.attributes.len());

    let mut type_counts = BTreeMap::new();
    count_types(&schema.attributes, &mut type_counts);

    let required: Vec<&str> = schema
        .attributes
        .iter()
        .filter(|attr| attr.required)
        .map(|attr| attr.name.as_str())
        .collect();
    let multi_valued = schema
        .attributes
        .iter()
        .filter(|attr| attr.multi_valued)
        .count();

    println!("  Required attributes: {}", required.len());
    println!("  Multi-valued attributes: {}", multi_valued);
    println!("  Attribute types (including sub-attributes):");
    for (data_type, count) in type_counts {
        println!("    - {}: {}", data_type, count);
    }
    if !required.is_empty() {
        println!("  Required attribute names: {}", required.join(", "));
    }
}

fn count_types(attributes: &[Attribute], counts: &mut BTreeMap<String, usize>) {
    for attr in attributes {
        *counts.entry(attr.data_type.to_string()).or_insert(0) += 1;
        count_types(&attr.sub_attributes, counts);
    }
}
