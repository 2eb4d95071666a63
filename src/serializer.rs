//! Serialization module for converting OpenAPI documents to JSON or YAML format.
//!
//! This module provides functions to serialize OpenAPI documents into standard formats
//! and write them to files or return them as strings.

use crate::error::{Error, Result};
use crate::openapi_builder::OpenApiDocument;
use log::debug;
use std::fs;
use std::path::Path;

/// Serializes an OpenAPI document to JSON format with pretty printing.
///
/// Paths and schemas keep the order in which resources were added.
///
/// # Arguments
///
/// * `doc` - The OpenAPI document to serialize
///
/// # Returns
///
/// Returns the indented JSON string, without a trailing newline.
///
/// # Errors
///
/// Returns [`Error::SerializationError`] if serialization fails.
///
/// # Example
///
/// ```
/// use openapi_from_resources::model::ApiModel;
/// use openapi_from_resources::openapi_builder::OpenApiBuilder;
/// use openapi_from_resources::serializer::serialize_json;
///
/// let doc = OpenApiBuilder::new().synthesize(&ApiModel::new());
/// let json = serialize_json(&doc).unwrap();
/// assert!(json.contains("\"openapi\": \"3.0.0\""));
/// ```
pub fn serialize_json(doc: &OpenApiDocument) -> Result<String> {
    debug!("Serializing OpenAPI document to JSON");
    Ok(serde_json::to_string_pretty(doc)?)
}

/// Serializes an OpenAPI document to YAML format.
///
/// # Errors
///
/// Returns [`Error::SerializationError`] if serialization fails.
pub fn serialize_yaml(doc: &OpenApiDocument) -> Result<String> {
    debug!("Serializing OpenAPI document to YAML");
    Ok(serde_yaml::to_string(doc)?)
}

/// Writes string content to a file, followed by a newline.
///
/// Creates the file if it doesn't exist, or overwrites it if it does.
/// Missing parent directories are created.
///
/// # Arguments
///
/// * `content` - The rendered document
/// * `path` - Destination file
///
/// # Errors
///
/// Returns [`Error::Io`] if a directory or the file cannot be written.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    debug!("Writing content to file: {}", path.display());

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    fs::write(path, format!("{}\n", content)).map_err(|e| Error::io(path, e))?;

    debug!("Successfully wrote {} bytes to {}", content.len() + 1, path.display());
    Ok(())
}
