//! Parser for docschema schema files and document loaders.
//!
//! Schemas are written in YAML. Each top-level key of the first document
//! names a field and maps it to a validator expression; later documents
//! define named schemas for `include`. Documents to validate may be YAML,
//! JSON or TOML.
//!
//! # Example
//!
//! ```rust
//! use docschema_parser::{load_yaml, parse_schema_yaml};
//!
//! let schema = parse_schema_yaml(
//!     r#"
//! name: str()
//! age: int(min=0)
//! "#,
//! )
//! .expect("Failed to parse schema");
//!
//! let documents = load_yaml("name: Ada\nage: 36\n").expect("Failed to load document");
//! assert_eq!(documents.len(), 1);
//! assert_eq!(schema.root().fields().len(), 2);
//! ```

mod document;
mod expr;
mod schema;

pub use document::{load_json, load_toml, load_yaml, parse_temporal};
pub use expr::{Expr, parse_expression};
pub use schema::{SchemaParser, parse_schema_yaml};

use docschema_core::{Schema, SchemaError, Value, ValidatorRegistry};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while parsing schemas or loading documents.
#[derive(Debug, Error)]
pub enum ParserError {
    /// YAML parsing failed
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// JSON parsing failed
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("Failed to parse TOML: {0}")]
    TomlError(String),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Unsupported file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,

    /// Malformed validator expression
    #[error("Syntax error in '{expression}' at offset {position}: {message}")]
    Syntax {
        /// Expression source
        expression: String,
        /// Byte offset of the error
        position: usize,
        /// Description of the problem
        message: String,
    },

    /// Schema node of an unusable shape
    #[error("Invalid schema at '{path}': {message}")]
    InvalidSchema {
        /// Dotted path of the node
        path: String,
        /// Description of the problem
        message: String,
    },

    /// Validator construction failed
    #[error("Invalid schema at '{path}': {source}")]
    Schema {
        /// Dotted path of the node
        path: String,
        /// Underlying schema error
        #[source]
        source: SchemaError,
    },

    /// Document value with no counterpart in the value model
    #[error("Invalid document at '{path}': {message}")]
    InvalidDocument {
        /// Dotted path of the value
        path: String,
        /// Description of the problem
        message: String,
    },

    /// Schema source with no root document
    #[error("Schema is empty")]
    EmptySchema,
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// YAML format (.yml, .yaml)
    Yaml,
    /// JSON format (.json)
    Json,
    /// TOML format (.toml)
    Toml,
}

/// Detect the document format from a file path based on its extension.
///
/// # Supported Extensions
///
/// * `.yaml`, `.yml` → `DocumentFormat::Yaml`
/// * `.json` → `DocumentFormat::Json`
/// * `.toml` → `DocumentFormat::Toml`
///
/// # Errors
///
/// Returns `ParserError::InvalidExtension` if the file has no extension.
/// Returns `ParserError::UnsupportedFormat` if the extension is not recognized.
pub fn detect_format(path: &Path) -> Result<DocumentFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(ParserError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "yaml" | "yml" => Ok(DocumentFormat::Yaml),
        "json" => Ok(DocumentFormat::Json),
        "toml" => Ok(DocumentFormat::Toml),
        other => Err(ParserError::UnsupportedFormat(other.to_string())),
    }
}

/// Parse a schema file against a validator registry.
///
/// Schema files are always YAML, whatever their extension.
///
/// ```no_run
/// use docschema_core::ValidatorRegistry;
/// use docschema_parser::parse_schema_file;
/// use std::path::Path;
///
/// let schema = parse_schema_file(Path::new("schema.yaml"), ValidatorRegistry::builtin()).unwrap();
/// println!("{} named schemas", schema.includes().count());
/// ```
pub fn parse_schema_file(path: &Path, registry: &ValidatorRegistry) -> Result<Schema> {
    let content = std::fs::read_to_string(path)?;
    SchemaParser::new(registry).parse(&content)
}

/// Load every document in a file with automatic format detection.
///
/// YAML files may hold several `---` separated documents; JSON and TOML
/// files hold exactly one.
pub fn load_document_file(path: &Path) -> Result<Vec<Value>> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;

    match format {
        DocumentFormat::Yaml => load_yaml(&content),
        DocumentFormat::Json => Ok(vec![load_json(&content)?]),
        DocumentFormat::Toml => Ok(vec![load_toml(&content)?]),
    }
}
