use anyhow::{Context, Result};
use docschema_core::ValidatorRegistry;
use docschema_parser::parse_schema_file;
use std::path::Path;
use tracing::info;

use crate::output::{self, OutputFormat};

pub fn execute(schema_path: &str, format: OutputFormat) -> Result<()> {
    info!("Checking schema: {}", schema_path);

    // A schema that parses and resolves all of its includes is valid
    let schema = parse_schema_file(Path::new(schema_path), ValidatorRegistry::builtin())
        .with_context(|| format!("Failed to parse schema file: {}", schema_path))?;

    output::print_schema_summary(schema_path, &schema, format);

    Ok(())
}
