use anyhow::{Context, Result};
use docschema_core::{DocumentValidator, ValidationContext, ValidatorRegistry};
use docschema_parser::{load_document_file, parse_schema_file};
use docschema_validator::SchemaValidator;
use std::path::Path;
use tracing::{debug, info};

use crate::output::{self, DocumentReport, OutputFormat};

pub fn execute(
    schema_path: &str,
    data_paths: &[String],
    lenient: bool,
    max_depth: usize,
    format: OutputFormat,
) -> Result<()> {
    info!("Validating {} file(s) against {}", data_paths.len(), schema_path);
    info!("Strict mode: {}", !lenient);
    info!("Max depth: {}", max_depth);

    let schema = parse_schema_file(Path::new(schema_path), ValidatorRegistry::builtin())
        .with_context(|| format!("Failed to parse schema file: {}", schema_path))?;

    if format == OutputFormat::Text {
        output::print_info(&format!(
            "Schema loaded: {} ({} named schema(s))",
            schema_path,
            schema.includes().count()
        ));
    }

    let context = ValidationContext::new()
        .with_strict(!lenient)
        .with_max_depth(max_depth);
    let validator = SchemaValidator::new();

    let mut reports = Vec::new();
    for data_path in data_paths {
        let documents = load_document_file(Path::new(data_path))
            .with_context(|| format!("Failed to load document file: {}", data_path))?;
        debug!("{}: {} document(s)", data_path, documents.len());

        for (index, document) in documents.iter().enumerate() {
            let report = validator.validate_with_report(&schema, document, &context);
            debug!(
                "{}[{}]: {} failure(s), {} node(s) visited",
                data_path,
                index,
                report.failures.len(),
                report.stats.nodes_visited
            );
            reports.push(DocumentReport {
                file: data_path.clone(),
                index,
                report,
            });
        }
    }

    output::print_validation_reports(&reports, format);

    if reports.iter().any(|r| !r.report.passed) {
        std::process::exit(1);
    }

    Ok(())
}
