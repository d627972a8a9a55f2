use clap::ValueEnum;
use colored::*;
use docschema_core::{Schema, ValidationReport};
use serde_json::json;

/// Report rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Validation outcome for one document of one input file.
pub struct DocumentReport {
    pub file: String,
    /// Position in a multi-document stream
    pub index: usize,
    pub report: ValidationReport,
}

impl DocumentReport {
    fn label(&self, multi: bool) -> String {
        if multi {
            format!("{} (document {})", self.file, self.index + 1)
        } else {
            self.file.clone()
        }
    }
}

pub fn print_validation_reports(reports: &[DocumentReport], format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json_reports(reports),
        OutputFormat::Text => print_text_reports(reports),
    }
}

fn print_text_reports(reports: &[DocumentReport]) {
    println!("\n{}", "═".repeat(60));
    println!("{}", "  VALIDATION REPORT".bold());
    println!("{}", "═".repeat(60));

    for document in reports {
        let multi = reports.iter().filter(|r| r.file == document.file).count() > 1;
        let label = document.label(multi);
        let report = &document.report;

        if report.passed {
            println!("\n{} {}", "✓".green().bold(), label.green().bold());
            continue;
        }

        println!("\n{} {}", "✗".red().bold(), label.red().bold());
        for (i, failure) in report.failures.iter().enumerate() {
            println!("  {}. {}", i + 1, failure.to_string().red());
        }
    }

    let failed = reports.iter().filter(|r| !r.report.passed).count();
    let failures: usize = reports.iter().map(|r| r.report.failures.len()).sum();

    if failed == 0 {
        println!(
            "\n{} {}",
            "✓".green().bold(),
            "Validation PASSED".green().bold()
        );
    } else {
        println!(
            "\n{} {}",
            "✗".red().bold(),
            "Validation FAILED".red().bold()
        );
    }

    println!("\n{}", "Summary:".bold());
    println!("  Documents:      {}", reports.len());
    println!("  Failed:         {}", failed);
    println!("  Total failures: {}", failures);
    println!("{}", "═".repeat(60));
}

fn print_json_reports(reports: &[DocumentReport]) {
    let documents: Vec<_> = reports
        .iter()
        .map(|document| {
            let report = &document.report;
            json!({
                "file": document.file,
                "document": document.index,
                "passed": report.passed,
                "failures": report.failures,
                "stats": {
                    "nodes_visited": report.stats.nodes_visited,
                    "constraints_evaluated": report.stats.constraints_evaluated,
                    "includes_resolved": report.stats.includes_resolved,
                    "duration_ms": report.stats.duration_ms,
                },
            })
        })
        .collect();

    let output = json!({
        "passed": reports.iter().all(|r| r.report.passed),
        "documents": documents,
        "summary": {
            "document_count": reports.len(),
            "failed_count": reports.iter().filter(|r| !r.report.passed).count(),
            "failure_count": reports.iter().map(|r| r.report.failures.len()).sum::<usize>(),
        }
    });

    println!("{:#}", output);
}

pub fn print_schema_summary(path: &str, schema: &Schema, format: OutputFormat) {
    let root = schema.root();
    let fields: Vec<&str> = root.fields().iter().map(|f| f.name()).collect();
    let includes: Vec<&str> = schema.includes().map(|(name, _)| name).collect();

    match format {
        OutputFormat::Json => {
            let output = json!({
                "schema": path,
                "valid": true,
                "root": root.tag(),
                "fields": fields,
                "includes": includes,
            });
            println!("{:#}", output);
        }
        OutputFormat::Text => {
            print_success("Schema is valid");
            println!("\nSchema Summary:");
            println!("  File:      {}", path);
            println!("  Root:      {}", root.tag());
            println!("  Fields:    {}", fields.len());
            for field in root.fields() {
                let validator = field.validator();
                let optional = if validator.is_optional() { " (optional)" } else { "" };
                println!("    - {}: {}{}", field.name(), validator.tag(), optional);
            }
            if includes.is_empty() {
                println!("  Includes:  none");
            } else {
                println!("  Includes:  {}", includes.join(", "));
            }
        }
    }
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
