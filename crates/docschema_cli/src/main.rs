mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use docschema_core::DEFAULT_MAX_DEPTH;
use output::OutputFormat;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "docschema")]
#[command(version, about = "Schema-driven validator for YAML, JSON and TOML documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate one or more documents against a schema
    Validate {
        /// Path to the schema file (YAML)
        schema: String,

        /// Documents to validate (YAML, JSON or TOML)
        #[arg(required = true)]
        data: Vec<String>,

        /// Accept keys not declared in the schema
        #[arg(short, long)]
        lenient: bool,

        /// Maximum structural nesting depth
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,

        /// Output format: text, json
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Check a schema file without validating data
    Check {
        /// Path to the schema file (YAML)
        schema: String,

        /// Output format: text, json
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so reports on stdout stay machine readable
    let log_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(filter)
        .init();

    match cli.command {
        Commands::Validate {
            schema,
            data,
            lenient,
            max_depth,
            format,
        } => commands::validate::execute(&schema, &data, lenient, max_depth, format),

        Commands::Check { schema, format } => commands::check::execute(&schema, format),
    }
}
