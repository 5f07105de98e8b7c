//! Entgen
//!
//! Schema-to-entity-model transformer for template-driven code generation.
//!
//! This is the main entry point for the `entgen` command-line tool: it
//! loads a schema set file produced by an external schema reader, builds
//! the entity context, and hands the result to downstream renderers as
//! JSON.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use entgen_model::{EntityContextBuilder, save_entity_context};
use entgen_schema::{
    BuildContext, PARAM_UNIT_OF_WORK, Parameters, SchemaSet, Validatable, load_schema_set,
};
use tracing_subscriber::EnvFilter;

// ============================================================================
// CLI definition
// ============================================================================

#[derive(Parser)]
#[command(name = "entgen", version, about = "Schema-to-entity-model transformer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build an entity context from a schema set file
    Build {
        /// Path to the schema set file (.entschema)
        schema: PathBuf,

        /// Unit-of-work name (shorthand for --param UnitOfWork=<NAME>)
        #[arg(short, long, value_name = "NAME")]
        unit_of_work: Option<String>,

        /// Build parameter as key=value (repeatable)
        #[arg(short, long = "param", value_name = "KEY=VALUE", value_parser = parse_param)]
        params: Vec<(String, String)>,

        /// Write the built model as JSON to this path
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Validate a schema set file without building
    Validate {
        /// Path to the schema set file (.entschema)
        schema: PathBuf,
    },

    /// Display information about a schema set file
    Info {
        /// Path to the schema set file (.entschema)
        schema: PathBuf,
    },
}

/// Parse a `key=value` parameter argument
fn parse_param(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", s)),
    }
}

// ============================================================================
// Entry point
// ============================================================================

fn main() -> anyhow::Result<()> {
    // Initialize logging; RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Build {
            schema,
            unit_of_work,
            params,
            output,
        } => cmd_build(schema, unit_of_work, params, output),
        Command::Validate { schema } => cmd_validate(schema),
        Command::Info { schema } => cmd_info(schema),
    }
}

// ============================================================================
// Commands
// ============================================================================

fn cmd_build(
    schema_path: PathBuf,
    unit_of_work: Option<String>,
    params: Vec<(String, String)>,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let schemas = load_schemas(&schema_path)?;
    schemas
        .validate()
        .context("Schema set failed validation")?;

    let mut parameters: Parameters = params.into_iter().collect();
    if let Some(name) = unit_of_work {
        parameters.set(PARAM_UNIT_OF_WORK, name);
    }

    let ctx = BuildContext::new(schemas, parameters);
    let model = EntityContextBuilder::new()
        .build(&ctx)
        .context("Build failed")?;

    println!(
        "{} {} ({} entities, {} properties)",
        "Built".green().bold(),
        model.class_name.cyan(),
        model.entity_count(),
        model.property_count(),
    );
    for entity in model.entities() {
        println!(
            "  {} {} -> {} ({} properties)",
            "•".dimmed(),
            entity.full_name,
            entity.class_name.cyan(),
            entity.property_count(),
        );
    }

    if let Some(path) = output {
        save_entity_context(&model, &path).context("Failed to write model output")?;
        println!("{} {}", "Wrote".green().bold(), path.display());
    }

    Ok(())
}

fn cmd_validate(schema_path: PathBuf) -> anyhow::Result<()> {
    let schemas = load_schemas(&schema_path)?;

    match schemas.validate() {
        Ok(()) => {
            println!(
                "{} {} ({} schemas, {} tables)",
                "Valid".green().bold(),
                schema_path.display(),
                schemas.schema_count(),
                schemas.table_count(),
            );
            Ok(())
        }
        Err(e) => {
            println!("{} {}", "Invalid".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn cmd_info(schema_path: PathBuf) -> anyhow::Result<()> {
    let schemas = load_schemas(&schema_path)?;

    println!("{} {}", "Schema set".bold(), schema_path.display());
    for schema in schemas.schemas() {
        println!("  {} ({} tables)", schema.name.cyan(), schema.table_count());
        for table in &schema.tables {
            println!(
                "    {} ({} columns)",
                schema.table_key(table),
                table.column_count(),
            );
        }
    }

    Ok(())
}

fn load_schemas(path: &PathBuf) -> anyhow::Result<SchemaSet> {
    load_schema_set(path)
        .with_context(|| format!("Failed to load schema set from {}", path.display()))
}

// ============================================================================
// Tests
// ============================================================================
