//! Command-line interface for csv-datagen
//!
//! # Usage Examples
//!
//! ## Schemas
//! ```bash
//! # Create a schema from a YAML document
//! csv-datagen schema create --file demos/users.yaml
//!
//! # Replace schema 1 with an edited document (all columns at once)
//! csv-datagen schema show 1 --yaml > users.yaml
//! csv-datagen schema edit 1 --file users.yaml
//!
//! # List the available column types
//! csv-datagen schema types
//! ```
//!
//! ## Generation
//! ```bash
//! # Generate 500 rows, reproducibly
//! csv-datagen generate 1 --rows 500 --seed 42
//!
//! # Store files elsewhere and slow the run down for demos
//! csv-datagen --media-dir /tmp/datasets --write-delay 2s generate 1 --rows 10
//! ```
//!
//! Results are printed as JSON. Validation failures print
//! `{"errors": {...}}` and exit with status 1.

use anyhow::Context;
use clap::{Parser, Subcommand};
use csv_datagen::{DatagenOpts, LocalDatasetService, ServiceError};
use datagen_core::{ColumnType, SchemaForm};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "csv-datagen")]
#[command(about = "Generate synthetic CSV datasets from typed schemas")]
#[command(long_about = None)]
struct Cli {
    #[command(flatten)]
    opts: DatagenOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage schemas
    Schema {
        #[command(subcommand)]
        command: SchemaCommand,
    },

    /// Generate a dataset for a schema
    Generate {
        /// Schema to generate rows for
        schema_id: u64,

        /// Number of data rows
        #[arg(long, allow_negative_numbers = true)]
        rows: i64,

        /// Random seed (random if omitted)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Inspect generation runs
    Runs {
        #[command(subcommand)]
        command: RunsCommand,
    },
}

#[derive(Subcommand)]
enum SchemaCommand {
    /// Create a schema from a YAML document
    Create {
        #[arg(long, value_name = "PATH")]
        file: PathBuf,
    },

    /// Replace a schema's attributes and columns from a YAML document
    Edit {
        id: u64,

        #[arg(long, value_name = "PATH")]
        file: PathBuf,
    },

    /// List schemas
    List,

    /// Show one schema
    Show {
        id: u64,

        /// Print the schema as an editable YAML document
        #[arg(long)]
        yaml: bool,
    },

    /// Delete a schema and its runs
    Delete { id: u64 },

    /// List the column types and their parameters
    Types,
}

#[derive(Subcommand)]
enum RunsCommand {
    /// List runs
    List {
        /// Only runs of this schema
        #[arg(long)]
        schema: Option<u64>,
    },

    /// Show one run
    Show { id: u64 },
}

#[derive(Serialize)]
struct ColumnTypeInfo {
    #[serde(rename = "type")]
    column_type: ColumnType,
    label: &'static str,
    parameters: &'static [&'static str],
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        match e
            .downcast_ref::<ServiceError>()
            .and_then(ServiceError::validation_errors)
        {
            Some(errors) => println!("{}", serde_json::json!({ "errors": errors })),
            None => eprintln!("Error: {e:#}"),
        }
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Schema { command } => run_schema(&cli.opts, command).await,
        Commands::Generate {
            schema_id,
            rows,
            seed,
        } => {
            let service = LocalDatasetService::open(&cli.opts)?;
            let run = service.generate(schema_id, rows, seed).await?;
            print_json(&run)
        }
        Commands::Runs { command } => {
            let service = LocalDatasetService::open(&cli.opts)?;
            match command {
                RunsCommand::List { schema } => print_json(&service.list_runs(schema).await?),
                RunsCommand::Show { id } => print_json(&service.get_run(id).await?),
            }
        }
    }
}

async fn run_schema(opts: &DatagenOpts, command: SchemaCommand) -> anyhow::Result<()> {
    let service = LocalDatasetService::open(opts)?;
    match command {
        SchemaCommand::Create { file } => {
            let form = load_form(&file)?;
            print_json(&service.create_schema(&form).await?)
        }
        SchemaCommand::Edit { id, file } => {
            let form = load_form(&file)?;
            print_json(&service.edit_schema(id, &form).await?)
        }
        SchemaCommand::List => print_json(&service.list_schemas().await?),
        SchemaCommand::Show { id, yaml } => {
            let stored = service.get_schema(id).await?;
            if yaml {
                print!("{}", stored.schema.to_yaml()?);
                Ok(())
            } else {
                print_json(&stored)
            }
        }
        SchemaCommand::Delete { id } => {
            service.delete_schema(id).await?;
            print_json(&serde_json::json!({ "deleted": id }))
        }
        SchemaCommand::Types => print_json(&column_types()),
    }
}

fn column_types() -> Vec<ColumnTypeInfo> {
    ColumnType::ALL
        .iter()
        .map(|t| ColumnTypeInfo {
            column_type: *t,
            label: t.label(),
            parameters: t.parameter_fields(),
        })
        .collect()
}

fn load_form(path: &Path) -> anyhow::Result<SchemaForm> {
    SchemaForm::from_file(path)
        .with_context(|| format!("Failed to load schema document from {path:?}"))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
