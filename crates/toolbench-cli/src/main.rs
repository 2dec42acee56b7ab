mod input;
mod render;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use toolbench_core::{AppConfig, OutputFormat};
use toolbench_parse::{count_stores_from_str, parse_products, parse_prompts};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "toolbench")]
#[command(about = "Product team utilities for pasted prompts, product exports and store counts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where to read input from and how to print the result.
#[derive(Debug, Args)]
struct IoArgs {
    /// Read input from this file instead of stdin
    #[arg(long, short)]
    input: Option<PathBuf>,
    /// Output format: text or json (defaults to `TOOLBENCH_OUTPUT_FORMAT`)
    #[arg(long, value_parser = parse_output_format)]
    format: Option<OutputFormat>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Parse a tagged prompt into its section tree
    Prompts {
        #[command(flatten)]
        io: IoArgs,
    },
    /// Parse a product export into products and size-grouped variants
    Products {
        #[command(flatten)]
        io: IoArgs,
    },
    /// Count active, churned and new stores from an aggregation response
    StoreCount {
        #[command(flatten)]
        io: IoArgs,
        /// Also list the store ids in each partition
        #[arg(long)]
        ids: bool,
    },
}

fn parse_output_format(raw: &str) -> Result<OutputFormat, String> {
    raw.parse()
}

fn main() -> anyhow::Result<()> {
    let config = toolbench_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(env = %config.env, "configuration loaded");

    let cli = Cli::parse();
    run(cli.command, &config)
}

fn run(command: Commands, config: &AppConfig) -> anyhow::Result<()> {
    match command {
        Commands::Prompts { io } => {
            let raw = read(&io, config)?;
            let sections = parse_prompts(&raw);
            tracing::info!(sections = sections.len(), "parsed prompt");
            emit(format_for(&io, config), sections.as_slice(), render::prompts)
        }
        Commands::Products { io } => {
            let raw = read(&io, config)?;
            let products = parse_products(&raw);
            tracing::info!(products = products.len(), "parsed product export");
            emit(format_for(&io, config), products.as_slice(), render::products)
        }
        Commands::StoreCount { io, ids } => {
            let raw = read(&io, config)?;
            let format = format_for(&io, config);
            match count_stores_from_str(&raw) {
                Ok(counts) => {
                    tracing::info!(
                        active = counts.active_count,
                        churned = counts.churned_count,
                        new = counts.new_count,
                        "computed store counts"
                    );
                    emit(format, &counts, |c| render::store_counts(c, ids))
                }
                Err(e) => {
                    if format == OutputFormat::Json {
                        println!("{}", serde_json::json!({ "error": e.to_string() }));
                    }
                    Err(e.into())
                }
            }
        }
    }
}

fn read(io: &IoArgs, config: &AppConfig) -> anyhow::Result<String> {
    input::read_input(io.input.as_deref(), config.max_input_bytes)
}

fn format_for(io: &IoArgs, config: &AppConfig) -> OutputFormat {
    io.format.unwrap_or(config.output_format)
}

/// Prints `value` to stdout as pretty JSON or via `render_text`.
fn emit<T, F>(format: OutputFormat, value: &T, render_text: F) -> anyhow::Result<()>
where
    T: Serialize + ?Sized,
    F: FnOnce(&T) -> String,
{
    let out = match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(value).context("failed to serialize output")?
        }
        OutputFormat::Text => render_text(value),
    };
    println!("{out}");
    Ok(())
}
