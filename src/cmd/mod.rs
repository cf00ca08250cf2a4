mod build;
mod tables;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "crm-erd")]
#[command(version)]
#[command(about = "Compile CRM object metadata into PlantUML entity-relationship diagrams", long_about = None)]
pub struct Cli {
    /// Log debug diagnostics to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a PlantUML class diagram from a metadata snapshot
    Build {
        /// JSON or YAML config file (diagram_name, tables)
        #[arg(short, long, default_value = build::DEFAULT_CONFIG)]
        config: PathBuf,

        /// Snapshot directory containing describe.json and sobjects/
        #[arg(short, long, default_value = "metadata")]
        snapshot: PathBuf,

        /// Output file, or - for stdout
        #[arg(short, long, default_value = "erd.puml")]
        output: PathBuf,

        /// Diagram name (overrides the config file)
        #[arg(long)]
        name: Option<String>,

        /// Only include specific tables (comma-separated, overrides the config file)
        #[arg(short, long)]
        tables: Option<String>,

        /// Show progress while fetching table metadata
        #[arg(short, long)]
        progress: bool,
    },

    /// List the tables available in a metadata snapshot
    Tables {
        /// JSON or YAML config file (tables)
        #[arg(short, long, default_value = build::DEFAULT_CONFIG)]
        config: PathBuf,

        /// Snapshot directory containing describe.json
        #[arg(short, long, default_value = "metadata")]
        snapshot: PathBuf,

        /// Only list specific tables (comma-separated, overrides the config file)
        #[arg(short, long)]
        tables: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Build {
            config,
            snapshot,
            output,
            name,
            tables,
            progress,
        } => build::run(config, snapshot, output, name, tables, progress),
        Commands::Tables {
            config,
            snapshot,
            tables,
        } => tables::run(config, snapshot, tables),
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "crm-erd", &mut io::stdout());
            Ok(())
        }
    }
}

/// Split a comma-separated table list
pub(crate) fn parse_table_list(tables: &str) -> Vec<String> {
    tables
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
