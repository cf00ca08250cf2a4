//! Tables command: list what a snapshot contains.

use super::build::load_config;
use crate::erd::DiagramBuilder;
use crate::metadata::SnapshotProvider;
use anyhow::{Context, Result};
use std::path::PathBuf;

pub fn run(config: PathBuf, snapshot: PathBuf, tables: Option<String>) -> Result<()> {
    let config = load_config(&config, tables)?;
    let provider = SnapshotProvider::new(&snapshot);

    let selected = DiagramBuilder::new(config.to_diagram_config())
        .select(&provider)
        .with_context(|| format!("failed to list tables in {}", snapshot.display()))?;

    if selected.is_empty() {
        eprintln!("No tables found in the snapshot.");
        return Ok(());
    }

    for table in &selected {
        match table.label {
            Some(ref label) if label != &table.name => println!("{:<40} {}", table.name, label),
            _ => println!("{}", table.name),
        }
    }

    eprintln!("\n{} tables", selected.len());
    Ok(())
}
