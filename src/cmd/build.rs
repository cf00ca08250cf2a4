//! Build command: metadata snapshot -> PlantUML document.

use super::parse_table_list;
use crate::config::ErdConfig;
use crate::erd::DiagramBuilder;
use crate::metadata::SnapshotProvider;
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

pub const DEFAULT_CONFIG: &str = "config.json";

/// Load the config file, tolerating a missing file only at the default path,
/// then apply command-line overrides.
pub(crate) fn load_config(path: &Path, tables: Option<String>) -> Result<ErdConfig> {
    let mut config = if path == Path::new(DEFAULT_CONFIG) {
        ErdConfig::load_or_default(path)?
    } else {
        ErdConfig::load(path)?
    };

    if let Some(ref t) = tables {
        config.tables = parse_table_list(t);
    }
    Ok(config)
}

pub fn run(
    config: PathBuf,
    snapshot: PathBuf,
    output: PathBuf,
    name: Option<String>,
    tables: Option<String>,
    progress: bool,
) -> Result<()> {
    let mut erd_config = load_config(&config, tables)?;
    if name.is_some() {
        erd_config.diagram_name = name;
    }

    let provider = SnapshotProvider::new(&snapshot);
    let mut builder = DiagramBuilder::new(erd_config.to_diagram_config());

    let selected = builder
        .select(&provider)
        .with_context(|| format!("failed to list tables in {}", snapshot.display()))?;

    eprintln!(
        "Generating ERD: {} [{} tables]",
        snapshot.display(),
        selected.len()
    );

    let progress_bar = if progress {
        let pb = ProgressBar::new(selected.len() as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} tables {msg}",
            )
            .unwrap()
            .progress_chars("█▓▒░  ")
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    if let Some(ref pb) = progress_bar {
        let pb_clone = pb.clone();
        builder = builder.with_progress(move |done| {
            pb_clone.set_position(done as u64);
        });
    }

    let result = builder.build_with_stats(&selected, &provider);

    if let Some(ref pb) = progress_bar {
        pb.finish_and_clear();
    }

    let (document, stats) = result.context("ERD generation aborted")?;

    write_output(&output, &document)?;

    eprintln!(
        "\nERD: {} tables, {} fields, {} relationships",
        stats.tables, stats.fields, stats.edges
    );
    info!(relation_rows = stats.relation_rows, "build finished");

    Ok(())
}

/// Write the finished document to `output` (or stdout for `-`).
///
/// Files are written through a temp file in the same directory and renamed
/// into place, so a failed write never leaves a partial diagram.
fn write_output(output: &Path, document: &str) -> Result<()> {
    if output == Path::new("-") {
        print!("{}", document);
        return Ok(());
    }

    let dir = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temp file in {}", dir.display()))?;
    tmp.write_all(document.as_bytes())?;
    tmp.persist(output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    eprintln!("ERD written to: {}", output.display());
    Ok(())
}
