//! Diagram assembly: header, one entity block and its edges per table, footer.

use crate::erd::entity::render_entity;
use crate::erd::relations::extract_relations;
use crate::erd::relationship::{render_relationships, visible_edges};
use crate::erd::select::{select_tables, unmatched_names};
use crate::metadata::{MetadataFetchError, MetadataProvider, TableDescriptor};
use ahash::AHashSet;
use chrono::NaiveDate;
use tracing::debug;

/// Diagram name used when none is configured
pub const DEFAULT_DIAGRAM_NAME: &str = "ERD";

/// Settings the diagram builder is constructed with
#[derive(Debug, Clone)]
pub struct DiagramConfig {
    /// Title written into the `@startuml` line
    pub diagram_name: String,
    /// Allow-list restricting tables and edge targets (empty = no restriction)
    pub scope: AHashSet<String>,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            diagram_name: DEFAULT_DIAGRAM_NAME.to_string(),
            scope: AHashSet::new(),
        }
    }
}

impl DiagramConfig {
    pub fn new(diagram_name: Option<String>, tables: Vec<String>) -> Self {
        Self {
            diagram_name: diagram_name.unwrap_or_else(|| DEFAULT_DIAGRAM_NAME.to_string()),
            scope: tables.into_iter().collect(),
        }
    }
}

/// Counts gathered while building a diagram
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DiagramStats {
    pub tables: usize,
    pub fields: usize,
    pub relation_rows: usize,
    pub edges: usize,
}

/// Builds PlantUML class diagrams from provider metadata
pub struct DiagramBuilder {
    config: DiagramConfig,
    date: Option<NaiveDate>,
    progress_fn: Option<Box<dyn Fn(usize)>>,
}

impl DiagramBuilder {
    pub fn new(config: DiagramConfig) -> Self {
        Self {
            config,
            date: None,
            progress_fn: None,
        }
    }

    /// Pin the date written into the header (defaults to today's local date)
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Called with the number of completed tables after each table
    pub fn with_progress<F>(mut self, f: F) -> Self
    where
        F: Fn(usize) + 'static,
    {
        self.progress_fn = Some(Box::new(f));
        self
    }

    pub fn config(&self) -> &DiagramConfig {
        &self.config
    }

    /// Tables from the provider, narrowed to the configured scope
    pub fn select<P: MetadataProvider>(
        &self,
        provider: &P,
    ) -> Result<Vec<TableDescriptor>, MetadataFetchError> {
        let all_tables = provider.list_tables()?;

        let missing = unmatched_names(&all_tables, &self.config.scope);
        if !missing.is_empty() {
            debug!(?missing, "allow-listed tables not found in metadata");
        }

        Ok(select_tables(all_tables, &self.config.scope))
    }

    /// Render the diagram for `tables`, fetching each table's fields in order.
    ///
    /// Any provider failure aborts the build and nothing is returned.
    pub fn build<P: MetadataProvider>(
        &self,
        tables: &[TableDescriptor],
        provider: &P,
    ) -> Result<String, MetadataFetchError> {
        self.build_with_stats(tables, provider).map(|(text, _)| text)
    }

    /// Like [`build`](Self::build), also returning counts for reporting
    pub fn build_with_stats<P: MetadataProvider>(
        &self,
        tables: &[TableDescriptor],
        provider: &P,
    ) -> Result<(String, DiagramStats), MetadataFetchError> {
        let mut stats = DiagramStats::default();
        let mut output = self.header();

        for (i, table) in tables.iter().enumerate() {
            let fields = provider.fields_of(&table.name)?;
            let relations = extract_relations(&fields);

            output.push_str(&render_entity(&table.name, &fields, &relations));
            output.push_str(&render_relationships(
                &self.config.scope,
                &table.name,
                &relations,
            ));
            output.push('\n');

            let edges = visible_edges(&self.config.scope, &table.name, &relations).len();
            debug!(
                table = %table.name,
                fields = fields.len(),
                relations = relations.len(),
                edges,
                "rendered table"
            );

            stats.tables += 1;
            stats.fields += fields.len();
            stats.relation_rows += relations.len();
            stats.edges += edges;

            if let Some(ref f) = self.progress_fn {
                f(i + 1);
            }
        }

        output.push_str("@enduml\n");
        Ok((output, stats))
    }

    fn header(&self) -> String {
        let date = self
            .date
            .unwrap_or_else(|| chrono::Local::now().date_naive());

        let mut header = format!(
            "@startuml {} - {}\n",
            self.config.diagram_name,
            date.format("%Y-%m-%d")
        );
        // 90 degree arrows only
        header.push_str("skinparam linetype ortho\n");
        header.push_str("hide empty methods\n");
        header.push('\n');
        header
    }
}
