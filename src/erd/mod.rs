//! PlantUML ERD compilation.
//!
//! This module provides:
//! - Table selection against an allow-list
//! - Relation extraction from (possibly polymorphic) reference fields
//! - Entity block and relationship edge rendering
//! - Diagram assembly over a metadata provider

pub mod diagram;
pub mod entity;
pub mod relations;
pub mod relationship;
pub mod select;

pub use diagram::{DiagramBuilder, DiagramConfig, DiagramStats, DEFAULT_DIAGRAM_NAME};
pub use entity::{render_entity, NO_REFERENCE_FOUND};
pub use relations::{extract_relations, RelationRow};
pub use relationship::{aggregate_relations, render_relationships, AggregatedEdge};
pub use select::{select_tables, unmatched_names};
