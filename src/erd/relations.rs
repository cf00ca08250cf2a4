//! Relationship discovery from reference fields.

use crate::metadata::FieldDescriptor;

/// One (field, target table) pair of a navigable reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationRow {
    pub field_name: String,
    pub relationship_name: String,
    pub target_table: String,
}

/// Derive relation rows from a table's fields.
///
/// Fields without reference targets or without a relationship name are
/// skipped. Polymorphic references yield one row per target, in field order
/// and then target order.
pub fn extract_relations(fields: &[FieldDescriptor]) -> Vec<RelationRow> {
    fields
        .iter()
        .filter(|f| !f.reference_targets.is_empty())
        .filter_map(|f| f.navigable_relationship().map(|rel| (f, rel)))
        .flat_map(|(f, rel)| {
            f.reference_targets.iter().map(move |target| RelationRow {
                field_name: f.name.clone(),
                relationship_name: rel.to_string(),
                target_table: target.clone(),
            })
        })
        .collect()
}
