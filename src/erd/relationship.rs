//! Relationship edge aggregation and rendering.

use crate::erd::relations::RelationRow;
use ahash::{AHashMap, AHashSet};

/// All relation rows of one source table that share a target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedEdge {
    pub target_table: String,
    /// Relationship names joined with ", " in first-seen order
    pub relationship_names: String,
}

/// Group relation rows by target table, in first-seen target order
pub fn aggregate_relations(relations: &[RelationRow]) -> Vec<AggregatedEdge> {
    let mut order: Vec<&str> = Vec::new();
    let mut names: AHashMap<&str, Vec<&str>> = AHashMap::new();

    for row in relations {
        let target = row.target_table.as_str();
        names
            .entry(target)
            .or_insert_with(|| {
                order.push(target);
                Vec::new()
            })
            .push(row.relationship_name.as_str());
    }

    order
        .into_iter()
        .map(|target| AggregatedEdge {
            target_table: target.to_string(),
            relationship_names: names[target].join(", "),
        })
        .collect()
}

/// Edges that survive self-reference and scope suppression
pub fn visible_edges(
    scope_tables: &AHashSet<String>,
    source_table: &str,
    relations: &[RelationRow],
) -> Vec<AggregatedEdge> {
    aggregate_relations(relations)
        .into_iter()
        .filter(|edge| edge.target_table != source_table)
        .filter(|edge| scope_tables.is_empty() || scope_tables.contains(&edge.target_table))
        .collect()
}

/// Render one `source -left-> target` line per visible edge.
///
/// The aggregated relationship names are not part of the line.
pub fn render_relationships(
    scope_tables: &AHashSet<String>,
    source_table: &str,
    relations: &[RelationRow],
) -> String {
    let mut output = String::new();
    for edge in visible_edges(scope_tables, source_table, relations) {
        output.push_str(&format!("{} -left-> {}\n", source_table, edge.target_table));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(field: &str, rel: &str, target: &str) -> RelationRow {
        RelationRow {
            field_name: field.to_string(),
            relationship_name: rel.to_string(),
            target_table: target.to_string(),
        }
    }

    fn scope(names: &[&str]) -> AHashSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_same_target_is_aggregated() {
        let relations = vec![
            row("Primary__c", "r1", "D"),
            row("OwnerId", "Owner", "User"),
            row("Secondary__c", "r2", "D"),
        ];

        let edges = aggregate_relations(&relations);
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].target_table, "D");
        assert_eq!(edges[0].relationship_names, "r1, r2");
        assert_eq!(edges[1].target_table, "User");

        let out = render_relationships(&AHashSet::new(), "Source", &relations);
        assert_eq!(out, "Source -left-> D\nSource -left-> User\n");
    }

    #[test]
    fn test_duplicate_names_are_kept() {
        let relations = vec![row("A", "Parent", "X"), row("B", "Parent", "X")];
        let edges = aggregate_relations(&relations);
        assert_eq!(edges[0].relationship_names, "Parent, Parent");
    }

    #[test]
    fn test_self_reference_is_suppressed() {
        let relations = vec![row("ParentId", "Parent", "Account")];
        assert_eq!(render_relationships(&AHashSet::new(), "Account", &relations), "");
    }

    #[test]
    fn test_scope_suppresses_out_of_scope_targets() {
        let relations = vec![
            row("AId", "A", "A"),
            row("BId", "B", "B"),
            row("CId", "C", "C"),
        ];
        let out = render_relationships(&scope(&["A", "B"]), "Source", &relations);
        assert_eq!(out, "Source -left-> A\nSource -left-> B\n");
    }

    #[test]
    fn test_label_is_not_rendered() {
        let relations = vec![row("AccountId", "Account", "Account")];
        let out = render_relationships(&AHashSet::new(), "Contact", &relations);
        assert_eq!(out, "Contact -left-> Account\n");
    }
}
