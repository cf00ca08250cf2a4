//! Table selection against an optional allow-list.

use crate::metadata::TableDescriptor;
use ahash::AHashSet;

/// Keep only tables named in `allow_list`, preserving `all_tables` order.
///
/// An empty allow-list selects everything. Allow-list names that match no
/// table are ignored.
pub fn select_tables(
    all_tables: Vec<TableDescriptor>,
    allow_list: &AHashSet<String>,
) -> Vec<TableDescriptor> {
    if allow_list.is_empty() {
        return all_tables;
    }

    all_tables
        .into_iter()
        .filter(|t| allow_list.contains(&t.name))
        .collect()
}

/// Allow-list names that match no table, sorted
pub fn unmatched_names(
    all_tables: &[TableDescriptor],
    allow_list: &AHashSet<String>,
) -> Vec<String> {
    let known: AHashSet<&str> = all_tables.iter().map(|t| t.name.as_str()).collect();
    let mut missing: Vec<String> = allow_list
        .iter()
        .filter(|name| !known.contains(name.as_str()))
        .cloned()
        .collect();
    missing.sort();
    missing
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables(names: &[&str]) -> Vec<TableDescriptor> {
        names.iter().map(|n| TableDescriptor::new(*n)).collect()
    }

    fn allow(names: &[&str]) -> AHashSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_empty_allow_list_passes_everything() {
        let all = tables(&["Account", "Contact", "Lead"]);
        assert_eq!(select_tables(all.clone(), &AHashSet::new()), all);
    }

    #[test]
    fn test_selection_preserves_table_order() {
        let all = tables(&["Account", "Contact", "Lead"]);
        let selected = select_tables(all, &allow(&["Lead", "Account"]));
        assert_eq!(selected, tables(&["Account", "Lead"]));
    }

    #[test]
    fn test_unknown_names_are_ignored() {
        let all = tables(&["Account", "Contact"]);
        let allow_list = allow(&["Contact", "Ghost", "Acme__c"]);

        assert_eq!(select_tables(all.clone(), &allow_list), tables(&["Contact"]));
        assert_eq!(unmatched_names(&all, &allow_list), vec!["Acme__c", "Ghost"]);
    }

    #[test]
    fn test_membership_is_case_sensitive() {
        let all = tables(&["Account"]);
        assert!(select_tables(all, &allow(&["account"])).is_empty());
    }
}
