//! In-memory metadata provider.

use super::{FieldDescriptor, MetadataFetchError, MetadataProvider, TableDescriptor};
use ahash::AHashMap;

/// Provider backed by tables registered in memory
#[derive(Debug, Default, Clone)]
pub struct MemoryProvider {
    tables: Vec<TableDescriptor>,
    fields: AHashMap<String, Vec<FieldDescriptor>>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table and its fields. Re-registering a name replaces its fields.
    pub fn with_table(mut self, name: &str, fields: Vec<FieldDescriptor>) -> Self {
        self.add_table(TableDescriptor::new(name), fields);
        self
    }

    pub fn add_table(&mut self, table: TableDescriptor, fields: Vec<FieldDescriptor>) {
        if !self.fields.contains_key(&table.name) {
            self.tables.push(table.clone());
        }
        self.fields.insert(table.name, fields);
    }
}

impl MetadataProvider for MemoryProvider {
    fn list_tables(&self) -> Result<Vec<TableDescriptor>, MetadataFetchError> {
        Ok(self.tables.clone())
    }

    fn fields_of(&self, table: &str) -> Result<Vec<FieldDescriptor>, MetadataFetchError> {
        self.fields
            .get(table)
            .cloned()
            .ok_or_else(|| MetadataFetchError::UnknownTable(table.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_keep_registration_order() {
        let provider = MemoryProvider::new()
            .with_table("Contact", vec![])
            .with_table("Account", vec![])
            .with_table("Contact", vec![FieldDescriptor::new("Id", "id", "ID")]);

        let names: Vec<_> = provider
            .list_tables()
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["Contact", "Account"]);
        assert_eq!(provider.fields_of("Contact").unwrap().len(), 1);
    }

    #[test]
    fn test_unknown_table() {
        let provider = MemoryProvider::new();
        let err = provider.fields_of("Nope").unwrap_err();
        assert!(matches!(err, MetadataFetchError::UnknownTable(ref t) if t == "Nope"));
    }
}
