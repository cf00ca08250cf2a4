//! Typed object metadata consumed by the ERD compiler.
//!
//! This module provides:
//! - `TableDescriptor` / `FieldDescriptor` records, validated once at the provider boundary
//! - The `MetadataProvider` trait the diagram builder fetches fields through
//! - A directory-backed snapshot provider and an in-memory provider

pub mod memory;
pub mod snapshot;

pub use memory::MemoryProvider;
pub use snapshot::SnapshotProvider;

use std::path::PathBuf;
use thiserror::Error;

/// Wire type carried by identifier fields
pub const ID_WIRE_TYPE: &str = "ID";

/// Declared type of fields that point at other tables
pub const REFERENCE_TYPE: &str = "reference";

/// One table (object) known to the metadata provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDescriptor {
    /// Unique table name
    pub name: String,
    /// Human-readable label, when the provider has one
    pub label: Option<String>,
}

impl TableDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// One attribute of a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field name, unique within its table
    pub name: String,
    /// Logical type (e.g. "reference", "picklist", "currency")
    pub declared_type: String,
    /// Lower-level type tag, namespace prefix already stripped
    pub wire_type: String,
    /// Whether the field is derived rather than stored
    pub is_computed: bool,
    /// Tables this field can point at (more than one for polymorphic references)
    pub reference_targets: Vec<String>,
    /// Navigable relationship name, if any
    pub relationship_name: Option<String>,
}

impl FieldDescriptor {
    /// Create a stored, non-reference field
    pub fn new(
        name: impl Into<String>,
        declared_type: impl Into<String>,
        wire_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            wire_type: wire_type.into(),
            is_computed: false,
            reference_targets: Vec::new(),
            relationship_name: None,
        }
    }

    /// Create a reference field pointing at `targets`
    pub fn reference<I, S>(
        name: impl Into<String>,
        targets: I,
        relationship_name: Option<&str>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            reference_targets: targets.into_iter().map(Into::into).collect(),
            relationship_name: relationship_name.map(str::to_string),
            ..Self::new(name, REFERENCE_TYPE, REFERENCE_TYPE)
        }
    }

    /// Mark the field as computed
    pub fn computed(mut self) -> Self {
        self.is_computed = true;
        self
    }

    /// Whether this field carries the identifier wire type
    pub fn is_id(&self) -> bool {
        self.wire_type == ID_WIRE_TYPE
    }

    /// Whether the declared type is "reference" (case-insensitive)
    pub fn is_reference(&self) -> bool {
        self.declared_type.eq_ignore_ascii_case(REFERENCE_TYPE)
    }

    /// Relationship name, treating an empty string as absent
    pub fn navigable_relationship(&self) -> Option<&str> {
        self.relationship_name.as_deref().filter(|n| !n.is_empty())
    }
}

/// Failure to obtain metadata from a provider
#[derive(Debug, Error)]
pub enum MetadataFetchError {
    #[error("unknown table: {0}")]
    UnknownTable(String),

    #[error("failed to read metadata from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed metadata in {}: {message}", path.display())]
    Malformed { path: PathBuf, message: String },
}

/// Source of table and field metadata
pub trait MetadataProvider {
    /// All tables in the schema, in provider order
    fn list_tables(&self) -> Result<Vec<TableDescriptor>, MetadataFetchError>;

    /// Fields of one table, in provider order
    fn fields_of(&self, table: &str) -> Result<Vec<FieldDescriptor>, MetadataFetchError>;
}

impl<P: MetadataProvider + ?Sized> MetadataProvider for &P {
    fn list_tables(&self) -> Result<Vec<TableDescriptor>, MetadataFetchError> {
        (**self).list_tables()
    }

    fn fields_of(&self, table: &str) -> Result<Vec<FieldDescriptor>, MetadataFetchError> {
        (**self).fields_of(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_constructor() {
        let field = FieldDescriptor::reference("WhoId", ["Contact", "Lead"], Some("Who"));
        assert!(field.is_reference());
        assert!(!field.is_id());
        assert_eq!(field.reference_targets, vec!["Contact", "Lead"]);
        assert_eq!(field.navigable_relationship(), Some("Who"));
    }

    #[test]
    fn test_empty_relationship_name_is_not_navigable() {
        let field = FieldDescriptor::reference("ParentId", ["Account"], Some(""));
        assert_eq!(field.navigable_relationship(), None);
    }

    #[test]
    fn test_reference_type_is_case_insensitive() {
        let field = FieldDescriptor::new("OwnerId", "Reference", "ID");
        assert!(field.is_reference());
        assert!(field.is_id());
    }
}
