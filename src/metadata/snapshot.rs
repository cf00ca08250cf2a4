//! Metadata provider reading an offline export of the CRM describe API.
//!
//! Layout of a snapshot directory:
//!
//! ```text
//! <dir>/describe.json          {"sobjects": [{"name": "Account", "label": "Account"}, ...]}
//! <dir>/sobjects/Account.json  {"name": "Account", "fields": [{"name": "Id", "type": "id", ...}]}
//! ```

use super::{FieldDescriptor, MetadataFetchError, MetadataProvider, TableDescriptor};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const GLOBAL_DESCRIBE: &str = "describe.json";
const OBJECTS_DIR: &str = "sobjects";

#[derive(Debug, Deserialize)]
struct GlobalDescribe {
    sobjects: Vec<ObjectSummary>,
}

#[derive(Debug, Deserialize)]
struct ObjectSummary {
    name: String,
    #[serde(default)]
    label: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ObjectDescribe {
    fields: Vec<DescribeField>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DescribeField {
    name: String,
    #[serde(rename = "type")]
    declared_type: String,
    soap_type: String,
    #[serde(default)]
    calculated: bool,
    #[serde(default)]
    reference_to: Vec<String>,
    #[serde(default)]
    relationship_name: Option<String>,
}

impl From<DescribeField> for FieldDescriptor {
    fn from(raw: DescribeField) -> Self {
        FieldDescriptor {
            name: raw.name,
            declared_type: raw.declared_type,
            wire_type: strip_namespace(&raw.soap_type).to_string(),
            is_computed: raw.calculated,
            reference_targets: raw.reference_to,
            relationship_name: raw.relationship_name.filter(|n| !n.is_empty()),
        }
    }
}

/// Strip the XML namespace prefix from a wire type ("xsd:string" -> "string")
pub fn strip_namespace(wire_type: &str) -> &str {
    wire_type
        .split_once(':')
        .map(|(_, local)| local)
        .unwrap_or(wire_type)
}

/// Provider reading describe results from a snapshot directory
#[derive(Debug, Clone)]
pub struct SnapshotProvider {
    root: PathBuf,
}

impl SnapshotProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn object_path(&self, table: &str) -> Option<PathBuf> {
        if table.is_empty() || table.contains(['/', '\\']) || table.contains("..") {
            return None;
        }
        Some(self.root.join(OBJECTS_DIR).join(format!("{}.json", table)))
    }
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, MetadataFetchError> {
    let content = fs::read_to_string(path).map_err(|source| MetadataFetchError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|e| MetadataFetchError::Malformed {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

impl MetadataProvider for SnapshotProvider {
    fn list_tables(&self) -> Result<Vec<TableDescriptor>, MetadataFetchError> {
        let path = self.root.join(GLOBAL_DESCRIBE);
        let describe: GlobalDescribe = read_json(&path)?;
        debug!(tables = describe.sobjects.len(), path = %path.display(), "loaded global describe");

        Ok(describe
            .sobjects
            .into_iter()
            .map(|o| TableDescriptor {
                name: o.name,
                label: o.label,
            })
            .collect())
    }

    fn fields_of(&self, table: &str) -> Result<Vec<FieldDescriptor>, MetadataFetchError> {
        let path = self
            .object_path(table)
            .ok_or_else(|| MetadataFetchError::UnknownTable(table.to_string()))?;
        if !path.is_file() {
            return Err(MetadataFetchError::UnknownTable(table.to_string()));
        }

        let describe: ObjectDescribe = read_json(&path)?;
        debug!(table, fields = describe.fields.len(), "loaded object describe");

        Ok(describe.fields.into_iter().map(FieldDescriptor::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_snapshot(dir: &TempDir) {
        fs::create_dir_all(dir.path().join(OBJECTS_DIR)).unwrap();
        fs::write(
            dir.path().join(GLOBAL_DESCRIBE),
            r#"{"encoding": "UTF-8", "sobjects": [
                {"name": "Account", "label": "Account"},
                {"name": "Task"}
            ]}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join(OBJECTS_DIR).join("Task.json"),
            r#"{"name": "Task", "fields": [
                {"name": "Id", "type": "id", "soapType": "tns:ID", "calculated": false,
                 "referenceTo": [], "relationshipName": null},
                {"name": "WhatId", "type": "reference", "soapType": "tns:ID", "calculated": false,
                 "referenceTo": ["Account", "Opportunity"], "relationshipName": "What"},
                {"name": "Legacy__c", "type": "reference", "soapType": "tns:ID",
                 "referenceTo": ["Account"], "relationshipName": ""},
                {"name": "Score__c", "type": "double", "soapType": "xsd:double", "calculated": true}
            ]}"#,
        )
        .unwrap();
    }

    #[test]
    fn test_list_tables() {
        let dir = TempDir::new().unwrap();
        write_snapshot(&dir);
        let provider = SnapshotProvider::new(dir.path());

        let tables = provider.list_tables().unwrap();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0], TableDescriptor::new("Account").with_label("Account"));
        assert_eq!(tables[1].label, None);
    }

    #[test]
    fn test_fields_are_normalized() {
        let dir = TempDir::new().unwrap();
        write_snapshot(&dir);
        let provider = SnapshotProvider::new(dir.path());

        let fields = provider.fields_of("Task").unwrap();
        assert_eq!(fields.len(), 4);
        assert_eq!(fields[0].wire_type, "ID");
        assert_eq!(fields[1].reference_targets, vec!["Account", "Opportunity"]);
        assert_eq!(fields[1].relationship_name.as_deref(), Some("What"));
        assert_eq!(fields[2].relationship_name, None);
        assert_eq!(fields[3].wire_type, "double");
        assert!(fields[3].is_computed);
    }

    #[test]
    fn test_missing_object_is_unknown_table() {
        let dir = TempDir::new().unwrap();
        write_snapshot(&dir);
        let provider = SnapshotProvider::new(dir.path());

        assert!(matches!(
            provider.fields_of("Contact"),
            Err(MetadataFetchError::UnknownTable(_))
        ));
        assert!(matches!(
            provider.fields_of("../describe"),
            Err(MetadataFetchError::UnknownTable(_))
        ));
    }

    #[test]
    fn test_malformed_object() {
        let dir = TempDir::new().unwrap();
        write_snapshot(&dir);
        fs::write(dir.path().join(OBJECTS_DIR).join("Broken.json"), "{\"fields\": 3}").unwrap();
        let provider = SnapshotProvider::new(dir.path());

        assert!(matches!(
            provider.fields_of("Broken"),
            Err(MetadataFetchError::Malformed { .. })
        ));
    }

    #[test]
    fn test_missing_global_describe() {
        let dir = TempDir::new().unwrap();
        let provider = SnapshotProvider::new(dir.path());
        assert!(matches!(
            provider.list_tables(),
            Err(MetadataFetchError::Io { .. })
        ));
    }

    #[test]
    fn test_strip_namespace() {
        assert_eq!(strip_namespace("xsd:string"), "string");
        assert_eq!(strip_namespace("tns:ID"), "ID");
        assert_eq!(strip_namespace("ID"), "ID");
    }
}
