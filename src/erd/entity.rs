//! Entity block rendering.

use crate::erd::relations::RelationRow;
use crate::metadata::FieldDescriptor;
use ahash::AHashMap;

/// Shown in place of targets for a reference field with no relation rows
pub const NO_REFERENCE_FOUND: &str = "No reference found.";

/// Render one table as a PlantUML class block.
///
/// Fields are listed by name. Identifier fields are bold, computed fields
/// use the method marker, and reference fields list their target tables.
pub fn render_entity(
    table_name: &str,
    fields: &[FieldDescriptor],
    relations: &[RelationRow],
) -> String {
    let mut targets_by_field: AHashMap<&str, Vec<&str>> = AHashMap::new();
    for row in relations {
        targets_by_field
            .entry(row.field_name.as_str())
            .or_default()
            .push(row.target_table.as_str());
    }

    let mut sorted: Vec<&FieldDescriptor> = fields.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));

    let mut output = format!("class {} {{\n", table_name);

    for field in sorted {
        let marker = if field.is_computed { "{method} #" } else { "{field} +" };
        let name = if field.is_id() {
            format!("<b>{}</b>", field.name)
        } else {
            field.name.clone()
        };

        output.push_str(&format!("  {}{}: {}", marker, name, type_annotation(field)));

        if field.is_reference() {
            let targets = targets_by_field
                .get(field.name.as_str())
                .map(Vec::as_slice)
                .unwrap_or(&[NO_REFERENCE_FOUND]);
            let listed: Vec<String> = targets.iter().map(|t| format!("<b>{}</b>", t)).collect();
            output.push_str(":\n");
            output.push_str(&listed.join(", \n"));
        }

        output.push('\n');
    }

    output.push_str("}\n");
    output
}

/// Wire type alone when it matches the declared type, `declared<wire>` otherwise
fn type_annotation(field: &FieldDescriptor) -> String {
    if field.declared_type.to_lowercase() == field.wire_type.to_lowercase() {
        field.wire_type.clone()
    } else {
        format!("{}<{}>", field.declared_type, field.wire_type)
    }
}
