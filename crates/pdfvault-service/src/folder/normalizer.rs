//! Raw drive folder objects → [`FolderRecord`].
//!
//! Providers disagree on field names: the id may be `id` or `_id` (string,
//! number or `{"$oid": ..}`), the name `name` or `title`, and the parent
//! `parentId`, `parent_id`, `parent` (id or populated object) or the first
//! entry of `parents`.

use std::collections::HashSet;

use serde_json::{Map, Value};
use tracing::warn;

use pdfvault_entity::folder::FolderRecord;

const ID_FIELDS: [&str; 2] = ["id", "_id"];
const NAME_FIELDS: [&str; 2] = ["name", "title"];
const PARENT_FIELDS: [&str; 3] = ["parentId", "parent_id", "parent"];

/// Normalize a raw listing.
///
/// A parent equal to `root`, or missing, makes the folder top-level.
/// Entries without a usable id and later duplicates of an id are dropped
/// with a warning. Input order is preserved.
pub fn normalize_folders(raw: &[Value], root: Option<&str>) -> Vec<FolderRecord> {
    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(raw.len());

    for (index, entry) in raw.iter().enumerate() {
        let Some(object) = entry.as_object() else {
            warn!(index, "Skipping folder entry that is not an object");
            continue;
        };
        let Some(record) = normalize_one(object, root) else {
            warn!(index, "Skipping folder entry without a usable id");
            continue;
        };
        if !seen.insert(record.id.clone()) {
            warn!(index, id = %record.id, "Skipping duplicate folder id");
            continue;
        }
        records.push(record);
    }

    records
}

fn normalize_one(object: &Map<String, Value>, root: Option<&str>) -> Option<FolderRecord> {
    let id = ID_FIELDS
        .iter()
        .find_map(|field| object.get(*field).and_then(scalar_id))?;

    let name = NAME_FIELDS
        .iter()
        .find_map(|field| object.get(*field).and_then(Value::as_str))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| id.clone());

    let parent_id = parent_of(object).filter(|parent| Some(parent.as_str()) != root);

    Some(FolderRecord {
        id,
        name,
        parent_id,
    })
}

fn parent_of(object: &Map<String, Value>) -> Option<String> {
    for field in PARENT_FIELDS {
        match object.get(field) {
            None | Some(Value::Null) => continue,
            Some(value) => return reference_id(value),
        }
    }
    object
        .get("parents")
        .and_then(Value::as_array)
        .and_then(|parents| parents.first())
        .and_then(reference_id)
}

/// Id of a parent reference: a scalar id or a populated object.
fn reference_id(value: &Value) -> Option<String> {
    match value {
        Value::Object(map) => ID_FIELDS
            .iter()
            .find_map(|field| map.get(*field).and_then(scalar_id))
            .or_else(|| scalar_id(value)),
        other => scalar_id(other),
    }
}

/// A string, a number, or an extended-JSON `{"$oid": ..}`.
fn scalar_id(value: &Value) -> Option<String> {
    let id = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Object(map) => map.get("$oid")?.as_str()?.trim().to_string(),
        _ => return None,
    };
    (!id.is_empty()).then_some(id)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_field_spellings() {
        let raw = vec![
            json!({"id": "a", "name": "Year 1", "parent": "root"}),
            json!({"_id": {"$oid": "b"}, "title": "Maths", "parentId": "a"}),
            json!({"id": 7, "name": "Physics", "parents": ["a", "z"]}),
            json!({"_id": "d", "name": "Unit 1", "parent": {"_id": "b", "name": "Maths"}}),
            json!({"id": "e", "name": "Loose", "parent_id": null}),
        ];
        let records = normalize_folders(&raw, Some("root"));
        assert_eq!(
            records,
            vec![
                FolderRecord::new("a", "Year 1", None),
                FolderRecord::new("b", "Maths", Some("a")),
                FolderRecord::new("7", "Physics", Some("a")),
                FolderRecord::new("d", "Unit 1", Some("b")),
                FolderRecord::new("e", "Loose", None),
            ]
        );
    }

    #[test]
    fn test_unusable_entries_are_dropped() {
        let raw = vec![
            json!({"name": "no id"}),
            json!({"id": "", "name": "blank id"}),
            json!("not an object"),
            json!({"id": "x", "name": "first"}),
            json!({"id": "x", "name": "duplicate"}),
        ];
        let records = normalize_folders(&raw, None);
        assert_eq!(records, vec![FolderRecord::new("x", "first", None)]);
    }

    #[test]
    fn test_missing_name_falls_back_to_id() {
        let records = normalize_folders(&[json!({"id": "q1"})], None);
        assert_eq!(records[0].name, "q1");
    }

    #[test]
    fn test_parent_kept_without_root() {
        let records = normalize_folders(&[json!({"id": "a", "parent": "root"})], None);
        assert_eq!(records[0].parent_id.as_deref(), Some("root"));
    }
}
