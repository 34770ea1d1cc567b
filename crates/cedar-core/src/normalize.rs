//! Entity normalizer.
//!
//! Converts an uploaded entities document into canonical [`Entity`] values.
//! `uid` and every element of `parents` are unwrapped from
//! `{__entity: {type, id}}` when wrapped and taken as-is otherwise.
//! Everything else passes through untouched.
//!
//! Only structural problems fail the document: a top-level value that is not
//! an array, a record that is not an object or has no `uid`, and `parents` or
//! `attrs` of the wrong JSON kind. Odd uid parts are kept as their JSON text
//! and parent entries that are not uids are skipped with a warning.

use crate::entity::Entity;
use crate::error::{json_kind, EntityError};
use crate::uid::EntityUid;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Parse and normalize an entities JSON document.
pub fn parse_entities(json: &str) -> Result<Vec<Entity>, EntityError> {
    let document: Value = serde_json::from_str(json)?;
    normalize_entities(&document)
}

/// Normalize an already-parsed entities document.
pub fn normalize_entities(document: &Value) -> Result<Vec<Entity>, EntityError> {
    let records = document.as_array().ok_or(EntityError::NotAList {
        found: json_kind(document),
    })?;

    let entities = records
        .iter()
        .enumerate()
        .map(|(index, record)| normalize_record(index, record))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(count = entities.len(), "Normalized entity records");
    Ok(entities)
}

fn normalize_record(index: usize, record: &Value) -> Result<Entity, EntityError> {
    let fields = record.as_object().ok_or(EntityError::NotARecord {
        index,
        found: json_kind(record),
    })?;

    let uid = match fields.get("uid") {
        None | Some(Value::Null) => return Err(EntityError::MissingUid { index }),
        Some(uid) => EntityUid::from_json(uid).unwrap_or_else(|| {
            warn!(index, uid = %uid, "Entity uid is not a Type/id pair, keeping it as the id");
            EntityUid::new(String::new(), scalar_text(uid))
        }),
    };

    let parents = match fields.get("parents") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .filter_map(|(position, parent)| {
                let resolved = EntityUid::from_json(parent);
                if resolved.is_none() {
                    warn!(index, position, parent = %parent, "Skipping parent that is not an entity uid");
                }
                resolved
            })
            .collect(),
        Some(other) => {
            return Err(EntityError::InvalidParents {
                index,
                found: json_kind(other),
            })
        }
    };

    let attrs = match fields.get("attrs") {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(attrs)) => attrs.clone(),
        Some(other) => {
            return Err(EntityError::InvalidAttrs {
                index,
                found: json_kind(other),
            })
        }
    };

    let extra = fields
        .iter()
        .filter(|(key, _)| !matches!(key.as_str(), "uid" | "parents" | "attrs"))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    Ok(Entity {
        uid,
        parents,
        attrs,
        extra,
    })
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_unwraps_wrapped_uid_and_parents() {
        let entities = normalize_entities(&json!([{
            "uid": {"__entity": {"type": "User", "id": "alice"}},
            "parents": [
                {"__entity": {"type": "Group", "id": "admins"}},
                {"type": "Group", "id": "staff"}
            ]
        }]))
        .unwrap();

        assert_eq!(entities[0].uid, EntityUid::new("User", "alice"));
        assert_eq!(
            entities[0].parents,
            vec![
                EntityUid::new("Group", "admins"),
                EntityUid::new("Group", "staff")
            ]
        );
    }

    #[test]
    fn test_canonical_shape_is_identity() {
        let entities = normalize_entities(&json!([{
            "uid": {"type": "App::Doc", "id": "d1"},
            "parents": [{"type": "App::Folder", "id": "f1"}]
        }]))
        .unwrap();

        assert_eq!(entities[0].uid, EntityUid::new("App::Doc", "d1"));
        assert_eq!(entities[0].parents, vec![EntityUid::new("App::Folder", "f1")]);
    }

    #[test]
    fn test_missing_optional_fields_are_empty() {
        let entities = normalize_entities(&json!([
            {"uid": {"type": "User", "id": "a"}},
            {"uid": {"type": "User", "id": "b"}, "parents": [], "attrs": {}},
            {"uid": {"type": "User", "id": "c"}, "parents": null, "attrs": null}
        ]))
        .unwrap();

        assert_eq!(entities.len(), 3);
        for entity in &entities {
            assert!(entity.is_root());
            assert!(entity.attrs.is_empty());
        }
    }

    #[test]
    fn test_attrs_and_extra_pass_through_unchanged() {
        let attrs = json!({"owner": {"__entity": {"type": "User", "id": "a"}}, "n": 1});
        let entities = normalize_entities(&json!([{
            "uid": {"type": "Doc", "id": "1"},
            "attrs": attrs.clone(),
            "tags": {"color": "red"}
        }]))
        .unwrap();

        assert_eq!(Value::Object(entities[0].attrs.clone()), attrs);
        assert_eq!(entities[0].extra.get("tags"), Some(&json!({"color": "red"})));
        assert!(!entities[0].extra.contains_key("uid"));
    }

    #[test]
    fn test_malformed_json_is_error() {
        let err = parse_entities("[{\"uid\": ").unwrap_err();
        assert_eq!(err.code(), "MALFORMED_JSON");
    }

    #[test]
    fn test_non_array_document_is_error() {
        let err = parse_entities(r#"{"uid": {"type": "User", "id": "a"}}"#).unwrap_err();
        assert!(matches!(err, EntityError::NotAList { found: "object" }));
    }

    #[test]
    fn test_bad_records_report_index() {
        let err = normalize_entities(&json!([{"uid": {"type": "U", "id": "a"}}, 5])).unwrap_err();
        assert!(matches!(err, EntityError::NotARecord { index: 1, .. }));

        let err = normalize_entities(&json!([{"parents": []}])).unwrap_err();
        assert!(matches!(err, EntityError::MissingUid { index: 0 }));

        let err = normalize_entities(&json!([{"uid": null}])).unwrap_err();
        assert!(matches!(err, EntityError::MissingUid { index: 0 }));

        let err =
            normalize_entities(&json!([{"uid": {"type": "U", "id": "a"}, "parents": "G"}]))
                .unwrap_err();
        assert!(matches!(err, EntityError::InvalidParents { found: "string", .. }));

        let err =
            normalize_entities(&json!([{"uid": {"type": "U", "id": "a"}, "attrs": [1]}]))
                .unwrap_err();
        assert_eq!(err.code(), "INVALID_ATTRS");
    }

    #[test]
    fn test_numeric_ids_are_kept_as_text() {
        let entities = normalize_entities(&json!([
            {"uid": {"type": "T", "id": 1}},
            {"uid": {"type": "T", "id": 2}, "parents": [{"type": "T", "id": 1}]}
        ]))
        .unwrap();

        assert_eq!(entities[0].uid, EntityUid::new("T", "1"));
        assert_eq!(entities[1].parents, vec![entities[0].uid.clone()]);
    }

    #[test]
    fn test_parent_entries_resolve_leniently() {
        let entities = normalize_entities(&json!([{
            "uid": {"type": "T", "id": "a"},
            "parents": [{"type": "T", "id": "b"}, "T::c", 5, {"name": "x"}]
        }]))
        .unwrap();

        assert_eq!(
            entities[0].parents,
            vec![EntityUid::new("T", "b"), EntityUid::new("T", "c")]
        );
    }

    #[test]
    fn test_odd_uid_degrades_instead_of_failing() {
        let entities = normalize_entities(&json!([
            {"uid": {"type": "U"}},
            {"uid": 42},
            {"uid": {"type": "U", "id": "ok"}}
        ]))
        .unwrap();

        assert_eq!(entities.len(), 3);
        assert_eq!(entities[0].uid, EntityUid::new("U", ""));
        assert_eq!(entities[1].uid, EntityUid::new("", "42"));
        assert_eq!(entities[2].uid, EntityUid::new("U", "ok"));
    }

    #[test]
    fn test_order_is_preserved() {
        let entities = parse_entities(
            r#"[
                {"uid": {"type": "T", "id": "3"}},
                {"uid": {"type": "T", "id": "1"}},
                {"uid": {"type": "T", "id": "2"}}
            ]"#,
        )
        .unwrap();
        let ids: Vec<&str> = entities.iter().map(|e| e.uid.id()).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
    }
}
