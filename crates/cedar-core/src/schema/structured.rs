//! Parser for the JSON schema document.
//!
//! ```text
//! {
//!   "<namespace>": {
//!     "entityTypes": { "<Name>": { "memberOfTypes": [...], "shape": {...} } },
//!     "actions":     { "<name>": { "appliesTo": { "principalTypes": [...],
//!                                                 "resourceTypes": [...],
//!                                                 "context": {...} },
//!                                  "memberOf": [...] } }
//!   }
//! }
//! ```
//!
//! The empty namespace `""` is the global one. Document order is preserved.

use super::{Schema, SchemaAction, SchemaEntityType, SchemaFormat, SchemaParser};
use crate::error::{json_kind, SchemaError};
use crate::namespace::NAMESPACE_SEPARATOR;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Parser for JSON schema documents.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuredSchemaParser;

impl StructuredSchemaParser {
    pub fn new() -> Self {
        Self
    }

    /// Build a schema from an already-parsed document.
    pub fn parse_value(&self, document: &Value) -> Result<Schema, SchemaError> {
        let namespaces = document
            .as_object()
            .ok_or(SchemaError::NotANamespaceMap {
                found: json_kind(document),
            })?;

        let mut schema = Schema {
            raw: serde_json::to_string_pretty(document)?,
            format: SchemaFormat::Structured,
            has_namespace: namespaces.keys().any(|ns| !ns.is_empty()),
            entities: Vec::new(),
            actions: Vec::new(),
        };

        for (namespace, body) in namespaces {
            let Some(body) = body.as_object() else {
                warn!(namespace = %namespace, "Skipping namespace whose body is not an object");
                continue;
            };

            for (name, def) in definitions(body, "entityTypes") {
                schema.entities.push(entity_type(namespace, name, def));
            }
            for (name, def) in definitions(body, "actions") {
                schema.actions.push(action(namespace, name, def));
            }
        }

        debug!(
            entity_types = schema.entities.len(),
            actions = schema.actions.len(),
            has_namespace = schema.has_namespace,
            "Parsed structured schema"
        );
        Ok(schema)
    }
}

impl SchemaParser for StructuredSchemaParser {
    fn format(&self) -> SchemaFormat {
        SchemaFormat::Structured
    }

    fn parse(&self, source: &str) -> Result<Schema, SchemaError> {
        let document: Value = serde_json::from_str(source)?;
        self.parse_value(&document)
    }
}

/// Entries of `body[key]` when it is an object; empty otherwise.
fn definitions<'a>(
    body: &'a Map<String, Value>,
    key: &str,
) -> impl Iterator<Item = (&'a String, &'a Value)> {
    body.get(key).and_then(Value::as_object).into_iter().flatten()
}

fn qualify(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{namespace}{NAMESPACE_SEPARATOR}{name}")
    }
}

fn entity_type(namespace: &str, name: &str, def: &Value) -> SchemaEntityType {
    SchemaEntityType {
        name: qualify(namespace, name),
        possible_parents: string_list(def.get("memberOfTypes")),
        shape: def.get("shape").filter(|shape| !shape.is_null()).cloned(),
    }
}

fn action(namespace: &str, name: &str, def: &Value) -> SchemaAction {
    let applies_to = def.get("appliesTo");
    let context = match applies_to.and_then(|a| a.get("context")) {
        None | Some(Value::Null) => String::new(),
        Some(ctx) => serde_json::to_string_pretty(ctx).unwrap_or_else(|_| ctx.to_string()),
    };

    SchemaAction {
        name: qualify(namespace, &format!("Action::\"{name}\"")),
        principals: string_list(applies_to.and_then(|a| a.get("principalTypes"))),
        resources: string_list(applies_to.and_then(|a| a.get("resourceTypes"))),
        context,
        member_of: member_of(namespace, def.get("memberOf")),
    }
}

/// String entries of a JSON array; anything else is empty.
fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Action group references: `{ "id": "g", "type"?: "T" }` renders as `T::"g"`,
/// the type defaulting to the namespace's `Action`. Plain strings are kept.
fn member_of(namespace: &str, value: Option<&Value>) -> Vec<String> {
    let Some(items) = value.and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.clone()),
            Value::Object(group) => {
                let id = group.get("id")?.as_str()?;
                let group_type = match group.get("type").and_then(Value::as_str) {
                    Some(t) => t.to_string(),
                    None => qualify(namespace, "Action"),
                };
                Some(format!("{group_type}{NAMESPACE_SEPARATOR}\"{id}\""))
            }
            _ => None,
        })
        .collect()
}
