//! AttributeValue - classification of raw attribute JSON.
//!
//! Entity attributes are kept as uploaded and classified on demand.
//! Classification order, applied at every nesting level:
//!
//! 1. object with an `__entity` key → [`AttributeValue::EntityRef`]
//! 2. array → [`AttributeValue::Set`]
//! 3. any other object → [`AttributeValue::Record`]
//! 4. scalar → [`AttributeValue::Primitive`]

use crate::uid::{EntityRef, EntityUid, ENTITY_MARKER};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::{Number, Value};

/// A scalar attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    String(String),
    Number(Number),
    Bool(bool),
    Null,
}

impl Primitive {
    /// JSON text of the value (strings are quoted and escaped).
    pub fn to_json_text(&self) -> String {
        match self {
            Self::String(s) => Value::String(s.clone()).to_string(),
            Self::Number(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Null => "null".to_string(),
        }
    }
}

/// A classified attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// Reference to another entity.
    EntityRef(EntityUid),
    /// Scalar value.
    Primitive(Primitive),
    /// Ordered collection.
    Set(Vec<AttributeValue>),
    /// Nested record, in document order.
    Record(Vec<(String, AttributeValue)>),
}

impl AttributeValue {
    /// Classify a raw JSON value.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Object(fields) => match fields.get(ENTITY_MARKER) {
                Some(payload) => Self::EntityRef(EntityUid::from_marker_payload(payload)),
                None => Self::Record(
                    fields
                        .iter()
                        .map(|(key, v)| (key.clone(), Self::from_json(v)))
                        .collect(),
                ),
            },
            Value::Array(items) => Self::Set(items.iter().map(Self::from_json).collect()),
            Value::String(s) => Self::Primitive(Primitive::String(s.clone())),
            Value::Number(n) => Self::Primitive(Primitive::Number(n.clone())),
            Value::Bool(b) => Self::Primitive(Primitive::Bool(*b)),
            Value::Null => Self::Primitive(Primitive::Null),
        }
    }

    /// Get the referenced uid if this is an entity reference.
    pub fn as_entity_ref(&self) -> Option<&EntityUid> {
        match self {
            Self::EntityRef(uid) => Some(uid),
            _ => None,
        }
    }

    /// Every entity reference in this value, depth-first.
    pub fn entity_refs(&self) -> Vec<&EntityUid> {
        let mut refs = Vec::new();
        self.collect_refs(&mut refs);
        refs
    }

    fn collect_refs<'a>(&'a self, refs: &mut Vec<&'a EntityUid>) {
        match self {
            Self::EntityRef(uid) => refs.push(uid),
            Self::Primitive(_) => {}
            Self::Set(items) => items.iter().for_each(|item| item.collect_refs(refs)),
            Self::Record(fields) => fields.iter().for_each(|(_, v)| v.collect_refs(refs)),
        }
    }
}

impl From<&Value> for AttributeValue {
    fn from(value: &Value) -> Self {
        Self::from_json(value)
    }
}

/// Serializes back to the Cedar JSON encoding (references use `__entity`).
impl Serialize for AttributeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::EntityRef(uid) => EntityRef::new(uid.clone()).serialize(serializer),
            Self::Primitive(Primitive::String(s)) => serializer.serialize_str(s),
            Self::Primitive(Primitive::Number(n)) => n.serialize(serializer),
            Self::Primitive(Primitive::Bool(b)) => serializer.serialize_bool(*b),
            Self::Primitive(Primitive::Null) => serializer.serialize_unit(),
            Self::Set(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Record(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (key, value) in fields {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}
