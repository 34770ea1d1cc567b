//! EntityUid - the `(type, id)` pair that identifies an entity.
//!
//! Entity references arrive in two encodings:
//!
//! ```text
//! { "type": "User", "id": "alice" }                 canonical
//! { "__entity": { "type": "User", "id": "alice" } } wrapped
//! ```
//!
//! Both resolve to the same [`EntityUid`]. [`EntityRef`] is the wrapped form
//! and is what attribute values serialize back to.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Marker key that turns a JSON object into an entity reference.
pub const ENTITY_MARKER: &str = "__entity";

/// Identifier of one entity: its type name and its id.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityUid {
    /// Entity type, possibly namespace-qualified (`App::User`).
    #[serde(rename = "type")]
    pub entity_type: String,
    /// Entity id within its type.
    pub id: String,
}

impl EntityUid {
    /// Create a uid from its parts.
    pub fn new(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }

    /// Get the entity type.
    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    /// Get the entity id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Path-style key, `Type::id`.
    pub fn key(&self) -> String {
        format!("{}::{}", self.entity_type, self.id)
    }

    /// Parse a `Type::id` key. The id is the text after the last `::`;
    /// surrounding double quotes (`User::"alice"`) are stripped.
    pub fn parse_key(key: &str) -> Option<Self> {
        let (entity_type, id) = key.trim().rsplit_once("::")?;
        let id = id
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
            .unwrap_or(id);
        if entity_type.is_empty() || id.is_empty() {
            return None;
        }
        Some(Self::new(entity_type, id))
    }

    /// Resolve a uid from either wire encoding, or from a `Type::id` key string.
    ///
    /// Parts are read leniently: a missing part is empty and a non-string
    /// part uses its JSON text, so `{"type": "T", "id": 1}` is `T::1`.
    /// Returns `None` for values that do not look like a uid at all.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(key) => Self::parse_key(key),
            Value::Object(fields) => match fields.get(ENTITY_MARKER) {
                Some(wrapped @ Value::Object(_)) => Some(Self::from_marker_payload(wrapped)),
                Some(Value::String(key)) => Self::parse_key(key),
                Some(_) => None,
                None if fields.contains_key("type") || fields.contains_key("id") => {
                    Some(Self::from_marker_payload(value))
                }
                None => None,
            },
            _ => None,
        }
    }

    /// Lenient resolution of an `__entity` payload found inside attributes.
    ///
    /// Attribute references are display-only, so a malformed payload still
    /// yields a uid: missing parts become empty, non-strings use their JSON text.
    pub(crate) fn from_marker_payload(payload: &Value) -> Self {
        let part = |name: &str| match payload.get(name) {
            Some(Value::String(s)) => s.clone(),
            None | Some(Value::Null) => String::new(),
            Some(other) => other.to_string(),
        };
        Self::new(part("type"), part("id"))
    }
}

impl fmt::Debug for EntityUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityUid({}::{})", self.entity_type, self.id)
    }
}

impl fmt::Display for EntityUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.entity_type, self.id)
    }
}

/// Wrapped entity reference, serialized as `{ "__entity": { "type", "id" } }`.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    /// The referenced entity.
    #[serde(rename = "__entity")]
    pub target: EntityUid,
}

impl EntityRef {
    /// Create a reference to an entity.
    pub fn new(target: EntityUid) -> Self {
        Self { target }
    }

    /// Get the referenced uid.
    pub fn target(&self) -> &EntityUid {
        &self.target
    }
}

impl fmt::Debug for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityRef({})", self.target)
    }
}

impl From<EntityUid> for EntityRef {
    fn from(uid: EntityUid) -> Self {
        Self::new(uid)
    }
}
