//! Canonical entity shape produced by the normalizer.

use crate::attribute::AttributeValue;
use crate::uid::EntityUid;
use serde::Serialize;
use serde_json::{Map, Value};

/// One entity record in canonical shape.
///
/// `uid` and `parents` are always resolved uids. `attrs` and any other
/// record fields are kept exactly as uploaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Entity {
    pub uid: EntityUid,
    pub parents: Vec<EntityUid>,
    pub attrs: Map<String, Value>,
    /// Record fields other than `uid`, `parents` and `attrs`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entity {
    /// Create an entity with no parents and no attributes.
    pub fn new(uid: EntityUid) -> Self {
        Self {
            uid,
            ..Self::default()
        }
    }

    /// Builder: add a parent.
    pub fn with_parent(mut self, parent: EntityUid) -> Self {
        self.parents.push(parent);
        self
    }

    /// Builder: add a raw attribute.
    pub fn with_attr(mut self, name: impl Into<String>, value: Value) -> Self {
        self.attrs.insert(name.into(), value);
        self
    }

    /// Entity type name.
    pub fn entity_type(&self) -> &str {
        self.uid.entity_type()
    }

    /// True when the entity has no parents.
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// True when `uid` is one of this entity's parents.
    pub fn has_parent(&self, uid: &EntityUid) -> bool {
        self.parents.iter().any(|p| p == uid)
    }

    /// Attributes classified into [`AttributeValue`]s, in document order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, AttributeValue)> + '_ {
        self.attrs
            .iter()
            .map(|(name, raw)| (name.as_str(), AttributeValue::from_json(raw)))
    }
}
