//! cedar-core: Cedar schema and entity parsing for the viewer
//!
//! This crate contains the data-shape logic with NO rendering dependencies:
//! - `EntityUid` / `EntityRef` - the two wire encodings of an entity reference
//! - `Entity` and the entity normalizer
//! - `AttributeValue` - tagged classification of raw attribute JSON
//! - Schema parsers for `.cedarschema` text and the JSON schema document
//! - Namespace display formatting
//! - Hierarchy derivation with a cycle-safe tree traversal
//!
//! # Pipeline
//!
//! ```text
//! entities.json ──► normalize ──► Vec<Entity> ──► Hierarchy ──► TreeNode
//! schema.cedarschema ──► TextualSchemaParser ──┐
//! schema.json ───────► StructuredSchemaParser ─┴──► Schema
//! ```
//!
//! # Example
//!
//! ```
//! use cedar_core::{parse_entities, EntityUid, Hierarchy};
//!
//! let json = r#"[
//!   { "uid": { "type": "Group", "id": "admins" } },
//!   { "uid": { "__entity": { "type": "User", "id": "alice" } },
//!     "parents": [{ "__entity": { "type": "Group", "id": "admins" } }] }
//! ]"#;
//!
//! let entities = parse_entities(json).unwrap();
//! let hierarchy = Hierarchy::new(&entities);
//! let children: Vec<_> = hierarchy
//!     .children(&EntityUid::new("Group", "admins"))
//!     .map(|e| e.uid.clone())
//!     .collect();
//! assert_eq!(children, vec![EntityUid::new("User", "alice")]);
//! ```

mod attribute;
mod entity;
mod error;
pub mod format;
pub mod hierarchy;
pub mod namespace;
mod normalize;
pub mod schema;
mod uid;

// Re-exports
pub use attribute::{AttributeValue, Primitive};
pub use entity::Entity;
pub use error::{EntityError, SchemaError};
pub use format::{format_attribute_value, NameFormatter};
pub use hierarchy::{Hierarchy, TreeNode};
pub use namespace::{display, NAMESPACE_SEPARATOR};
pub use normalize::{normalize_entities, parse_entities};
pub use schema::{
    parse_schema, Schema, SchemaAction, SchemaEntityType, SchemaFormat, SchemaParser,
    StructuredSchemaParser, TextualSchemaParser,
};
pub use uid::{EntityRef, EntityUid, ENTITY_MARKER};
