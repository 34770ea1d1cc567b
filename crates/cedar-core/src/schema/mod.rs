//! Schema model and parsers.
//!
//! Two input formats produce the same [`Schema`]:
//!
//! ```text
//! *.cedarschema (text) ──► TextualSchemaParser ──┐
//! *.json              ──► StructuredSchemaParser ─┴──► Schema
//! ```
//!
//! Format selection is by file name alone, see [`SchemaFormat::from_path`].

mod structured;
mod textual;

pub use structured::StructuredSchemaParser;
pub use textual::TextualSchemaParser;

use crate::error::SchemaError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Which parser produced a schema.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaFormat {
    /// `.cedarschema` text grammar.
    #[default]
    Textual,
    /// JSON schema document.
    Structured,
}

impl SchemaFormat {
    /// Pick a format from a file name: `.json` is structured, anything else textual.
    pub fn from_file_name(name: &str) -> Self {
        if name.ends_with(".json") {
            Self::Structured
        } else {
            Self::Textual
        }
    }

    /// Pick a format from a path's file name.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        path.as_ref()
            .file_name()
            .map(|name| Self::from_file_name(&name.to_string_lossy()))
            .unwrap_or_default()
    }
}

/// An entity type declared by the schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SchemaEntityType {
    /// Possibly namespace-qualified name.
    pub name: String,
    /// Types this entity may be a member of.
    pub possible_parents: Vec<String>,
    /// Attribute shape, structured format only. Carried opaquely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<Value>,
}

/// An action declared by the schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SchemaAction {
    pub name: String,
    pub principals: Vec<String>,
    pub resources: Vec<String>,
    /// Context type as text; empty when absent.
    pub context: String,
    /// Action groups, structured format only.
    pub member_of: Vec<String>,
}

/// A parsed schema. Replaced wholesale on every load.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Schema {
    /// Source text (textual) or pretty-printed JSON (structured).
    pub raw: String,
    pub format: SchemaFormat,
    /// True iff any non-empty namespace qualifier is present.
    pub has_namespace: bool,
    pub entities: Vec<SchemaEntityType>,
    pub actions: Vec<SchemaAction>,
}

impl Schema {
    /// Look up an entity type by its full name.
    pub fn entity_type(&self, name: &str) -> Option<&SchemaEntityType> {
        self.entities.iter().find(|e| e.name == name)
    }

    /// Look up an action by its full name.
    pub fn action(&self, name: &str) -> Option<&SchemaAction> {
        self.actions.iter().find(|a| a.name == name)
    }
}

/// A schema source parser.
///
/// Consumers depend on this trait, so a grammar-complete parser can replace
/// the pattern-based one without touching them.
pub trait SchemaParser {
    /// Format this parser reads.
    fn format(&self) -> SchemaFormat;

    /// Parse schema source into a [`Schema`].
    fn parse(&self, source: &str) -> Result<Schema, SchemaError>;
}

/// Parse schema source with the parser for `format`.
pub fn parse_schema(format: SchemaFormat, source: &str) -> Result<Schema, SchemaError> {
    match format {
        SchemaFormat::Textual => TextualSchemaParser::new().parse(source),
        SchemaFormat::Structured => StructuredSchemaParser::new().parse(source),
    }
}
