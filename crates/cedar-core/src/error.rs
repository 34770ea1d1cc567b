//! Load error types.
//!
//! Only malformed uploads are errors. Unrecognized schema text, missing
//! optional fields and cyclic hierarchies are all handled as data.

use serde_json::Value;
use thiserror::Error;

/// Errors raised while normalizing an entities document.
#[derive(Debug, Error)]
pub enum EntityError {
    /// The document is not valid JSON.
    #[error("Malformed entities JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The document parsed, but is not an array of records.
    #[error("Entities document must be a JSON array of records, found {found}")]
    NotAList {
        /// JSON kind found at the top level.
        found: &'static str,
    },

    /// An array element is not an object.
    #[error("Entity record {index} is not a JSON object (found {found})")]
    NotARecord {
        /// Position of the record in the array.
        index: usize,
        /// JSON kind found instead.
        found: &'static str,
    },

    /// A record has no `uid` field, or it is null.
    #[error("Entity record {index} has no uid")]
    MissingUid {
        /// Position of the record in the array.
        index: usize,
    },

    /// A record's `parents` is present but not an array.
    #[error("Entity record {index}: parents must be an array, found {found}")]
    InvalidParents {
        /// Position of the record in the array.
        index: usize,
        /// JSON kind found instead.
        found: &'static str,
    },

    /// A record's `attrs` is present but not an object.
    #[error("Entity record {index}: attrs must be an object, found {found}")]
    InvalidAttrs {
        /// Position of the record in the array.
        index: usize,
        /// JSON kind found instead.
        found: &'static str,
    },
}

impl EntityError {
    /// Get an error code for this error type.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Json(_) => "MALFORMED_JSON",
            Self::NotAList { .. } => "NOT_A_LIST",
            Self::NotARecord { .. } => "NOT_A_RECORD",
            Self::MissingUid { .. } => "MISSING_UID",
            Self::InvalidParents { .. } => "INVALID_PARENTS",
            Self::InvalidAttrs { .. } => "INVALID_ATTRS",
        }
    }
}

/// Errors raised while parsing a schema.
///
/// The textual parser never fails; these come from the structured (JSON) path.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The document is not valid JSON.
    #[error("Malformed JSON schema: {0}")]
    Json(#[from] serde_json::Error),

    /// The document parsed, but is not an object keyed by namespace.
    #[error("JSON schema must be an object keyed by namespace, found {found}")]
    NotANamespaceMap {
        /// JSON kind found at the top level.
        found: &'static str,
    },
}

impl SchemaError {
    /// Get an error code for this error type.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Json(_) => "MALFORMED_JSON",
            Self::NotANamespaceMap { .. } => "NOT_A_NAMESPACE_MAP",
        }
    }
}

/// Name of a JSON value's kind, for error messages.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
