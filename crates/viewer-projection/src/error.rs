//! Viewer error types.

use cedar_core::{EntityError, SchemaError};
use thiserror::Error;

/// A rejected upload. State is left untouched when one of these is returned.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Error parsing entities JSON: {0}")]
    Entities(#[from] EntityError),

    #[error("Error parsing JSON schema: {0}")]
    Schema(#[from] SchemaError),
}

impl LoadError {
    /// Get an error code for this error type.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Entities(e) => e.code(),
            Self::Schema(e) => e.code(),
        }
    }
}

/// A view name that is not one of the four views.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown view '{0}' (expected overview, by-type, hierarchy or schema)")]
pub struct UnknownView(pub String);
