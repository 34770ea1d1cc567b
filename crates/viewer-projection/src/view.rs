//! The four top-level views.

use crate::error::UnknownView;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    /// Aggregate counts by entity type.
    #[default]
    Overview,
    /// Type selector, then the entities of the selected type.
    ByType,
    /// Parent/child tree.
    Hierarchy,
    /// Entity types, actions and raw schema source.
    Schema,
}

impl View {
    pub const ALL: [View; 4] = [View::Overview, View::ByType, View::Hierarchy, View::Schema];

    /// Kebab-case name, as accepted by `FromStr`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::ByType => "by-type",
            Self::Hierarchy => "hierarchy",
            Self::Schema => "schema",
        }
    }

    /// Heading shown above the view.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::ByType => "By Entity Type",
            Self::Hierarchy => "Entity Hierarchy",
            Self::Schema => "Schema Structure",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = UnknownView;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overview" => Ok(Self::Overview),
            "by-type" | "bytype" | "by_type" | "types" => Ok(Self::ByType),
            "hierarchy" | "tree" => Ok(Self::Hierarchy),
            "schema" => Ok(Self::Schema),
            _ => Err(UnknownView(s.to_string())),
        }
    }
}
