//! Projection generators, one per view.
//!
//! ## Architecture
//!
//! ```text
//! AppState ──► OverviewGenerator  ──► Projection::Overview
//! AppState ──► ByTypeGenerator    ──► Projection::TypeSelector | TypeDetail
//! AppState ──► HierarchyGenerator ──► Projection::Hierarchy
//! Schema   ──► SchemaGenerator    ──► Projection::Schema
//! ```
//!
//! Generators are deterministic: same input and formatter produce the same
//! output. Every name leaving a generator has been through the formatter.

pub mod by_type;
pub mod hierarchy;
pub mod overview;
pub mod schema;

pub use by_type::ByTypeGenerator;
pub use hierarchy::HierarchyGenerator;
pub use overview::OverviewGenerator;
pub use schema::SchemaGenerator;

use crate::model::{Projection, TypeCount};
use cedar_core::{Entity, NameFormatter};

/// Trait for types that can generate a projection.
pub trait ProjectionGenerator {
    /// The source data type this generator transforms.
    type Source: ?Sized;

    /// Generate a projection, applying `names` to every displayed name.
    fn generate(&self, source: &Self::Source, names: NameFormatter) -> Projection;

    /// Generate a projection with namespace prefixes shown.
    fn generate_with_defaults(&self, source: &Self::Source) -> Projection {
        self.generate(source, NameFormatter::default())
    }
}

/// Entity counts per type, in order of first appearance.
pub(crate) fn count_by_type(entities: &[Entity], names: NameFormatter) -> Vec<TypeCount> {
    let mut counts: Vec<TypeCount> = Vec::new();
    for entity in entities {
        let entity_type = entity.entity_type();
        match counts.iter_mut().find(|c| c.entity_type == entity_type) {
            Some(existing) => existing.count += 1,
            None => counts.push(TypeCount {
                entity_type: entity_type.to_string(),
                label: names.name(entity_type).to_string(),
                count: 1,
            }),
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use cedar_core::EntityUid;

    #[test]
    fn test_count_by_type_first_appearance_order() {
        let entities: Vec<Entity> = [("B::T", "1"), ("A::T", "1"), ("B::T", "2")]
            .into_iter()
            .map(|(t, id)| Entity::new(EntityUid::new(t, id)))
            .collect();

        let counts = count_by_type(&entities, NameFormatter::new(false));
        let summary: Vec<(&str, &str, usize)> = counts
            .iter()
            .map(|c| (c.entity_type.as_str(), c.label.as_str(), c.count))
            .collect();
        assert_eq!(summary, vec![("B::T", "T", 2), ("A::T", "T", 1)]);
    }
}
