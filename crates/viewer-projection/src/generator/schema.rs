//! Schema generator - entity types, actions and the raw source.

use super::ProjectionGenerator;
use crate::model::{Projection, SchemaActionLine, SchemaEntityLine, SchemaProjection};
use cedar_core::{NameFormatter, Schema};

/// Generator for the schema view.
#[derive(Debug, Default)]
pub struct SchemaGenerator;

impl SchemaGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Build the schema model.
    pub fn build(&self, schema: &Schema, names: NameFormatter) -> SchemaProjection {
        SchemaProjection {
            format: schema.format,
            entity_types: schema
                .entities
                .iter()
                .map(|e| SchemaEntityLine {
                    name: e.name.clone(),
                    label: names.name(&e.name).to_string(),
                    parents: names.names(&e.possible_parents),
                })
                .collect(),
            actions: schema
                .actions
                .iter()
                .map(|a| SchemaActionLine {
                    name: a.name.clone(),
                    label: names.name(&a.name).to_string(),
                    principals: names.names(&a.principals),
                    resources: names.names(&a.resources),
                    context: a.context.clone(),
                    member_of: names.names(&a.member_of),
                })
                .collect(),
            raw: schema.raw.clone(),
        }
    }
}

impl ProjectionGenerator for SchemaGenerator {
    type Source = Schema;

    fn generate(&self, source: &Schema, names: NameFormatter) -> Projection {
        Projection::Schema(self.build(source, names))
    }
}
