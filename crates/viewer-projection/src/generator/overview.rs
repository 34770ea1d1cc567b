//! Overview generator - totals and per-type counts.

use super::{count_by_type, ProjectionGenerator};
use crate::model::{OverviewProjection, Projection};
use crate::state::AppState;
use cedar_core::NameFormatter;

/// Generator for the overview view.
#[derive(Debug, Default)]
pub struct OverviewGenerator;

impl OverviewGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Build the overview model.
    pub fn build(&self, state: &AppState, names: NameFormatter) -> OverviewProjection {
        let per_type = count_by_type(state.entities(), names);
        OverviewProjection {
            total_entities: state.entities().len(),
            total_types: per_type.len(),
            action_count: state.schema().map(|s| s.actions.len()),
            per_type,
        }
    }
}

impl ProjectionGenerator for OverviewGenerator {
    type Source = AppState;

    fn generate(&self, source: &AppState, names: NameFormatter) -> Projection {
        Projection::Overview(self.build(source, names))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_overview_counts() {
        let mut state = AppState::new();
        state
            .load_entities_json(
                r#"[
                {"uid": {"type": "App::User", "id": "a"}},
                {"uid": {"type": "App::Group", "id": "g"}},
                {"uid": {"type": "App::User", "id": "b"}}
            ]"#,
            )
            .unwrap();

        let overview = OverviewGenerator::new().build(&state, NameFormatter::new(false));
        assert_eq!(overview.total_entities, 3);
        assert_eq!(overview.total_types, 2);
        assert_eq!(overview.action_count, None);
        let labels: Vec<String> = overview.per_type.iter().map(|c| c.button_text()).collect();
        assert_eq!(labels, vec!["User (2)", "Group (1)"]);
    }

    #[test]
    fn test_action_count_with_schema() {
        let mut state = AppState::new();
        state
            .load_schema_file(
                "schema.cedarschema",
                "action view, edit appliesTo { principal: [User], resource: [Doc] };",
            )
            .unwrap();

        let overview = OverviewGenerator::new().build(&state, NameFormatter::default());
        assert_eq!(overview.total_entities, 0);
        assert_eq!(overview.action_count, Some(2));
    }
}
