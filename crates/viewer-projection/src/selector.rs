//! Projection selection: `AppState` → `Frame`.

use crate::generator::{
    ByTypeGenerator, HierarchyGenerator, OverviewGenerator, ProjectionGenerator, SchemaGenerator,
};
use crate::model::{Frame, Projection};
use crate::state::AppState;
use crate::view::View;
use cedar_core::EntityUid;

/// Choose and build the projection for the current state.
///
/// - nothing loaded → `Empty`, whatever the view
/// - schema view without a schema → `NoSchema`
/// - by-type view → selector until a type is selected, then detail
pub fn project(state: &AppState) -> Frame {
    let names = state.names();
    let body = if state.is_empty() {
        Projection::Empty
    } else {
        match state.view() {
            View::Overview => OverviewGenerator::new().generate(state, names),
            View::ByType => ByTypeGenerator::new().generate(state, names),
            View::Hierarchy => HierarchyGenerator::new().generate(state, names),
            View::Schema => match state.schema() {
                Some(schema) => SchemaGenerator::new().generate(schema, names),
                None => Projection::NoSchema,
            },
        }
    };

    Frame {
        view: state.view(),
        namespace_toggle: state.has_namespace(),
        show_namespace_prefix: names.show_prefix(),
        body,
    }
}

/// Hierarchy frame walked from one entity instead of the roots.
pub fn project_hierarchy_from(state: &AppState, start: &EntityUid) -> Frame {
    let names = state.names();
    Frame {
        view: View::Hierarchy,
        namespace_toggle: state.has_namespace(),
        show_namespace_prefix: names.show_prefix(),
        body: HierarchyGenerator::new()
            .from_entity(start.clone())
            .generate(state, names),
    }
}
