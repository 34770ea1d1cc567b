//! Viewer Projection - deterministic view models for the Cedar entity viewer.
//!
//! This crate owns the application state and decides what a renderer paints:
//! - `AppState` - loaded entities and schema plus UI selection state
//! - `View` - the four top-level views
//! - `Frame` / `Projection` - the serializable output handed to renderers
//! - Generators - one per view, all applying the namespace display preference
//! - `Viewer` - wraps state and a `Renderer`; every mutation re-renders
//!
//! # Architecture
//!
//! ```text
//! load / switch / select ──► AppState ──► project() ──► Frame ──► Renderer
//!                                            │
//!                    ┌───────────────┬───────┴────────┬──────────────┐
//!             OverviewGenerator ByTypeGenerator HierarchyGenerator SchemaGenerator
//! ```
//!
//! # Example
//!
//! ```
//! use viewer_projection::{project, AppState, Projection, View};
//!
//! let mut state = AppState::new();
//! state
//!     .load_entities_json(r#"[{"uid": {"type": "User", "id": "alice"}}]"#)
//!     .unwrap();
//! state.jump_to_entity_type("User");
//!
//! let frame = project(&state);
//! assert_eq!(frame.view, View::ByType);
//! assert!(matches!(frame.body, Projection::TypeDetail(_)));
//! ```

mod error;
pub mod generator;
mod model;
mod selector;
mod state;
mod view;
mod viewer;

// Re-exports
pub use error::{LoadError, UnknownView};
pub use generator::{
    ByTypeGenerator, HierarchyGenerator, OverviewGenerator, ProjectionGenerator, SchemaGenerator,
};
pub use model::{
    AttributeLine, EntityCard, Frame, HierarchyNode, HierarchyProjection, OverviewProjection,
    Projection, SchemaActionLine, SchemaEntityLine, SchemaProjection, TypeCount,
    TypeDetailProjection, TypeSelectorProjection,
};
pub use selector::{project, project_hierarchy_from};
pub use state::{AppState, ByTypeStage};
pub use view::View;
pub use viewer::{Renderer, Viewer};
