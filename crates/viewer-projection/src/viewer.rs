//! Viewer - application state plus a rendering collaborator.
//!
//! Every operation replaces state first and then re-renders the whole frame.
//! A rejected load is reported through [`Renderer::notify_error`] and leaves
//! state, and therefore the last frame, untouched.

use crate::error::LoadError;
use crate::model::Frame;
use crate::selector::project;
use crate::state::AppState;
use crate::view::View;
use cedar_core::{Entity, Schema, SchemaFormat};
use tracing::warn;

/// Paints frames. Implemented by each front end.
pub trait Renderer {
    /// Paint a complete frame.
    fn render(&mut self, frame: &Frame);

    /// Report a rejected upload.
    fn notify_error(&mut self, error: &LoadError);
}

/// Owns `AppState` and re-renders after every mutation.
#[derive(Debug)]
pub struct Viewer<R> {
    state: AppState,
    renderer: R,
}

impl<R: Renderer> Viewer<R> {
    pub fn new(renderer: R) -> Self {
        Self::with_state(AppState::new(), renderer)
    }

    pub fn with_state(state: AppState, renderer: R) -> Self {
        Self { state, renderer }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn into_parts(self) -> (AppState, R) {
        (self.state, self.renderer)
    }

    /// Current frame without rendering it.
    pub fn frame(&self) -> Frame {
        project(&self.state)
    }

    /// Render the current frame.
    pub fn refresh(&mut self) {
        let frame = project(&self.state);
        self.renderer.render(&frame);
    }

    fn update(&mut self, change: impl FnOnce(&mut AppState)) {
        change(&mut self.state);
        self.refresh();
    }

    fn report(&mut self, error: LoadError) -> Result<(), LoadError> {
        warn!(code = error.code(), "Upload rejected: {}", error);
        self.renderer.notify_error(&error);
        Err(error)
    }

    /// Parse and load an entity upload.
    pub fn load_entities(&mut self, json: &str) -> Result<(), LoadError> {
        match self.state.load_entities_json(json) {
            Ok(_) => {
                self.refresh();
                Ok(())
            }
            Err(e) => self.report(e),
        }
    }

    /// Parse and load a schema upload.
    pub fn load_schema(&mut self, format: SchemaFormat, source: &str) -> Result<(), LoadError> {
        match self.state.load_schema(format, source) {
            Ok(_) => {
                self.refresh();
                Ok(())
            }
            Err(e) => self.report(e),
        }
    }

    /// Parse and load a schema upload, picking the format from the file name.
    pub fn load_schema_file(&mut self, file_name: &str, source: &str) -> Result<(), LoadError> {
        self.load_schema(SchemaFormat::from_file_name(file_name), source)
    }

    /// Replace both datasets with already-parsed values.
    pub fn replace_data(&mut self, schema: Option<Schema>, entities: Vec<Entity>) {
        self.update(|state| {
            if let Some(schema) = schema {
                state.replace_schema(schema);
            }
            state.replace_entities(entities);
        });
    }

    pub fn switch_view(&mut self, view: View) {
        self.update(|state| state.switch_view(view));
    }

    pub fn select_entity_type(&mut self, entity_type: &str) {
        self.update(|state| state.select_entity_type(entity_type));
    }

    pub fn jump_to_entity_type(&mut self, entity_type: &str) {
        self.update(|state| state.jump_to_entity_type(entity_type));
    }

    pub fn back_to_type_selection(&mut self) {
        self.update(AppState::back_to_type_selection);
    }

    pub fn set_show_namespace_prefix(&mut self, show: bool) {
        self.update(|state| state.set_show_namespace_prefix(show));
    }

    pub fn set_type_filter(&mut self, filter: &str) {
        self.update(|state| state.set_type_filter(filter));
    }

    /// Collapse or expand a hierarchy node. Returns true if now collapsed.
    pub fn toggle_tree_node(&mut self, key: &str) -> bool {
        let collapsed = self.state.toggle_tree_node(key);
        self.refresh();
        collapsed
    }
}
