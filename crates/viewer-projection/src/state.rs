//! Application state.
//!
//! Holds the loaded dataset and the UI selection. Loads replace the previous
//! value wholesale and only after the new input parsed; a failed load leaves
//! everything as it was.

use crate::error::LoadError;
use crate::view::View;
use cedar_core::{
    display, parse_entities, parse_schema, Entity, NameFormatter, Schema, SchemaFormat,
};
use std::collections::BTreeSet;
use tracing::info;

/// Sub-state of the by-type view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByTypeStage<'a> {
    /// No type selected yet; show the type list.
    ChooseType,
    /// Show the entities of this type.
    ShowType(&'a str),
}

/// Loaded data plus view selection.
#[derive(Debug, Clone)]
pub struct AppState {
    entities: Vec<Entity>,
    schema: Option<Schema>,
    view: View,
    selected_type: Option<String>,
    show_namespace_prefix: bool,
    type_filter: String,
    /// Keys (`Type::id`) of collapsed hierarchy nodes.
    collapsed: BTreeSet<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Empty state: no data, overview view, prefixes shown.
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            schema: None,
            view: View::default(),
            selected_type: None,
            show_namespace_prefix: true,
            type_filter: String::new(),
            collapsed: BTreeSet::new(),
        }
    }

    /// Builder: start in a given view.
    pub fn with_view(mut self, view: View) -> Self {
        self.view = view;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn schema(&self) -> Option<&Schema> {
        self.schema.as_ref()
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn selected_type(&self) -> Option<&str> {
        self.selected_type.as_deref()
    }

    pub fn type_filter(&self) -> &str {
        &self.type_filter
    }

    pub fn show_namespace_prefix(&self) -> bool {
        self.show_namespace_prefix
    }

    pub fn collapsed(&self) -> &BTreeSet<String> {
        &self.collapsed
    }

    /// True when neither entities nor a schema are loaded.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.schema.is_none()
    }

    /// Namespace flag of the loaded schema; decides whether the prefix
    /// toggle is offered at all.
    pub fn has_namespace(&self) -> bool {
        self.schema.as_ref().is_some_and(|s| s.has_namespace)
    }

    /// Formatter for the current prefix preference.
    pub fn names(&self) -> NameFormatter {
        NameFormatter::new(self.show_namespace_prefix)
    }

    /// Resolve a type name typed by the user.
    ///
    /// An exact match on the full type name wins; otherwise the unprefixed
    /// name is accepted when exactly one loaded type has it.
    pub fn find_entity_type(&self, name: &str) -> Option<&str> {
        let types = || self.entities.iter().map(Entity::entity_type);
        if let Some(exact) = types().find(|t| *t == name) {
            return Some(exact);
        }

        let mut matches = types().filter(|t| display(t, false) == name);
        let first = matches.next()?;
        match matches.find(|t| *t != first) {
            Some(_) => None,
            None => Some(first),
        }
    }

    /// Sub-state of the by-type view.
    pub fn by_type_stage(&self) -> ByTypeStage<'_> {
        match self.selected_type.as_deref() {
            Some(entity_type) => ByTypeStage::ShowType(entity_type),
            None => ByTypeStage::ChooseType,
        }
    }

    // =========================================================================
    // Loads
    // =========================================================================

    /// Replace the entity list.
    pub fn replace_entities(&mut self, entities: Vec<Entity>) {
        info!(count = entities.len(), "Loaded entities");
        self.entities = entities;
        self.collapsed.clear();
    }

    /// Parse, normalize and replace the entity list.
    pub fn load_entities_json(&mut self, json: &str) -> Result<usize, LoadError> {
        let entities = parse_entities(json)?;
        let count = entities.len();
        self.replace_entities(entities);
        Ok(count)
    }

    /// Replace the schema.
    pub fn replace_schema(&mut self, schema: Schema) -> &Schema {
        info!(
            format = ?schema.format,
            entity_types = schema.entities.len(),
            actions = schema.actions.len(),
            has_namespace = schema.has_namespace,
            "Loaded schema"
        );
        self.schema.insert(schema)
    }

    /// Parse and replace the schema.
    pub fn load_schema(&mut self, format: SchemaFormat, source: &str) -> Result<&Schema, LoadError> {
        let schema = parse_schema(format, source)?;
        Ok(self.replace_schema(schema))
    }

    /// Parse and replace the schema, picking the format from the file name.
    pub fn load_schema_file(&mut self, file_name: &str, source: &str) -> Result<&Schema, LoadError> {
        self.load_schema(SchemaFormat::from_file_name(file_name), source)
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Switch views. Always clears the selected type and the type filter.
    pub fn switch_view(&mut self, view: View) {
        self.view = view;
        self.selected_type = None;
        self.type_filter.clear();
    }

    /// Select an entity type (by-type: choose → show).
    pub fn select_entity_type(&mut self, entity_type: impl Into<String>) {
        self.selected_type = Some(entity_type.into());
    }

    /// Go straight to the by-type view with a type selected.
    pub fn jump_to_entity_type(&mut self, entity_type: impl Into<String>) {
        self.view = View::ByType;
        self.type_filter.clear();
        self.selected_type = Some(entity_type.into());
    }

    /// Return from a type's entities to the type list.
    pub fn back_to_type_selection(&mut self) {
        self.selected_type = None;
    }

    /// Show or hide namespace prefixes.
    pub fn set_show_namespace_prefix(&mut self, show: bool) {
        self.show_namespace_prefix = show;
    }

    /// Set the type-list search term.
    pub fn set_type_filter(&mut self, filter: impl Into<String>) {
        self.type_filter = filter.into();
    }

    /// Collapse or expand a hierarchy node. Returns true if now collapsed.
    pub fn toggle_tree_node(&mut self, key: &str) -> bool {
        if self.collapsed.remove(key) {
            false
        } else {
            self.collapsed.insert(key.to_string());
            true
        }
    }
}
