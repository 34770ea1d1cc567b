//! Projection model - the serializable output handed to renderers.
//!
//! A [`Frame`] is everything a renderer needs to paint one screen. Renderers
//! never look at `AppState` or the raw dataset; all names in a frame have
//! already been passed through the namespace display preference.

use crate::view::View;
use cedar_core::SchemaFormat;
use serde::Serialize;

/// One rendered screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    /// Active view.
    pub view: View,
    /// Whether the namespace prefix toggle is offered (schema has a namespace).
    pub namespace_toggle: bool,
    /// Current namespace display preference.
    pub show_namespace_prefix: bool,
    /// What to paint.
    pub body: Projection,
}

/// The body of a frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "projection", rename_all = "snake_case")]
pub enum Projection {
    /// Nothing loaded yet.
    Empty,
    Overview(OverviewProjection),
    /// By-type view before a type is selected.
    TypeSelector(TypeSelectorProjection),
    /// By-type view with a type selected.
    TypeDetail(TypeDetailProjection),
    Hierarchy(HierarchyProjection),
    Schema(SchemaProjection),
    /// Schema view with no schema loaded.
    NoSchema,
}

impl Projection {
    /// Short name of the variant, matching its serde tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Overview(_) => "overview",
            Self::TypeSelector(_) => "type_selector",
            Self::TypeDetail(_) => "type_detail",
            Self::Hierarchy(_) => "hierarchy",
            Self::Schema(_) => "schema",
            Self::NoSchema => "no_schema",
        }
    }
}

// =============================================================================
// Overview / by-type
// =============================================================================

/// Entity count for one type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeCount {
    /// Full type name; the key used to select the type.
    pub entity_type: String,
    /// Display name.
    pub label: String,
    pub count: usize,
}

impl TypeCount {
    /// Text shown on a selector button, `Label (count)`.
    pub fn button_text(&self) -> String {
        format!("{} ({})", self.label, self.count)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverviewProjection {
    pub total_entities: usize,
    pub total_types: usize,
    /// Number of schema actions; `None` when no schema is loaded.
    pub action_count: Option<usize>,
    /// Counts in order of first appearance in the entity list.
    pub per_type: Vec<TypeCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeSelectorProjection {
    /// Active search term (may be empty).
    pub filter: String,
    /// Matching types, sorted by full type name (case-insensitive).
    pub types: Vec<TypeCount>,
    /// Number of types before filtering.
    pub total_types: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDetailProjection {
    pub entity_type: String,
    pub label: String,
    pub count: usize,
    pub cards: Vec<EntityCard>,
}

/// One entity of the selected type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityCard {
    /// `Type::id` key.
    pub uid: String,
    pub id: String,
    pub type_label: String,
    /// Display form of each parent uid.
    pub parents: Vec<String>,
    /// Display form of each child uid, in entity-list order.
    pub children: Vec<String>,
    pub attributes: Vec<AttributeLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeLine {
    pub name: String,
    pub value: String,
}

// =============================================================================
// Hierarchy
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HierarchyProjection {
    pub roots: Vec<HierarchyNode>,
}

impl HierarchyProjection {
    /// Total number of nodes, markers included.
    pub fn node_count(&self) -> usize {
        self.roots.iter().map(HierarchyNode::node_count).sum()
    }
}

/// A hierarchy tree node ready for painting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HierarchyNode {
    /// `Type::id`; the key passed to `toggle_tree_node`.
    pub key: String,
    pub node_id: String,
    /// Display form of the uid.
    pub label: String,
    /// Circular-reference marker; never has children.
    pub circular: bool,
    /// Collapsed by the user. Children are still listed; renderers hide them.
    pub collapsed: bool,
    pub children: Vec<HierarchyNode>,
}

impl HierarchyNode {
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }
}

// =============================================================================
// Schema
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaProjection {
    pub format: SchemaFormat,
    pub entity_types: Vec<SchemaEntityLine>,
    pub actions: Vec<SchemaActionLine>,
    /// Schema source as uploaded (textual) or pretty-printed (structured).
    pub raw: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaEntityLine {
    pub name: String,
    pub label: String,
    /// Display names of the possible parent types.
    pub parents: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaActionLine {
    pub name: String,
    pub label: String,
    pub principals: Vec<String>,
    pub resources: Vec<String>,
    pub context: String,
    pub member_of: Vec<String>,
}
