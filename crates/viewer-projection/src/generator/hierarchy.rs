//! Hierarchy generator - the parent/child tree.
//!
//! Traversal lives in `cedar_core::Hierarchy`; this generator only labels
//! nodes and marks the ones the user collapsed.

use super::ProjectionGenerator;
use crate::model::{HierarchyNode, HierarchyProjection, Projection};
use crate::state::AppState;
use cedar_core::{EntityUid, Hierarchy, NameFormatter, TreeNode};
use std::collections::BTreeSet;

/// Generator for the hierarchy view.
#[derive(Debug, Default)]
pub struct HierarchyGenerator {
    /// Start from this entity instead of the roots.
    start: Option<EntityUid>,
}

impl HierarchyGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk from one entity instead of every root. Lets cyclic data with no
    /// root be inspected.
    pub fn from_entity(mut self, uid: EntityUid) -> Self {
        self.start = Some(uid);
        self
    }

    /// Build the tree model.
    pub fn build(&self, state: &AppState, names: NameFormatter) -> HierarchyProjection {
        let hierarchy = Hierarchy::new(state.entities());
        let trees = match &self.start {
            Some(uid) => hierarchy.subtree(uid).into_iter().collect(),
            None => hierarchy.tree(),
        };

        HierarchyProjection {
            roots: trees
                .iter()
                .map(|tree| Self::node(tree, state.collapsed(), names))
                .collect(),
        }
    }

    fn node(tree: &TreeNode, collapsed: &BTreeSet<String>, names: NameFormatter) -> HierarchyNode {
        let key = tree.key();
        HierarchyNode {
            node_id: tree.node_id(),
            label: names.uid(tree.uid()),
            circular: tree.is_circular(),
            collapsed: tree.has_children() && collapsed.contains(&key),
            children: tree
                .children()
                .iter()
                .map(|child| Self::node(child, collapsed, names))
                .collect(),
            key,
        }
    }
}

impl ProjectionGenerator for HierarchyGenerator {
    type Source = AppState;

    fn generate(&self, source: &AppState, names: NameFormatter) -> Projection {
        Projection::Hierarchy(self.build(source, names))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CYCLE: &str = r#"[
        {"uid": {"type": "Org::Unit", "id": "root"}},
        {"uid": {"type": "Org::Unit", "id": "a"}, "parents": [{"type": "Org::Unit", "id": "root"}, {"type": "Org::Unit", "id": "b"}]},
        {"uid": {"type": "Org::Unit", "id": "b"}, "parents": [{"type": "Org::Unit", "id": "a"}]}
    ]"#;

    fn state() -> AppState {
        let mut state = AppState::new();
        state.load_entities_json(CYCLE).unwrap();
        state
    }

    #[test]
    fn test_tree_labels_and_circular_marker() {
        let tree = HierarchyGenerator::new().build(&state(), NameFormatter::new(false));

        assert_eq!(tree.roots.len(), 1);
        let root = &tree.roots[0];
        assert_eq!(root.label, "Unit::root");
        assert_eq!(root.key, "Org::Unit::root");
        assert_eq!(root.node_id, "node-Org--Unit--root");

        let a = &root.children[0];
        let b = &a.children[0];
        assert_eq!(b.label, "Unit::b");
        assert_eq!(b.children.len(), 1);
        assert!(b.children[0].circular);
        assert_eq!(b.children[0].key, "Org::Unit::a");
        assert_eq!(tree.node_count(), 4);
    }

    #[test]
    fn test_collapsed_marks_every_occurrence() {
        let mut state = state();
        state.toggle_tree_node("Org::Unit::a");
        let tree = HierarchyGenerator::new().build(&state, NameFormatter::default());

        let a = &tree.roots[0].children[0];
        assert!(a.collapsed);
        // The circular marker for `a` has no children, so it never shows as collapsed.
        assert!(!a.children[0].children[0].collapsed);
    }

    #[test]
    fn test_from_entity_without_roots() {
        let mut state = AppState::new();
        state
            .load_entities_json(
                r#"[
                {"uid": {"type": "T", "id": "A"}, "parents": [{"type": "T", "id": "B"}]},
                {"uid": {"type": "T", "id": "B"}, "parents": [{"type": "T", "id": "A"}]}
            ]"#,
            )
            .unwrap();

        let roots = HierarchyGenerator::new().build(&state, NameFormatter::default());
        assert!(roots.roots.is_empty());

        let from_a = HierarchyGenerator::new()
            .from_entity(EntityUid::new("T", "A"))
            .build(&state, NameFormatter::default());
        let labels: Vec<&str> = vec![
            from_a.roots[0].label.as_str(),
            from_a.roots[0].children[0].label.as_str(),
            from_a.roots[0].children[0].children[0].label.as_str(),
        ];
        assert_eq!(labels, vec!["T::A", "T::B", "T::A"]);
        assert!(from_a.roots[0].children[0].children[0].circular);

        let missing = HierarchyGenerator::new()
            .from_entity(EntityUid::new("T", "Z"))
            .build(&state, NameFormatter::default());
        assert!(missing.roots.is_empty());
    }
}
