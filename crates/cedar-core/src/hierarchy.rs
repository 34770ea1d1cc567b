//! Parent/child hierarchy over a normalized entity list.
//!
//! Children of an entity are all entities whose `parents` contain its uid,
//! in list order. The index is built once per dataset:
//!
//! ```text
//! parents ──► HashMap<EntityUid, Vec<child index>>
//! ```
//!
//! Entity data may contain cycles. The tree traversal carries the set of
//! ancestors on the current path only; every child branch gets its own copy.
//! A node already on its path becomes a [`TreeNode::Circular`] marker, so the
//! same entity may appear under several branches but never under itself.

use crate::entity::Entity;
use crate::uid::EntityUid;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Parent/child index over a borrowed entity list.
#[derive(Debug)]
pub struct Hierarchy<'a> {
    entities: &'a [Entity],
    children: HashMap<&'a EntityUid, Vec<usize>>,
}

impl<'a> Hierarchy<'a> {
    /// Build the child index for an entity list.
    pub fn new(entities: &'a [Entity]) -> Self {
        let mut children: HashMap<&'a EntityUid, Vec<usize>> = HashMap::new();
        for (index, entity) in entities.iter().enumerate() {
            for parent in &entity.parents {
                let list = children.entry(parent).or_default();
                // An entity naming the same parent twice is still one child.
                if list.last() != Some(&index) {
                    list.push(index);
                }
            }
        }
        Self { entities, children }
    }

    /// The indexed entity list.
    pub fn entities(&self) -> &'a [Entity] {
        self.entities
    }

    /// Direct children of `uid`, in list order.
    pub fn children(&self, uid: &EntityUid) -> impl Iterator<Item = &'a Entity> + '_ {
        let entities = self.entities;
        self.children
            .get(uid)
            .into_iter()
            .flatten()
            .map(move |&index| &entities[index])
    }

    /// Number of direct children of `uid`.
    pub fn child_count(&self, uid: &EntityUid) -> usize {
        self.children.get(uid).map_or(0, Vec::len)
    }

    /// Entities with no parents, in list order.
    pub fn roots(&self) -> impl Iterator<Item = &'a Entity> {
        self.entities.iter().filter(|e| e.is_root())
    }

    /// First entity with the given uid.
    pub fn find(&self, uid: &EntityUid) -> Option<&'a Entity> {
        self.entities.iter().find(|e| &e.uid == uid)
    }

    /// Depth-first trees from every root.
    pub fn tree(&self) -> Vec<TreeNode> {
        self.roots()
            .map(|root| self.walk(root, HashSet::new()))
            .collect()
    }

    /// Depth-first tree from an arbitrary entity.
    ///
    /// Useful for cyclic data where the cycle has no root above it.
    pub fn subtree(&self, uid: &EntityUid) -> Option<TreeNode> {
        self.find(uid).map(|entity| self.walk(entity, HashSet::new()))
    }

    fn walk(&self, entity: &'a Entity, mut path: HashSet<&'a EntityUid>) -> TreeNode {
        if !path.insert(&entity.uid) {
            return TreeNode::Circular {
                uid: entity.uid.clone(),
            };
        }

        let children = self
            .children(&entity.uid)
            .map(|child| self.walk(child, path.clone()))
            .collect();

        TreeNode::Entity {
            uid: entity.uid.clone(),
            children,
        }
    }
}

/// One node of the hierarchy tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    /// An entity and its expanded children.
    Entity {
        uid: EntityUid,
        children: Vec<TreeNode>,
    },
    /// An entity already on the current path; not expanded.
    Circular { uid: EntityUid },
}

impl TreeNode {
    /// Uid of the entity at this node.
    pub fn uid(&self) -> &EntityUid {
        match self {
            Self::Entity { uid, .. } | Self::Circular { uid } => uid,
        }
    }

    /// `Type::id` key of this node.
    pub fn key(&self) -> String {
        self.uid().key()
    }

    /// Stable element id for renderers: `node-` plus the key with every
    /// non-alphanumeric character replaced by `-`.
    pub fn node_id(&self) -> String {
        let sanitized: String = self
            .key()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
            .collect();
        format!("node-{sanitized}")
    }

    /// Expanded children; empty for circular markers.
    pub fn children(&self) -> &[TreeNode] {
        match self {
            Self::Entity { children, .. } => children,
            Self::Circular { .. } => &[],
        }
    }

    /// True when the node has expanded children.
    pub fn has_children(&self) -> bool {
        !self.children().is_empty()
    }

    /// True for a circular-reference marker.
    pub fn is_circular(&self) -> bool {
        matches!(self, Self::Circular { .. })
    }

    /// Number of circular markers in this subtree.
    pub fn circular_count(&self) -> usize {
        match self {
            Self::Circular { .. } => 1,
            Self::Entity { children, .. } => children.iter().map(Self::circular_count).sum(),
        }
    }

    /// Greatest depth of this subtree (a leaf has depth 1).
    pub fn depth(&self) -> usize {
        1 + self.children().iter().map(Self::depth).max().unwrap_or(0)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Random parent links over a small id space, cycles included.
    fn arb_entities() -> impl Strategy<Value = Vec<Entity>> {
        prop::collection::vec(prop::collection::vec(0usize..6, 0..3), 1..6).prop_map(|links| {
            links
                .iter()
                .enumerate()
                .map(|(i, parents)| {
                    parents.iter().fold(
                        Entity::new(EntityUid::new("T", i.to_string())),
                        |e, p| e.with_parent(EntityUid::new("T", p.to_string())),
                    )
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn traversal_terminates_and_bounds_depth(entities in arb_entities()) {
            let hierarchy = Hierarchy::new(&entities);
            for entity in &entities {
                if let Some(tree) = hierarchy.subtree(&entity.uid) {
                    // Distinct entities on a path, plus one circular marker.
                    prop_assert!(tree.depth() <= entities.len() + 1);
                }
            }
            for root in hierarchy.tree() {
                prop_assert!(root.depth() <= entities.len() + 1);
            }
        }
    }
}
