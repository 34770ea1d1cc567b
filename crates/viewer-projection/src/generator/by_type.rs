//! By-type generator - the type selector and the entity cards of one type.
//!
//! Without a selected type this yields [`Projection::TypeSelector`]. Entity
//! cards are only produced once a type has been selected.

use super::{count_by_type, ProjectionGenerator};
use crate::model::{
    AttributeLine, EntityCard, Projection, TypeDetailProjection, TypeSelectorProjection,
};
use crate::state::{AppState, ByTypeStage};
use cedar_core::{Entity, Hierarchy, NameFormatter};

/// Generator for the by-type view.
#[derive(Debug, Default)]
pub struct ByTypeGenerator;

impl ByTypeGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Type list sorted by full type name (case-insensitive), then filtered.
    ///
    /// The filter is a case-insensitive substring match against the button
    /// text, `Label (count)`.
    pub fn selector(&self, entities: &[Entity], filter: &str, names: NameFormatter) -> TypeSelectorProjection {
        let mut types = count_by_type(entities, names);
        types.sort_by(|a, b| {
            a.entity_type
                .to_lowercase()
                .cmp(&b.entity_type.to_lowercase())
                .then_with(|| a.entity_type.cmp(&b.entity_type))
        });
        let total_types = types.len();

        let needle = filter.trim().to_lowercase();
        if !needle.is_empty() {
            types.retain(|t| t.button_text().to_lowercase().contains(&needle));
        }

        TypeSelectorProjection {
            filter: filter.to_string(),
            types,
            total_types,
        }
    }

    /// Cards for every entity of `entity_type`, in list order.
    pub fn detail(&self, entities: &[Entity], entity_type: &str, names: NameFormatter) -> TypeDetailProjection {
        let hierarchy = Hierarchy::new(entities);
        let cards: Vec<EntityCard> = entities
            .iter()
            .filter(|e| e.entity_type() == entity_type)
            .map(|e| Self::card(&hierarchy, e, names))
            .collect();

        TypeDetailProjection {
            entity_type: entity_type.to_string(),
            label: names.name(entity_type).to_string(),
            count: cards.len(),
            cards,
        }
    }

    fn card(hierarchy: &Hierarchy<'_>, entity: &Entity, names: NameFormatter) -> EntityCard {
        EntityCard {
            uid: entity.uid.key(),
            id: entity.uid.id().to_string(),
            type_label: names.name(entity.entity_type()).to_string(),
            parents: entity.parents.iter().map(|p| names.uid(p)).collect(),
            children: hierarchy
                .children(&entity.uid)
                .map(|c| names.uid(&c.uid))
                .collect(),
            attributes: entity
                .attributes()
                .map(|(name, value)| AttributeLine {
                    name: name.to_string(),
                    value: names.attribute(&value),
                })
                .collect(),
        }
    }
}

impl ProjectionGenerator for ByTypeGenerator {
    type Source = AppState;

    fn generate(&self, source: &AppState, names: NameFormatter) -> Projection {
        match source.by_type_stage() {
            ByTypeStage::ChooseType => {
                Projection::TypeSelector(self.selector(source.entities(), source.type_filter(), names))
            }
            ByTypeStage::ShowType(entity_type) => {
                Projection::TypeDetail(self.detail(source.entities(), entity_type, names))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cedar_core::parse_entities;
    use pretty_assertions::assert_eq;

    const ENTITIES: &str = r#"[
        {"uid": {"type": "App::user", "id": "alice"},
         "parents": [{"__entity": {"type": "App::Group", "id": "admins"}}],
         "attrs": {"manager": {"__entity": {"type": "App::user", "id": "bob"}}, "age": 30}},
        {"uid": {"type": "App::Group", "id": "admins"}},
        {"uid": {"type": "App::user", "id": "bob"}},
        {"uid": {"type": "App::Doc", "id": "d1"}, "parents": [{"type": "App::Group", "id": "admins"}]}
    ]"#;

    #[test]
    fn test_selector_sorted_case_insensitively() {
        let entities = parse_entities(ENTITIES).unwrap();
        let selector = ByTypeGenerator::new().selector(&entities, "", NameFormatter::new(false));
        let buttons: Vec<String> = selector.types.iter().map(|t| t.button_text()).collect();
        assert_eq!(buttons, vec!["Doc (1)", "Group (1)", "user (2)"]);
        assert_eq!(selector.total_types, 3);
    }

    #[test]
    fn test_selector_filter_matches_button_text() {
        let entities = parse_entities(ENTITIES).unwrap();
        let generator = ByTypeGenerator::new();

        let selector = generator.selector(&entities, "GRO", NameFormatter::new(false));
        assert_eq!(selector.types.len(), 1);
        assert_eq!(selector.types[0].entity_type, "App::Group");

        // The count is part of the searchable text.
        let selector = generator.selector(&entities, "(2)", NameFormatter::new(false));
        assert_eq!(selector.types[0].entity_type, "App::user");

        let selector = generator.selector(&entities, "zzz", NameFormatter::default());
        assert!(selector.types.is_empty());
        assert_eq!(selector.total_types, 3);
    }

    #[test]
    fn test_detail_cards() {
        let entities = parse_entities(ENTITIES).unwrap();
        let generator = ByTypeGenerator::new();

        let detail = generator.detail(&entities, "App::user", NameFormatter::new(false));
        assert_eq!(detail.label, "user");
        assert_eq!(detail.count, 2);

        let alice = &detail.cards[0];
        assert_eq!(alice.uid, "App::user::alice");
        assert_eq!(alice.id, "alice");
        assert_eq!(alice.type_label, "user");
        assert_eq!(alice.parents, vec!["Group::admins"]);
        assert!(alice.children.is_empty());
        assert_eq!(
            alice.attributes,
            vec![
                AttributeLine {
                    name: "manager".into(),
                    value: "🔗 user::bob".into(),
                },
                AttributeLine {
                    name: "age".into(),
                    value: "30".into(),
                },
            ]
        );

        let groups = generator.detail(&entities, "App::Group", NameFormatter::default());
        assert_eq!(groups.cards[0].children, vec!["App::user::alice", "App::Doc::d1"]);
    }

    #[test]
    fn test_detail_unknown_type_is_empty() {
        let entities = parse_entities(ENTITIES).unwrap();
        let detail = ByTypeGenerator::new().detail(&entities, "Nope", NameFormatter::default());
        assert_eq!(detail.count, 0);
        assert!(detail.cards.is_empty());
    }

    #[test]
    fn test_generate_follows_selection() {
        let mut state = AppState::new();
        state.load_entities_json(ENTITIES).unwrap();
        let generator = ByTypeGenerator::new();

        let body = generator.generate_with_defaults(&state);
        assert!(matches!(body, Projection::TypeSelector(_)));

        state.select_entity_type("App::Doc");
        let body = generator.generate_with_defaults(&state);
        match body {
            Projection::TypeDetail(detail) => assert_eq!(detail.cards[0].id, "d1"),
            other => panic!("expected type detail, got {}", other.kind()),
        }
    }
}
