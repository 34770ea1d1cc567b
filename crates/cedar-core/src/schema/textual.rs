//! Pattern-based parser for the `.cedarschema` text grammar.
//!
//! This is a lenient extractor, not a validator. It recognizes:
//!
//! ```text
//! namespace App { ... }                                  → namespace flag
//! entity A, B in [Parent, Other];                        → one type per name
//! action read, write appliesTo { principal: [..],
//!     resource: [..], context: { .. } };                 → one action per name
//! ```
//!
//! Anything else stays visible in `raw` only. Names declared together share
//! the parsed parents / `appliesTo` body.

use super::{Schema, SchemaAction, SchemaEntityType, SchemaFormat, SchemaParser};
use crate::error::SchemaError;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

// =============================================================================
// PATTERNS
// =============================================================================

static NAMESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bnamespace\s+[\w:]+\s*\{").expect("valid namespace pattern"));

static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bentity\s+([\w,\s]+)(?:\s+in\s+\[([\w,\s]+)\])?;")
        .expect("valid entity pattern")
});

/// Matches up to and including the opening brace of the `appliesTo` body.
static ACTION_HEAD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\baction\s+([\w,\s"]+)\s+appliesTo\s*\{"#).expect("valid action pattern")
});

static PRINCIPAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bprincipal\s*:\s*(?:\[([^\]]*)\]|([\w:]+))").expect("valid principal pattern")
});

static RESOURCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bresource\s*:\s*(?:\[([^\]]*)\]|([\w:]+))").expect("valid resource pattern")
});

/// Start of the next top-level declaration; an `appliesTo` body never spans one.
/// Record fields named like a keyword (`entity: String`) do not match.
static DECLARATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\b(?:action|entity|namespace|type)\s+[\w"]"#).expect("valid declaration pattern")
});

static CONTEXT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bcontext\s*:\s*").expect("valid context pattern"));

// =============================================================================
// PARSER
// =============================================================================

/// Parser for `.cedarschema` text. Never fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextualSchemaParser;

impl TextualSchemaParser {
    pub fn new() -> Self {
        Self
    }
}

impl SchemaParser for TextualSchemaParser {
    fn format(&self) -> SchemaFormat {
        SchemaFormat::Textual
    }

    fn parse(&self, source: &str) -> Result<Schema, SchemaError> {
        let schema = Schema {
            raw: source.to_string(),
            format: SchemaFormat::Textual,
            has_namespace: NAMESPACE_RE.is_match(source),
            entities: parse_entity_types(source),
            actions: parse_actions(source),
        };

        debug!(
            entity_types = schema.entities.len(),
            actions = schema.actions.len(),
            has_namespace = schema.has_namespace,
            "Parsed textual schema"
        );
        Ok(schema)
    }
}

fn parse_entity_types(source: &str) -> Vec<SchemaEntityType> {
    let mut entities = Vec::new();
    for caps in ENTITY_RE.captures_iter(source) {
        let parents = caps
            .get(2)
            .map(|m| split_names(m.as_str()))
            .unwrap_or_default();

        for name in split_names(&caps[1]) {
            entities.push(SchemaEntityType {
                name,
                possible_parents: parents.clone(),
                shape: None,
            });
        }
    }
    entities
}

fn parse_actions(source: &str) -> Vec<SchemaAction> {
    let mut actions = Vec::new();
    let mut cursor = 0;

    while let Some(caps) = ACTION_HEAD_RE.captures(&source[cursor..]) {
        let Some(head) = caps.get(0) else { break };
        let names = split_names(&caps[1]);
        // The head match ends with the opening brace.
        let open = cursor + head.end() - 1;

        let Some((body, next)) = applies_to_body(source, open) else {
            cursor = open + 1;
            continue;
        };
        cursor = next;

        let template = SchemaAction {
            name: String::new(),
            principals: type_list(&PRINCIPAL_RE, body),
            resources: type_list(&RESOURCE_RE, body),
            context: context_clause(body),
            member_of: Vec::new(),
        };
        for name in names {
            actions.push(SchemaAction {
                name,
                ..template.clone()
            });
        }
    }
    actions
}

/// Body of the brace block opening at `open`, and the offset just past it.
///
/// Nested braces are balanced, but the scan stops at the next declaration. An
/// unbalanced block falls back to the text up to the first closing brace, or
/// up to the next declaration when there is no closing brace before it.
fn applies_to_body(source: &str, open: usize) -> Option<(&str, usize)> {
    let limit = DECLARATION_RE
        .find(&source[open + 1..])
        .map_or(source.len(), |m| open + 1 + m.start());

    if let Some((inner, end)) = balanced_block(&source[..limit], open) {
        return Some((inner, end));
    }
    match source[open + 1..limit].find('}') {
        Some(close) => {
            let close = open + 1 + close;
            Some((&source[open + 1..close], close + 1))
        }
        None if limit < source.len() => Some((&source[open + 1..limit], limit)),
        None => None,
    }
}

/// Contents of the `{ ... }` block starting at byte `open`, plus the offset
/// after its closing brace. `None` if the block never closes.
fn balanced_block(source: &str, open: usize) -> Option<(&str, usize)> {
    let mut depth = 0usize;
    for (offset, ch) in source[open..].char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    let close = open + offset;
                    return Some((&source[open + 1..close], close + 1));
                }
            }
            _ => {}
        }
    }
    None
}

fn type_list(pattern: &Regex, body: &str) -> Vec<String> {
    pattern
        .captures(body)
        .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| split_names(m.as_str()))
        .unwrap_or_default()
}

/// `context: { ... }` yields the trimmed record body, `context: Name` the name.
fn context_clause(body: &str) -> String {
    let Some(m) = CONTEXT_RE.find(body) else {
        return String::new();
    };
    let rest = &body[m.end()..];

    if rest.starts_with('{') {
        return match balanced_block(rest, 0) {
            Some((inner, _)) => inner.trim().to_string(),
            None => rest[1..].split('}').next().unwrap_or_default().trim().to_string(),
        };
    }

    rest.chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_' || *c == ':')
        .collect()
}

/// Split a comma-separated name list, dropping empty entries.
fn split_names(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> Schema {
        TextualSchemaParser::new().parse(source).unwrap()
    }

    #[test]
    fn test_entity_fan_out_shares_parents() {
        let schema = parse("entity User, Admin in [Group];");
        assert_eq!(schema.entities.len(), 2);
        assert_eq!(schema.entities[0].name, "User");
        assert_eq!(schema.entities[1].name, "Admin");
        for entity in &schema.entities {
            assert_eq!(entity.possible_parents, vec!["Group".to_string()]);
            assert!(entity.shape.is_none());
        }
    }

    #[test]
    fn test_entity_without_parents() {
        let schema = parse("entity Group;\nentity Doc in [Folder, Drive];");
        assert_eq!(schema.entities[0].name, "Group");
        assert!(schema.entities[0].possible_parents.is_empty());
        assert_eq!(schema.entities[1].possible_parents, vec!["Folder", "Drive"]);
    }

    #[test]
    fn test_action_fan_out_shares_applies_to() {
        let schema = parse("action view, edit appliesTo { principal: [User]; resource: [Doc]; };");
        assert_eq!(schema.actions.len(), 2);
        assert_eq!(schema.actions[0].name, "view");
        assert_eq!(schema.actions[1].name, "edit");
        for action in &schema.actions {
            assert_eq!(action.principals, vec!["User".to_string()]);
            assert_eq!(action.resources, vec!["Doc".to_string()]);
            assert_eq!(action.context, "");
            assert!(action.member_of.is_empty());
        }
    }

    #[test]
    fn test_missing_clauses_are_empty() {
        let schema = parse("action ping appliesTo { principal: [User, Admin] };");
        let action = &schema.actions[0];
        assert_eq!(action.principals, vec!["User", "Admin"]);
        assert!(action.resources.is_empty());
        assert_eq!(action.context, "");
    }

    #[test]
    fn test_nested_context_record_is_captured() {
        let schema = parse(
            r#"
            action update appliesTo {
                principal: [User],
                resource: [Doc],
                context: { ip: String, mfa: Bool }
            };
            action delete appliesTo { principal: [Admin], resource: [Doc] };
            "#,
        );
        assert_eq!(schema.actions.len(), 2);
        assert_eq!(schema.actions[0].context, "ip: String, mfa: Bool");
        assert_eq!(schema.actions[1].name, "delete");
        assert_eq!(schema.actions[1].principals, vec!["Admin"]);
    }

    #[test]
    fn test_context_type_name() {
        let schema =
            parse("action login appliesTo { principal: User, resource: App, context: LoginCtx };");
        let action = &schema.actions[0];
        assert_eq!(action.principals, vec!["User"]);
        assert_eq!(action.resources, vec!["App"]);
        assert_eq!(action.context, "LoginCtx");
    }

    #[test]
    fn test_namespace_flag() {
        assert!(parse("namespace App { entity User; }").has_namespace);
        assert!(parse("namespace Org::App {\n entity User;\n}").has_namespace);
        assert!(!parse("entity User;").has_namespace);
    }

    #[test]
    fn test_unrecognized_text_is_ignored() {
        let source = "type Address = { street: String };\nentity User;\nthis is not cedar";
        let schema = parse(source);
        assert_eq!(schema.entities.len(), 1);
        assert!(schema.actions.is_empty());
        assert_eq!(schema.raw, source);
    }

    #[test]
    fn test_word_boundary_on_keywords() {
        let schema = parse("identity Foo;");
        assert!(schema.entities.is_empty());
    }

    #[test]
    fn test_quoted_action_names_kept_verbatim() {
        let schema = parse(r#"action "view doc" appliesTo { principal: [User] };"#);
        assert_eq!(schema.actions[0].name, r#""view doc""#);
    }

    #[test]
    fn test_unbalanced_block_falls_back_to_first_close() {
        let schema = parse("action a appliesTo { principal: [U], context: { x: Long };");
        assert_eq!(schema.actions.len(), 1);
        assert_eq!(schema.actions[0].principals, vec!["U"]);
        assert_eq!(schema.actions[0].context, "x: Long");
    }

    #[test]
    fn test_unclosed_context_does_not_swallow_later_actions() {
        let schema = parse(
            "namespace App { action a appliesTo { principal: [U], context: { x: Long };  \
             action b appliesTo { principal: [V] }; }",
        );
        let names: Vec<&str> = schema.actions.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(schema.actions[0].principals, vec!["U"]);
        assert_eq!(schema.actions[1].principals, vec!["V"]);
        assert_eq!(schema.actions[0].context, "x: Long");
    }

    #[test]
    fn test_unclosed_body_stops_at_next_declaration() {
        let schema = parse(
            "action a appliesTo { principal: [U]\nentity Doc;\naction b appliesTo { resource: [Doc] };",
        );
        assert_eq!(schema.entities.len(), 1);
        assert_eq!(schema.actions.len(), 2);
        assert_eq!(schema.actions[0].principals, vec!["U"]);
        assert_eq!(schema.actions[1].resources, vec!["Doc"]);
    }

    #[test]
    fn test_keyword_named_context_field_stays_in_body() {
        let schema = parse(
            "action a appliesTo { principal: [U], context: { entity: String, type: Long } };",
        );
        assert_eq!(schema.actions[0].context, "entity: String, type: Long");
    }

    #[test]
    fn test_empty_names_dropped() {
        let schema = parse("entity A, , B in [G,];");
        let names: Vec<&str> = schema.entities.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(schema.entities[0].possible_parents, vec!["G"]);
    }
}
