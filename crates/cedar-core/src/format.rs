//! Display formatting for names, uids and attribute values.

use crate::attribute::AttributeValue;
use crate::namespace::display;
use crate::uid::EntityUid;

/// Prefix shown before an entity reference inside attribute values.
pub const ENTITY_REF_GLYPH: &str = "🔗";

/// Applies the namespace display preference consistently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameFormatter {
    show_prefix: bool,
}

impl Default for NameFormatter {
    fn default() -> Self {
        Self { show_prefix: true }
    }
}

impl NameFormatter {
    /// Create a formatter with the given prefix preference.
    pub fn new(show_prefix: bool) -> Self {
        Self { show_prefix }
    }

    /// Whether namespace prefixes are shown.
    pub fn show_prefix(&self) -> bool {
        self.show_prefix
    }

    /// Display form of a type or action name.
    pub fn name<'a>(&self, name: &'a str) -> &'a str {
        display(name, self.show_prefix)
    }

    /// Display form of a uid, `Type::id` with the type shortened.
    pub fn uid(&self, uid: &EntityUid) -> String {
        format!("{}::{}", self.name(uid.entity_type()), uid.id())
    }

    /// Display form of a list of names.
    pub fn names(&self, names: &[String]) -> Vec<String> {
        names.iter().map(|n| self.name(n).to_string()).collect()
    }

    /// Display form of an attribute value.
    pub fn attribute(&self, value: &AttributeValue) -> String {
        format_attribute_value(value, self.show_prefix)
    }
}

/// Render an attribute value for display.
///
/// - entity reference → `🔗 Type::id`
/// - set → `[]` or `[a, b]`
/// - record → `{k: v, ...}`
/// - primitive → its JSON text
pub fn format_attribute_value(value: &AttributeValue, show_prefix: bool) -> String {
    match value {
        AttributeValue::EntityRef(uid) => format!(
            "{} {}::{}",
            ENTITY_REF_GLYPH,
            display(uid.entity_type(), show_prefix),
            uid.id()
        ),
        AttributeValue::Set(items) => {
            let items: Vec<String> = items
                .iter()
                .map(|item| format_attribute_value(item, show_prefix))
                .collect();
            format!("[{}]", items.join(", "))
        }
        AttributeValue::Record(fields) => {
            let entries: Vec<String> = fields
                .iter()
                .map(|(key, v)| format!("{}: {}", key, format_attribute_value(v, show_prefix)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
        AttributeValue::Primitive(p) => p.to_json_text(),
    }
}
