//! Namespace display formatting.
//!
//! `App::User` shows as `User` and `App::Action::"create"` as `"create"`
//! when the prefix is hidden; both keep only the final component.

/// Separator between namespace components.
pub const NAMESPACE_SEPARATOR: &str = "::";

/// Display form of a type, action or parent-type name.
///
/// With `show_prefix` the name is returned unchanged. Otherwise the text
/// after the last separator is returned; single-segment names are unchanged.
pub fn display(name: &str, show_prefix: bool) -> &str {
    if show_prefix {
        return name;
    }
    match name.rfind(NAMESPACE_SEPARATOR) {
        Some(pos) => &name[pos + NAMESPACE_SEPARATOR.len()..],
        None => name,
    }
}

/// Namespace part of a qualified name (`App::Sub::User` → `App::Sub`).
pub fn namespace_of(name: &str) -> Option<&str> {
    name.rfind(NAMESPACE_SEPARATOR).map(|pos| &name[..pos])
}
