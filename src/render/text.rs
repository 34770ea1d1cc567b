//! Human-readable output, optionally colored.

use colored::Colorize;
use std::io::{self, Write};
use viewer_projection::{
    EntityCard, Frame, HierarchyNode, HierarchyProjection, OverviewProjection, Projection,
    SchemaProjection, TypeDetailProjection, TypeSelectorProjection,
};

const INDENT: &str = "  ";

/// Applies color only when enabled.
#[derive(Debug, Clone, Copy)]
struct Style {
    color: bool,
}

impl Style {
    fn heading(self, text: &str) -> String {
        if self.color {
            text.bold().cyan().to_string()
        } else {
            text.to_string()
        }
    }

    fn section(self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn muted(self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    fn number(self, value: usize) -> String {
        if self.color {
            value.to_string().green().bold().to_string()
        } else {
            value.to_string()
        }
    }

    fn reference(self, text: &str) -> String {
        if self.color {
            text.yellow().to_string()
        } else {
            text.to_string()
        }
    }
}

/// Paint one frame.
pub fn write_frame(out: &mut impl Write, frame: &Frame, color: bool) -> io::Result<()> {
    let style = Style { color };
    match &frame.body {
        Projection::Empty => write_empty(out, style)?,
        Projection::Overview(overview) => write_overview(out, overview, style)?,
        Projection::TypeSelector(selector) => write_type_selector(out, selector, style)?,
        Projection::TypeDetail(detail) => write_type_detail(out, detail, style)?,
        Projection::Hierarchy(tree) => write_hierarchy(out, tree, style)?,
        Projection::Schema(schema) => write_schema(out, schema, style)?,
        Projection::NoSchema => {
            writeln!(out, "{}", style.heading("📋 Schema Structure"))?;
            writeln!(out, "{}", style.muted("No schema loaded."))?;
        }
    }

    if frame.namespace_toggle {
        let state = if frame.show_namespace_prefix { "shown" } else { "hidden" };
        writeln!(out)?;
        writeln!(out, "{}", style.muted(&format!("Namespace prefixes: {state}")))?;
    }
    Ok(())
}

/// Paint an error line.
pub fn write_error(out: &mut impl Write, message: &str, color: bool) -> io::Result<()> {
    if color {
        writeln!(out, "{}: {}", "error".red().bold(), message)
    } else {
        writeln!(out, "error: {message}")
    }
}

fn write_empty(out: &mut impl Write, style: Style) -> io::Result<()> {
    writeln!(out, "{}", style.heading("No data loaded"))?;
    writeln!(
        out,
        "{}",
        style.muted("Load your Cedar schema and entities files, or load the sample data to get started.")
    )
}

fn write_overview(out: &mut impl Write, overview: &OverviewProjection, style: Style) -> io::Result<()> {
    writeln!(out, "{}", style.heading("📊 Overview"))?;
    writeln!(out)?;
    writeln!(out, "{INDENT}Total Entities  {}", style.number(overview.total_entities))?;
    writeln!(out, "{INDENT}Entity Types    {}", style.number(overview.total_types))?;
    if let Some(actions) = overview.action_count {
        writeln!(out, "{INDENT}Actions         {}", style.number(actions))?;
    }

    if overview.per_type.is_empty() {
        return Ok(());
    }
    writeln!(out)?;
    writeln!(out, "{}", style.section("Entity Distribution"))?;
    let width = overview
        .per_type
        .iter()
        .map(|t| t.label.chars().count())
        .max()
        .unwrap_or(0);
    for count in &overview.per_type {
        writeln!(
            out,
            "{INDENT}{:<width$}  {}",
            count.label,
            style.number(count.count),
            width = width
        )?;
    }
    Ok(())
}

fn write_type_selector(out: &mut impl Write, selector: &TypeSelectorProjection, style: Style) -> io::Result<()> {
    writeln!(out, "{}", style.heading("🏷️ Select Entity Type"))?;
    if !selector.filter.is_empty() {
        writeln!(
            out,
            "{}",
            style.muted(&format!(
                "Filter: \"{}\" ({} of {} types)",
                selector.filter,
                selector.types.len(),
                selector.total_types
            ))
        )?;
    }
    writeln!(out)?;

    if selector.types.is_empty() {
        return writeln!(out, "{INDENT}{}", style.muted("No matching entity types."));
    }
    for entity_type in &selector.types {
        writeln!(out, "{INDENT}{}", entity_type.button_text())?;
    }
    Ok(())
}

fn write_type_detail(out: &mut impl Write, detail: &TypeDetailProjection, style: Style) -> io::Result<()> {
    writeln!(
        out,
        "{}",
        style.heading(&format!("🏷️ {} ({})", detail.label, detail.count))
    )?;
    for card in &detail.cards {
        writeln!(out)?;
        write_card(out, card, style)?;
    }
    Ok(())
}

fn write_card(out: &mut impl Write, card: &EntityCard, style: Style) -> io::Result<()> {
    writeln!(out, "{} {}", style.section(&card.id), style.muted(&format!("[{}]", card.type_label)))?;

    if !card.parents.is_empty() {
        writeln!(out, "{INDENT}👥 Parents")?;
        for parent in &card.parents {
            writeln!(out, "{INDENT}{INDENT}{parent}")?;
        }
    }
    if !card.children.is_empty() {
        writeln!(out, "{INDENT}👶 Children")?;
        for child in &card.children {
            writeln!(out, "{INDENT}{INDENT}{child}")?;
        }
    }
    if !card.attributes.is_empty() {
        writeln!(out, "{INDENT}⚙️ Attributes")?;
        for attr in &card.attributes {
            let value = if attr.value.starts_with(cedar_core::format::ENTITY_REF_GLYPH) {
                style.reference(&attr.value)
            } else {
                attr.value.clone()
            };
            writeln!(out, "{INDENT}{INDENT}{}: {}", attr.name, value)?;
        }
    }
    Ok(())
}

fn write_hierarchy(out: &mut impl Write, tree: &HierarchyProjection, style: Style) -> io::Result<()> {
    writeln!(out, "{}", style.heading("🌳 Entity Hierarchy"))?;
    writeln!(out, "{}", style.muted("Showing entities and their parent-child relationships"))?;
    writeln!(out)?;

    if tree.roots.is_empty() {
        return writeln!(out, "{INDENT}{}", style.muted("No root entities."));
    }
    for root in &tree.roots {
        write_node(out, root, 0, style)?;
    }
    Ok(())
}

fn write_node(out: &mut impl Write, node: &HierarchyNode, depth: usize, style: Style) -> io::Result<()> {
    let indent = INDENT.repeat(depth + 1);
    if node.circular {
        let text = format!("🔄 {} (circular reference)", node.label);
        return writeln!(out, "{indent}{}", style.reference(&text));
    }

    let marker = match (node.has_children(), node.collapsed) {
        (false, _) => " ",
        (true, false) => "▼",
        (true, true) => "▶",
    };
    writeln!(out, "{indent}{marker} {}", node.label)?;

    if !node.collapsed {
        for child in &node.children {
            write_node(out, child, depth + 1, style)?;
        }
    }
    Ok(())
}

fn write_schema(out: &mut impl Write, schema: &SchemaProjection, style: Style) -> io::Result<()> {
    writeln!(out, "{}", style.heading("📋 Schema Structure"))?;
    writeln!(out)?;

    writeln!(out, "{}", style.section(&format!("Entity Types ({})", schema.entity_types.len())))?;
    for entity in &schema.entity_types {
        if entity.parents.is_empty() {
            writeln!(out, "{INDENT}{}", entity.label)?;
        } else {
            writeln!(out, "{INDENT}{} in [{}]", entity.label, entity.parents.join(", "))?;
        }
    }
    writeln!(out)?;

    writeln!(out, "{}", style.section(&format!("Actions ({})", schema.actions.len())))?;
    for action in &schema.actions {
        writeln!(out, "{INDENT}{}", action.label)?;
        if !action.principals.is_empty() {
            writeln!(out, "{INDENT}{INDENT}principal: {}", action.principals.join(", "))?;
        }
        if !action.resources.is_empty() {
            writeln!(out, "{INDENT}{INDENT}resource: {}", action.resources.join(", "))?;
        }
        if !action.context.is_empty() {
            let context = action.context.lines().map(str::trim).collect::<Vec<_>>().join(" ");
            writeln!(out, "{INDENT}{INDENT}context: {context}")?;
        }
        if !action.member_of.is_empty() {
            writeln!(out, "{INDENT}{INDENT}memberOf: {}", action.member_of.join(", "))?;
        }
    }
    writeln!(out)?;

    writeln!(out, "{}", style.section("Raw Schema"))?;
    writeln!(out, "{}", schema.raw)
}
