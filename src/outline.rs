//! Plain-text rendering of resolved trees.

use std::fmt::Write;

use a2ui_kit::prelude::*;

/// Renders one node as a single line, without its children.
pub type LineRenderer = fn(&ResolvedNode) -> String;

/// Registry used by the outline printer.
pub fn outline_registry() -> ComponentRegistry<LineRenderer> {
    let mut registry: ComponentRegistry<LineRenderer> = ComponentRegistry::new();
    for kind in ComponentKind::all() {
        registry.register(*kind, component_line);
    }
    registry.register(ComponentKind::Text, text_line);
    registry.register(ComponentKind::Badge, text_line);
    registry.register(ComponentKind::Button, button_line);
    registry.set_fallback(unclassified_line);
    registry
}

/// Indented outline of a tree, followed by its diagnostics.
pub fn render_outline(tree: &ComponentTree, registry: &ComponentRegistry<LineRenderer>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "surface {}", tree.surface_id);
    render_node(&tree.root, registry, 1, &mut out);
    for diagnostic in &tree.diagnostics {
        let _ = writeln!(out, "  ! {}", describe_diagnostic(diagnostic));
    }
    out
}

fn render_node(node: &ResolvedNode, registry: &ComponentRegistry<LineRenderer>, depth: usize, out: &mut String) {
    let line = match registry.renderer_for(node) {
        Some(render) => render(node),
        None => marker_line(node),
    };
    let _ = writeln!(out, "{}{}", "  ".repeat(depth), line);
    for child in node.children() {
        render_node(child, registry, depth + 1, out);
    }
}

fn scalar_text(value: &PropertyValue) -> String {
    match value {
        PropertyValue::Scalar(scalar) => format!("{:?}", scalar.to_string()),
        PropertyValue::Absent => "<absent>".to_string(),
        PropertyValue::Structural(json) => json.to_string(),
    }
}

fn component_line(node: &ResolvedNode) -> String {
    let Some(component) = node.as_component() else {
        return marker_line(node);
    };
    let props: Vec<String> = component
        .properties
        .iter()
        .map(|(key, value)| format!("{}={}", key, scalar_text(value)))
        .collect();
    if props.is_empty() {
        format!("{:?} #{}", component.kind, component.id)
    } else {
        format!("{:?} #{} {}", component.kind, component.id, props.join(" "))
    }
}

fn text_line(node: &ResolvedNode) -> String {
    let Some(component) = node.as_component() else {
        return marker_line(node);
    };
    let text = component
        .property("text")
        .map_or_else(|| "<absent>".to_string(), scalar_text);
    format!("{:?} #{} {}", component.kind, component.id, text)
}

fn button_line(node: &ResolvedNode) -> String {
    let Some(component) = node.as_component() else {
        return marker_line(node);
    };
    let action = component.action.as_ref().map_or("-", |a| a.name.as_str());
    match component.property("label") {
        Some(label) => format!("Button #{} {} -> {}", component.id, scalar_text(label), action),
        None => format!("Button #{} -> {}", component.id, action),
    }
}

fn unclassified_line(node: &ResolvedNode) -> String {
    match node {
        ResolvedNode::Unclassified {
            id,
            component_type,
            reason,
            ..
        } => format!("? {} #{} ({})", component_type, id, reason),
        other => marker_line(other),
    }
}

fn marker_line(node: &ResolvedNode) -> String {
    match node {
        ResolvedNode::Missing { id } => format!("<missing #{}>", id),
        ResolvedNode::Cycle { id } => format!("<cycle #{}>", id),
        ResolvedNode::DepthExceeded { id } => format!("<too deep #{}>", id),
        ResolvedNode::BudgetExhausted { id } => format!("<truncated at #{}>", id),
        ResolvedNode::Empty => "<empty>".to_string(),
        ResolvedNode::Component(c) => format!("{:?} #{}", c.kind, c.id),
        ResolvedNode::Unclassified { id, component_type, .. } => format!("? {} #{}", component_type, id),
    }
}

fn describe_diagnostic(diagnostic: &TreeDiagnostic) -> String {
    match diagnostic {
        TreeDiagnostic::DanglingReference { parent, id } => match parent {
            Some(parent) => format!("#{} references missing #{}", parent, id),
            None => format!("root #{} is missing", id),
        },
        TreeDiagnostic::CyclicReference { path, .. } => format!("cycle {}", path.join(" -> ")),
        TreeDiagnostic::DepthExceeded { id, depth } => format!("#{} exceeds depth {}", id, depth),
        TreeDiagnostic::BudgetExhausted { id, limit } => format!("stopped at #{} after {} nodes", id, limit),
        TreeDiagnostic::UnclassifiedNode { id, component_type, .. } => {
            format!("#{} has unknown type {}", id, component_type)
        }
        TreeDiagnostic::TemplateTruncated { parent, total, kept } => {
            format!("#{} template kept {} of {} items", parent, kept, total)
        }
    }
}
