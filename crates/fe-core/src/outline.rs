//! Plain-text outline of a UI schema tree, one element per line.
//!
//! ```text
//! VerticalLayout [1b4e28ba]
//!   Label "Person" [6f1c0d2e]
//!   Control #/properties/name (Name) [9a7730c4]
//! ```
//!
//! A control without its own label shows the label a renderer would derive
//! from the scope, in parentheses.

use crate::generators::display_name;
use crate::model::{ElementKind, UiSchemaElement};
use crate::scope::Scope;
use std::fmt::Write;

/// Emit an indented outline of `root`.
#[must_use]
pub fn emit_outline(root: &UiSchemaElement) -> String {
    let mut out = String::with_capacity(256);
    emit_element(&mut out, root, 0);
    out
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

fn emit_element(out: &mut String, element: &UiSchemaElement, depth: usize) {
    indent(out, depth);
    out.push_str(element.element_type().as_str());
    if let ElementKind::Control { scope, .. } = &element.kind {
        let _ = write!(out, " {scope}");
    }
    if let Some(caption) = element.caption() {
        let _ = write!(out, " {caption:?}");
    } else if let Some(scope) = element.scope()
        && let Ok(scope) = Scope::parse(scope)
        && let Some(property) = scope.last_property()
    {
        let _ = write!(out, " ({})", display_name(property));
    }
    let _ = writeln!(out, " [{}]", element.id.short());

    for child in element.elements() {
        emit_element(out, child, depth + 1);
    }
}
