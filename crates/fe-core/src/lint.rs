//! Lint diagnostics for UI schema documents.
//!
//! Reports structural issues without modifying the document. Checks against
//! the data schema stop at existence: a scope either resolves or it does not.

use crate::id::ElementId;
use crate::lookup::{collect_ids, walk};
use crate::model::UiSchemaElement;
use crate::schema::DataSchema;
use crate::scope::Scope;
use std::collections::HashSet;

// ─── Diagnostic types ────────────────────────────────────────────────────

/// Severity of a lint finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintSeverity {
    /// Likely a mistake.
    Warning,
    /// Informational.
    Info,
}

/// A single lint diagnostic for a UI schema element.
#[derive(Debug, Clone)]
pub struct LintDiagnostic {
    /// The element this diagnostic refers to.
    pub element_id: ElementId,
    /// Human-readable message.
    pub message: String,
    pub severity: LintSeverity,
    /// Short rule identifier (e.g. "unknown-scope").
    pub rule: &'static str,
}

// ─── Public API ───────────────────────────────────────────────────────────

/// Run all lint rules. Scope rules that need the data schema are skipped
/// while it is not loaded.
#[must_use]
pub fn lint_document(
    ui_schema: &UiSchemaElement,
    schema: Option<&DataSchema>,
) -> Vec<LintDiagnostic> {
    let mut diags = Vec::new();
    lint_duplicate_ids(ui_schema, &mut diags);
    lint_scopes(ui_schema, schema, &mut diags);
    lint_empty_layouts(ui_schema, &mut diags);
    diags
}

// ─── Rules ────────────────────────────────────────────────────────────────

fn lint_duplicate_ids(root: &UiSchemaElement, diags: &mut Vec<LintDiagnostic>) {
    let mut seen = HashSet::new();
    for id in collect_ids(root) {
        if !seen.insert(id) {
            diags.push(LintDiagnostic {
                element_id: id,
                message: format!("Element id `{id}` occurs more than once."),
                severity: LintSeverity::Warning,
                rule: "duplicate-id",
            });
        }
    }
}

fn lint_scopes(
    root: &UiSchemaElement,
    schema: Option<&DataSchema>,
    diags: &mut Vec<LintDiagnostic>,
) {
    for node in walk(root) {
        let Some(raw) = node.scope() else {
            continue;
        };
        match Scope::parse(raw) {
            Err(e) => diags.push(LintDiagnostic {
                element_id: node.id,
                message: e.to_string(),
                severity: LintSeverity::Warning,
                rule: "invalid-scope",
            }),
            Ok(scope) => {
                if let Some(schema) = schema
                    && schema.resolve(&scope).is_none()
                {
                    diags.push(LintDiagnostic {
                        element_id: node.id,
                        message: format!("Scope `{raw}` does not exist in the data schema."),
                        severity: LintSeverity::Warning,
                        rule: "unknown-scope",
                    });
                }
            }
        }
    }
}

fn lint_empty_layouts(root: &UiSchemaElement, diags: &mut Vec<LintDiagnostic>) {
    for node in walk(root) {
        if node.is_container() && node.elements().is_empty() {
            diags.push(LintDiagnostic {
                element_id: node.id,
                message: format!("{} has no elements.", node.element_type()),
                severity: LintSeverity::Info,
                rule: "empty-layout",
            });
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ElementKind;
    use serde_json::json;
    use std::sync::Arc;

    fn schema() -> DataSchema {
        DataSchema::new(json!({
            "type": "object",
            "properties": { "name": { "type": "string" } }
        }))
    }

    #[test]
    fn lint_unknown_scope() {
        let ui = UiSchemaElement::from_json(&json!({
            "type": "VerticalLayout",
            "elements": [{ "type": "Control", "scope": "#/properties/email" }]
        }))
        .unwrap();
        let diags = lint_document(&ui, Some(&schema()));
        assert!(diags.iter().any(|d| d.rule == "unknown-scope"));
    }

    #[test]
    fn lint_skips_existence_without_schema() {
        let ui = UiSchemaElement::from_json(&json!({
            "type": "VerticalLayout",
            "elements": [{ "type": "Control", "scope": "#/properties/email" }]
        }))
        .unwrap();
        assert!(lint_document(&ui, None).is_empty());
    }

    #[test]
    fn lint_invalid_scope() {
        let ui = UiSchemaElement::from_json(&json!({
            "type": "Control", "scope": "properties/name"
        }))
        .unwrap();
        let diags = lint_document(&ui, None);
        assert!(diags.iter().any(|d| d.rule == "invalid-scope"));
    }

    #[test]
    fn lint_duplicate_ids() {
        let label = Arc::new(UiSchemaElement::new(ElementKind::Label { text: "x".into() }));
        let ui = UiSchemaElement::new(ElementKind::VerticalLayout {
            elements: vec![label.clone(), label],
        });
        let diags = lint_document(&ui, None);
        assert_eq!(diags.iter().filter(|d| d.rule == "duplicate-id").count(), 1);
    }

    #[test]
    fn lint_empty_layout_is_info() {
        let ui = UiSchemaElement::from_json(&json!({ "type": "HorizontalLayout" })).unwrap();
        let diags = lint_document(&ui, None);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].severity, LintSeverity::Info);
    }

    #[test]
    fn lint_clean_document_no_diags() {
        let ui = UiSchemaElement::from_json(&json!({
            "type": "VerticalLayout",
            "elements": [{ "type": "Control", "scope": "#/properties/name" }]
        }))
        .unwrap();
        assert!(lint_document(&ui, Some(&schema())).is_empty());
    }
}
