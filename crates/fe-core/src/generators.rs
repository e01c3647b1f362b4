//! Construction helpers. Every helper mints a fresh id for each element it
//! creates; none of them touch existing elements.

use crate::model::{ControlLabel, ElementKind, LayoutType, UiSchemaElement};
use crate::schema::{DataSchema, property_names};
use crate::scope::Scope;
use serde_json::Value;
use std::sync::Arc;

/// An empty layout of the given kind.
pub fn create_layout(layout: LayoutType) -> UiSchemaElement {
    let kind = match layout {
        LayoutType::HorizontalLayout => ElementKind::HorizontalLayout {
            elements: Vec::new(),
        },
        LayoutType::VerticalLayout => ElementKind::VerticalLayout {
            elements: Vec::new(),
        },
        LayoutType::Group => ElementKind::Group {
            label: None,
            elements: Vec::new(),
        },
    };
    UiSchemaElement::new(kind)
}

/// An empty group with a caption.
pub fn create_group(label: impl Into<String>) -> UiSchemaElement {
    UiSchemaElement::new(ElementKind::Group {
        label: Some(label.into()),
        elements: Vec::new(),
    })
}

pub fn create_label(text: impl Into<String>) -> UiSchemaElement {
    UiSchemaElement::new(ElementKind::Label { text: text.into() })
}

pub fn create_control(scope: impl Into<String>, label: Option<String>) -> UiSchemaElement {
    UiSchemaElement::new(ElementKind::Control {
        scope: scope.into(),
        label: label.map(ControlLabel::Text),
    })
}

pub fn create_categorization() -> UiSchemaElement {
    UiSchemaElement::new(ElementKind::Categorization {
        label: None,
        elements: Vec::new(),
    })
}

pub fn create_category(label: impl Into<String>) -> UiSchemaElement {
    UiSchemaElement::new(ElementKind::Category {
        label: Some(label.into()),
        elements: Vec::new(),
    })
}

/// Build a default UI schema for `schema`: a `root` layout with one control
/// per top-level property. Object-typed properties with their own
/// `properties` become a labelled group of nested controls.
pub fn generate_ui_schema(schema: &DataSchema, root: LayoutType) -> UiSchemaElement {
    let elements = generate_elements(schema.as_value(), &Scope::root());
    create_layout(root).with_elements(elements)
}

fn generate_elements(schema: &Value, base: &Scope) -> Vec<Arc<UiSchemaElement>> {
    property_names(schema)
        .map(|name| {
            let scope = base.clone().child("properties").child(name);
            let property = &schema["properties"][name];
            let element = if is_object_with_properties(property) {
                create_group(display_name(name))
                    .with_elements(generate_elements(property, &scope))
            } else {
                create_control(scope.to_string(), None)
            };
            Arc::new(element)
        })
        .collect()
}

fn is_object_with_properties(schema: &Value) -> bool {
    schema.get("type").and_then(Value::as_str) == Some("object")
        && schema.get("properties").is_some_and(Value::is_object)
}

/// `firstName` / `first_name` → `First Name`.
pub(crate) fn display_name(property: &str) -> String {
    let mut out = String::with_capacity(property.len() + 4);
    let mut prev_lower = false;
    for c in property.chars() {
        if c == '_' || c == '-' {
            out.push(' ');
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower {
            out.push(' ');
        }
        if out.is_empty() || out.ends_with(' ') {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
    }
    out
}
