//! Core UI schema data model.
//!
//! A UI schema is a tree of layout elements (horizontal/vertical layouts,
//! groups, categorizations) whose leaves are labels and controls. Controls
//! reference the data schema through a `scope` string; the data schema is
//! never embedded.
//!
//! Trees are immutable values. Children are held behind `Arc`, so an edit
//! rebuilds only the path from the root to the changed element and shares
//! every other subtree with the previous version.

use crate::error::DocumentError;
use crate::id::ElementId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Free-form `options` object attached to any element.
pub type Options = Map<String, Value>;

/// Child list of a container element.
pub type Elements = Vec<Arc<UiSchemaElement>>;

// ─── Element types ───────────────────────────────────────────────────────

/// The closed vocabulary of element kinds, without payload.
///
/// Used wherever only the discriminator matters: palette entries, property
/// schema lookup, diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementType {
    HorizontalLayout,
    VerticalLayout,
    Group,
    Categorization,
    Category,
    Label,
    Control,
}

impl ElementType {
    pub const ALL: [ElementType; 7] = [
        ElementType::HorizontalLayout,
        ElementType::VerticalLayout,
        ElementType::Group,
        ElementType::Categorization,
        ElementType::Category,
        ElementType::Label,
        ElementType::Control,
    ];

    /// The JSON `type` discriminator.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::HorizontalLayout => "HorizontalLayout",
            ElementType::VerticalLayout => "VerticalLayout",
            ElementType::Group => "Group",
            ElementType::Categorization => "Categorization",
            ElementType::Category => "Category",
            ElementType::Label => "Label",
            ElementType::Control => "Control",
        }
    }

    /// Inverse of `as_str`.
    pub fn from_type_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.as_str() == name)
    }

    /// Whether elements of this type carry an `elements` list.
    pub fn is_container(&self) -> bool {
        match self {
            ElementType::HorizontalLayout
            | ElementType::VerticalLayout
            | ElementType::Group
            | ElementType::Categorization
            | ElementType::Category => true,
            ElementType::Label | ElementType::Control => false,
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Layout kinds offered by the construction helpers and the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LayoutType {
    HorizontalLayout,
    #[default]
    VerticalLayout,
    Group,
}

impl From<LayoutType> for ElementType {
    fn from(layout: LayoutType) -> Self {
        match layout {
            LayoutType::HorizontalLayout => ElementType::HorizontalLayout,
            LayoutType::VerticalLayout => ElementType::VerticalLayout,
            LayoutType::Group => ElementType::Group,
        }
    }
}

// ─── Control label ───────────────────────────────────────────────────────

/// A control's `label`: plain text, a visibility flag, or both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ControlLabel {
    Text(String),
    Show(bool),
    Detailed {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        show: Option<bool>,
        #[serde(flatten)]
        extra: Options,
    },
}

impl ControlLabel {
    pub fn text(&self) -> Option<&str> {
        match self {
            ControlLabel::Text(text) => Some(text),
            ControlLabel::Detailed { text, .. } => text.as_deref(),
            ControlLabel::Show(_) => None,
        }
    }
}

// ─── Elements ────────────────────────────────────────────────────────────

/// Type-specific payload of a UI schema element.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    HorizontalLayout {
        elements: Elements,
    },
    VerticalLayout {
        elements: Elements,
    },
    Group {
        label: Option<String>,
        elements: Elements,
    },
    Categorization {
        label: Option<String>,
        elements: Elements,
    },
    Category {
        label: Option<String>,
        elements: Elements,
    },
    Label {
        text: String,
    },
    Control {
        scope: String,
        label: Option<ControlLabel>,
    },
}

/// A single node of the UI schema tree.
#[derive(Debug, Clone, PartialEq)]
pub struct UiSchemaElement {
    /// Stable identifier, unique within a tree. Not part of the JSON form.
    pub id: ElementId,

    /// What kind of element this is, with its type-specific fields.
    pub kind: ElementKind,

    /// Renderer options (`"options": { ... }`).
    pub options: Option<Options>,

    /// Opaque JSON Forms rule, carried through untouched.
    pub rule: Option<Value>,

    /// Members this model does not interpret (`i18n`, renderer-specific
    /// keys). Written back out unchanged.
    pub extra: Options,
}

impl UiSchemaElement {
    /// Wrap `kind` in a new element with a freshly minted id.
    pub fn new(kind: ElementKind) -> Self {
        Self {
            id: ElementId::generate(),
            kind,
            options: None,
            rule: None,
            extra: Options::new(),
        }
    }

    pub fn element_type(&self) -> ElementType {
        match &self.kind {
            ElementKind::HorizontalLayout { .. } => ElementType::HorizontalLayout,
            ElementKind::VerticalLayout { .. } => ElementType::VerticalLayout,
            ElementKind::Group { .. } => ElementType::Group,
            ElementKind::Categorization { .. } => ElementType::Categorization,
            ElementKind::Category { .. } => ElementType::Category,
            ElementKind::Label { .. } => ElementType::Label,
            ElementKind::Control { .. } => ElementType::Control,
        }
    }

    pub fn is_container(&self) -> bool {
        self.element_type().is_container()
    }

    /// Children in document order. Empty for labels and controls.
    pub fn elements(&self) -> &[Arc<UiSchemaElement>] {
        match &self.kind {
            ElementKind::HorizontalLayout { elements }
            | ElementKind::VerticalLayout { elements }
            | ElementKind::Group { elements, .. }
            | ElementKind::Categorization { elements, .. }
            | ElementKind::Category { elements, .. } => elements,
            ElementKind::Label { .. } | ElementKind::Control { .. } => &[],
        }
    }

    /// Copy of this element (same id) with its children replaced.
    /// Leaves are returned unchanged.
    #[must_use]
    pub fn with_elements(&self, new_elements: Elements) -> Self {
        let mut next = self.clone();
        match &mut next.kind {
            ElementKind::HorizontalLayout { elements }
            | ElementKind::VerticalLayout { elements }
            | ElementKind::Group { elements, .. }
            | ElementKind::Categorization { elements, .. }
            | ElementKind::Category { elements, .. } => *elements = new_elements,
            ElementKind::Label { .. } | ElementKind::Control { .. } => {}
        }
        next
    }

    /// Human-readable caption: group/category label, label text, or control label.
    pub fn caption(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Group { label, .. }
            | ElementKind::Categorization { label, .. }
            | ElementKind::Category { label, .. } => label.as_deref(),
            ElementKind::Label { text } => Some(text),
            ElementKind::Control { label, .. } => label.as_ref().and_then(ControlLabel::text),
            ElementKind::HorizontalLayout { .. } | ElementKind::VerticalLayout { .. } => None,
        }
    }

    /// The control's scope, if this is a control.
    pub fn scope(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Control { scope, .. } => Some(scope),
            _ => None,
        }
    }

    /// Current values of the editable properties, keyed the way the
    /// properties service names them (`label`, `text`, `scope`,
    /// `options.<key>`).
    pub fn property_values(&self) -> Map<String, Value> {
        let mut values = Map::new();
        match &self.kind {
            ElementKind::Group { label, .. }
            | ElementKind::Categorization { label, .. }
            | ElementKind::Category { label, .. } => {
                if let Some(label) = label {
                    values.insert("label".into(), Value::String(label.clone()));
                }
            }
            ElementKind::Label { text } => {
                values.insert("text".into(), Value::String(text.clone()));
            }
            ElementKind::Control { scope, label } => {
                values.insert("scope".into(), Value::String(scope.clone()));
                if let Some(label) = label {
                    values.insert(
                        "label".into(),
                        serde_json::to_value(label).unwrap_or(Value::Null),
                    );
                }
            }
            ElementKind::HorizontalLayout { .. } | ElementKind::VerticalLayout { .. } => {}
        }
        if let Some(options) = &self.options {
            for (key, value) in options {
                values.insert(format!("options.{key}"), value.clone());
            }
        }
        values
    }

    // ─── JSON ────────────────────────────────────────────────────────────

    /// Build a tree from its JSON form, assigning a fresh id to every element.
    /// Members the model does not interpret are kept in `extra`.
    pub fn from_json(value: &Value) -> Result<Self, DocumentError> {
        let object = value.as_object();
        if let Some(name) = object.and_then(|o| o.get("type")).and_then(Value::as_str)
            && ElementType::from_type_name(name).is_none()
        {
            return Err(DocumentError::UnknownElementType(name.to_string()));
        }

        let wire: WireElement = serde_json::from_value(value.clone())?;
        let kind = match wire.body {
            WireBody::HorizontalLayout { elements } => ElementKind::HorizontalLayout {
                elements: children_from_json(&elements)?,
            },
            WireBody::VerticalLayout { elements } => ElementKind::VerticalLayout {
                elements: children_from_json(&elements)?,
            },
            WireBody::Group { label, elements } => ElementKind::Group {
                label,
                elements: children_from_json(&elements)?,
            },
            WireBody::Categorization { label, elements } => ElementKind::Categorization {
                label,
                elements: children_from_json(&elements)?,
            },
            WireBody::Category { label, elements } => ElementKind::Category {
                label,
                elements: children_from_json(&elements)?,
            },
            WireBody::Label { text } => ElementKind::Label { text },
            WireBody::Control { scope, label } => ElementKind::Control { scope, label },
        };

        let mut element = UiSchemaElement::new(kind);
        element.options = wire.options;
        element.rule = wire.rule;
        if let Some(object) = object {
            let element_type = element.element_type();
            element.extra = object
                .iter()
                .filter(|(key, _)| !is_modelled_member(element_type, key))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect();
        }
        Ok(element)
    }

    /// Parse JSON text into a tree, assigning fresh ids.
    pub fn from_json_str(text: &str) -> Result<Self, DocumentError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_json(&value)
    }

    /// The JSON form of this tree. Ids are not emitted.
    pub fn to_json(&self) -> Value {
        let body = match &self.kind {
            ElementKind::HorizontalLayout { elements } => WireBody::HorizontalLayout {
                elements: children_to_json(elements),
            },
            ElementKind::VerticalLayout { elements } => WireBody::VerticalLayout {
                elements: children_to_json(elements),
            },
            ElementKind::Group { label, elements } => WireBody::Group {
                label: label.clone(),
                elements: children_to_json(elements),
            },
            ElementKind::Categorization { label, elements } => WireBody::Categorization {
                label: label.clone(),
                elements: children_to_json(elements),
            },
            ElementKind::Category { label, elements } => WireBody::Category {
                label: label.clone(),
                elements: children_to_json(elements),
            },
            ElementKind::Label { text } => WireBody::Label { text: text.clone() },
            ElementKind::Control { scope, label } => WireBody::Control {
                scope: scope.clone(),
                label: label.clone(),
            },
        };
        let wire = WireElement {
            body,
            options: self.options.clone(),
            rule: self.rule.clone(),
        };
        let mut value = serde_json::to_value(wire).unwrap_or(Value::Null);
        if let Value::Object(object) = &mut value {
            for (key, extra) in &self.extra {
                object.entry(key.clone()).or_insert_with(|| extra.clone());
            }
        }
        value
    }

    /// Pretty-printed JSON form of this tree.
    pub fn to_json_string(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(&self.to_json())?)
    }
}

// ─── Wire format ─────────────────────────────────────────────────────────

/// JSON Forms shape of one element. Children stay raw JSON so each level
/// can collect its own uninterpreted members.
#[derive(Debug, Serialize, Deserialize)]
struct WireElement {
    #[serde(flatten)]
    body: WireBody,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    options: Option<Options>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rule: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
enum WireBody {
    HorizontalLayout {
        #[serde(default)]
        elements: Vec<Value>,
    },
    VerticalLayout {
        #[serde(default)]
        elements: Vec<Value>,
    },
    Group {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        #[serde(default)]
        elements: Vec<Value>,
    },
    Categorization {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        #[serde(default)]
        elements: Vec<Value>,
    },
    Category {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        #[serde(default)]
        elements: Vec<Value>,
    },
    Label {
        #[serde(default)]
        text: String,
    },
    Control {
        scope: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<ControlLabel>,
    },
}

/// Whether `key` is decoded into a typed field for elements of `element_type`.
fn is_modelled_member(element_type: ElementType, key: &str) -> bool {
    match key {
        "type" | "options" | "rule" => true,
        "elements" => element_type.is_container(),
        "label" => !matches!(
            element_type,
            ElementType::HorizontalLayout | ElementType::VerticalLayout | ElementType::Label
        ),
        "text" => element_type == ElementType::Label,
        "scope" => element_type == ElementType::Control,
        _ => false,
    }
}

fn children_from_json(elements: &[Value]) -> Result<Elements, DocumentError> {
    elements
        .iter()
        .map(|child| UiSchemaElement::from_json(child).map(Arc::new))
        .collect()
}

fn children_to_json(elements: &[Arc<UiSchemaElement>]) -> Vec<Value> {
    elements.iter().map(|child| child.to_json()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn parse_nested_layout_assigns_distinct_ids() {
        let doc = json!({
            "type": "VerticalLayout",
            "elements": [
                { "type": "Label", "text": "Person" },
                {
                    "type": "HorizontalLayout",
                    "elements": [
                        { "type": "Control", "scope": "#/properties/name" },
                        { "type": "Control", "scope": "#/properties/age", "label": "Age" }
                    ]
                }
            ]
        });
        let root = UiSchemaElement::from_json(&doc).unwrap();
        assert_eq!(root.element_type(), ElementType::VerticalLayout);
        assert_eq!(root.elements().len(), 2);

        let row = &root.elements()[1];
        assert_eq!(row.element_type(), ElementType::HorizontalLayout);
        assert_eq!(row.elements()[1].caption(), Some("Age"));
        assert_ne!(root.id, row.id);
        assert_ne!(row.elements()[0].id, row.elements()[1].id);
    }

    #[test]
    fn json_roundtrip_drops_ids_and_keeps_options() {
        let doc = json!({
            "type": "Group",
            "label": "Address",
            "elements": [
                {
                    "type": "Control",
                    "scope": "#/properties/street",
                    "options": { "multi": true }
                }
            ]
        });
        let root = UiSchemaElement::from_json(&doc).unwrap();
        assert_eq!(root.to_json(), doc);
    }

    #[test]
    fn control_label_variants() {
        let hidden = UiSchemaElement::from_json(
            &json!({ "type": "Control", "scope": "#", "label": false }),
        )
        .unwrap();
        assert_eq!(
            hidden.kind,
            ElementKind::Control {
                scope: "#".into(),
                label: Some(ControlLabel::Show(false)),
            }
        );
        assert_eq!(hidden.caption(), None);

        let detailed = UiSchemaElement::from_json(
            &json!({ "type": "Control", "scope": "#", "label": { "text": "Name", "show": true } }),
        )
        .unwrap();
        assert_eq!(detailed.caption(), Some("Name"));
    }

    #[test]
    fn unknown_type_is_rejected() {
        let err = UiSchemaElement::from_json(&json!({ "type": "Spiral" })).unwrap_err();
        assert!(matches!(err, DocumentError::UnknownElementType(name) if name == "Spiral"));

        let nested = json!({
            "type": "VerticalLayout",
            "elements": [{ "type": "Table", "scope": "#" }]
        });
        assert!(matches!(
            UiSchemaElement::from_json(&nested),
            Err(DocumentError::UnknownElementType(name)) if name == "Table"
        ));
    }

    #[test]
    fn missing_type_is_a_json_error() {
        let err = UiSchemaElement::from_json(&json!({ "elements": [] })).unwrap_err();
        assert!(matches!(err, DocumentError::Json(_)));
    }

    #[test]
    fn uninterpreted_members_survive_roundtrip() {
        let doc = json!({
            "type": "VerticalLayout",
            "elements": [
                {
                    "type": "Control",
                    "scope": "#/properties/name",
                    "i18n": "person.name",
                    "label": { "text": "Name", "show": true, "tooltip": "Full name" }
                },
                {
                    "type": "Group",
                    "label": "Address",
                    "i18n": "g",
                    "elements": []
                }
            ]
        });
        let root = UiSchemaElement::from_json(&doc).unwrap();
        assert_eq!(root.elements()[0].extra["i18n"], json!("person.name"));
        assert_eq!(root.elements()[1].extra["i18n"], json!("g"));
        assert!(!root.elements()[1].extra.contains_key("label"));
        assert_eq!(root.to_json(), doc);
    }

    #[test]
    fn with_elements_keeps_identity() {
        let root = UiSchemaElement::new(ElementKind::VerticalLayout {
            elements: Vec::new(),
        });
        let child = Arc::new(UiSchemaElement::new(ElementKind::Label {
            text: "hi".into(),
        }));
        let next = root.with_elements(vec![child.clone()]);
        assert_eq!(next.id, root.id);
        assert!(Arc::ptr_eq(&next.elements()[0], &child));
    }

    #[test]
    fn property_values_flatten_options() {
        let control = UiSchemaElement::from_json(&json!({
            "type": "Control",
            "scope": "#/properties/bio",
            "label": "Bio",
            "options": { "multi": true }
        }))
        .unwrap();
        let values = control.property_values();
        assert_eq!(values["scope"], json!("#/properties/bio"));
        assert_eq!(values["label"], json!("Bio"));
        assert_eq!(values["options.multi"], json!(true));
    }
}
