//! Properties service: which attributes of an element are editable.
//!
//! The service is a pipeline fixed at construction. Providers contribute
//! entries first, in registration order; decorators then rewrite the merged
//! set, in registration order, each seeing the previous one's output. The
//! pipeline is re-run on every query and holds no state between queries, so
//! a given element type always yields the same ordered result.
//!
//! When two providers contribute an entry with the same name, the later
//! entry replaces the earlier one but keeps the earlier position.

use fe_core::{ElementType, UiSchemaElement};
use serde_json::{Map, Value, json};

// ─── Property schemas ────────────────────────────────────────────────────

/// Value type of an editable property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyKind {
    String,
    Boolean,
    Integer,
    Enum(Vec<String>),
    /// A control's `label`: a string, `false` to hide it, or `{ text, show }`.
    ControlLabel,
}

/// One editable attribute. `name` uses the same keys as
/// `UiSchemaElement::property_values` (`label`, `text`, `options.<key>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySchema {
    pub name: String,
    pub title: String,
    pub kind: PropertyKind,
    pub description: Option<String>,
}

impl PropertySchema {
    pub fn new(name: impl Into<String>, title: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            kind,
            description: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn to_json_schema(&self) -> Value {
        let mut schema = match &self.kind {
            PropertyKind::String => json!({ "type": "string" }),
            PropertyKind::Boolean => json!({ "type": "boolean" }),
            PropertyKind::Integer => json!({ "type": "integer" }),
            PropertyKind::Enum(values) => json!({ "type": "string", "enum": values }),
            PropertyKind::ControlLabel => json!({
                "oneOf": [
                    { "type": "string" },
                    { "type": "boolean" },
                    {
                        "type": "object",
                        "properties": {
                            "text": { "type": "string" },
                            "show": { "type": "boolean" }
                        }
                    }
                ]
            }),
        };
        schema["title"] = Value::String(self.title.clone());
        if let Some(description) = &self.description {
            schema["description"] = Value::String(description.clone());
        }
        schema
    }
}

/// Ordered set of property schemas, unique by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertySchemas {
    entries: Vec<PropertySchema>,
}

impl PropertySchemas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PropertySchema> {
        self.entries.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&PropertySchema> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Add `entry`, replacing an existing entry of the same name in place.
    pub fn insert(&mut self, entry: PropertySchema) {
        match self.entries.iter_mut().find(|e| e.name == entry.name) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    #[must_use]
    pub fn with(mut self, entry: PropertySchema) -> Self {
        self.insert(entry);
        self
    }

    pub fn remove(&mut self, name: &str) -> Option<PropertySchema> {
        let pos = self.entries.iter().position(|e| e.name == name)?;
        Some(self.entries.remove(pos))
    }

    /// Insert every entry of `other`, in order.
    pub fn merge(&mut self, other: PropertySchemas) {
        for entry in other.entries {
            self.insert(entry);
        }
    }

    /// JSON Schema object describing the set, for a host's properties form.
    pub fn to_json_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .entries
            .iter()
            .map(|e| (e.name.clone(), e.to_json_schema()))
            .collect();
        json!({ "type": "object", "properties": properties })
    }
}

impl FromIterator<PropertySchema> for PropertySchemas {
    fn from_iter<I: IntoIterator<Item = PropertySchema>>(iter: I) -> Self {
        let mut schemas = PropertySchemas::new();
        for entry in iter {
            schemas.insert(entry);
        }
        schemas
    }
}

// ─── Pipeline stages ─────────────────────────────────────────────────────

/// Contributes property schemas for an element type.
pub trait PropertySchemasProvider: Send + Sync {
    fn provide(&self, element_type: ElementType) -> PropertySchemas;
}

impl<F> PropertySchemasProvider for F
where
    F: Fn(ElementType) -> PropertySchemas + Send + Sync,
{
    fn provide(&self, element_type: ElementType) -> PropertySchemas {
        self(element_type)
    }
}

/// Rewrites the merged provider output. Must be a pure function of its inputs.
pub trait PropertySchemasDecorator: Send + Sync {
    fn decorate(&self, element_type: ElementType, schemas: PropertySchemas) -> PropertySchemas;
}

impl<F> PropertySchemasDecorator for F
where
    F: Fn(ElementType, PropertySchemas) -> PropertySchemas + Send + Sync,
{
    fn decorate(&self, element_type: ElementType, schemas: PropertySchemas) -> PropertySchemas {
        self(element_type, schemas)
    }
}

/// Captions and label texts.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPropertiesProvider;

impl PropertySchemasProvider for DefaultPropertiesProvider {
    fn provide(&self, element_type: ElementType) -> PropertySchemas {
        match element_type {
            ElementType::Group | ElementType::Categorization | ElementType::Category => {
                PropertySchemas::new().with(PropertySchema::new(
                    "label",
                    "Label",
                    PropertyKind::String,
                ))
            }
            ElementType::Label => PropertySchemas::new().with(PropertySchema::new(
                "text",
                "Text",
                PropertyKind::String,
            )),
            ElementType::Control => PropertySchemas::new().with(
                PropertySchema::new("label", "Label", PropertyKind::ControlLabel)
                    .with_description("Overrides the label derived from the data schema"),
            ),
            ElementType::HorizontalLayout | ElementType::VerticalLayout => PropertySchemas::new(),
        }
    }
}

/// Adds the common renderer options of controls.
#[derive(Debug, Clone, Copy, Default)]
pub struct ControlOptionsDecorator;

impl PropertySchemasDecorator for ControlOptionsDecorator {
    fn decorate(&self, element_type: ElementType, schemas: PropertySchemas) -> PropertySchemas {
        if element_type != ElementType::Control {
            return schemas;
        }
        schemas
            .with(PropertySchema::new(
                "options.readonly",
                "Read only",
                PropertyKind::Boolean,
            ))
            .with(PropertySchema::new(
                "options.multi",
                "Multi-line",
                PropertyKind::Boolean,
            ))
            .with(PropertySchema::new(
                "options.format",
                "Format",
                PropertyKind::Enum(vec!["radio".into(), "date".into(), "time".into()]),
            ))
    }
}

// ─── Service ─────────────────────────────────────────────────────────────

pub struct PropertiesService {
    providers: Vec<Box<dyn PropertySchemasProvider>>,
    decorators: Vec<Box<dyn PropertySchemasDecorator>>,
}

impl PropertiesService {
    pub fn new(
        providers: Vec<Box<dyn PropertySchemasProvider>>,
        decorators: Vec<Box<dyn PropertySchemasDecorator>>,
    ) -> Self {
        Self {
            providers,
            decorators,
        }
    }

    /// `DefaultPropertiesProvider` + `ControlOptionsDecorator`.
    pub fn with_defaults() -> Self {
        Self::new(
            vec![Box::new(DefaultPropertiesProvider)],
            vec![Box::new(ControlOptionsDecorator)],
        )
    }

    /// Editable properties of `element_type`.
    pub fn property_schemas(&self, element_type: ElementType) -> PropertySchemas {
        let mut merged = PropertySchemas::new();
        for provider in &self.providers {
            merged.merge(provider.provide(element_type));
        }
        self.decorators
            .iter()
            .fold(merged, |schemas, decorator| decorator.decorate(element_type, schemas))
    }

    pub fn property_schemas_for(&self, element: &UiSchemaElement) -> PropertySchemas {
        self.property_schemas(element.element_type())
    }
}

impl Default for PropertiesService {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_for_control() {
        let service = PropertiesService::with_defaults();
        assert_eq!(
            service.property_schemas(ElementType::Control).names(),
            ["label", "options.readonly", "options.multi", "options.format"]
        );
        assert!(service.property_schemas(ElementType::VerticalLayout).is_empty());
    }

    #[test]
    fn providers_merge_in_registration_order() {
        let extra = |ty: ElementType| match ty {
            ElementType::Label => PropertySchemas::new()
                .with(PropertySchema::new("options.size", "Size", PropertyKind::Integer)),
            _ => PropertySchemas::new(),
        };
        let service = PropertiesService::new(
            vec![Box::new(DefaultPropertiesProvider), Box::new(extra)],
            Vec::new(),
        );
        assert_eq!(
            service.property_schemas(ElementType::Label).names(),
            ["text", "options.size"]
        );
    }

    #[test]
    fn later_provider_wins_conflicts_in_place() {
        let first = |_: ElementType| {
            PropertySchemas::new()
                .with(PropertySchema::new("label", "Label", PropertyKind::String))
                .with(PropertySchema::new("options.a", "A", PropertyKind::Boolean))
        };
        let second = |_: ElementType| {
            PropertySchemas::new().with(PropertySchema::new(
                "label",
                "Caption",
                PropertyKind::String,
            ))
        };
        let service = PropertiesService::new(vec![Box::new(first), Box::new(second)], Vec::new());
        let schemas = service.property_schemas(ElementType::Group);
        assert_eq!(schemas.names(), ["label", "options.a"]);
        assert_eq!(schemas.get("label").unwrap().title, "Caption");
    }

    #[test]
    fn decorators_run_in_order_on_previous_output() {
        let add = |_: ElementType, schemas: PropertySchemas| {
            schemas.with(PropertySchema::new("options.x", "X", PropertyKind::Boolean))
        };
        let drop_label = |_: ElementType, mut schemas: PropertySchemas| {
            schemas.remove("label");
            schemas
        };
        let service = PropertiesService::new(
            vec![Box::new(DefaultPropertiesProvider)],
            vec![Box::new(add), Box::new(drop_label)],
        );
        assert_eq!(service.property_schemas(ElementType::Group).names(), ["options.x"]);
    }

    #[test]
    fn repeated_queries_are_identical() {
        let service = PropertiesService::with_defaults();
        for ty in ElementType::ALL {
            assert_eq!(service.property_schemas(ty), service.property_schemas(ty));
        }
    }

    #[test]
    fn json_schema_rendering() {
        let schemas = PropertiesService::with_defaults().property_schemas(ElementType::Label);
        assert_eq!(
            schemas.to_json_schema(),
            json!({
                "type": "object",
                "properties": {
                    "text": { "type": "string", "title": "Text" }
                }
            })
        );
    }

    #[test]
    fn control_label_accepts_every_label_form() {
        let schemas = PropertiesService::with_defaults().property_schemas(ElementType::Control);
        assert_eq!(schemas.get("label").unwrap().kind, PropertyKind::ControlLabel);

        let rendered = schemas.to_json_schema();
        let forms: Vec<&Value> = rendered["properties"]["label"]["oneOf"]
            .as_array()
            .unwrap()
            .iter()
            .map(|form| &form["type"])
            .collect();
        assert_eq!(forms, [&json!("string"), &json!("boolean"), &json!("object")]);
        assert_eq!(
            rendered["properties"]["label"]["oneOf"][2]["properties"]["show"],
            json!({ "type": "boolean" })
        );
        assert_eq!(rendered["properties"]["label"]["title"], json!("Label"));
    }
}
