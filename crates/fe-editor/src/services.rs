//! Schema service: where the editor's initial documents come from.
//!
//! Hosts plug in their own backing store (REST, files, a database) by
//! implementing `SchemaService`. Both accessors are asynchronous and are
//! called once when a session starts loading.

use crate::error::LoadError;
use async_trait::async_trait;
use fe_core::{DataSchema, UiSchemaElement};
use serde_json::Value;

#[async_trait]
pub trait SchemaService: Send + Sync {
    /// The data schema.
    async fn schema(&self) -> Result<DataSchema, LoadError>;

    /// The UI schema, with fresh ids assigned.
    async fn ui_schema(&self) -> Result<UiSchemaElement, LoadError>;
}

const EXAMPLE_SCHEMA: &str = include_str!("../assets/example.schema.json");
const EXAMPLE_UI_SCHEMA: &str = include_str!("../assets/example.uischema.json");

/// Serves the bundled person/address example.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExampleSchemaService;

#[async_trait]
impl SchemaService for ExampleSchemaService {
    async fn schema(&self) -> Result<DataSchema, LoadError> {
        Ok(DataSchema::from_json_str(EXAMPLE_SCHEMA)?)
    }

    async fn ui_schema(&self) -> Result<UiSchemaElement, LoadError> {
        Ok(UiSchemaElement::from_json_str(EXAMPLE_UI_SCHEMA)?)
    }
}

/// Serves caller-supplied JSON documents. A missing document fails with
/// `LoadError::Unavailable`.
#[derive(Debug, Clone, Default)]
pub struct StaticSchemaService {
    schema: Option<Value>,
    ui_schema: Option<Value>,
}

impl StaticSchemaService {
    pub fn new(schema: Option<Value>, ui_schema: Option<Value>) -> Self {
        Self { schema, ui_schema }
    }
}

#[async_trait]
impl SchemaService for StaticSchemaService {
    async fn schema(&self) -> Result<DataSchema, LoadError> {
        self.schema
            .clone()
            .map(DataSchema::new)
            .ok_or_else(|| LoadError::Unavailable("no data schema configured".into()))
    }

    async fn ui_schema(&self) -> Result<UiSchemaElement, LoadError> {
        let value = self
            .ui_schema
            .as_ref()
            .ok_or_else(|| LoadError::Unavailable("no UI schema configured".into()))?;
        Ok(UiSchemaElement::from_json(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fe_core::{ElementType, lint_document};
    use serde_json::json;

    #[tokio::test]
    async fn example_documents_load_and_agree() {
        let service = ExampleSchemaService;
        let schema = service.schema().await.unwrap();
        let ui = service.ui_schema().await.unwrap();
        assert_eq!(ui.element_type(), ElementType::VerticalLayout);
        assert!(lint_document(&ui, Some(&schema)).is_empty());
    }

    #[tokio::test]
    async fn static_service_reports_missing_documents() {
        let service = StaticSchemaService::new(Some(json!({ "type": "object" })), None);
        assert!(service.schema().await.is_ok());
        assert!(matches!(
            service.ui_schema().await,
            Err(LoadError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn static_service_rejects_malformed_ui_schema() {
        let service = StaticSchemaService::new(None, Some(json!({ "type": "Nope" })));
        assert!(matches!(
            service.ui_schema().await,
            Err(LoadError::Document(_))
        ));
    }
}
