//! File-backed schema service.

use async_trait::async_trait;
use fe_core::{DataSchema, UiSchemaElement};
use fe_editor::{LoadError, SchemaService};
use std::path::PathBuf;

/// Reads each document from disk when asked. A document without a path
/// fails with `LoadError::Unavailable`.
pub struct FileSchemaService {
    schema: Option<PathBuf>,
    ui_schema: Option<PathBuf>,
}

impl FileSchemaService {
    pub fn new(schema: Option<PathBuf>, ui_schema: Option<PathBuf>) -> Self {
        Self { schema, ui_schema }
    }
}

async fn read(path: Option<&PathBuf>, what: &str) -> Result<String, LoadError> {
    let path = path.ok_or_else(|| LoadError::Unavailable(format!("no {what} file given")))?;
    log::debug!("reading {what} from {}", path.display());
    Ok(tokio::fs::read_to_string(path).await?)
}

#[async_trait]
impl SchemaService for FileSchemaService {
    async fn schema(&self) -> Result<DataSchema, LoadError> {
        let text = read(self.schema.as_ref(), "data schema").await?;
        Ok(DataSchema::from_json_str(&text)?)
    }

    async fn ui_schema(&self) -> Result<UiSchemaElement, LoadError> {
        let text = read(self.ui_schema.as_ref(), "UI schema").await?;
        Ok(UiSchemaElement::from_json_str(&text)?)
    }
}
