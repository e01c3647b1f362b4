//! Error types for the editor

use fe_core::{DocumentError, ElementType};
use thiserror::Error;

/// Why an action could not be applied. The state is left untouched.
#[derive(Error, Debug)]
pub enum ActionError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("no UI schema is loaded")]
    NoUiSchema,

    #[error("no data schema is loaded")]
    NoDataSchema,

    #[error("scope `{0}` does not exist in the data schema")]
    UnknownScope(String),

    #[error(transparent)]
    Palette(#[from] PaletteError),
}

/// Failure of a schema service accessor.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("invalid schema JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("cannot read schema: {0}")]
    Io(#[from] std::io::Error),

    #[error("schema unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum PaletteError {
    #[error("the palette has no entry for {0}")]
    UnknownType(ElementType),
}
