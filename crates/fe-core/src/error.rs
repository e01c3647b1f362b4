use crate::id::ElementId;
use crate::model::ElementType;
use thiserror::Error;

/// Errors raised while building, parsing, or editing UI schema documents.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown UI schema element type `{0}`")]
    UnknownElementType(String),

    #[error("invalid scope `{scope}`: {reason}")]
    InvalidScope { scope: String, reason: String },

    #[error("element {0} not found")]
    NotFound(ElementId),

    #[error("element {id} is a {element_type} and cannot hold children")]
    NotAContainer {
        id: ElementId,
        element_type: ElementType,
    },

    #[error("the root element cannot be removed or moved")]
    RootElement,

    #[error("cannot move element {id} into its own subtree")]
    MoveIntoDescendant { id: ElementId },

    #[error("{element_type} has no editable property `{name}`")]
    UnknownProperty {
        element_type: ElementType,
        name: String,
    },

    #[error("property `{name}` expects {expected}")]
    PropertyMismatch { name: String, expected: &'static str },
}
