//! Editor state and the reducer that evolves it.
//!
//! The state is a pair of documents, each `None` until loaded. Every change
//! goes through `try_reduce`/`reduce`, which are pure: they never perform
//! I/O and never mutate the input state. Unchanged documents are shared
//! with the previous state by `Arc`, so callers can detect a UI schema
//! replacement with `Arc::ptr_eq`.

use crate::error::ActionError;
use fe_core::lookup::walk;
use fe_core::{
    DataSchema, ElementId, Map, UiSchemaElement, Value, insert_child, move_element,
    remove_element, update_element,
};
use std::sync::Arc;

/// The two documents being edited.
#[derive(Debug, Clone, Default)]
pub struct EditorState {
    pub schema: Option<Arc<DataSchema>>,
    pub ui_schema: Option<Arc<UiSchemaElement>>,
}

impl EditorState {
    /// Both documents not yet loaded.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schema(&self) -> Option<&DataSchema> {
        self.schema.as_deref()
    }

    pub fn ui_schema(&self) -> Option<&UiSchemaElement> {
        self.ui_schema.as_deref()
    }
}

/// Every way the editor state can change.
#[derive(Debug, Clone)]
pub enum Action {
    /// Replace the data schema.
    SetSchema(DataSchema),
    /// Replace the UI schema.
    SetUiSchema(UiSchemaElement),
    /// Replace both documents in one step.
    SetSchemas {
        schema: DataSchema,
        ui_schema: UiSchemaElement,
    },
    /// Insert an element (typically from the palette) without scope checks.
    AddElement {
        parent: ElementId,
        index: usize,
        element: UiSchemaElement,
    },
    /// Insert an element whose controls must all point at existing data
    /// schema locations.
    AddScopedElement {
        parent: ElementId,
        index: usize,
        element: UiSchemaElement,
    },
    MoveElement {
        id: ElementId,
        parent: ElementId,
        index: usize,
    },
    RemoveElement {
        id: ElementId,
    },
    /// Apply property changes (see `fe_core::update_element`).
    UpdateElement {
        id: ElementId,
        changes: Map<String, Value>,
    },
}

impl Action {
    /// Short name for log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Action::SetSchema(_) => "SetSchema",
            Action::SetUiSchema(_) => "SetUiSchema",
            Action::SetSchemas { .. } => "SetSchemas",
            Action::AddElement { .. } => "AddElement",
            Action::AddScopedElement { .. } => "AddScopedElement",
            Action::MoveElement { .. } => "MoveElement",
            Action::RemoveElement { .. } => "RemoveElement",
            Action::UpdateElement { .. } => "UpdateElement",
        }
    }
}

/// Compute the next state, or explain why `action` does not apply.
pub fn try_reduce(state: &EditorState, action: Action) -> Result<EditorState, ActionError> {
    match action {
        Action::SetSchema(schema) => Ok(EditorState {
            schema: Some(Arc::new(schema)),
            ui_schema: state.ui_schema.clone(),
        }),
        Action::SetUiSchema(ui_schema) => Ok(EditorState {
            schema: state.schema.clone(),
            ui_schema: Some(Arc::new(ui_schema)),
        }),
        Action::SetSchemas { schema, ui_schema } => Ok(EditorState {
            schema: Some(Arc::new(schema)),
            ui_schema: Some(Arc::new(ui_schema)),
        }),
        Action::AddElement {
            parent,
            index,
            element,
        } => {
            let root = current_ui_schema(state)?;
            Ok(with_ui_schema(state, insert_child(root, parent, index, element)?))
        }
        Action::AddScopedElement {
            parent,
            index,
            element,
        } => {
            let root = current_ui_schema(state)?;
            let schema = state.schema().ok_or(ActionError::NoDataSchema)?;
            for scope in walk(&element).filter_map(UiSchemaElement::scope) {
                check_scope(schema, scope)?;
            }
            Ok(with_ui_schema(state, insert_child(root, parent, index, element)?))
        }
        Action::MoveElement { id, parent, index } => {
            let root = current_ui_schema(state)?;
            Ok(with_ui_schema(state, move_element(root, id, parent, index)?))
        }
        Action::RemoveElement { id } => {
            let root = current_ui_schema(state)?;
            Ok(with_ui_schema(state, remove_element(root, id)?))
        }
        Action::UpdateElement { id, changes } => {
            let root = current_ui_schema(state)?;
            if let (Some(schema), Some(Value::String(scope))) = (state.schema(), changes.get("scope"))
            {
                check_scope(schema, scope)?;
            }
            Ok(with_ui_schema(state, update_element(root, id, &changes)?))
        }
    }
}

/// Total reducer: a rejected action is logged and leaves the state as is.
#[must_use]
pub fn reduce(state: &EditorState, action: Action) -> EditorState {
    let name = action.name();
    match try_reduce(state, action) {
        Ok(next) => next,
        Err(e) => {
            log::warn!("{name} rejected: {e}");
            state.clone()
        }
    }
}

fn current_ui_schema(state: &EditorState) -> Result<&Arc<UiSchemaElement>, ActionError> {
    state.ui_schema.as_ref().ok_or(ActionError::NoUiSchema)
}

fn with_ui_schema(state: &EditorState, ui_schema: Arc<UiSchemaElement>) -> EditorState {
    EditorState {
        schema: state.schema.clone(),
        ui_schema: Some(ui_schema),
    }
}

fn check_scope(schema: &DataSchema, scope: &str) -> Result<(), ActionError> {
    if schema.contains(scope) {
        Ok(())
    } else {
        Err(ActionError::UnknownScope(scope.to_string()))
    }
}
