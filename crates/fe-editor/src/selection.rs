//! Selection model: at most one selected element, identified by id.
//!
//! The selection never holds a reference into the tree. Consumers resolve
//! the id against the current UI schema when they need the element, and
//! `sync_selection` drops the id as soon as it no longer resolves.

use fe_core::{ElementId, UiSchemaElement, try_find_by_id};

/// The selected element, by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectedElement {
    pub id: ElementId,
}

impl SelectedElement {
    pub fn new(id: ElementId) -> Self {
        Self { id }
    }
}

/// `None` when nothing is selected.
pub type Selection = Option<SelectedElement>;

/// Re-validate `selection` against a new UI schema.
///
/// Keeps the selection (same id) if the element still exists, clears it
/// otherwise.
#[must_use]
pub fn sync_selection(selection: Selection, ui_schema: Option<&UiSchemaElement>) -> Selection {
    let selected = selection?;
    if try_find_by_id(ui_schema, selected.id).is_some() {
        Some(selected)
    } else {
        log::debug!("selection {} no longer in document, clearing", selected.id.short());
        None
    }
}
