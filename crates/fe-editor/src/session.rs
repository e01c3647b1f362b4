//! # Editing session
//!
//! An `EditorSession` is the single owner of one editing session's state:
//! the document pair, the selection, and the injected services. All changes
//! go through `dispatch`, which runs the reducer and re-validates the
//! selection in the same step, so the selection never names an id that is
//! absent from the current UI schema.
//!
//! Initial documents are fetched by `start_loading`, which spawns one task
//! per document. Finished loads come back as actions over a channel whose
//! only senders are those tasks, and are applied by `apply_pending` /
//! `next_loaded`. The channel closes once both tasks are done; if the session
//! is dropped first, the tasks' sends fail and late results are discarded.

use crate::config::EditorConfig;
use crate::error::{ActionError, PaletteError};
use crate::palette::{ExamplePaletteService, PaletteService};
use crate::properties::{PropertiesService, PropertySchemas};
use crate::reducer::{Action, EditorState, try_reduce};
use crate::selection::{SelectedElement, Selection, sync_selection};
use crate::services::{ExampleSchemaService, SchemaService};
use fe_core::{
    DataSchema, ElementId, ElementType, LintDiagnostic, Map, UiSchemaElement, Value,
    create_control, generate_ui_schema, lint_document, try_find_by_id,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::task::JoinHandle;

pub struct EditorSession {
    state: EditorState,
    selection: Selection,
    config: EditorConfig,
    schema_service: Arc<dyn SchemaService>,
    palette_service: Arc<dyn PaletteService>,
    properties_service: PropertiesService,
    /// Results of the current `start_loading` round, if one is in flight.
    loaded_rx: Option<mpsc::UnboundedReceiver<Action>>,
}

impl EditorSession {
    /// Create a session with empty documents and no selection.
    pub fn new(
        config: EditorConfig,
        schema_service: Arc<dyn SchemaService>,
        palette_service: Arc<dyn PaletteService>,
        properties_service: PropertiesService,
    ) -> Self {
        Self {
            state: EditorState::new(),
            selection: None,
            config,
            schema_service,
            palette_service,
            properties_service,
            loaded_rx: None,
        }
    }

    /// Session wired to the bundled example services.
    pub fn with_examples() -> Self {
        Self::new(
            EditorConfig::default(),
            Arc::new(ExampleSchemaService),
            Arc::new(ExamplePaletteService::new()),
            PropertiesService::with_defaults(),
        )
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn schema(&self) -> Option<&DataSchema> {
        self.state.schema()
    }

    pub fn ui_schema(&self) -> Option<&UiSchemaElement> {
        self.state.ui_schema()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn palette(&self) -> &dyn PaletteService {
        self.palette_service.as_ref()
    }

    pub fn properties(&self) -> &PropertiesService {
        &self.properties_service
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// The selected element, resolved against the current UI schema.
    pub fn selected_element(&self) -> Option<&UiSchemaElement> {
        let selected = self.selection?;
        try_find_by_id(self.ui_schema(), selected.id)
    }

    /// Editable properties of the selected element.
    pub fn selected_property_schemas(&self) -> Option<PropertySchemas> {
        self.selected_element()
            .map(|element| self.properties_service.property_schemas_for(element))
    }

    /// Lint the current UI schema against the current data schema.
    pub fn lint(&self) -> Vec<LintDiagnostic> {
        self.ui_schema()
            .map(|ui| lint_document(ui, self.schema()))
            .unwrap_or_default()
    }

    // ─── Updates ─────────────────────────────────────────────────────────

    /// Apply `action`. On error the state and selection are unchanged.
    pub fn dispatch(&mut self, action: Action) -> Result<(), ActionError> {
        log::debug!("dispatch {}", action.name());
        let next = try_reduce(&self.state, action)?;
        self.commit(next);
        Ok(())
    }

    /// Select `id`. Selecting an id that is not in the UI schema clears the
    /// selection instead. Returns whether `id` is now selected.
    pub fn select(&mut self, id: ElementId) -> bool {
        self.selection = sync_selection(Some(SelectedElement::new(id)), self.ui_schema());
        self.selection.is_some()
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Place a fresh element from the palette entry for `element_type`.
    /// Returns the new element's id.
    pub fn add_from_palette(
        &mut self,
        element_type: ElementType,
        parent: ElementId,
        index: usize,
    ) -> Result<ElementId, ActionError> {
        let element = self
            .palette_service
            .find(element_type)
            .ok_or(PaletteError::UnknownType(element_type))?
            .create();
        let id = element.id;
        self.dispatch(Action::AddElement {
            parent,
            index,
            element,
        })?;
        Ok(id)
    }

    /// Place a control bound to `scope`, which must exist in the data schema.
    pub fn add_control(
        &mut self,
        parent: ElementId,
        index: usize,
        scope: &str,
    ) -> Result<ElementId, ActionError> {
        let element = create_control(scope, None);
        let id = element.id;
        self.dispatch(Action::AddScopedElement {
            parent,
            index,
            element,
        })?;
        Ok(id)
    }

    /// Apply property changes to the selected element. No-op without a selection.
    pub fn update_selected(&mut self, changes: Map<String, Value>) -> Result<(), ActionError> {
        match self.selection {
            Some(selected) => self.dispatch(Action::UpdateElement {
                id: selected.id,
                changes,
            }),
            None => Ok(()),
        }
    }

    /// Remove the selected element. The selection clears as a consequence.
    pub fn remove_selected(&mut self) -> Result<(), ActionError> {
        match self.selection {
            Some(selected) => self.dispatch(Action::RemoveElement { id: selected.id }),
            None => Ok(()),
        }
    }

    fn commit(&mut self, next: EditorState) {
        let replaced = !same_document(self.state.ui_schema.as_ref(), next.ui_schema.as_ref());
        self.state = next;
        if replaced {
            self.selection = sync_selection(self.selection, self.state.ui_schema());
        }
    }

    // ─── Loading ─────────────────────────────────────────────────────────

    /// Fetch both documents from the schema service in the background.
    ///
    /// Must be called from within a tokio runtime. Results are not applied
    /// until `apply_pending` or `next_loaded` is called. A failed load is
    /// logged and leaves that document unloaded; if the UI schema fails and
    /// `generate_missing_ui_schema` is set, one is generated from the data
    /// schema instead. Starting a new round discards results of the previous
    /// one that were not yet applied.
    ///
    /// Each handle resolves to whether its task handed a document to the
    /// session.
    pub fn start_loading(&mut self) -> [JoinHandle<bool>; 2] {
        let (tx, rx) = mpsc::unbounded_channel();
        if self.loaded_rx.replace(rx).is_some() {
            log::debug!("restarting load; unapplied results of the previous round dropped");
        }

        let schema_task = {
            let service = Arc::clone(&self.schema_service);
            let tx = tx.clone();
            tokio::spawn(async move {
                match service.schema().await {
                    Ok(schema) => deliver(&tx, Action::SetSchema(schema)),
                    Err(e) => {
                        log::warn!("data schema load failed: {e}");
                        false
                    }
                }
            })
        };

        let ui_schema_task = {
            let service = Arc::clone(&self.schema_service);
            let config = self.config.clone();
            tokio::spawn(async move {
                match service.ui_schema().await {
                    Ok(ui_schema) => deliver(&tx, Action::SetUiSchema(ui_schema)),
                    Err(e) if config.generate_missing_ui_schema => {
                        log::info!("UI schema load failed ({e}); generating from data schema");
                        match service.schema().await {
                            Ok(schema) => {
                                let generated = generate_ui_schema(&schema, config.generated_root);
                                deliver(&tx, Action::SetUiSchema(generated))
                            }
                            Err(e) => {
                                log::warn!("cannot generate UI schema: {e}");
                                false
                            }
                        }
                    }
                    Err(e) => {
                        log::warn!("UI schema load failed: {e}");
                        false
                    }
                }
            })
        };

        [schema_task, ui_schema_task]
    }

    /// Apply every load result that has arrived. Returns how many were applied.
    pub fn apply_pending(&mut self) -> usize {
        let Some(rx) = self.loaded_rx.as_mut() else {
            return 0;
        };
        let mut arrived = Vec::new();
        let closed = loop {
            match rx.try_recv() {
                Ok(action) => arrived.push(action),
                Err(TryRecvError::Empty) => break false,
                Err(TryRecvError::Disconnected) => break true,
            }
        };
        if closed {
            self.loaded_rx = None;
        }

        let applied = arrived.len();
        for action in arrived {
            self.apply_loaded(action);
        }
        applied
    }

    /// Wait for the next load result and apply it.
    ///
    /// Returns `false` without waiting further once every load task has
    /// finished and nothing is left to apply, including after failed loads
    /// or when no load was started.
    pub async fn next_loaded(&mut self) -> bool {
        let Some(rx) = self.loaded_rx.as_mut() else {
            return false;
        };
        match rx.recv().await {
            Some(action) => {
                self.apply_loaded(action);
                true
            }
            None => {
                self.loaded_rx = None;
                false
            }
        }
    }

    fn apply_loaded(&mut self, action: Action) {
        let name = action.name();
        if let Err(e) = self.dispatch(action) {
            log::warn!("loaded {name} rejected: {e}");
        }
    }
}

fn deliver(tx: &mpsc::UnboundedSender<Action>, action: Action) -> bool {
    let delivered = tx.send(action).is_ok();
    if !delivered {
        log::debug!("session closed; discarding loaded document");
    }
    delivered
}

fn same_document(a: Option<&Arc<UiSchemaElement>>, b: Option<&Arc<UiSchemaElement>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}
