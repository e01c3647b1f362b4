pub mod config;
pub mod error;
pub mod palette;
pub mod properties;
pub mod reducer;
pub mod selection;
pub mod services;
pub mod session;

pub use config::EditorConfig;
pub use error::{ActionError, LoadError, PaletteError};
pub use palette::{ExamplePaletteService, IconRef, PaletteElement, PaletteService};
pub use properties::{
    ControlOptionsDecorator, DefaultPropertiesProvider, PropertiesService, PropertyKind,
    PropertySchema, PropertySchemas, PropertySchemasDecorator, PropertySchemasProvider,
};
pub use reducer::{Action, EditorState, reduce, try_reduce};
pub use selection::{SelectedElement, Selection, sync_selection};
pub use services::{ExampleSchemaService, SchemaService, StaticSchemaService};
pub use session::EditorSession;
