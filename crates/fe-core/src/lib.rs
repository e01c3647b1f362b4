pub mod edit;
pub mod error;
pub mod generators;
pub mod id;
pub mod lint;
pub mod lookup;
pub mod model;
pub mod outline;
pub mod schema;
pub mod scope;

pub use edit::{insert_child, move_element, remove_element, update_element};
pub use error::DocumentError;
pub use generators::{
    create_categorization, create_category, create_control, create_group, create_label,
    create_layout, generate_ui_schema,
};
pub use id::ElementId;
pub use lint::{LintDiagnostic, LintSeverity, lint_document};
pub use lookup::{find_by_id, find_parent, try_find_by_id};
pub use model::*;
pub use outline::emit_outline;
pub use schema::DataSchema;
pub use scope::Scope;

// Property change sets
pub use serde_json::{Map, Value};
