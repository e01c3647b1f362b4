use fe_core::LayoutType;
use serde::{Deserialize, Serialize};

/// Configuration for an `EditorSession`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// When the schema service cannot provide a UI schema, generate one from
    /// the data schema instead of leaving the document empty. Default: **true**.
    pub generate_missing_ui_schema: bool,

    /// Root layout used for generated UI schemas. Default: **VerticalLayout**.
    pub generated_root: LayoutType,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            generate_missing_ui_schema: true,
            generated_root: LayoutType::VerticalLayout,
        }
    }
}

impl EditorConfig {
    /// Parse a JSON config; missing fields take their defaults.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
