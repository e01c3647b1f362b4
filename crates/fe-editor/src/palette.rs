//! Palette service: templates for new elements.
//!
//! A palette entry stores a factory, not an element. Each placement calls
//! the factory again, so every placed element gets freshly minted ids.

use fe_core::{ElementType, LayoutType, UiSchemaElement, create_label, create_layout};
use std::fmt;
use std::sync::Arc;

/// Which icon a host should render next to a palette entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconRef {
    Horizontal,
    Vertical,
    Group,
    Label,
    Control,
    Categorization,
}

type ElementFactory = Arc<dyn Fn() -> UiSchemaElement + Send + Sync>;

/// One draggable palette entry.
#[derive(Clone)]
pub struct PaletteElement {
    pub element_type: ElementType,
    pub label: String,
    pub icon: IconRef,
    factory: ElementFactory,
}

impl PaletteElement {
    pub fn new(
        element_type: ElementType,
        label: impl Into<String>,
        icon: IconRef,
        factory: impl Fn() -> UiSchemaElement + Send + Sync + 'static,
    ) -> Self {
        Self {
            element_type,
            label: label.into(),
            icon,
            factory: Arc::new(factory),
        }
    }

    /// Build a new element from this template.
    pub fn create(&self) -> UiSchemaElement {
        (self.factory)()
    }
}

impl fmt::Debug for PaletteElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaletteElement")
            .field("element_type", &self.element_type)
            .field("label", &self.label)
            .field("icon", &self.icon)
            .finish_non_exhaustive()
    }
}

pub trait PaletteService: Send + Sync {
    /// All entries, in display order. Static for the lifetime of the service.
    fn palette_elements(&self) -> &[PaletteElement];

    /// The entry for `element_type`, if offered.
    fn find(&self, element_type: ElementType) -> Option<&PaletteElement> {
        self.palette_elements()
            .iter()
            .find(|entry| entry.element_type == element_type)
    }
}

/// Layouts, groups, and labels.
#[derive(Debug, Clone)]
pub struct ExamplePaletteService {
    elements: Vec<PaletteElement>,
}

impl ExamplePaletteService {
    pub fn new() -> Self {
        Self {
            elements: vec![
                PaletteElement::new(
                    ElementType::HorizontalLayout,
                    "Horizontal Layout",
                    IconRef::Horizontal,
                    || create_layout(LayoutType::HorizontalLayout),
                ),
                PaletteElement::new(
                    ElementType::VerticalLayout,
                    "Vertical Layout",
                    IconRef::Vertical,
                    || create_layout(LayoutType::VerticalLayout),
                ),
                PaletteElement::new(ElementType::Group, "Group", IconRef::Group, || {
                    create_layout(LayoutType::Group)
                }),
                PaletteElement::new(ElementType::Label, "Label", IconRef::Label, || {
                    create_label("")
                }),
            ],
        }
    }
}

impl Default for ExamplePaletteService {
    fn default() -> Self {
        Self::new()
    }
}

impl PaletteService for ExamplePaletteService {
    fn palette_elements(&self) -> &[PaletteElement] {
        &self.elements
    }
}
