//! Integration tests: loading, lookup, and structural edits (fe-core).
//!
//! Exercises the document model through its public API on a realistic
//! person/address form.

use fe_core::lookup::{collect_ids, walk};
use fe_core::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;

fn load() -> (DataSchema, Arc<UiSchemaElement>) {
    let schema = DataSchema::from_json_str(include_str!("fixtures/person.schema.json")).unwrap();
    let ui = UiSchemaElement::from_json_str(include_str!("fixtures/person.uischema.json")).unwrap();
    (schema, Arc::new(ui))
}

// ─── Loading ────────────────────────────────────────────────────────────

#[test]
fn fixture_loads_with_unique_ids() {
    let (_, ui) = load();
    let ids = collect_ids(&ui);
    let unique: HashSet<_> = ids.iter().copied().collect();
    assert_eq!(ids.len(), 9);
    assert_eq!(unique.len(), ids.len());
}

#[test]
fn loading_twice_mints_new_ids() {
    let (_, a) = load();
    let (_, b) = load();
    let a_ids: HashSet<_> = collect_ids(&a).into_iter().collect();
    assert!(collect_ids(&b).iter().all(|id| !a_ids.contains(id)));
}

#[test]
fn fixture_is_lint_clean() {
    let (schema, ui) = load();
    let diags = lint_document(&ui, Some(&schema));
    assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");
}

#[test]
fn fixture_json_roundtrips() {
    let (_, ui) = load();
    let original: serde_json::Value =
        serde_json::from_str(include_str!("fixtures/person.uischema.json")).unwrap();
    assert_eq!(ui.to_json(), original);
}

// ─── Lookup ─────────────────────────────────────────────────────────────

#[test]
fn lookup_finds_every_element_and_nothing_else() {
    let (_, ui) = load();
    for node in walk(&ui) {
        let found = find_by_id(&ui, node.id).expect("present id must resolve");
        assert!(std::ptr::eq(found, node));
    }
    assert!(find_by_id(&ui, ElementId::generate()).is_none());
}

// ─── Edits ──────────────────────────────────────────────────────────────

#[test]
fn edits_preserve_ids_of_untouched_elements() {
    let (_, ui) = load();
    let before: HashSet<_> = collect_ids(&ui).into_iter().collect();

    let group = ui.elements()[2].id;
    let label = create_label("Where do you live?");
    let label_id = label.id;
    let next = insert_child(&ui, group, 0, label).unwrap();

    let after: HashSet<_> = collect_ids(&next).into_iter().collect();
    assert!(before.is_subset(&after));
    assert_eq!(after.difference(&before).copied().collect::<Vec<_>>(), [label_id]);
}

#[test]
fn move_then_remove_sequence() {
    let (_, ui) = load();
    let row = ui.elements()[1].id;
    let nationality = ui.elements()[3].id;

    let moved = move_element(&ui, nationality, row, 0).unwrap();
    assert_eq!(moved.elements().len(), 3);
    assert_eq!(moved.elements()[1].elements()[0].id, nationality);

    let removed = remove_element(&moved, row).unwrap();
    assert!(find_by_id(&removed, nationality).is_none());
    assert_eq!(removed.elements().len(), 2);
}

#[test]
fn update_control_label_roundtrips_to_json() {
    let (_, ui) = load();
    let name = ui.elements()[1].elements()[0].id;
    let changes = json!({ "label": "Full name", "options.focus": true });
    let next = update_element(&ui, name, changes.as_object().unwrap()).unwrap();

    assert_eq!(
        find_by_id(&next, name).unwrap().to_json(),
        json!({
            "type": "Control",
            "scope": "#/properties/name",
            "label": "Full name",
            "options": { "focus": true }
        })
    );
}

#[test]
fn generated_schema_covers_fixture_properties() {
    let (schema, _) = load();
    let ui = generate_ui_schema(&schema, LayoutType::VerticalLayout);
    assert_eq!(ui.elements().len(), 4);
    assert!(lint_document(&ui, Some(&schema)).is_empty());
}
