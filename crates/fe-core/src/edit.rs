//! Structural edits on UI schema trees.
//!
//! Every operation takes the current root and returns a new root. Only the
//! elements on the path from the root to the edited element are rebuilt;
//! all other subtrees are shared with the input by `Arc`, and every element
//! keeps its id.

use crate::error::DocumentError;
use crate::id::ElementId;
use crate::lookup::{find_parent, path_to};
use crate::model::{ControlLabel, ElementKind, UiSchemaElement};
use crate::scope::Scope;
use serde_json::{Map, Value};
use std::sync::Arc;

type EditResult = Result<Arc<UiSchemaElement>, DocumentError>;

/// Insert `element` into the container `parent` at `index`.
/// Indices past the end append.
pub fn insert_child(
    root: &Arc<UiSchemaElement>,
    parent: ElementId,
    index: usize,
    element: impl Into<Arc<UiSchemaElement>>,
) -> EditResult {
    let element = element.into();
    replace_in(root, parent, &mut |container| {
        if !container.is_container() {
            return Err(DocumentError::NotAContainer {
                id: container.id,
                element_type: container.element_type(),
            });
        }
        let mut elements = container.elements().to_vec();
        let at = index.min(elements.len());
        elements.insert(at, element.clone());
        Ok(container.with_elements(elements))
    })
}

/// Remove the subtree rooted at `id`.
pub fn remove_element(root: &Arc<UiSchemaElement>, id: ElementId) -> EditResult {
    if root.id == id {
        return Err(DocumentError::RootElement);
    }
    let parent = find_parent(root, id).ok_or(DocumentError::NotFound(id))?.id;
    replace_in(root, parent, &mut |container| {
        let elements = container
            .elements()
            .iter()
            .filter(|child| child.id != id)
            .cloned()
            .collect();
        Ok(container.with_elements(elements))
    })
}

/// Detach `id` and insert it into `new_parent` at `index`.
///
/// `index` is a position in `new_parent` after the element has been
/// detached, so moving within one container behaves like "remove, then
/// insert at".
pub fn move_element(
    root: &Arc<UiSchemaElement>,
    id: ElementId,
    new_parent: ElementId,
    index: usize,
) -> EditResult {
    if root.id == id {
        return Err(DocumentError::RootElement);
    }
    let moved = find_parent(root, id)
        .and_then(|parent| parent.elements().iter().find(|child| child.id == id))
        .cloned()
        .ok_or(DocumentError::NotFound(id))?;
    let target_path = path_to(root, new_parent).ok_or(DocumentError::NotFound(new_parent))?;
    if target_path.contains(&moved.id) {
        return Err(DocumentError::MoveIntoDescendant { id });
    }
    let detached = remove_element(root, id)?;
    insert_child(&detached, new_parent, index, moved)
}

/// Apply a set of property changes to the element `id`.
///
/// Recognised keys: `label`, `text`, `scope` (per element type), `options`
/// (whole object or null), `options.<key>` (single option, null removes),
/// and `rule`. Any other key is rejected.
pub fn update_element(
    root: &Arc<UiSchemaElement>,
    id: ElementId,
    changes: &Map<String, Value>,
) -> EditResult {
    replace_in(root, id, &mut |element| {
        let mut next = element.clone();
        for (name, value) in changes {
            apply_change(&mut next, name, value)?;
        }
        Ok(next)
    })
}

// ─── Helpers ─────────────────────────────────────────────────────────────

/// Rebuild the path from `node` to `target`, replacing `target` with the
/// result of `f`. Errors with `NotFound` if `target` is absent.
fn replace_in(
    node: &Arc<UiSchemaElement>,
    target: ElementId,
    f: &mut dyn FnMut(&UiSchemaElement) -> Result<UiSchemaElement, DocumentError>,
) -> EditResult {
    replace_rec(node, target, f)?.ok_or(DocumentError::NotFound(target))
}

fn replace_rec(
    node: &Arc<UiSchemaElement>,
    target: ElementId,
    f: &mut dyn FnMut(&UiSchemaElement) -> Result<UiSchemaElement, DocumentError>,
) -> Result<Option<Arc<UiSchemaElement>>, DocumentError> {
    if node.id == target {
        return f(node.as_ref()).map(|replaced| Some(Arc::new(replaced)));
    }
    for (i, child) in node.elements().iter().enumerate() {
        if let Some(new_child) = replace_rec(child, target, f)? {
            let mut elements = node.elements().to_vec();
            elements[i] = new_child;
            return Ok(Some(Arc::new(node.with_elements(elements))));
        }
    }
    Ok(None)
}

fn apply_change(
    element: &mut UiSchemaElement,
    name: &str,
    value: &Value,
) -> Result<(), DocumentError> {
    if let Some(key) = name.strip_prefix("options.") {
        let options = element.options.get_or_insert_with(Map::new);
        if value.is_null() {
            options.remove(key);
        } else {
            options.insert(key.to_string(), value.clone());
        }
        if options.is_empty() {
            element.options = None;
        }
        return Ok(());
    }

    let element_type = element.element_type();
    let unknown = || DocumentError::UnknownProperty {
        element_type,
        name: name.to_string(),
    };

    match (name, &mut element.kind) {
        ("options", _) => {
            element.options = match value {
                Value::Null => None,
                Value::Object(map) => Some(map.clone()),
                _ => return Err(mismatch(name, "an object or null")),
            };
        }
        ("rule", _) => {
            element.rule = (!value.is_null()).then(|| value.clone());
        }
        (
            "label",
            ElementKind::Group { label, .. }
            | ElementKind::Categorization { label, .. }
            | ElementKind::Category { label, .. },
        ) => {
            *label = match value {
                Value::Null => None,
                Value::String(text) => Some(text.clone()),
                _ => return Err(mismatch(name, "a string or null")),
            };
        }
        ("label", ElementKind::Control { label, .. }) => {
            *label = if value.is_null() {
                None
            } else {
                Some(
                    serde_json::from_value::<ControlLabel>(value.clone())
                        .map_err(|_| mismatch(name, "a string, boolean, or label object"))?,
                )
            };
        }
        ("text", ElementKind::Label { text }) => {
            *text = value
                .as_str()
                .ok_or_else(|| mismatch(name, "a string"))?
                .to_string();
        }
        ("scope", ElementKind::Control { scope, .. }) => {
            let raw = value.as_str().ok_or_else(|| mismatch(name, "a string"))?;
            Scope::parse(raw)?;
            *scope = raw.to_string();
        }
        _ => return Err(unknown()),
    }
    Ok(())
}

fn mismatch(name: &str, expected: &'static str) -> DocumentError {
    DocumentError::PropertyMismatch {
        name: name.to_string(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::{collect_ids, find_by_id};
    use crate::model::ElementType;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample() -> Arc<UiSchemaElement> {
        Arc::new(
            UiSchemaElement::from_json(&json!({
                "type": "VerticalLayout",
                "elements": [
                    { "type": "Label", "text": "Title" },
                    {
                        "type": "Group",
                        "label": "Address",
                        "elements": [
                            { "type": "Control", "scope": "#/properties/street" }
                        ]
                    }
                ]
            }))
            .unwrap(),
        )
    }

    fn changes(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn insert_clamps_index_and_shares_siblings() {
        let root = sample();
        let label = UiSchemaElement::new(ElementKind::Label { text: "new".into() });
        let label_id = label.id;

        let next = insert_child(&root, root.id, 99, label).unwrap();
        assert_eq!(next.id, root.id);
        assert_eq!(next.elements().len(), 3);
        assert_eq!(next.elements()[2].id, label_id);
        // Untouched subtrees are shared, not copied
        assert!(Arc::ptr_eq(&next.elements()[1], &root.elements()[1]));
        // The input tree is unchanged
        assert_eq!(root.elements().len(), 2);
    }

    #[test]
    fn insert_into_leaf_fails() {
        let root = sample();
        let leaf = root.elements()[0].id;
        let err = insert_child(&root, leaf, 0, UiSchemaElement::new(ElementKind::Label {
            text: "x".into(),
        }))
        .unwrap_err();
        assert!(matches!(
            err,
            DocumentError::NotAContainer {
                element_type: ElementType::Label,
                ..
            }
        ));
    }

    #[test]
    fn remove_drops_whole_subtree() {
        let root = sample();
        let group = &root.elements()[1];
        let control = group.elements()[0].id;

        let next = remove_element(&root, group.id).unwrap();
        let ids = collect_ids(&next);
        assert!(!ids.contains(&group.id));
        assert!(!ids.contains(&control));
        assert_eq!(ids.len(), 2);
    }

    #[test]
    fn remove_root_is_rejected() {
        let root = sample();
        assert!(matches!(
            remove_element(&root, root.id),
            Err(DocumentError::RootElement)
        ));
    }

    #[test]
    fn move_keeps_id_and_reorders() {
        let root = sample();
        let title = root.elements()[0].id;
        let group = root.elements()[1].id;

        let next = move_element(&root, title, group, 1).unwrap();
        assert_eq!(next.elements().len(), 1);
        let moved_group = &next.elements()[0];
        assert_eq!(moved_group.id, group);
        assert_eq!(moved_group.elements()[1].id, title);
    }

    #[test]
    fn move_into_own_subtree_is_rejected() {
        let root = sample();
        let group = root.elements()[1].id;
        assert!(matches!(
            move_element(&root, group, group, 0),
            Err(DocumentError::MoveIntoDescendant { .. })
        ));

        let inner = Arc::new(UiSchemaElement::new(ElementKind::VerticalLayout {
            elements: Vec::new(),
        }));
        let inner_id = inner.id;
        let nested = insert_child(&root, group, 0, inner).unwrap();
        assert!(matches!(
            move_element(&nested, group, inner_id, 0),
            Err(DocumentError::MoveIntoDescendant { id }) if id == group
        ));
    }

    #[test]
    fn move_to_absent_parent_is_not_found() {
        let root = sample();
        let title = root.elements()[0].id;
        let missing = ElementId::generate();
        assert!(matches!(
            move_element(&root, title, missing, 0),
            Err(DocumentError::NotFound(id)) if id == missing
        ));
    }

    #[test]
    fn update_label_and_options() {
        let root = sample();
        let group = root.elements()[1].id;

        let next = update_element(
            &root,
            group,
            &changes(json!({ "label": "Home", "options.collapsed": true })),
        )
        .unwrap();
        let updated = find_by_id(&next, group).unwrap();
        assert_eq!(updated.caption(), Some("Home"));
        assert_eq!(updated.options.as_ref().unwrap()["collapsed"], json!(true));

        let cleared = update_element(&next, group, &changes(json!({ "options.collapsed": null })))
            .unwrap();
        assert!(find_by_id(&cleared, group).unwrap().options.is_none());
    }

    #[test]
    fn update_rejects_unknown_and_mismatched() {
        let root = sample();
        let title = root.elements()[0].id;

        assert!(matches!(
            update_element(&root, title, &changes(json!({ "scope": "#" }))),
            Err(DocumentError::UnknownProperty { .. })
        ));
        assert!(matches!(
            update_element(&root, title, &changes(json!({ "text": 4 }))),
            Err(DocumentError::PropertyMismatch { .. })
        ));
    }

    #[test]
    fn update_scope_is_validated() {
        let root = sample();
        let control = root.elements()[1].elements()[0].id;
        assert!(matches!(
            update_element(&root, control, &changes(json!({ "scope": "properties/x" }))),
            Err(DocumentError::InvalidScope { .. })
        ));
        let next =
            update_element(&root, control, &changes(json!({ "scope": "#/properties/city" })))
                .unwrap();
        assert_eq!(
            find_by_id(&next, control).unwrap().scope(),
            Some("#/properties/city")
        );
    }
}
