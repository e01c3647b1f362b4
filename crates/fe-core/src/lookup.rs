//! Id-based lookup over UI schema trees.
//!
//! Every traversal is a deterministic depth-first pre-order walk, so the
//! "first match" of a lookup is well defined even if a tree were ever to
//! carry a duplicate id.

use crate::id::ElementId;
use crate::model::UiSchemaElement;

/// Pre-order iterator over a tree.
pub struct Walk<'a> {
    stack: Vec<&'a UiSchemaElement>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a UiSchemaElement;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Push in reverse so the first child is visited next
        self.stack
            .extend(node.elements().iter().rev().map(|child| &**child));
        Some(node)
    }
}

/// Visit `root` and all of its descendants in document order.
pub fn walk(root: &UiSchemaElement) -> Walk<'_> {
    Walk { stack: vec![root] }
}

/// Find the element with `id` in `root`.
#[must_use]
pub fn find_by_id(root: &UiSchemaElement, id: ElementId) -> Option<&UiSchemaElement> {
    let found = walk(root).find(|node| node.id == id);
    log::trace!("find_by_id {} -> {}", id.short(), found.is_some());
    found
}

/// `find_by_id` over a possibly not-yet-loaded document.
#[must_use]
pub fn try_find_by_id(root: Option<&UiSchemaElement>, id: ElementId) -> Option<&UiSchemaElement> {
    root.and_then(|root| find_by_id(root, id))
}

/// Find the container that directly holds `id`. `None` for the root itself
/// or an absent id.
#[must_use]
pub fn find_parent(root: &UiSchemaElement, id: ElementId) -> Option<&UiSchemaElement> {
    walk(root).find(|node| node.elements().iter().any(|child| child.id == id))
}

/// Ids from the root down to `id`, inclusive. `None` if `id` is absent.
pub fn path_to(root: &UiSchemaElement, id: ElementId) -> Option<Vec<ElementId>> {
    if root.id == id {
        return Some(vec![root.id]);
    }
    root.elements().iter().find_map(|child| {
        path_to(child, id).map(|mut path| {
            path.insert(0, root.id);
            path
        })
    })
}

/// All ids in document order.
pub fn collect_ids(root: &UiSchemaElement) -> Vec<ElementId> {
    walk(root).map(|node| node.id).collect()
}
