//! Tests for tree mutation: append_child, insert_before, replace_child,
//! remove_child, fragment splicing, and cloning.

use alder_dom::{Document, DomError, NodeId, NodeKind};

/// Helper to create an element node and return its id.
fn element(document: &mut Document, tag: &str) -> NodeId {
    document.create_element(tag)
}

/// Helper to append and assert the returned id.
fn append(document: &mut Document, parent: NodeId, child: NodeId) {
    assert_eq!(document.append_child(parent, child).unwrap(), child);
}

// ========== append_child ==========

#[test]
fn test_append_child_sets_parent_and_order() {
    let mut document = Document::new();
    let parent = element(&mut document, "div");
    append(&mut document, NodeId::ROOT, parent);

    let a = element(&mut document, "a");
    let b = element(&mut document, "b");
    append(&mut document, parent, a);
    append(&mut document, parent, b);

    assert_eq!(document.children(parent), &[a, b]);
    assert_eq!(document.parent(a), Some(parent));
    assert_eq!(document.parent(b), Some(parent));
    assert_eq!(document.next_sibling(a), Some(b));
    assert_eq!(document.prev_sibling(b), Some(a));
}

#[test]
fn test_append_child_detaches_from_previous_parent() {
    let mut document = Document::new();
    let first = element(&mut document, "div");
    let second = element(&mut document, "span");
    append(&mut document, NodeId::ROOT, first);
    append(&mut document, NodeId::ROOT, second);

    let child = element(&mut document, "p");
    append(&mut document, first, child);
    append(&mut document, second, child);

    // The child appears exactly once, under its new parent.
    assert_eq!(document.children(first), &[] as &[NodeId]);
    assert_eq!(document.children(second), &[child]);
    assert_eq!(document.parent(child), Some(second));
}

#[test]
fn test_append_child_rejects_cycles() {
    let mut document = Document::new();
    let outer = element(&mut document, "div");
    let inner = element(&mut document, "span");
    append(&mut document, NodeId::ROOT, outer);
    append(&mut document, outer, inner);

    assert_eq!(
        document.append_child(inner, outer),
        Err(DomError::HierarchyViolation)
    );
    assert_eq!(
        document.append_child(outer, outer),
        Err(DomError::HierarchyViolation)
    );
    // Nothing changed.
    assert_eq!(document.children(outer), &[inner]);
    assert_eq!(document.parent(outer), Some(NodeId::ROOT));
}

#[test]
fn test_append_child_rejects_leaf_parents() {
    let mut document = Document::new();
    let text = document.create_text("hi");
    append(&mut document, NodeId::ROOT, text);

    let stray = element(&mut document, "b");
    assert_eq!(
        document.append_child(text, stray),
        Err(DomError::HierarchyViolation)
    );
}

// ========== insert_before ==========

#[test]
fn test_insert_before_first_child() {
    let mut document = Document::new();
    let parent = element(&mut document, "div");
    append(&mut document, NodeId::ROOT, parent);

    let existing = element(&mut document, "b");
    append(&mut document, parent, existing);

    let new_child = element(&mut document, "a");
    assert_eq!(
        document.insert_before(parent, new_child, Some(existing)).unwrap(),
        new_child
    );

    assert_eq!(document.children(parent), &[new_child, existing]);
    assert_eq!(document.parent(new_child), Some(parent));
    assert_eq!(document.next_sibling(new_child), Some(existing));
    assert_eq!(document.prev_sibling(new_child), None);
}

#[test]
fn test_insert_before_middle() {
    let mut document = Document::new();
    let parent = element(&mut document, "div");
    append(&mut document, NodeId::ROOT, parent);

    let a = element(&mut document, "a");
    let c = element(&mut document, "c");
    append(&mut document, parent, a);
    append(&mut document, parent, c);

    let b = element(&mut document, "b");
    assert_eq!(document.insert_before(parent, b, Some(c)).unwrap(), b);

    assert_eq!(document.children(parent), &[a, b, c]);
}

#[test]
fn test_insert_before_none_appends() {
    let mut document = Document::new();
    let parent = element(&mut document, "div");
    append(&mut document, NodeId::ROOT, parent);

    let a = element(&mut document, "a");
    append(&mut document, parent, a);
    let b = element(&mut document, "b");
    assert_eq!(document.insert_before(parent, b, None).unwrap(), b);

    assert_eq!(document.children(parent), &[a, b]);
}

#[test]
fn test_insert_before_unknown_reference_fails_atomically() {
    let mut document = Document::new();
    let parent = element(&mut document, "div");
    let other = element(&mut document, "span");
    append(&mut document, NodeId::ROOT, parent);
    append(&mut document, NodeId::ROOT, other);

    // `other` is not a child of `parent`.
    let orphan = element(&mut document, "a");
    assert_eq!(
        document.insert_before(parent, orphan, Some(other)),
        Err(DomError::ReferenceNotFound)
    );
    // The failed insertion did not detach or attach anything.
    assert_eq!(document.parent(orphan), None);
    assert_eq!(document.children(parent), &[] as &[NodeId]);
}

// ========== remove_child ==========

#[test]
fn test_remove_child_middle_of_three() {
    let mut document = Document::new();
    let parent = element(&mut document, "div");
    append(&mut document, NodeId::ROOT, parent);

    let a = element(&mut document, "a");
    let b = element(&mut document, "b");
    let c = element(&mut document, "c");
    append(&mut document, parent, a);
    append(&mut document, parent, b);
    append(&mut document, parent, c);

    let removed = document.remove_child(parent, b).unwrap();

    assert_eq!(removed, b);
    assert_eq!(document.children(parent), &[a, c]);
    assert_eq!(document.parent(b), None);
    assert_eq!(document.next_sibling(a), Some(c));
}

#[test]
fn test_remove_child_not_a_child_fails() {
    let mut document = Document::new();
    let parent = element(&mut document, "div");
    let stranger = element(&mut document, "b");
    append(&mut document, NodeId::ROOT, parent);

    assert_eq!(
        document.remove_child(parent, stranger),
        Err(DomError::ReferenceNotFound)
    );
}

// ========== replace_child ==========

#[test]
fn test_replace_child_keeps_position() {
    let mut document = Document::new();
    let parent = element(&mut document, "div");
    append(&mut document, NodeId::ROOT, parent);

    let a = element(&mut document, "a");
    let b = element(&mut document, "b");
    let c = element(&mut document, "c");
    append(&mut document, parent, a);
    append(&mut document, parent, b);
    append(&mut document, parent, c);

    let replacement = element(&mut document, "x");
    let old = document.replace_child(parent, replacement, b).unwrap();

    assert_eq!(old, b);
    assert_eq!(document.children(parent), &[a, replacement, c]);
    assert_eq!(document.parent(b), None);
    assert_eq!(document.parent(replacement), Some(parent));
}

#[test]
fn test_replace_child_unknown_old_fails() {
    let mut document = Document::new();
    let parent = element(&mut document, "div");
    let stranger = element(&mut document, "b");
    let replacement = element(&mut document, "x");
    append(&mut document, NodeId::ROOT, parent);

    assert_eq!(
        document.replace_child(parent, replacement, stranger),
        Err(DomError::ReferenceNotFound)
    );
    assert_eq!(document.parent(replacement), None);
}

// ========== fragment splicing ==========

#[test]
fn test_fragment_insertion_splices_children() {
    let mut document = Document::new();
    let parent = element(&mut document, "div");
    append(&mut document, NodeId::ROOT, parent);
    let tail = element(&mut document, "z");
    append(&mut document, parent, tail);

    let fragment = document.create_fragment();
    let a = element(&mut document, "a");
    let b = element(&mut document, "b");
    append(&mut document, fragment, a);
    append(&mut document, fragment, b);

    assert_eq!(
        document.insert_before(parent, fragment, Some(tail)).unwrap(),
        fragment
    );

    // The fragment's children were spliced in order; the fragment is empty.
    assert_eq!(document.children(parent), &[a, b, tail]);
    assert_eq!(document.children(fragment), &[] as &[NodeId]);
    assert_eq!(document.parent(a), Some(parent));
    assert_eq!(document.parent(b), Some(parent));
    assert_eq!(document.parent(fragment), None);
}

#[test]
fn test_empty_fragment_insertion_is_noop() {
    let mut document = Document::new();
    let parent = element(&mut document, "div");
    append(&mut document, NodeId::ROOT, parent);

    let fragment = document.create_fragment();
    assert_eq!(document.append_child(parent, fragment).unwrap(), fragment);

    assert_eq!(document.children(parent), &[] as &[NodeId]);
}

// ========== clone_node ==========

#[test]
fn test_shallow_clone_copies_attributes_not_children() {
    let mut document = Document::new();
    let original = element(&mut document, "div");
    document.set_attribute(original, "id", "first");
    let child = element(&mut document, "span");
    append(&mut document, original, child);

    let clone = document.clone_node(original, false).unwrap();

    assert_ne!(clone, original);
    assert_eq!(document.node_kind(clone), Some(NodeKind::Element));
    assert_eq!(document.get_attribute(clone, "id"), Some("first"));
    assert_eq!(document.children(clone), &[] as &[NodeId]);

    // Attribute values are copies, not shared storage.
    document.set_attribute(clone, "id", "second");
    assert_eq!(document.get_attribute(original, "id"), Some("first"));
}

#[test]
fn test_deep_clone_recurses_and_reparents() {
    let mut document = Document::new();
    let original = element(&mut document, "ul");
    let item = element(&mut document, "li");
    let text = document.create_text("one");
    append(&mut document, original, item);
    append(&mut document, item, text);

    let clone = document.clone_node(original, true).unwrap();

    assert_eq!(document.children(clone).len(), 1);
    let item_clone = document.children(clone)[0];
    assert_ne!(item_clone, item);
    assert_eq!(document.parent(item_clone), Some(clone));
    assert_eq!(document.text_content(clone), "one");
    // The original subtree is untouched.
    assert_eq!(document.children(original), &[item]);
}

#[test]
fn test_clone_shares_listener_objects_but_not_sets() {
    use std::cell::Cell;
    use std::rc::Rc;

    let mut document = Document::new();
    let original = element(&mut document, "button");
    let hits = Rc::new(Cell::new(0));
    let hits_in_listener = Rc::clone(&hits);
    document.add_event_listener(
        original,
        "click",
        Rc::new(move |_| hits_in_listener.set(hits_in_listener.get() + 1)),
    );

    let clone = document.clone_node(original, false).unwrap();
    assert_eq!(document.listener_count(clone, "click"), 1);

    // The shared listener object observes dispatches from both nodes.
    assert_eq!(document.dispatch_event(original, "click"), 1);
    assert_eq!(document.dispatch_event(clone, "click"), 1);
    assert_eq!(hits.get(), 2);

    // Mutating one node's set leaves the other's set untouched.
    assert_eq!(document.remove_event_listeners(clone, "click"), 1);
    assert_eq!(document.listener_count(original, "click"), 1);
}
