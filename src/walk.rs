//! Document-order traversal primitives.
//!
//! All walks are expressed as explicit cursor-stepping functions rather than
//! recursion, so a pass can keep going after unlinking or replacing the node
//! under the cursor: the next position is always computed before the tree is
//! touched. The forward and backward removal walks are not interchangeable —
//! backward removal cleans children before their parents are re-evaluated.

use crate::dom::{self, NodeRef};
use crate::text;

/// The node that follows in document order: first child, else next sibling,
/// else the nearest ancestor's next sibling.
#[must_use]
pub fn following<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    node.first_child().or_else(|| skip_descendants(node))
}

/// The node that follows in document order, never descending into the
/// current node's children.
#[must_use]
pub fn skip_descendants<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    let mut curr = Some(node.clone());
    while let Some(n) = curr {
        if let Some(next) = n.next_sibling() {
            return Some(next);
        }
        curr = n.parent();
    }
    None
}

/// The node that precedes in document order; mirror of `following`.
#[must_use]
pub fn previous<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    if let Some(prev) = node.prev_sibling() {
        let mut deepest = prev;
        while let Some(last) = deepest.last_child() {
            deepest = last;
        }
        return Some(deepest);
    }
    node.parent()
}

/// Unlink a node and return the next position in document order.
#[must_use]
pub fn remove_and_get_following<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    let next = skip_descendants(node);
    dom::remove(node);
    next
}

/// The last descendant of `root` in document order, or `root` itself.
#[must_use]
pub fn last_node<'a>(root: &NodeRef<'a>) -> NodeRef<'a> {
    let mut curr = root.clone();
    while let Some(last) = curr.last_child() {
        curr = last;
    }
    curr
}

#[inline]
fn reached(node: &NodeRef, stop: &Option<NodeRef>) -> bool {
    stop.as_ref().is_some_and(|s| s.id == node.id)
}

/// Unlink every descendant of `root` for which the predicate holds, walking
/// forward. The predicate may have side effects, but must only mutate the
/// node it is given.
pub fn remove_descendants_if<F>(root: &NodeRef, mut pred: F)
where
    F: FnMut(&NodeRef) -> bool,
{
    let stop = skip_descendants(root);
    let mut curr = following(root);
    while let Some(node) = curr {
        if reached(&node, &stop) {
            break;
        }
        curr = if pred(&node) {
            remove_and_get_following(&node)
        } else {
            following(&node)
        };
    }
}

/// Unlink every descendant of `root` for which the predicate holds, walking
/// backward so children are cleaned before their parents are inspected.
pub fn bw_remove_descendants_if<F>(root: &NodeRef, mut pred: F)
where
    F: FnMut(&NodeRef) -> bool,
{
    let mut curr = last_node(root);
    while curr.id != root.id {
        let prev = previous(&curr);
        if pred(&curr) {
            dom::remove(&curr);
        }
        match prev {
            Some(p) => curr = p,
            None => break,
        }
    }
}

/// Check a condition against all descendants of a node; true for none.
#[must_use]
pub fn forall_descendants<F>(root: &NodeRef, pred: F) -> bool
where
    F: Fn(&NodeRef) -> bool,
{
    let stop = skip_descendants(root);
    let mut curr = following(root);
    while let Some(node) = curr {
        if reached(&node, &stop) {
            break;
        }
        if !pred(&node) {
            return false;
        }
        curr = following(&node);
    }
    true
}

/// Does the node have a descendant for which the predicate holds?
#[must_use]
pub fn has_such_descendant<F>(root: &NodeRef, pred: F) -> bool
where
    F: Fn(&NodeRef) -> bool,
{
    !forall_descendants(root, |n| !pred(n))
}

/// Run a replacement function on all descendants of a node. The function
/// returns the node to continue from, so an in-place replacement is visited
/// exactly once.
pub fn change_descendants<'a, F>(root: &NodeRef<'a>, mut replace: F)
where
    F: FnMut(NodeRef<'a>) -> NodeRef<'a>,
{
    let stop = skip_descendants(root);
    let mut curr = following(root);
    while let Some(node) = curr {
        if reached(&node, &stop) {
            break;
        }
        let node = replace(node);
        curr = following(&node);
    }
}

/// Sum a calculation over all descendants of a node.
#[must_use]
pub fn total_for_descendants<F>(root: &NodeRef, calc: F) -> f64
where
    F: Fn(&NodeRef) -> f64,
{
    let stop = skip_descendants(root);
    let mut total = 0.0;
    let mut curr = following(root);
    while let Some(node) = curr {
        if reached(&node, &stop) {
            break;
        }
        total += calc(&node);
        curr = following(&node);
    }
    total
}

/// Count the descendants of a node for which the predicate holds.
#[must_use]
pub fn count_such_descendants<F>(root: &NodeRef, pred: F) -> usize
where
    F: Fn(&NodeRef) -> bool,
{
    let stop = skip_descendants(root);
    let mut count = 0;
    let mut curr = following(root);
    while let Some(node) = curr {
        if reached(&node, &stop) {
            break;
        }
        if pred(&node) {
            count += 1;
        }
        curr = following(&node);
    }
    count
}

/// The first descendant with the given tag, or None.
#[must_use]
pub fn first_descendant_with_tag<'a>(root: &NodeRef<'a>, tag: &str) -> Option<NodeRef<'a>> {
    let stop = skip_descendants(root);
    let mut curr = following(root);
    while let Some(node) = curr {
        if reached(&node, &stop) {
            break;
        }
        if dom::has_tag(&node, &[tag]) {
            return Some(node);
        }
        curr = following(&node);
    }
    None
}

/// fx: Finds the next element, starting from the given node, and ignoring
/// whitespace in between. Returns None if a non-empty text node comes first.
#[must_use]
pub fn next_element<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    let mut curr = node.next_sibling();
    while let Some(n) = curr {
        if n.is_element() {
            return Some(n);
        }
        if text::text_len(&n) > 0 {
            return None;
        }
        curr = n.next_sibling();
    }
    None
}

/// Mirror of `next_element`, searching backward.
#[must_use]
pub fn prev_element<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    let mut curr = node.prev_sibling();
    while let Some(n) = curr {
        if n.is_element() {
            return Some(n);
        }
        if text::text_len(&n) > 0 {
            return None;
        }
        curr = n.prev_sibling();
    }
    None
}
