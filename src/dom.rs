//! DOM operations adapter.
//!
//! Thin wrappers over the `dom_query` crate, giving the rest of the engine a
//! stable, node-oriented vocabulary for the operations it needs. Everything
//! here works on `NodeRef` handles; tree structure mutations route through
//! this module so traversal code never touches `dom_query` directly.

// Re-export core types for the rest of the crate
pub use dom_query::{Document, NodeId, NodeRef, Selection};

// Re-export StrTendril: dom_query hands out reference-counted text
pub use tendril::StrTendril;

// === Parsing ===

/// Parse an HTML string into a document.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

/// Parse an HTML string as a fragment, without the html/head/body scaffolding.
#[inline]
#[must_use]
pub fn parse_fragment(html: &str) -> Document {
    Document::fragment(html)
}

/// Clone a document by round-tripping through its serialized form.
#[must_use]
pub fn clone_document(doc: &Document) -> Document {
    Document::from(doc.html().to_string())
}

/// Get the document's root element (usually `<html>`).
#[must_use]
pub fn document_element<'a>(doc: &'a Document) -> Option<NodeRef<'a>> {
    let mut child = doc.root().first_child();
    while let Some(node) = child {
        if node.is_element() {
            return Some(node);
        }
        child = node.next_sibling();
    }
    None
}

/// Get the document's `<body>` element.
#[must_use]
pub fn body<'a>(doc: &'a Document) -> Option<NodeRef<'a>> {
    doc.select("body").nodes().first().cloned()
}

// === Tag and attribute access ===

/// Check if a node is an element with one of the given (lowercase) tag names.
#[must_use]
pub fn has_tag(node: &NodeRef, tags: &[&str]) -> bool {
    if !node.is_element() {
        return false;
    }
    match node.node_name() {
        Some(name) => tags.iter().any(|t| name.eq_ignore_ascii_case(t)),
        None => false,
    }
}

/// Get an attribute value.
#[inline]
#[must_use]
pub fn attr(node: &NodeRef, name: &str) -> Option<String> {
    node.attr(name).map(|v| v.to_string())
}

/// Check if an attribute exists.
#[inline]
#[must_use]
pub fn has_attr(node: &NodeRef, name: &str) -> bool {
    node.has_attr(name)
}

/// Set an attribute value.
#[inline]
pub fn set_attr(node: &NodeRef, name: &str, value: &str) {
    node.set_attr(name, value);
}

/// Remove an attribute.
#[inline]
pub fn remove_attr(node: &NodeRef, name: &str) {
    node.remove_attr(name);
}

/// Check if an attribute's value equals the given string exactly.
#[must_use]
pub fn attr_eq(node: &NodeRef, name: &str, value: &str) -> bool {
    attr(node, name).is_some_and(|v| v == value)
}

/// Get all attributes as name/value pairs, in document order.
#[must_use]
pub fn attrs(node: &NodeRef) -> Vec<(String, String)> {
    node.attrs()
        .iter()
        .map(|a| (a.name.local.to_string(), a.value.to_string()))
        .collect()
}

// === Content access ===

/// Get the concatenated text content of a node and its descendants.
#[inline]
#[must_use]
pub fn text(node: &NodeRef) -> StrTendril {
    node.text()
}

/// Serialize a node to HTML, including the node itself.
#[inline]
#[must_use]
pub fn outer_html(node: &NodeRef) -> String {
    Selection::from(node.clone()).html().to_string()
}

/// Serialize a node's children to HTML.
#[inline]
#[must_use]
pub fn inner_html(node: &NodeRef) -> String {
    Selection::from(node.clone()).inner_html().to_string()
}

// === Structural queries ===

/// Count the element children of a node.
#[must_use]
pub fn element_child_count(node: &NodeRef) -> usize {
    let mut count = 0;
    let mut child = node.first_child();
    while let Some(n) = child {
        if n.is_element() {
            count += 1;
        }
        child = n.next_sibling();
    }
    count
}

/// Get the first element child of a node.
#[must_use]
pub fn first_element_child<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    let mut child = node.first_child();
    while let Some(n) = child {
        if n.is_element() {
            return Some(n);
        }
        child = n.next_sibling();
    }
    None
}

/// Collect the children of a node, including text and comment nodes.
#[must_use]
pub fn child_nodes<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    let mut out = Vec::new();
    let mut child = node.first_child();
    while let Some(n) = child {
        child = n.next_sibling();
        out.push(n);
    }
    out
}

/// Walk up from a node looking for an ancestor with the given tag.
///
/// The node itself counts as its own ancestor.
#[must_use]
pub fn ancestor_with_tag<'a>(node: &NodeRef<'a>, tag: &str) -> Option<NodeRef<'a>> {
    let mut curr = Some(node.clone());
    while let Some(n) = curr {
        if has_tag(&n, &[tag]) {
            return Some(n);
        }
        curr = n.parent();
    }
    None
}

// === Tree manipulation ===

/// Create a new, detached element in the document's tree.
#[inline]
#[must_use]
pub fn new_element<'a>(doc: &'a Document, tag: &str) -> NodeRef<'a> {
    doc.tree.new_element(tag)
}

/// Create a new, detached element in the same tree as an existing node.
#[inline]
#[must_use]
pub fn new_element_beside<'a>(node: &NodeRef<'a>, tag: &str) -> NodeRef<'a> {
    node.tree.new_element(tag)
}

/// Unlink a node (and its subtree) from its parent.
#[inline]
pub fn remove(node: &NodeRef) {
    node.remove_from_parent();
}

/// Append a node as the last child of a parent, moving it if attached.
#[inline]
pub fn append_child(parent: &NodeRef, child: &NodeRef) {
    parent.append_child(child);
}

/// Insert a node immediately before another, moving it if attached.
#[inline]
pub fn insert_before(node: &NodeRef, new: &NodeRef) {
    node.insert_siblings_before(new);
}

/// Put `new` in `old`'s place; `old` is unlinked.
pub fn replace_node(old: &NodeRef, new: &NodeRef) {
    old.insert_siblings_before(new);
    old.remove_from_parent();
}

/// Rename an element, keeping attributes and children.
#[inline]
pub fn rename(node: &NodeRef, tag: &str) {
    Selection::from(node.clone()).rename(tag);
}

/// Replace a node's children with the parsed fragment.
#[inline]
pub fn set_inner_html(node: &NodeRef, html: &str) {
    Selection::from(node.clone()).set_html(html);
}

/// Replace a node with the parsed fragment.
#[inline]
pub fn replace_with_html(node: &NodeRef, html: &str) {
    Selection::from(node.clone()).replace_with_html(html);
}

/// Replace a node's children with a single text node.
#[inline]
pub fn set_text_content(node: &NodeRef, content: &str) {
    set_inner_html(node, &escape_text(content));
}

/// Replace a text node's contents.
#[inline]
pub fn replace_text(node: &NodeRef, content: &str) {
    replace_with_html(node, &escape_text(content));
}

/// Escape a string for use as HTML text content.
#[must_use]
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}
