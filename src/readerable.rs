//! The quick readerability check.
//!
//! fx: Decides whether or not the document is reader-able without parsing
//! the whole thing. Scores a handful of paragraph-ish nodes and bails out
//! as soon as the total clears the bar.

use crate::dom::{self, Document, NodeRef};
use crate::grabber::{has_unlikely_class_id, is_node_visible};
use crate::text;
use crate::walk;

/// Paragraphs shorter than this don't score at all.
const MIN_CONTENT_LENGTH: usize = 140;

/// Total score at which the document counts as readerable.
const READERABLE_SCORE: f64 = 20.0;

/// Does the node match the `li p` selector?
fn is_paragraph_in_list(node: &NodeRef) -> bool {
    dom::has_tag(node, &["p"]) && dom::ancestor_with_tag(node, "li").is_some()
}

/// Assign a readability score to a node.
fn node_score(node: &NodeRef) -> f64 {
    if !is_node_visible(node) {
        return 0.0;
    }
    if has_unlikely_class_id(node) {
        return 0.0;
    }
    if is_paragraph_in_list(node) {
        return 0.0;
    }

    let length = text::text_len(node);
    if length < MIN_CONTENT_LENGTH {
        return 0.0;
    }
    ((length - MIN_CONTENT_LENGTH) as f64).sqrt()
}

/// Check whether the document probably holds a readable article, without
/// running the full extraction.
#[must_use]
pub fn is_probably_readerable(doc: &Document) -> bool {
    let Some(root) = dom::document_element(doc) else {
        return false;
    };

    let mut score = 0.0;
    let stop = walk::skip_descendants(&root);
    let mut curr = walk::following(&root);
    while let Some(node) = curr {
        if stop.as_ref().is_some_and(|s| s.id == node.id) {
            break;
        }

        if dom::has_tag(&node, &["p", "pre"]) {
            score += node_score(&node);
            curr = walk::following(&node);
        } else if dom::has_tag(&node, &["br"])
            && node.parent().is_some_and(|p| dom::has_tag(&p, &["div"]))
        {
            // fx: consider <div> nodes which have <br> node(s) as well;
            // the whole parent is measured, so its other children are
            // skipped.
            let parent = node.parent().expect("checked above");
            score += node_score(&parent);
            curr = walk::skip_descendants(&parent);
        } else {
            curr = walk::following(&node);
            continue;
        }

        if score > READERABLE_SCORE {
            return true;
        }
    }
    false
}
