//! The article grabber.
//!
//! fx: Using a variety of metrics (content score, classname, element types),
//! find the content that is most likely to be the stuff a user wants to
//! read. Then return it wrapped up in a div.
//!
//! Each attempt works on a fresh copy of the prepared document, so the retry
//! loop can weaken a heuristic flag and start over without undoing anything.

use crate::annotations::Annotations;
use crate::cleanup;
use crate::dom::{self, Document, NodeRef};
use crate::error::{Error, Result};
use crate::extract::Session;
use crate::patterns::{matches_opt, BYLINE, CANDIDATE, NEGATIVE, POSITIVE, SENTENCE_DOT, UNLIKELY};
use crate::preprocess;
use crate::text;
use crate::walk;

/// fx: The number of top candidates to consider when analysing how tight
/// the competition is among candidates.
const N_TOP_CANDIDATES: usize = 5;

/// How many of the top candidates must share an ancestor for the top to be
/// promoted to it.
const MINIMUM_TOP_CANDIDATES: usize = 3;

/// Tags whose contents get scored without further ado.
const TAGS_TO_SCORE: &[&str] = &["section", "h2", "h3", "h4", "h5", "h6", "p", "td", "pre"];

/// Container tags that are dropped when they hold no content at all.
const DIV_ELEMS: &[&str] = &["div", "section", "header", "h1", "h2", "h3", "h4", "h5", "h6"];

/// Block-level tags; a div holding none of these is really a paragraph.
const DIV_TO_P_ELEMS: &[&str] = &[
    "a", "blockquote", "dl", "div", "img", "ol", "p", "pre", "table", "ul", "select",
];

/// One saved extraction attempt.
struct Attempt {
    html: String,
    length: usize,
}

/// fx: Get an elements class/id weight. Uses regular expressions to tell if
/// this element looks good or bad.
#[must_use]
pub(crate) fn class_weight(node: &NodeRef, weight_classes: bool) -> i32 {
    if !weight_classes {
        return 0;
    }
    let mut weight = 0;
    for name in ["class", "id"] {
        if let Some(value) = dom::attr(node, name) {
            if NEGATIVE.is_match(&value) {
                weight -= 25;
            }
            if POSITIVE.is_match(&value) {
                weight += 25;
            }
        }
    }
    weight
}

/// Considering only the node's class and id, is it unlikely to be readable?
pub(crate) fn has_unlikely_class_id(node: &NodeRef) -> bool {
    let class = dom::attr(node, "class");
    let id = dom::attr(node, "id");

    if !matches_opt(&UNLIKELY, class.as_deref()) && !matches_opt(&UNLIKELY, id.as_deref()) {
        return false;
    }
    !matches_opt(&CANDIDATE, class.as_deref()) && !matches_opt(&CANDIDATE, id.as_deref())
}

/// Does a style attribute set `display` to `none`?
fn is_display_none(style: &str) -> bool {
    let lower = style.to_ascii_lowercase();
    let Some(pos) = lower.find("display") else {
        return false;
    };
    let Some(colon) = lower[pos..].find(':') else {
        return false;
    };
    let value: String = lower[pos + colon + 1..]
        .trim_start()
        .chars()
        .take_while(|c| *c != ';' && *c != ' ')
        .take(5)
        .collect();
    value == "none"
}

/// fx: Have to null-check node.style and node.className to deal with SVG and
/// MathML nodes; a missing attribute means visible.
pub(crate) fn is_node_visible(node: &NodeRef) -> bool {
    if dom::attr(node, "style").is_some_and(|s| is_display_none(&s)) {
        return false;
    }
    if dom::has_attr(node, "hidden") {
        return false;
    }
    if dom::attr_eq(node, "aria-hidden", "true") {
        // fx: check for "fallback-image" so that wikimedia math images are
        // displayed
        return dom::attr(node, "class").is_some_and(|c| c.contains("fallback-image"));
    }
    true
}

/// Check if this node has the byline and, if it does, remember the value.
///
/// The capture is single-shot for the whole extraction: once a byline has
/// been found, later attempts leave byline-looking nodes in place.
fn check_byline(node: &NodeRef, session: &mut Session) -> bool {
    if session.found_byline {
        return false;
    }

    let is_byline = dom::attr_eq(node, "rel", "author")
        || dom::attr(node, "itemprop").is_some_and(|v| v.contains("author"))
        || matches_opt(&BYLINE, dom::attr(node, "class").as_deref())
        || matches_opt(&BYLINE, dom::attr(node, "id").as_deref());
    if !is_byline {
        return false;
    }

    let len = text::text_len(node);
    if len > 0 && len < 100 {
        if session.metadata.byline.is_none() {
            session.metadata.byline = Some(text::normalized_text(node));
        }
        session.found_byline = true;
    }
    session.found_byline
}

/// Is this node unlikely to be readable?
fn is_node_unlikely(node: &NodeRef) -> bool {
    if dom::attr_eq(node, "role", "complementary") {
        return true;
    }
    if dom::ancestor_with_tag(node, "table").is_some() || dom::has_tag(node, &["body", "a"]) {
        return false;
    }
    has_unlikely_class_id(node)
}

/// If this node is an element, is it a break element?
fn is_break_if_element(node: &NodeRef) -> bool {
    if !node.is_element() {
        return true;
    }
    dom::has_tag(node, &["br", "hr"])
}

/// Is this a DIV, SECTION or HEADER node without any content?
fn is_division_without_content(node: &NodeRef) -> bool {
    if !dom::has_tag(node, DIV_ELEMS) {
        return false;
    }
    if text::text_len(node) > 0 {
        return false;
    }
    walk::forall_descendants(node, is_break_if_element)
}

/// Do we know for sure that we won't need to score this node?
///
/// May have the side-effect of setting the byline; the order of the checks
/// is observable and must not change.
fn no_need_to_score(node: &NodeRef, session: &mut Session) -> bool {
    if !is_node_visible(node) {
        return true;
    }
    if check_byline(node, session) {
        return true;
    }
    if session.strip_unlikely && is_node_unlikely(node) {
        return true;
    }
    // fx: Remove DIV, SECTION, and HEADER nodes without any content
    // (e.g. text, image, video, or iframe).
    is_division_without_content(node)
}

fn is_block_element(node: &NodeRef) -> bool {
    node.is_element() && dom::has_tag(node, DIV_TO_P_ELEMS)
}

/// Handle a div node during the pre-scoring walk; returns the next node to
/// process.
fn handle_div_node<'a>(
    temp: &'a Document,
    node: &NodeRef<'a>,
    ann: &mut Annotations,
) -> Option<NodeRef<'a>> {
    // fx: Put phrasing content into paragraphs
    let mut parag: Option<NodeRef<'a>> = None;
    let mut child_opt = node.first_child();
    while let Some(child) = child_opt {
        let next = child.next_sibling();
        if text::is_phrasing_content(&child) {
            if parag.is_none() {
                if preprocess::is_whitespace(&child) {
                    // Don't start a paragraph for whitespace alone
                    child_opt = next;
                    continue;
                }
                let p = dom::new_element(temp, "p");
                dom::insert_before(&child, &p);
                parag = Some(p);
            }
            if let Some(p) = &parag {
                dom::append_child(p, &child);
            }
        } else if let Some(p) = parag.take() {
            preprocess::prune_trailing_whitespace(&p);
        }
        child_opt = next;
    }

    // fx: Sites like http://mobile.slate.com encloses each paragraph with a
    // DIV element. DIVs with only a P element inside and no text content can
    // be safely converted into plain P elements to avoid confusing the
    // scoring algorithm with DIVs with are, in practice, paragraphs.
    let single_p = text::single_tag_inside(node, "p");
    if let Some(p) = single_p.clone() {
        if text::link_density(node) < 0.25 {
            dom::replace_node(node, &p);
            ann.mark_to_score(p.id);
            return walk::following(&p);
        }
    }
    if single_p.is_none() && !walk::has_such_descendant(node, is_block_element) {
        dom::rename(node, "p");
        ann.mark_to_score(node.id);
    }

    walk::following(node)
}

/// Initialize a node with a preliminary readability score.
fn initialize_node(node: &NodeRef, ann: &mut Annotations, session: &Session) {
    if dom::has_tag(node, &["div"]) {
        ann.add_score(node.id, 5.0);
    } else if dom::has_tag(node, &["pre", "td", "blockquote"]) {
        ann.add_score(node.id, 3.0);
    } else if dom::has_tag(node, &["address", "form"]) {
        ann.add_score(node.id, -3.0);
    } else if dom::has_tag(node, &["ol", "ul", "dl", "dd", "dt", "li"]) {
        ann.add_score(node.id, -3.0);
    } else if dom::has_tag(node, &["h1", "h2", "h3", "h4", "h5", "h6", "th"]) {
        ann.add_score(node.id, -5.0);
    }
    ann.add_score(node.id, f64::from(class_weight(node, session.weight_classes)));
    ann.mark_initialized(node.id);
}

/// The pre-scoring walk: prune what can't be content, mark what must be
/// scored, and straighten out divs that are really paragraphs.
fn prescore_pass(temp: &Document, ann: &mut Annotations, session: &mut Session) {
    let Some(root) = dom::document_element(temp) else {
        return;
    };
    let stop = walk::skip_descendants(&root);
    let mut curr = walk::following(&root);
    while let Some(node) = curr {
        if stop.as_ref().is_some_and(|s| s.id == node.id) {
            break;
        }
        if no_need_to_score(&node, session) {
            curr = walk::remove_and_get_following(&node);
            continue;
        }
        if dom::has_tag(&node, TAGS_TO_SCORE) {
            ann.mark_to_score(node.id);
        }
        // fx: Turn all divs that don't have children block level elements
        // into p's
        if dom::has_tag(&node, &["div"]) {
            curr = handle_div_node(temp, &node, ann);
            continue;
        }
        curr = walk::following(&node);
    }
}

/// fx: Initialize and score ancestors, three levels up.
fn score_ancestors(node: &NodeRef, score: f64, ann: &mut Annotations, session: &Session) {
    let mut anc_opt = node.parent();
    for level in (1..=3_u32).rev() {
        let Some(anc) = anc_opt else {
            break;
        };
        let eligible = anc.is_element() && anc.parent().is_some_and(|p| p.is_element());
        if eligible {
            if !ann.is_initialized(anc.id) {
                initialize_node(&anc, ann, session);
                ann.mark_candidate(anc.id);
            }
            let share = match level {
                3 => score,
                2 => score / 2.0,
                _ => score / 6.0,
            };
            ann.add_score(anc.id, share);
        }
        anc_opt = anc.parent();
    }
}

/// fx: assign a score to them based on how content-y they look. Then add
/// their score to their parent node. A score is determined by things like
/// number of commas, class names, etc.
fn score_pass(temp: &Document, ann: &mut Annotations, session: &Session) {
    let Some(root) = dom::document_element(temp) else {
        return;
    };
    let stop = walk::skip_descendants(&root);
    let mut curr = walk::following(&root);
    while let Some(node) = curr {
        if stop.as_ref().is_some_and(|s| s.id == node.id) {
            break;
        }
        curr = walk::following(&node);

        if !ann.is_to_score(node.id) {
            continue;
        }
        if !node.parent().is_some_and(|p| p.is_element()) {
            continue;
        }
        let content = text::normalized_text(&node);
        let length = content.chars().count();
        if length < 25 {
            continue;
        }

        // fx: Add a point for the paragraph itself as a base, a point per
        // comma-separated segment, and one per 100 characters up to 3.
        let mut score = 1;
        score += text::char_count(&content, ',') + 1;
        score += (length / 100).min(3);

        score_ancestors(&node, score as f64, ann, session);
    }
}

/// Is `a` an ancestor of `b` (or `b` itself)?
fn is_ancestor_of(a: &NodeRef, b: &NodeRef) -> bool {
    let mut curr = Some(b.clone());
    while let Some(n) = curr {
        if n.id == a.id {
            return true;
        }
        curr = n.parent();
    }
    false
}

/// fx: Because of our bonus system, parents of candidates might have scores
/// themselves. If we see the score going *up* in the first few steps up the
/// tree, that's a decent sign that there might be more content lurking in
/// other places that we want to unify in.
fn ancestor_with_more_content<'a>(node: &NodeRef<'a>, ann: &Annotations) -> NodeRef<'a> {
    let mut last_score = ann.score(node.id);
    let score_threshold = last_score / 3.0;

    let mut anc_opt = node.parent();
    while let Some(anc) = anc_opt {
        if dom::has_tag(&anc, &["body"]) {
            break;
        }
        let anc_score = ann.score(anc.id);
        if anc_score != 0.0 {
            if anc_score < score_threshold {
                // fx: The scores shouldn't get too low
                break;
            }
            if anc_score > last_score {
                // fx: Alright! We found a better parent to use
                return anc;
            }
            last_score = anc_score;
        }
        anc_opt = anc.parent();
    }
    node.clone()
}

/// Search for a better top candidate among the ancestors of the current one.
fn find_better_top_candidate<'a>(
    tops: &[NodeRef<'a>],
    ann: &mut Annotations,
    session: &Session,
) -> NodeRef<'a> {
    let mut topnode = tops[0].clone();
    let topscore = ann.score(topnode.id);

    if topscore == 0.0 {
        return topnode;
    }

    // fx: Find a better top candidate node if it contains (at least three)
    // nodes which belong to the top candidates array and whose scores are
    // quite closed with current top candidate node.
    let mut anc_opt = topnode.parent();
    while let Some(anc) = anc_opt {
        if dom::has_tag(&anc, &["body"]) {
            break;
        }
        let contained = tops[1..]
            .iter()
            .filter(|t| ann.score(t.id) / topscore >= 0.75 && is_ancestor_of(&anc, t))
            .count();
        if contained >= MINIMUM_TOP_CANDIDATES {
            topnode = anc;
            break;
        }
        anc_opt = anc.parent();
    }
    if !ann.is_initialized(topnode.id) {
        initialize_node(&topnode, ann, session);
    }

    topnode = ancestor_with_more_content(&topnode, ann);

    // fx: If the top candidate is the only child, use parent instead. This
    // will help sibling joining logic when adjacent content is actually
    // located in parent's sibling node.
    loop {
        let Some(parent) = topnode.parent() else {
            break;
        };
        if dom::element_child_count(&parent) != 1 || dom::has_tag(&parent, &["body"]) {
            break;
        }
        topnode = parent;
    }
    if !ann.is_initialized(topnode.id) {
        initialize_node(&topnode, ann, session);
    }
    topnode
}

/// fx: After we've calculated scores, loop through all of the possible
/// candidate nodes we found and find the one with the highest score.
fn find_top_candidate<'a>(
    temp: &'a Document,
    ann: &mut Annotations,
    session: &Session,
) -> Option<NodeRef<'a>> {
    let mut tops: Vec<NodeRef<'a>> = Vec::with_capacity(N_TOP_CANDIDATES);

    let root = dom::document_element(temp)?;
    let stop = walk::skip_descendants(&root);
    let mut curr = walk::following(&root);
    while let Some(node) = curr {
        if stop.as_ref().is_some_and(|s| s.id == node.id) {
            break;
        }
        curr = walk::following(&node);

        if !ann.is_candidate(node.id) {
            continue;
        }
        let score = ann.score(node.id) * (1.0 - text::link_density(&node));
        ann.set_score(node.id, score);

        for i in 0..N_TOP_CANDIDATES {
            match tops.get(i) {
                Some(t) if score <= ann.score(t.id) => {}
                _ => {
                    tops.insert(i, node);
                    tops.truncate(N_TOP_CANDIDATES);
                    break;
                }
            }
        }
    }

    let first = tops.first()?;
    if dom::has_tag(first, &["body"]) {
        return None;
    }
    let top = find_better_top_candidate(&tops, ann, session);
    ann.mark_top_candidate(top.id);
    Some(top)
}

/// fx: If we still have no top candidate, just use the body as a last
/// resort. The body's children move into a fresh div we can modify.
fn fallback_top<'a>(
    temp: &'a Document,
    ann: &mut Annotations,
    session: &Session,
) -> Result<NodeRef<'a>> {
    let body = dom::body(temp)
        .ok_or_else(|| Error::Malformed("document has no body tag".to_string()))?;

    let div = dom::new_element(temp, "div");
    while let Some(child) = body.first_child() {
        dom::append_child(&div, &child);
    }
    dom::append_child(&body, &div);

    initialize_node(&div, ann, session);
    Ok(div)
}

/// Is this node a paragraph with content?
fn is_paragraph_with_content(node: &NodeRef) -> bool {
    if !dom::has_tag(node, &["p"]) {
        return false;
    }
    let content = text::normalized_text(node);
    let length = content.len();
    let link_density = text::link_density(node);

    if length > 80 && link_density < 0.25 {
        return true;
    }
    link_density == 0.0 && SENTENCE_DOT.is_match(&content)
}

/// Append a node to the article wrapper, renaming block-odd tags to div so
/// later cleanup doesn't throw them out by accident.
fn append_content(content: &NodeRef, node: &NodeRef) {
    if node.is_element() && !dom::has_tag(node, &["div", "article", "section", "p"]) {
        dom::rename(node, "div");
    }
    dom::append_child(content, node);
}

/// fx: Now that we have the top candidate, look through its siblings for
/// content that might also be related. Things like preambles, content split
/// by ads that we removed, etc.
fn gather_related_content<'a>(
    temp: &'a Document,
    top: &NodeRef<'a>,
    ann: &Annotations,
) -> NodeRef<'a> {
    let content = dom::new_element(temp, "div");
    let top_score = ann.score(top.id);
    let score_threshold = (top_score * 0.2).max(10.0);
    let top_class = dom::attr(top, "class");

    let siblings = match top.parent() {
        Some(parent) => dom::child_nodes(&parent),
        None => vec![top.clone()],
    };

    for child in siblings {
        if child.id == top.id {
            append_content(&content, &child);
            continue;
        }

        // fx: Give a bonus if sibling nodes and top candidates have the
        // same classname
        let mut bonus = 0.0;
        if let (Some(class), Some(top_class)) = (dom::attr(&child, "class"), &top_class) {
            if !class.is_empty() && class.eq_ignore_ascii_case(top_class) {
                bonus = top_score * 0.2;
            }
        }

        if ann.is_initialized(child.id) && ann.score(child.id) + bonus >= score_threshold {
            append_content(&content, &child);
            continue;
        }
        if is_paragraph_with_content(&child) {
            append_content(&content, &child);
        }
    }
    content
}

/// Set on this node the attributes expected for the main div of the article.
fn set_main_div_attrs(node: &NodeRef) {
    dom::set_attr(node, "id", "readability-page-1");
    dom::set_attr(node, "class", "page");
}

/// Wrap the article's children in a single main div.
fn create_main_div(temp: &Document, article: &NodeRef) {
    let div = dom::new_element(temp, "div");
    set_main_div_attrs(&div);

    while let Some(child) = article.first_child() {
        dom::append_child(&div, &child);
    }
    dom::append_child(article, &div);
}

/// fx: Find out text direction from ancestors of final top candidate.
///
/// `top_parent` is the top's parent in the working document, recorded before
/// the top was moved into the article wrapper.
fn extract_text_direction(top: &NodeRef, top_parent: &Option<NodeRef>) -> Option<String> {
    if let Some(dir) = dom::attr(top, "dir") {
        return Some(dir);
    }
    let mut anc_opt = top_parent.clone();
    while let Some(anc) = anc_opt {
        if let Some(dir) = dom::attr(&anc, "dir") {
            return Some(dir);
        }
        anc_opt = anc.parent();
    }
    None
}

/// Run the grabber over the prepared document, retrying with weakened flags
/// until an attempt passes the length threshold. Returns the serialized
/// article wrapper of the best attempt.
pub(crate) fn grab_article(doc: &Document, session: &mut Session) -> Result<String> {
    let prepared = doc.html().to_string();
    let mut attempts: Vec<Attempt> = Vec::new();
    let mut last_direction: Option<String> = None;

    loop {
        // fx: We may go through several attempts, so preserve the original
        let temp = Document::from(prepared.clone());
        let mut ann = Annotations::new();

        prescore_pass(&temp, &mut ann, session);
        score_pass(&temp, &mut ann, session);

        let (top, top_is_new) = match find_top_candidate(&temp, &mut ann, session) {
            Some(top) => (top, false),
            None => (fallback_top(&temp, &mut ann, session)?, true),
        };
        debug_assert!(top_is_new || ann.is_top_candidate(top.id));
        let top_parent = top.parent();

        let article = gather_related_content(&temp, &top, &ann);

        // fx: So we have all of the content that we need. Now we clean it
        // up for presentation.
        cleanup::prep_article(&article, &mut ann, session);

        if article.first_child().is_some() {
            if top_is_new {
                // fx: we already created a fake div thing
                set_main_div_attrs(&top);
            } else {
                create_main_div(&temp, &article);
            }
        }

        last_direction = extract_text_direction(&top, &top_parent);

        let length = text::normalized_text_len(&article);
        attempts.push(Attempt {
            html: dom::outer_html(&article),
            length,
        });

        // fx: Now that we've gone through the full algorithm, check to see
        // if we got any meaningful content. If we didn't, we may need to
        // re-run with different flags set. This gives us a higher
        // likelihood of finding the content, and the sieve approach gives
        // us a higher likelihood of finding the -right- content.
        if length >= session.char_threshold {
            break;
        }
        if session.strip_unlikely {
            session.strip_unlikely = false;
        } else if session.weight_classes {
            session.weight_classes = false;
        } else if session.clean_conditionally {
            session.clean_conditionally = false;
        } else {
            break;
        }
    }

    // fx: just return the longest text we found during the different loops
    let mut best = 0;
    for i in 1..attempts.len() {
        if attempts[i].length > attempts[best].length {
            best = i;
        }
    }
    if attempts.is_empty() || attempts[best].length == 0 {
        return Err(Error::NoContent);
    }

    if session.metadata.direction.is_none() {
        session.metadata.direction = last_direction;
    }
    Ok(attempts.swap_remove(best).html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;

    fn node<'a>(doc: &'a Document, sel: &str) -> NodeRef<'a> {
        doc.select(sel).nodes().first().cloned().unwrap()
    }

    fn session() -> Session {
        Session::new(&Options::default())
    }

    #[test]
    fn class_weight_sums_class_and_id() {
        let doc = Document::from(r#"<div class="article" id="sidebar">x</div>"#);
        let div = node(&doc, "div");

        assert_eq!(class_weight(&div, true), 0); // +25 class, -25 id
        assert_eq!(class_weight(&div, false), 0);

        let doc = Document::from(r#"<div class="article story">x</div>"#);
        assert_eq!(class_weight(&node(&doc, "div"), true), 25);

        let doc = Document::from(r#"<div class="comment" id="footer">x</div>"#);
        assert_eq!(class_weight(&node(&doc, "div"), true), -50);
    }

    #[test]
    fn unlikely_class_needs_no_candidate_match() {
        let doc = Document::from(
            r#"<div class="sidebar">a</div><div class="sidebar main-content">b</div>"#,
        );
        let nodes = doc.select("div");
        let nodes = nodes.nodes();

        assert!(has_unlikely_class_id(&nodes[0]));
        assert!(!has_unlikely_class_id(&nodes[1]));
    }

    #[test]
    fn visibility_checks() {
        let doc = Document::from(
            r#"<p style="display: none">a</p>
               <p hidden>b</p>
               <p aria-hidden="true">c</p>
               <p aria-hidden="true" class="math fallback-image">d</p>
               <p style="display:block">e</p>"#,
        );
        let nodes = doc.select("p");
        let nodes = nodes.nodes();

        assert!(!is_node_visible(&nodes[0]));
        assert!(!is_node_visible(&nodes[1]));
        assert!(!is_node_visible(&nodes[2]));
        assert!(is_node_visible(&nodes[3]));
        assert!(is_node_visible(&nodes[4]));
    }

    #[test]
    fn byline_is_captured_once() {
        let doc = Document::from(
            r#"<div class="byline">By Jane Roe</div><div class="byline">By Second</div>"#,
        );
        let nodes = doc.select("div");
        let nodes = nodes.nodes();
        let mut session = session();

        assert!(check_byline(&nodes[0], &mut session));
        assert_eq!(session.metadata.byline.as_deref(), Some("By Jane Roe"));
        // second byline node is left alone
        assert!(!check_byline(&nodes[1], &mut session));
        assert_eq!(session.metadata.byline.as_deref(), Some("By Jane Roe"));
    }

    #[test]
    fn oversized_byline_is_not_captured() {
        let long = "x".repeat(150);
        let doc = Document::from(format!(r#"<div class="byline">{long}</div>"#));
        let div = node(&doc, "div");
        let mut session = session();

        assert!(!check_byline(&div, &mut session));
        assert!(session.metadata.byline.is_none());
        assert!(!session.found_byline);
    }

    #[test]
    fn unlikely_spares_tables_and_anchors() {
        let doc = Document::from(
            r#"<table><tr><td class="sidebar">x</td></tr></table>
               <a class="sidebar">y</a>
               <div class="sidebar">z</div>"#,
        );
        assert!(!is_node_unlikely(&node(&doc, "td")));
        assert!(!is_node_unlikely(&node(&doc, "a")));
        assert!(is_node_unlikely(&node(&doc, "div")));
    }

    #[test]
    fn empty_divisions_are_recognized() {
        let doc = Document::from("<div><br><hr></div><div><img src='x.jpg'></div>");
        let nodes = doc.select("div");
        let nodes = nodes.nodes();

        assert!(is_division_without_content(&nodes[0]));
        assert!(!is_division_without_content(&nodes[1]));
    }

    #[test]
    fn div_without_blocks_becomes_paragraph() {
        let doc = Document::from("<html><body><div>just <b>inline</b> text</div></body></html>");
        let div = node(&doc, "div");
        let mut ann = Annotations::new();

        handle_div_node(&doc, &div, &mut ann);

        assert!(doc.select("p").exists());
        assert!(!doc.select("div").exists());
    }

    #[test]
    fn div_with_single_p_is_unwrapped() {
        let doc = Document::from("<html><body><div> <p>paragraph here</p> </div></body></html>");
        let div = node(&doc, "div");
        let mut ann = Annotations::new();

        handle_div_node(&doc, &div, &mut ann);

        assert!(!doc.select("div").exists());
        let p = node(&doc, "p");
        assert!(ann.is_to_score(p.id));
    }

    #[test]
    fn phrasing_runs_are_wrapped() {
        let doc = Document::from(
            "<html><body><div>start <em>here</em><ul><li>block</li></ul>tail</div></body></html>",
        );
        let div = node(&doc, "div");
        let mut ann = Annotations::new();

        handle_div_node(&doc, &div, &mut ann);

        // two runs: "start <em>here</em>" and "tail"
        assert_eq!(doc.select("div > p").length(), 2);
        assert!(doc.select("ul").exists());
    }

    #[test]
    fn grab_minimal_article() {
        let text_block = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. ".repeat(12);
        let html =
            format!("<html><body><div><p>{text_block}</p></div></body></html>");
        let doc = Document::from(html);
        let mut session = session();

        let article = grab_article(&doc, &mut session).unwrap();
        assert!(article.contains("Lorem ipsum"));
        assert!(article.contains("readability-page-1"));
    }

    #[test]
    fn grab_fails_on_empty_body() {
        let doc = Document::from("<html><body></body></html>");
        let mut session = session();

        assert!(matches!(
            grab_article(&doc, &mut session),
            Err(Error::NoContent)
        ));
    }
}
