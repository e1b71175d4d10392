//! Document preparation.
//!
//! fx: Prepare the HTML document for readability to scrape it. This includes
//! things like stripping javascript, CSS, and handling terrible markup.
//! Runs once on the full document, before any scoring pass sees it.

use crate::dom::{self, Document, NodeRef};
use crate::patterns::IMG_EXT;
use crate::text;
use crate::walk;

/// Get rid of any siblings of the document's root element, so traversals can
/// treat the root as the whole document.
pub fn remove_root_siblings(doc: &Document) {
    let Some(root) = dom::document_element(doc) else {
        return;
    };
    while let Some(sib) = root.next_sibling() {
        dom::remove(&sib);
    }
    while let Some(sib) = root.prev_sibling() {
        dom::remove(&sib);
    }
}

/// The `href` of the document's `<base>` element, if any.
#[must_use]
pub fn base_href(doc: &Document) -> Option<String> {
    let root = dom::document_element(doc)?;
    let base = walk::first_descendant_with_tag(&root, "base")?;
    dom::attr(&base, "href")
}

/// If the document declares an HTML redirect through
/// `<meta http-equiv="refresh">`, return the target URL.
#[must_use]
pub fn find_html_redirect(doc: &Document) -> Option<String> {
    let root = dom::document_element(doc)?;
    let mut target = None;
    let stop = walk::skip_descendants(&root);
    let mut curr = walk::following(&root);
    while let Some(node) = curr {
        if stop.as_ref().is_some_and(|s| s.id == node.id) {
            break;
        }
        if dom::has_tag(&node, &["meta"]) && dom::attr_eq(&node, "http-equiv", "refresh") {
            if let Some(content) = dom::attr(&node, "content") {
                let lower = content.to_ascii_lowercase();
                if let Some(pos) = lower.find(";url=") {
                    target = Some(content[pos + ";url=".len()..].to_string());
                }
            }
        }
        curr = walk::following(&node);
    }
    target
}

/// Run the full preparation sequence on the document.
pub fn prep_document(doc: &Document) {
    let Some(root) = dom::document_element(doc) else {
        return;
    };

    walk::remove_descendants_if(&root, |n| n.is_comment());
    unwrap_noscript_images(&root);
    walk::remove_descendants_if(&root, is_script_or_noscript);
    clean_styles_and_fonts(&root);
    replace_brs(&root);
}

// === Noscript images ===

/// An `<img>` that carries no source at all, in any of the attributes that
/// might hold one. Such placeholders would shadow the real image carried by
/// a following `<noscript>`.
fn is_image_placeholder(node: &NodeRef) -> bool {
    if !dom::has_tag(node, &["img"]) {
        return false;
    }
    for (name, value) in dom::attrs(node) {
        if matches!(name.as_str(), "src" | "srcset" | "data-src" | "data-srcset") {
            return false;
        }
        if IMG_EXT.is_match(&value) {
            return false;
        }
    }
    true
}

/// fx: Check if node is image, or if node contains exactly only one image
/// whether as a direct child or as its descendants.
fn single_image<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    if dom::has_tag(node, &["img"]) {
        return Some(node.clone());
    }

    let mut curr = Some(node.clone());
    while let Some(n) = curr {
        let mut elem_child: Option<NodeRef<'a>> = None;
        let mut child = n.first_child();
        while let Some(c) = child {
            if c.is_element() {
                if elem_child.is_some() {
                    return None;
                }
                elem_child = Some(c);
            } else if text::normalized_text_len(&c) > 0 {
                return None;
            }
            child = c.next_sibling();
        }
        match elem_child {
            Some(e) if dom::has_tag(&e, &["img"]) => return Some(e),
            other => curr = other,
        }
    }
    None
}

/// Could this attribute carry an image?
fn is_image_attr(name: &str, value: &str) -> bool {
    if value.is_empty() {
        return false;
    }
    name.eq_ignore_ascii_case("src")
        || name.eq_ignore_ascii_case("srcset")
        || IMG_EXT.is_match(value)
}

/// Merge image-bearing attributes from `src` into `dest`. Existing values in
/// the destination win; a conflicting source value is kept under a
/// `data-old-<name>` backup.
fn copy_image_attrs(dest: &NodeRef, src: &NodeRef) {
    for (name, value) in dom::attrs(src) {
        if !is_image_attr(&name, &value) {
            continue;
        }
        match dom::attr(dest, &name) {
            None => dom::set_attr(dest, &name, &value),
            Some(existing) if existing == value => {}
            Some(_) => dom::set_attr(dest, &format!("data-old-{name}"), &value),
        }
    }
}

/// fx: Find all <noscript> that are located after <img> nodes, and which
/// contain only one <img> element. Replace the first image with the image
/// from inside the <noscript> tag, and remove the <noscript> tag. This
/// improves the quality of the images we use on some sites (e.g. Medium).
fn unwrap_noscript_images(root: &NodeRef) {
    // fx: Find img without source or attributes that might contains image,
    // and remove it. This is done to prevent a placeholder img is replaced
    // by img from noscript in next step.
    walk::remove_descendants_if(root, is_image_placeholder);

    let stop = walk::skip_descendants(root);
    let mut curr = walk::following(root);
    while let Some(node) = curr {
        if stop.as_ref().is_some_and(|s| s.id == node.id) {
            break;
        }
        if dom::has_tag(&node, &["noscript"]) {
            if let Some(new_img) = single_image(&node) {
                if let Some(prev) = walk::prev_element(&node) {
                    if let Some(old_img) = single_image(&prev) {
                        copy_image_attrs(&new_img, &old_img);
                        dom::replace_node(&prev, &new_img);
                    }
                }
            }
        }
        curr = walk::following(&node);
    }
}

// === Scripts, styles, fonts ===

fn is_script_or_noscript(node: &NodeRef) -> bool {
    if dom::has_tag(node, &["noscript"]) {
        return true;
    }
    if dom::has_tag(node, &["script"]) {
        // Clear the source and body before unlinking
        dom::remove_attr(node, "src");
        dom::set_inner_html(node, "");
        return true;
    }
    false
}

fn clean_styles_and_fonts(root: &NodeRef) {
    let stop = walk::skip_descendants(root);
    let mut curr = walk::following(root);
    while let Some(node) = curr {
        if stop.as_ref().is_some_and(|s| s.id == node.id) {
            break;
        }
        if dom::has_tag(&node, &["style"]) {
            curr = walk::remove_and_get_following(&node);
        } else {
            if dom::has_tag(&node, &["font"]) {
                dom::rename(&node, "span");
            }
            curr = walk::following(&node);
        }
    }
}

// === <br> runs ===

/// Is this node whitespace: an empty text node or a `<br>`?
pub fn is_whitespace(node: &NodeRef) -> bool {
    if node.is_text() && text::text_len(node) == 0 {
        return true;
    }
    dom::has_tag(node, &["br"])
}

/// Remove all trailing children that are just whitespace.
pub fn prune_trailing_whitespace(node: &NodeRef) {
    let mut child = node.last_child();
    while let Some(c) = child {
        if !is_whitespace(&c) {
            break;
        }
        let prev = c.prev_sibling();
        dom::remove(&c);
        child = prev;
    }
}

/// Is this node the first `<br>` of a `<br><br>` sequence?
fn is_double_br(node: &NodeRef) -> bool {
    dom::has_tag(node, &["br"])
        && walk::next_element(node).is_some_and(|next| dom::has_tag(&next, &["br"]))
}

/// fx: Replaces 2 or more successive <br> elements with a single <p>.
/// Whitespace between <br> elements are ignored. For example:
///   `<div>foo<br>bar<br> <br><br>abc</div>`
/// will become:
///   `<div>foo<br>bar<p>abc</p></div>`
fn replace_brs(root: &NodeRef) {
    let stop = walk::skip_descendants(root);
    let mut curr = walk::following(root);
    while let Some(node) = curr {
        if stop.as_ref().is_some_and(|s| s.id == node.id) {
            break;
        }
        if dom::has_tag(&node, &["br"]) {
            replace_br_run(&node);
        }
        curr = walk::following(&node);
    }
}

fn replace_br_run(node: &NodeRef) {
    let mut replaced = false;
    while let Some(next) = walk::next_element(node) {
        if !dom::has_tag(&next, &["br"]) {
            break;
        }
        replaced = true;
        dom::remove(&next);
    }
    if !replaced {
        return;
    }

    dom::rename(node, "p");
    while let Some(next) = node.next_sibling() {
        // fx: If we've hit another <br><br>, we're done adding children
        // to this <p>.
        if is_double_br(&next) || !text::is_phrasing_content(&next) {
            break;
        }
        dom::append_child(node, &next);
    }
    prune_trailing_whitespace(node);

    if let Some(parent) = node.parent() {
        if dom::has_tag(&parent, &["p"]) {
            dom::rename(&parent, "div");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comments_scripts_styles_are_removed() {
        let doc = Document::from(
            "<html><body><!-- note --><script src=\"x.js\">var x;</script>\
             <style>p{}</style><noscript>alt</noscript><p>keep</p></body></html>",
        );
        prep_document(&doc);

        let html = doc.html().to_string();
        assert!(!html.contains("note"));
        assert!(!doc.select("script").exists());
        assert!(!doc.select("style").exists());
        assert!(!doc.select("noscript").exists());
        assert!(doc.select("p").exists());
    }

    #[test]
    fn font_becomes_span() {
        let doc = Document::from("<html><body><font size=\"2\">x</font></body></html>");
        prep_document(&doc);
        assert!(doc.select("span").exists());
        assert!(!doc.select("font").exists());
    }

    #[test]
    fn double_br_becomes_paragraphs() {
        let doc = Document::from("<html><body><div>A<br><br>B<br><br>C</div></body></html>");
        prep_document(&doc);

        let texts: Vec<String> = doc
            .select("div > p")
            .nodes()
            .iter()
            .map(|n| dom::text(n).trim().to_string())
            .collect();
        assert_eq!(texts, vec!["B", "C"]);
        // the leading run-less text stays as a bare text child
        assert!(dom::text(&doc.select("div").nodes()[0]).contains('A'));
    }

    #[test]
    fn single_br_is_left_alone() {
        let doc = Document::from("<html><body><div>a<br>b</div></body></html>");
        prep_document(&doc);
        assert!(doc.select("br").exists());
        assert!(!doc.select("div > p").exists());
    }

    #[test]
    fn whitespace_between_brs_is_ignored() {
        let doc = Document::from("<html><body><div>x<br> \n <br>y</div></body></html>");
        prep_document(&doc);
        assert_eq!(doc.select("br").length(), 0);
        assert_eq!(doc.select("p").length(), 1);
    }

    #[test]
    fn sourceless_placeholder_image_is_removed() {
        let doc = Document::from(
            "<html><body><img class=\"placeholder\" data-lazy=\"1\">\
             <img src=\"keep.jpg\"></body></html>",
        );
        prep_document(&doc);

        let imgs = doc.select("img");
        assert_eq!(imgs.length(), 1);
        assert_eq!(imgs.attr("src").map(|v| v.to_string()), Some("keep.jpg".into()));
    }

    #[test]
    fn noscript_image_merge_keeps_backups() {
        let doc = Document::from(
            "<html><body>\
             <img src=\"low-res.jpg\">\
             <noscript><img src=\"high-res.jpg\"></noscript>\
             </body></html>",
        );
        prep_document(&doc);

        let imgs = doc.select("img");
        assert_eq!(imgs.length(), 1);
        // the noscript image wins, the old source is backed up
        assert_eq!(imgs.attr("src").map(|v| v.to_string()), Some("high-res.jpg".into()));
        assert_eq!(
            imgs.attr("data-old-src").map(|v| v.to_string()),
            Some("low-res.jpg".into())
        );
    }

    #[test]
    fn base_href_is_found() {
        let doc = Document::from(
            "<html><head><base href=\"https://b.test/dir/\"></head><body></body></html>",
        );
        assert_eq!(base_href(&doc).as_deref(), Some("https://b.test/dir/"));
    }

    #[test]
    fn html_redirect_target() {
        let doc = Document::from(
            "<html><head><meta http-equiv=\"refresh\" content=\"0;url=https://next.test/\">\
             </head><body></body></html>",
        );
        assert_eq!(find_html_redirect(&doc).as_deref(), Some("https://next.test/"));

        let doc = Document::from("<html><head></head><body></body></html>");
        assert_eq!(find_html_redirect(&doc), None);
    }
}
