//! Article post-processing.
//!
//! Runs once on the winning attempt: URLs become absolute (srcset included),
//! leftover classes are stripped, text nodes are normalized, and elements
//! that must not serialize as self-closing get a space inside. The metadata
//! excerpt falls back to the first paragraph, and the optional template
//! interleaves metadata fields into the article.

use url::Url;

use crate::dom::{self, NodeRef};
use crate::error::{Error, Result};
use crate::extract::Session;
use crate::patterns::ABSOLUTE_URL;
use crate::text;
use crate::walk;

/// An entry's URL or descriptor beyond this many bytes ends the rebuilt
/// srcset.
const MAX_SRCSET_PART: usize = 4096;

/// Resolve a URL against the session base. None means "leave it alone".
fn to_absolute_url(value: &str, session: &Session) -> Option<String> {
    // fx: Leave hash links alone if the base URI matches the document URI
    if !session.url_override && value.starts_with('#') {
        return None;
    }
    let trimmed = value.trim_end_matches(text::is_space);

    match &session.base_url {
        Some(base) => base.join(trimmed).ok().map(String::from),
        // With no base to resolve against, only an already absolute URL
        // gets normalized; everything else is left in place.
        None if ABSOLUTE_URL.is_match(trimmed) => {
            Url::parse(trimmed).ok().map(String::from)
        }
        None => None,
    }
}

/// Rewrite one attribute to its absolute form, keeping the original value
/// when resolution fails.
fn absolutize_attr(node: &NodeRef, name: &str, session: &Session) {
    if let Some(value) = dom::attr(node, name) {
        if let Some(absolute) = to_absolute_url(&value, session) {
            dom::set_attr(node, name, &absolute);
        }
    }
}

/// Remove a node but preserve its children in the same location; returns
/// the node now occupying that place.
fn remove_but_preserve_content<'a>(node: &NodeRef<'a>) -> NodeRef<'a> {
    let children = dom::child_nodes(node);

    // fx: if the link only contains simple text content, it can be kept as
    // a text node
    if children.len() == 1 && children[0].is_text() {
        let child = children[0];
        dom::insert_before(node, &child);
        dom::remove(node);
        return child;
    }

    // fx: if the link has multiple children, they should all be preserved
    let span = dom::new_element_beside(node, "span");
    for child in children {
        dom::append_child(&span, &child);
    }
    dom::replace_node(node, &span);
    span
}

/// If the node is a link, get rid of any relative or javascript URLs. If
/// this involves replacing the node altogether, the new node is returned in
/// its location.
fn fix_non_absolute_link<'a>(node: NodeRef<'a>, session: &Session) -> NodeRef<'a> {
    if !dom::has_tag(&node, &["a"]) {
        return node;
    }
    let Some(href) = dom::attr(&node, "href") else {
        return node;
    };

    if href.to_ascii_lowercase().starts_with("javascript:") {
        // fx: Remove links with javascript: URIs
        return remove_but_preserve_content(&node);
    }

    if let Some(absolute) = to_absolute_url(&href, session) {
        dom::set_attr(&node, "href", &absolute);
    }
    node
}

// === srcset ===

struct SrcsetEntry {
    url: String,
    descriptor: String,
}

/// Parse a srcset value: comma-separated entries of `URL [descriptor]`.
/// A URL token ending in a comma closes its entry without a descriptor.
fn parse_srcset(srcset: &str) -> Vec<SrcsetEntry> {
    let mut entries = Vec::new();
    let mut rest = srcset;

    loop {
        rest = rest.trim_start_matches(text::is_space);
        let url_end = rest.find(text::is_space).unwrap_or(rest.len());
        let url = &rest[..url_end];
        if url.is_empty() {
            break;
        }
        rest = &rest[url_end..];

        if let Some(stripped) = url.strip_suffix(',') {
            entries.push(SrcsetEntry {
                url: stripped.to_string(),
                descriptor: String::new(),
            });
            continue;
        }

        rest = rest.trim_start_matches(text::is_space);
        let desc_end = rest.find(',').unwrap_or(rest.len());
        let descriptor = rest[..desc_end].trim_end_matches(text::is_space);
        rest = rest.get(desc_end + 1..).unwrap_or("");

        entries.push(SrcsetEntry {
            url: url.to_string(),
            descriptor: descriptor.to_string(),
        });
    }
    entries
}

/// Assemble a srcset value back from its entries.
fn build_srcset(entries: &[SrcsetEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        if entry.url.len() > MAX_SRCSET_PART || entry.descriptor.len() > MAX_SRCSET_PART {
            break;
        }
        if !out.is_empty() {
            out.push_str(", ");
        }
        out.push_str(&entry.url);
        if !entry.descriptor.is_empty() {
            out.push(' ');
            out.push_str(&entry.descriptor);
        }
    }
    out
}

/// Convert all relative URLs in a srcset to absolute URLs.
fn absolutize_srcset(node: &NodeRef, session: &Session) {
    let Some(srcset) = dom::attr(node, "srcset") else {
        return;
    };
    let mut entries = parse_srcset(&srcset);
    for entry in &mut entries {
        if let Some(absolute) = to_absolute_url(&entry.url, session) {
            entry.url = absolute;
        }
    }
    dom::set_attr(node, "srcset", &build_srcset(&entries));
}

const MEDIA_ELEMS: &[&str] = &["img", "picture", "figure", "video", "audio", "source"];

/// fx: Converts each <a> and media uri in the given element to an absolute
/// URI, ignoring #ref URIs.
fn fix_all_relative_urls(article: &NodeRef, session: &Session) {
    walk::change_descendants(article, |node| fix_non_absolute_link(node, session));
    walk::change_descendants(article, |node| {
        if dom::has_tag(&node, MEDIA_ELEMS) {
            absolutize_attr(&node, "src", session);
            absolutize_attr(&node, "poster", session);
            absolutize_srcset(&node, session);
        }
        node
    });
}

// === Classes and text ===

/// fx: Removes the class attribute from every element, except the `page`
/// class the engine sets itself.
fn clean_classes(article: &NodeRef) {
    walk::change_descendants(article, |node| {
        if let Some(class_list) = dom::attr(&node, "class") {
            if class_list.split(' ').any(|c| c == "page") {
                dom::set_attr(&node, "class", "page");
            } else {
                dom::remove_attr(&node, "class");
            }
        }
        node
    });
}

/// Normalize every text node, and collapse `<pre><code>` pairs into a bare
/// `<pre>` so serialization can't indent inside them.
fn normalize_text_nodes(article: &NodeRef) {
    let stop = walk::skip_descendants(article);
    let mut curr = walk::following(article);
    while let Some(node) = curr {
        if stop.as_ref().is_some_and(|s| s.id == node.id) {
            break;
        }
        if dom::has_tag(&node, &["code"])
            && node.parent().is_some_and(|p| dom::has_tag(&p, &["pre"]))
        {
            let parent = node.parent().expect("checked above");
            dom::replace_node(&parent, &node);
            dom::rename(&node, "pre");
            curr = walk::following(&node);
            continue;
        }
        if node.is_text() {
            let next = walk::following(&node);
            let raw = dom::text(&node).to_string();
            let content = text::normalized_or_preformatted(&node);
            if content != raw {
                dom::replace_text(&node, &content);
            }
            curr = next;
            continue;
        }
        curr = walk::following(&node);
    }
}

/// Put a space inside elements that must not end up self-closing when the
/// article is serialized.
fn fill_if_not_self_closing(article: &NodeRef) {
    walk::change_descendants(article, |node| {
        if dom::has_tag(&node, &["iframe", "em", "a"]) && node.first_child().is_none() {
            dom::set_text_content(&node, " ");
        }
        node
    });
}

/// Run the post-processing sequence on the article wrapper.
pub(crate) fn postprocess_article(article: &NodeRef, session: &mut Session) {
    fix_all_relative_urls(article, session);
    clean_classes(article);
    normalize_text_nodes(article);
    fill_if_not_self_closing(article);

    if session.metadata.excerpt.is_none() {
        session.metadata.excerpt = walk::first_descendant_with_tag(article, "p")
            .map(|p| text::normalized_text(&p));
    }
}

// === Metadata template ===

/// Attach to the article any metadata fields requested by the template.
///
/// Fields named before the `body` marker land ahead of the article content,
/// fields after it are appended to the end.
pub(crate) fn attach_template(article: &NodeRef, session: &Session, template: &str) -> Result<()> {
    let mut past_body = false;
    let body_first = article.first_child();

    for field in template.split(',') {
        let (tag, content) = match field.trim() {
            "body" => {
                past_body = true;
                continue;
            }
            "title" => ("h1", session.metadata.title.as_deref()),
            "byline" => ("h3", session.metadata.byline.as_deref()),
            "excerpt" => ("p", session.metadata.excerpt.as_deref()),
            "sitename" => ("h2", session.metadata.site_name.as_deref()),
            "url" => ("h2", session.base_url.as_ref().map(Url::as_str)),
            other => {
                return Err(Error::Malformed(format!(
                    "unrecognized field in article template: {other}"
                )))
            }
        };
        let Some(content) = content else {
            continue; // Skip empty fields
        };

        let new = dom::new_element_beside(article, tag);
        dom::set_text_content(&new, content);
        match (&body_first, past_body) {
            (Some(first), false) => dom::insert_before(first, &new),
            _ => dom::append_child(article, &new),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;
    use crate::options::Options;

    fn node<'a>(doc: &'a Document, sel: &str) -> NodeRef<'a> {
        doc.select(sel).nodes().first().cloned().unwrap()
    }

    fn session_with_base(base: &str) -> Session {
        Session::new(&Options {
            base_url: Some(base.to_string()),
            ..Options::default()
        })
    }

    #[test]
    fn relative_links_become_absolute() {
        let doc = Document::from(r#"<div><a href="b.html">x</a><a href="/c">y</a></div>"#);
        let div = node(&doc, "div");
        let session = session_with_base("https://x.test/a/");

        fix_all_relative_urls(&div, &session);

        let hrefs: Vec<String> = doc
            .select("a")
            .nodes()
            .iter()
            .map(|n| dom::attr(n, "href").unwrap())
            .collect();
        assert_eq!(hrefs, vec!["https://x.test/a/b.html", "https://x.test/c"]);
    }

    #[test]
    fn hash_links_stay_put_without_override() {
        let doc = Document::from(r##"<div><a href="#section">x</a></div>"##);
        let div = node(&doc, "div");
        let session = session_with_base("https://x.test/a/");

        fix_all_relative_urls(&div, &session);
        assert_eq!(dom::attr(&node(&doc, "a"), "href").as_deref(), Some("#section"));
    }

    #[test]
    fn hash_links_resolve_under_override() {
        let doc = Document::from(r##"<div><a href="#section">x</a></div>"##);
        let div = node(&doc, "div");
        let mut session = session_with_base("https://x.test/a/");
        session.url_override = true;

        fix_all_relative_urls(&div, &session);
        assert_eq!(
            dom::attr(&node(&doc, "a"), "href").as_deref(),
            Some("https://x.test/a/#section")
        );
    }

    #[test]
    fn javascript_link_with_text_becomes_text() {
        let doc = Document::from(r#"<p>pre <a href="javascript:x()">click</a> post</p>"#);
        let p = node(&doc, "p");
        let session = session_with_base("https://x.test/");

        fix_all_relative_urls(&p, &session);

        assert!(!doc.select("a").exists());
        let text = dom::text(&p).to_string();
        assert!(text.contains("click"));
        assert!(!dom::outer_html(&p).contains("javascript"));
    }

    #[test]
    fn javascript_link_with_markup_becomes_span() {
        let doc = Document::from(
            r#"<p><a href="JAVASCRIPT:void(0)"><b>bold</b> text</a></p>"#,
        );
        let p = node(&doc, "p");
        let session = session_with_base("https://x.test/");

        fix_all_relative_urls(&p, &session);

        assert!(!doc.select("a").exists());
        assert!(doc.select("span > b").exists());
    }

    #[test]
    fn srcset_entries_resolve() {
        let doc = Document::from(r#"<img srcset="b.jpg 1x, /c.jpg 2x">"#);
        let img = node(&doc, "img");
        let session = session_with_base("https://x.test/a/");

        absolutize_srcset(&img, &session);
        assert_eq!(
            dom::attr(&img, "srcset").as_deref(),
            Some("https://x.test/a/b.jpg 1x, https://x.test/c.jpg 2x")
        );
    }

    #[test]
    fn srcset_trailing_comma_entry() {
        let entries = parse_srcset("a.jpg, b.jpg 2x");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].url, "a.jpg");
        assert_eq!(entries[0].descriptor, "");
        assert_eq!(entries[1].url, "b.jpg");
        assert_eq!(entries[1].descriptor, "2x");
    }

    #[test]
    fn srcset_rebuild_format() {
        let entries = parse_srcset(" x.png   1.5x ,y.png 2x");
        assert_eq!(build_srcset(&entries), "x.png 1.5x, y.png 2x");
    }

    #[test]
    fn classes_are_stripped_except_page() {
        let doc = Document::from(
            r#"<div><div class="page">a</div><p class="fancy prose">b</p>
               <p class="page extra">c</p></div>"#,
        );
        let div = node(&doc, "div");
        clean_classes(&div);

        assert_eq!(doc.select(".page").length(), 2);
        assert!(!doc.select(".fancy").exists());
        assert!(!doc.select(".extra").exists());
    }

    #[test]
    fn text_nodes_are_normalized_outside_pre() {
        let doc = Document::from("<div><p>a \u{a0} b</p><pre>a \n b</pre></div>");
        let div = node(&doc, "div");
        normalize_text_nodes(&div);

        assert_eq!(dom::text(&node(&doc, "p")).as_ref(), "a b");
        assert_eq!(dom::text(&node(&doc, "pre")).as_ref(), "a \n b");
    }

    #[test]
    fn pre_code_collapses() {
        let doc = Document::from("<div><pre><code>let x;</code></pre></div>");
        let div = node(&doc, "div");
        normalize_text_nodes(&div);

        assert!(!doc.select("code").exists());
        assert_eq!(doc.select("pre").length(), 1);
        assert_eq!(dom::text(&node(&doc, "pre")).as_ref(), "let x;");
    }

    #[test]
    fn empty_inline_elements_get_space() {
        let doc = Document::from(r#"<div><em></em><a href="https://x.test/"></a><b></b></div>"#);
        let div = node(&doc, "div");
        fill_if_not_self_closing(&div);

        assert_eq!(dom::text(&node(&doc, "em")).as_ref(), " ");
        assert_eq!(dom::text(&node(&doc, "a")).as_ref(), " ");
        assert_eq!(dom::text(&node(&doc, "b")).as_ref(), "");
    }

    #[test]
    fn excerpt_falls_back_to_first_paragraph() {
        let doc = Document::from("<div><p>First  paragraph.</p><p>Second.</p></div>");
        let div = node(&doc, "div");
        let mut session = session_with_base("https://x.test/");

        postprocess_article(&div, &mut session);
        assert_eq!(session.metadata.excerpt.as_deref(), Some("First paragraph."));
    }

    #[test]
    fn template_interleaves_fields() {
        let doc = Document::from("<div><p>body text</p></div>");
        let div = node(&doc, "div");
        let mut session = session_with_base("https://x.test/");
        session.metadata.title = Some("The Title".to_string());
        session.metadata.byline = Some("By Someone".to_string());

        attach_template(&div, &session, "title,body,byline").unwrap();

        let html = dom::outer_html(&div);
        let title_pos = html.find("<h1>The Title</h1>").unwrap();
        let body_pos = html.find("body text").unwrap();
        let byline_pos = html.find("<h3>By Someone</h3>").unwrap();
        assert!(title_pos < body_pos);
        assert!(body_pos < byline_pos);
    }

    #[test]
    fn template_skips_missing_fields() {
        let doc = Document::from("<div><p>x</p></div>");
        let div = node(&doc, "div");
        let session = session_with_base("https://x.test/");

        attach_template(&div, &session, "title,byline,body").unwrap();
        assert!(!doc.select("h1").exists());
        assert!(!doc.select("h3").exists());
    }

    #[test]
    fn template_rejects_unknown_fields() {
        let doc = Document::from("<div><p>x</p></div>");
        let div = node(&doc, "div");
        let session = session_with_base("https://x.test/");

        assert!(matches!(
            attach_template(&div, &session, "title,nonsense"),
            Err(Error::Malformed(_))
        ));
    }
}
