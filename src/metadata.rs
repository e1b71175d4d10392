//! Metadata harvesting from `<meta>` and `<title>` elements.
//!
//! Meta tags compete for each metadata field: every recognized name carries a
//! rank, and a later tag only wins a field when its rank is at least as good
//! as the best seen so far. The `<title>` element is the fallback source for
//! the article title, with heuristics to strip a trailing site name.

use crate::dom::{self, Document, NodeRef};
use crate::patterns::{META_NAME, META_PROPERTY};
use crate::result::Metadata;
use crate::text;
use crate::walk;

/// Ranked sources for the title field; smaller index wins.
const TITLE_RANKS: &[&str] = &[
    "dc:title",
    "dcterm:title",
    "og:title",
    "weibo:article:title",
    "weibo:webpage:title",
    "title",
    "twitter:title",
];

/// Ranked sources for the byline field.
const BYLINE_RANKS: &[&str] = &["dc:creator", "dcterm:creator", "author"];

/// Ranked sources for the excerpt field.
const EXCERPT_RANKS: &[&str] = &[
    "dc:description",
    "dcterm:description",
    "og:description",
    "weibo:article:description",
    "weibo:webpage:description",
    "description",
    "twitter:description",
];

/// One-pass metadata harvester.
#[derive(Debug)]
struct Harvester {
    meta: Metadata,
    best_title: usize,
    best_byline: usize,
    best_excerpt: usize,
}

impl Harvester {
    fn new() -> Self {
        Self {
            meta: Metadata::default(),
            best_title: TITLE_RANKS.len(),
            best_byline: BYLINE_RANKS.len(),
            best_excerpt: EXCERPT_RANKS.len(),
        }
    }

    /// Find the rank of `key` in `ranks`; a match only counts when it's at
    /// least as good as the best so far. On a tie the later tag wins.
    fn outranks(ranks: &[&str], best: &mut usize, key: &str) -> bool {
        for (i, name) in ranks.iter().enumerate() {
            if i <= *best && text::word_in_str(key, name) {
                *best = i;
                return true;
            }
        }
        false
    }

    /// Assign a meta tag's content to the best-ranked field its name matches.
    fn take_meta(&mut self, nameprop: &str, content: &str) {
        if content.is_empty() {
            return;
        }
        let key = nameprop.replace('.', ":");
        let value = text::normalize_whitespace(content);

        if Self::outranks(TITLE_RANKS, &mut self.best_title, &key) {
            self.meta.title = Some(value);
        } else if Self::outranks(BYLINE_RANKS, &mut self.best_byline, &key) {
            self.meta.byline = Some(value);
        } else if Self::outranks(EXCERPT_RANKS, &mut self.best_excerpt, &key) {
            self.meta.excerpt = Some(value);
        } else if text::word_in_str(&key, "og:site_name") {
            self.meta.site_name = Some(value);
        }
    }
}

/// fx: Attempts to get excerpt and byline metadata for the article.
///
/// Walks the document once; `<meta>` tags feed the ranked fields and the
/// last `<title>` element supplies the title fallback.
#[must_use]
pub fn harvest(doc: &Document) -> Metadata {
    let mut harvester = Harvester::new();
    let mut title_node: Option<NodeRef> = None;

    if let Some(root) = dom::document_element(doc) {
        let stop = walk::skip_descendants(&root);
        let mut curr = walk::following(&root);
        while let Some(node) = curr {
            if stop.as_ref().is_some_and(|s| s.id == node.id) {
                break;
            }
            if dom::has_tag(&node, &["title"]) {
                title_node = Some(node);
            } else if dom::has_tag(&node, &["meta"]) {
                if let Some(content) = dom::attr(&node, "content") {
                    let property = dom::attr(&node, "property");
                    if let Some(property) = property.filter(|p| META_PROPERTY.is_match(p)) {
                        harvester.take_meta(&property, &content);
                    } else if let Some(name) =
                        dom::attr(&node, "name").filter(|n| META_NAME.is_match(n))
                    {
                        harvester.take_meta(&name, &content);
                    }
                }
            }
            curr = walk::following(&node);
        }
    }

    let mut meta = harvester.meta;
    if meta.title.is_none() {
        if let Some(node) = title_node {
            meta.title = Some(article_title(doc, &node));
        }
    }
    meta
}

/// Trim and entity-unescape the harvested string fields for presentation.
pub fn clean(meta: &mut Metadata) {
    for field in [
        &mut meta.title,
        &mut meta.byline,
        &mut meta.excerpt,
        &mut meta.site_name,
    ] {
        if let Some(value) = field.as_ref() {
            *field = Some(text::trim_and_unescape(value));
        }
    }
}

/// Is there a `<h1>`/`<h2>` in the document whose normalized text equals the
/// given string?
fn has_heading_with_text(doc: &Document, wanted: &str) -> bool {
    let Some(root) = dom::document_element(doc) else {
        return false;
    };
    walk::has_such_descendant(&root, |node| {
        dom::has_tag(node, &["h1", "h2"]) && text::normalized_text(node) == wanted
    })
}

/// Derive the article title from the `<title>` element.
///
/// A trailing ` | Site Name` style suffix is dropped; a `Site: Title` prefix
/// is dropped unless a heading repeats the full text. Overzealous cuts are
/// reverted when too few words remain.
fn article_title(doc: &Document, title_node: &NodeRef) -> String {
    let original = text::normalize_whitespace(&dom::text(title_node));
    let mut title = original.clone();
    let mut had_separator = false;

    if let Some(idx) = text::find_last_separator(&title) {
        had_separator = true;
        // also drop the space in front of the separator
        title.truncate(idx - 1);
    } else if let Some(colon) = title.rfind(':') {
        // fx: Check if we have an heading containing this exact string, so
        // we could assume it's the full title.
        if has_heading_with_text(doc, &title) {
            return title;
        }
        title = title[colon + 1..].to_string();
    }

    let title_words = text::word_count(&title, false) as isize;
    let original_words = text::word_count(&original, true) as isize;
    if title_words <= 4 && (!had_separator || title_words != original_words - 1) {
        title = original;
    }
    title
}
