//! Text utilities: whitespace normalization, entity unescaping, counting
//! helpers and the link-density heuristic.
//!
//! Length heuristics come in two flavors and they are not interchangeable:
//! `text_len` is a raw byte length with the ends trimmed, while
//! `normalized_text_len` counts code points after whitespace collapsing.
//! The scoring passes depend on which one is used where.

use crate::dom::{self, NodeRef};
use crate::patterns::HAS_CONTENT;
use crate::walk;

/// Non-breaking space, collapsed along with ASCII whitespace.
const NBSP: char = '\u{00A0}';
/// Zero-width space, dropped entirely.
const ZWSP: char = '\u{200B}';

/// Whitespace as the normalizer understands it.
#[inline]
#[must_use]
pub fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

/// Collapse runs of whitespace (including non-breaking spaces) into a single
/// space and drop zero-width spaces. Leading and trailing runs still produce
/// one space each; trimming is the caller's business.
#[must_use]
pub fn normalize_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_run = false;
    for ch in s.chars() {
        if ch == ZWSP {
            continue;
        }
        if is_space(ch) || ch == NBSP {
            if !in_run {
                out.push(' ');
                in_run = true;
            }
        } else {
            out.push(ch);
            in_run = false;
        }
    }
    out
}

/// Get a node's text content with whitespace normalized.
#[must_use]
pub fn normalized_text(node: &NodeRef) -> String {
    normalize_whitespace(&dom::text(node))
}

/// Length in code points of a node's normalized text, not counting the
/// single leading/trailing space the normalizer may leave.
#[must_use]
pub fn normalized_text_len(node: &NodeRef) -> usize {
    normalized_str_len(&normalized_text(node))
}

/// Like `normalized_text_len`, but for an already normalized string.
#[must_use]
pub fn normalized_str_len(s: &str) -> usize {
    if s.is_empty() {
        return 0;
    }
    let mut count = s.chars().count();
    if s.starts_with(' ') {
        count -= 1;
    }
    if s.len() > 1 && s.ends_with(' ') {
        count -= 1;
    }
    count
}

/// Raw byte length of a node's text content, ignoring leading and trailing
/// whitespace. No collapsing happens in between.
#[must_use]
pub fn text_len(node: &NodeRef) -> usize {
    let text = dom::text(node);
    text.trim_matches(is_space).len()
}

/// Get a text node's content, normalized unless it sits inside `<pre>` or
/// `<code>` ancestry.
#[must_use]
pub fn normalized_or_preformatted(node: &NodeRef) -> String {
    if dom::ancestor_with_tag(node, "code").is_some()
        || dom::ancestor_with_tag(node, "pre").is_some()
    {
        return dom::text(node).to_string();
    }
    normalize_whitespace(&dom::text(node))
}

/// Count occurrences of a character in a string.
#[must_use]
pub fn char_count(s: &str, c: char) -> usize {
    s.chars().filter(|&ch| ch == c).count()
}

/// fx: Get the density of links as a percentage of the content. This is the
/// amount of text that is inside a link divided by the total text in the node.
#[must_use]
pub fn link_density(node: &NodeRef) -> f64 {
    let text_len = normalized_text_len(node);
    if text_len == 0 {
        return 0.0;
    }
    let link_len = walk::total_for_descendants(node, |n| {
        if dom::has_tag(n, &["a"]) {
            normalized_text_len(n) as f64
        } else {
            0.0
        }
    });
    link_len / text_len as f64
}

// === Phrasing content ===

const PHRASING_ELEMS: &[&str] = &[
    "abbr", "audio", "b", "bdo", "br", "button", "cite", "code", "data",
    "datalist", "dfn", "em", "embed", "i", "img", "input", "kbd", "label",
    "mark", "math", "meter", "noscript", "object", "output", "progress", "q",
    "ruby", "samp", "script", "select", "small", "span", "strong", "sub",
    "sup", "textarea", "time", "var", "wbr",
];

fn is_definitely_phrasing(node: &NodeRef) -> bool {
    if node.is_text() {
        return true;
    }
    dom::has_tag(node, PHRASING_ELEMS)
}

fn is_conditional_phrasing(node: &NodeRef) -> bool {
    dom::has_tag(node, &["a", "del", "ins"])
}

fn can_be_phrasing(node: &NodeRef) -> bool {
    is_definitely_phrasing(node) || is_conditional_phrasing(node)
}

/// fx: Determine if a node qualifies as phrasing content.
///
/// `a`, `del` and `ins` only qualify when all their descendants do.
#[must_use]
pub fn is_phrasing_content(node: &NodeRef) -> bool {
    if is_definitely_phrasing(node) {
        return true;
    }
    if !is_conditional_phrasing(node) {
        return false;
    }
    walk::forall_descendants(node, can_be_phrasing)
}

/// fx: Check if this node has only whitespace and a single element with the
/// given tag. Returns the child element, or None if the check failed.
#[must_use]
pub fn single_tag_inside<'a>(node: &NodeRef<'a>, tag: &str) -> Option<NodeRef<'a>> {
    let mut element_child: Option<NodeRef<'a>> = None;
    let mut child = node.first_child();
    while let Some(n) = child {
        if n.is_element() {
            if element_child.is_some() || !dom::has_tag(&n, &[tag]) {
                return None;
            }
            element_child = Some(n);
        } else if n.is_text() && HAS_CONTENT.is_match(&dom::text(&n)) {
            return None;
        }
        child = n.next_sibling();
    }
    element_child
}

// === Words and separators ===

/// Characters that commonly separate an article title from the site name.
const SEPARATORS: &[char] = &['|', '-', '\\', '/', '>', '»'];

/// Count the words in a string, optionally treating title separators as
/// word boundaries too.
#[must_use]
pub fn word_count(s: &str, separators_are_spaces: bool) -> usize {
    let is_boundary = |c: char| {
        is_space(c) || (separators_are_spaces && SEPARATORS.contains(&c))
    };
    s.split(is_boundary).filter(|w| !w.is_empty()).count()
}

/// Find the byte offset of the last title separator in a string, or None.
///
/// A separator only counts with a space on both sides, so hyphenated words
/// survive.
#[must_use]
pub fn find_last_separator(s: &str) -> Option<usize> {
    let mut last: Option<usize> = None;
    let mut prev: Option<char> = None;
    let mut iter = s.char_indices().peekable();
    while let Some((i, c)) = iter.next() {
        if i > 0 && SEPARATORS.contains(&c) && prev == Some(' ') {
            if let Some(&(_, next)) = iter.peek() {
                if next == ' ' {
                    last = Some(i);
                }
            }
        }
        prev = Some(c);
    }
    last
}

/// Trim leading whitespace and unescape the HTML entities the engine
/// recognizes: the five named ones plus decimal numeric references.
#[must_use]
pub fn trim_and_unescape(s: &str) -> String {
    let start = s.trim_start_matches(is_space);
    let mut out = String::with_capacity(start.len());
    let mut rest = start;

    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];

        let mut replaced = None;
        for (entity, ch) in [
            ("&amp;", '&'),
            ("&quot;", '"'),
            ("&apos;", '\''),
            ("&lt;", '<'),
            ("&gt;", '>'),
        ] {
            if rest.starts_with(entity) {
                replaced = Some((ch, entity.len()));
                break;
            }
        }

        if let Some((ch, len)) = replaced {
            out.push(ch);
            rest = &rest[len..];
        } else if rest[1..].starts_with('#') {
            let digits: String = rest[2..].chars().take_while(char::is_ascii_digit).collect();
            if let Some(code) = digits.parse::<u32>().ok().and_then(char::from_u32) {
                out.push(code);
            }
            // An unterminated numeric reference ends the string here
            match rest.find(';') {
                Some(semi) => rest = &rest[semi + 1..],
                None => return out,
            }
        } else {
            out.push('&');
            rest = &rest[1..];
        }
    }
    out.push_str(rest);
    out
}

/// Is `word` one of the whitespace-delimited words in `s`? Case-insensitive.
#[must_use]
pub fn word_in_str(s: &str, word: &str) -> bool {
    s.split(is_space)
        .any(|w| !w.is_empty() && w.eq_ignore_ascii_case(word))
}
