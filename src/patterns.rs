//! Compiled regex patterns for article extraction.
//!
//! All patterns are compiled once at startup using `LazyLock`. The literals
//! are compatibility-sensitive: downstream behavior depends on them matching
//! exactly these alternations, so resist the urge to "optimize" them.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Candidate and boilerplate detection
// =============================================================================

/// Class/id fragments that mark a node as unlikely article content.
pub static UNLIKELY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)-ad-|ai2html|banner|breadcrumbs|combx|comment|community|cover-wrap|disqus|extra|footer|gdpr|header|legends|menu|related|remark|replies|rss|shoutbox|sidebar|skyscraper|social|sponsor|supplemental|ad-break|agegate|pagination|pager|popup|yom-remote",
    )
    .expect("UNLIKELY regex")
});

/// Class/id fragments that rescue a node from the unlikely list.
pub static CANDIDATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)and|article|body|column|content|main|shadow").expect("CANDIDATE regex")
});

/// Class/id fragments that mark a byline node.
pub static BYLINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)byline|author|dateline|writtenby|p-author").expect("BYLINE regex")
});

/// Class/id fragments that subtract from a node's class weight.
pub static NEGATIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)hidden|^hid$| hid$| hid |^hid |banner|combx|comment|com-|contact|foot|footer|footnote|gdpr|masthead|media|meta|outbrain|promo|related|scroll|share|shoutbox|sidebar|skyscraper|sponsor|shopping|tags|tool|widget",
    )
    .expect("NEGATIVE regex")
});

/// Class/id fragments that add to a node's class weight.
pub static POSITIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)article|body|content|entry|hentry|h-entry|main|page|pagination|post|text|blog|story",
    )
    .expect("POSITIVE regex")
});

/// Share-widget class/id names. The trailing `|_)` alternation is kept as-is
/// for compatibility.
pub static SHARE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(^|[\s_])(share|sharedaddy)($|[\s_]|_)").expect("SHARE regex")
});

// =============================================================================
// Metadata harvesting
// =============================================================================

/// Recognized `property` values of a `<meta>` tag.
pub static META_PROPERTY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*(dc|dcterm|og|twitter)\s*:\s*(author|creator|description|title|site_name)\s*")
        .expect("META_PROPERTY regex")
});

/// Recognized `name` values of a `<meta>` tag.
pub static META_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*((dc|dcterm|og|twitter|weibo:(article|webpage))\s*[\.:]\s*)?(author|creator|description|title|site_name)\s*$",
    )
    .expect("META_NAME regex")
});

// =============================================================================
// Content heuristics
// =============================================================================

/// A sentence-ending dot: followed by a space or the end of the text.
pub static SENTENCE_DOT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.( |$)").expect("SENTENCE_DOT regex")
});

/// Text that ends in a non-whitespace character.
pub static HAS_CONTENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\s]$").expect("HAS_CONTENT regex")
});

/// Video-hosting URLs whose embeds survive cleanup.
pub static VIDEOS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)//(www\.)?((dailymotion|youtube|youtube-nocookie|player\.vimeo|v\.qq)\.com|(archive|upload\.wikimedia)\.org|player\.twitch\.tv)",
    )
    .expect("VIDEOS regex")
});

// =============================================================================
// Images and URLs
// =============================================================================

/// An image-file extension anywhere in a value.
pub static IMG_EXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(jpg|jpeg|png|webp)").expect("IMG_EXT regex")
});

/// An attribute value that looks like a srcset: extension followed by a
/// density/width descriptor.
pub static SRCSET_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(jpg|jpeg|png|webp)\s+\d").expect("SRCSET_VALUE regex")
});

/// An attribute value that is a single image URL.
pub static SRC_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*\S+\.(jpg|jpeg|png|webp)\S*\s*$").expect("SRC_VALUE regex")
});

/// A base64 data URL prefix.
pub static B64_DATA_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^data:\s*[^\s;,]+\s*;\s*base64\s*,").expect("B64_DATA_URL regex")
});

/// An absolute URL (with or without an explicit scheme).
pub static ABSOLUTE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z]+:)?//").expect("ABSOLUTE_URL regex")
});

/// Check a possibly missing attribute value against a pattern.
///
/// Predicates all over the engine treat a missing attribute as a non-match.
#[inline]
#[must_use]
pub fn matches_opt(re: &Regex, value: Option<&str>) -> bool {
    value.is_some_and(|v| re.is_match(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlikely_matches_boilerplate_classes() {
        assert!(UNLIKELY.is_match("site-sidebar"));
        assert!(UNLIKELY.is_match("Comment-Thread"));
        assert!(UNLIKELY.is_match("ad-break"));
        assert!(!UNLIKELY.is_match("prose"));
    }

    #[test]
    fn candidate_rescues_content_classes() {
        assert!(CANDIDATE.is_match("main-column"));
        assert!(CANDIDATE.is_match("article"));
        // "and" is matched as a plain substring
        assert!(CANDIDATE.is_match("standalone"));
    }

    #[test]
    fn sentence_dot_needs_space_or_end() {
        assert!(SENTENCE_DOT.is_match("Done."));
        assert!(SENTENCE_DOT.is_match("Done. Next"));
        assert!(!SENTENCE_DOT.is_match("3.14 pie"));
    }

    #[test]
    fn share_matches_whole_tokens_only() {
        assert!(SHARE.is_match("share"));
        assert!(SHARE.is_match("social share_buttons"));
        assert!(SHARE.is_match("sharedaddy"));
        assert!(!SHARE.is_match("shareholder"));
    }

    #[test]
    fn meta_property_accepts_whitespace() {
        assert!(META_PROPERTY.is_match("og:title"));
        assert!(META_PROPERTY.is_match(" og : title "));
        assert!(META_PROPERTY.is_match("twitter:description"));
        assert!(!META_PROPERTY.is_match("og:image"));
    }

    #[test]
    fn meta_name_accepts_dots_and_weibo() {
        assert!(META_NAME.is_match("dc.title"));
        assert!(META_NAME.is_match("weibo:article:description"));
        assert!(META_NAME.is_match("author"));
        assert!(!META_NAME.is_match("og:title extra"));
    }

    #[test]
    fn srcset_and_src_values() {
        assert!(SRCSET_VALUE.is_match("photo.jpg 2x, other.jpg 1x"));
        assert!(!SRCSET_VALUE.is_match("photo.jpg"));
        assert!(SRC_VALUE.is_match("  /images/photo.webp  "));
        assert!(!SRC_VALUE.is_match("one.jpg two.jpg"));
    }

    #[test]
    fn absolute_url_forms() {
        assert!(ABSOLUTE_URL.is_match("https://x.test/a"));
        assert!(ABSOLUTE_URL.is_match("//cdn.x.test/a"));
        assert!(!ABSOLUTE_URL.is_match("/a/b.html"));
        assert!(!ABSOLUTE_URL.is_match("b.html"));
    }

    #[test]
    fn b64_data_url_prefix() {
        assert!(B64_DATA_URL.is_match("data:image/gif;base64,R0lGOD"));
        assert!(B64_DATA_URL.is_match("data: image/png ; base64 ,xxxx"));
        assert!(!B64_DATA_URL.is_match("data:image/svg+xml,<svg/>"));
    }

    #[test]
    fn matches_opt_treats_missing_as_no_match() {
        assert!(!matches_opt(&UNLIKELY, None));
        assert!(matches_opt(&UNLIKELY, Some("sidebar")));
    }
}
