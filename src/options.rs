//! Configuration options for article extraction.
//!
//! The `Options` struct controls extraction behavior. The three heuristic
//! flags start enabled; the retry loop clears them one at a time on a
//! session-local copy, so the caller's value is never mutated.

/// Configuration options for article extraction.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use rs_readerview::Options;
///
/// // Use defaults
/// let options = Options::default();
///
/// // Customize specific fields
/// let options = Options {
///     base_url: Some("https://example.com/post/".to_string()),
///     ..Options::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Remove nodes whose class/id look unlikely to hold article content.
    ///
    /// May be cleared by the retry loop when too little content survives.
    ///
    /// Default: `true`
    pub strip_unlikely: bool,

    /// Weigh class and id attributes when scoring nodes.
    ///
    /// May be cleared by the retry loop when too little content survives.
    ///
    /// Default: `true`
    pub weight_classes: bool,

    /// Remove "fishy" tables, lists, divs and forms during article cleanup.
    ///
    /// May be cleared by the retry loop when too little content survives.
    ///
    /// Default: `true`
    pub clean_conditionally: bool,

    /// Base URL used to resolve relative URLs in the article.
    ///
    /// A `<base href>` element in the document overrides this value.
    ///
    /// Default: `None`
    pub base_url: Option<String>,

    /// Ordered, comma-separated list of metadata fields to interleave into
    /// the output article.
    ///
    /// Recognized fields: `title`, `byline`, `excerpt`, `sitename`, `url`,
    /// and the `body` position marker. Fields named before `body` are
    /// inserted ahead of the article content, fields after it are appended.
    ///
    /// Default: `None` (body only)
    pub template: Option<String>,

    /// Number of characters an extracted article must have for an attempt
    /// to be accepted without weakening the heuristic flags.
    ///
    /// Default: `500`
    pub char_threshold: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            strip_unlikely: true,
            weight_classes: true,
            clean_conditionally: true,
            base_url: None,
            template: None,
            char_threshold: 500,
        }
    }
}
