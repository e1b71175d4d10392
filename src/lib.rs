//! # rs-readerview
//!
//! Extracts the main readable article (and its metadata) from an arbitrary
//! HTML document, the way a browser's reader view does: navigation chrome,
//! advertising and boilerplate are stripped away, and what remains is the
//! content a person actually came to read.
//!
//! The engine scores paragraph-ish nodes by how "content-y" they look,
//! promotes the best-scoring subtree to article candidate, pulls in related
//! siblings, and then cleans the result up for presentation. When too little
//! content survives, it retries with progressively weaker heuristics and
//! keeps the best attempt.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_readerview::extract;
//!
//! let html = r#"<html><head><title>My Article | Site</title></head>
//! <body><div><p>The first paragraph of the article, which goes on for a
//! while and talks about things, with commas, like articles do. The second
//! sentence keeps going so the paragraph carries enough weight to stand on
//! its own. A third sentence rounds out the thought, because two alone never
//! quite feel finished. The closing sentence wraps the paragraph up, ties
//! the ideas together, and hands the reader on to whatever comes next in
//! the piece. And a little more text for good measure, padding the count
//! past the acceptance threshold so the extraction succeeds on the first
//! try.</p></div></body></html>"#;
//!
//! let result = extract(html)?;
//! assert_eq!(result.metadata.title.as_deref(), Some("My Article"));
//! assert!(result.content_text.contains("first paragraph"));
//! # Ok::<(), rs_readerview::Error>(())
//! ```
//!
//! ## What it does
//!
//! - **Article extraction**: multi-pass cleanup, paragraph scoring,
//!   candidate selection, sibling gathering and conditional cleaning
//! - **Metadata harvesting**: title, byline, excerpt, site name and text
//!   direction, with ranked meta-tag sources
//! - **Quick check**: [`is_probably_readerable`] answers "is there an
//!   article in here?" without running the full extraction
//!
//! The engine performs no I/O: fetching documents and following redirects
//! belong to the caller (see [`find_html_redirect`] for the one discovery
//! helper it offers).

mod annotations;
mod cleanup;
mod error;
mod extract;
mod grabber;
mod metadata;
mod options;
mod patterns;
mod postprocess;
mod preprocess;
mod readerable;
mod result;

/// DOM operations adapter over `dom_query`.
pub mod dom;

/// Charset detection and transcoding for byte inputs.
pub mod encoding;

/// Text normalization, counting and link-density helpers.
pub mod text;

/// Document-order traversal primitives.
pub mod walk;

// Public API - re-exports
pub use error::{Error, Result};
pub use options::Options;
pub use result::{ExtractResult, Metadata};

/// Extract the main article from an HTML document using default options.
///
/// # Errors
///
/// Returns [`Error::Empty`] for an empty input, [`Error::NoContent`] when
/// nothing article-like could be found, and [`Error::Malformed`] when a
/// structural precondition fails.
pub fn extract(html: &str) -> Result<ExtractResult> {
    extract_with_options(html, &Options::default())
}

/// Extract the main article from an HTML document with custom options.
///
/// # Example
///
/// ```rust
/// use rs_readerview::{extract_with_options, Options};
///
/// let html = "<html><body><p>too short</p></body></html>";
/// let options = Options {
///     base_url: Some("https://example.com/a/".to_string()),
///     ..Options::default()
/// };
/// let _ = extract_with_options(html, &options);
/// ```
///
/// # Errors
///
/// See [`extract`].
pub fn extract_with_options(html: &str, options: &Options) -> Result<ExtractResult> {
    extract::extract_content(html, options)
}

/// Extract from raw bytes, detecting the character encoding from meta tags.
///
/// # Errors
///
/// See [`extract`].
pub fn extract_bytes(html: &[u8]) -> Result<ExtractResult> {
    let html = encoding::transcode_to_utf8(html);
    extract(&html)
}

/// Extract from raw bytes with custom options.
///
/// # Errors
///
/// See [`extract`].
pub fn extract_bytes_with_options(html: &[u8], options: &Options) -> Result<ExtractResult> {
    let html = encoding::transcode_to_utf8(html);
    extract_with_options(&html, options)
}

/// Check whether the document probably holds a readable article, without
/// running the full extraction.
#[must_use]
pub fn is_probably_readerable(html: &str) -> bool {
    readerable::is_probably_readerable(&dom::parse(html))
}

/// Harvest only the metadata record from a document.
#[must_use]
pub fn harvest_metadata(html: &str) -> Metadata {
    let doc = dom::parse(html);
    let mut meta = metadata::harvest(&doc);
    metadata::clean(&mut meta);
    meta
}

/// If the document declares an HTML redirect through
/// `<meta http-equiv="refresh">`, return the target URL. The engine never
/// follows it; that is the caller's decision.
#[must_use]
pub fn find_html_redirect(html: &str) -> Option<String> {
    preprocess::find_html_redirect(&dom::parse(html))
}
