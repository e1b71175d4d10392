//! Result types for extraction output.
//!
//! This module defines the structured output from article extraction: the
//! article itself in HTML and plain-text form, plus the harvested metadata.

use serde::{Deserialize, Serialize};

/// Result of article extraction from an HTML document.
#[derive(Debug, Clone, Default)]
pub struct ExtractResult {
    /// The article as HTML. Exactly one element carries
    /// `id="readability-page-1"` and `class="page"`.
    pub content_html: String,

    /// The article as whitespace-normalized plain text.
    pub content_text: String,

    /// Metadata harvested from the document.
    pub metadata: Metadata,
}

/// Metadata harvested from an HTML document.
///
/// All fields are optional as metadata may not be present in all documents.
/// Values are whitespace-normalized and entity-unescaped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Article title.
    pub title: Option<String>,

    /// Author name(s).
    pub byline: Option<String>,

    /// Article description, or the first paragraph as a fallback.
    pub excerpt: Option<String>,

    /// Site name (e.g. from `og:site_name`).
    pub site_name: Option<String>,

    /// Text direction (`ltr` or `rtl`) found on the article's ancestry.
    pub direction: Option<String>,
}
