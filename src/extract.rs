//! The extraction pipeline.
//!
//! fx: Runs readability. Workflow:
//!  1. Prep the document by removing script tags, css, etc.
//!  2. Grab the article content from the current dom tree.
//!  3. Clean the article up for presentation.
//!
//! Harvested metadata, the heuristic flag triple and the resolved base URL
//! travel together through the passes as a session, so the retry loop can
//! weaken flags without touching the caller's options.

use url::Url;

use crate::dom::{self, Document};
use crate::error::{Error, Result};
use crate::grabber;
use crate::metadata;
use crate::options::Options;
use crate::postprocess;
use crate::preprocess;
use crate::result::{ExtractResult, Metadata};
use crate::text;

/// State for one extraction call.
///
/// The flags start as copies of the caller's options; the retry loop clears
/// them one at a time. The byline capture is single-shot across attempts.
pub(crate) struct Session {
    pub strip_unlikely: bool,
    pub weight_classes: bool,
    pub clean_conditionally: bool,
    /// Set when the document supplies its own `<base href>`; hash-only
    /// links are then rewritten like any other.
    pub url_override: bool,
    pub base_url: Option<Url>,
    pub char_threshold: usize,
    pub metadata: Metadata,
    pub found_byline: bool,
}

impl Session {
    pub(crate) fn new(options: &Options) -> Self {
        Self {
            strip_unlikely: options.strip_unlikely,
            weight_classes: options.weight_classes,
            clean_conditionally: options.clean_conditionally,
            url_override: false,
            base_url: options
                .base_url
                .as_deref()
                .and_then(|u| Url::parse(u).ok()),
            char_threshold: options.char_threshold,
            metadata: Metadata::default(),
            found_byline: false,
        }
    }

    /// If the document provides a base URL, adopt it.
    fn set_base_url_from_doc(&mut self, doc: &Document) {
        let Some(href) = preprocess::base_href(doc) else {
            return;
        };
        let trimmed = href.trim_end_matches(text::is_space);
        let resolved = match &self.base_url {
            Some(base) => base.join(trimmed).ok(),
            None => Url::parse(trimmed).ok(),
        };
        if let Some(url) = resolved {
            self.base_url = Some(url);
            self.url_override = true;
        }
    }
}

/// Main entry point for article extraction.
pub(crate) fn extract_content(html: &str, options: &Options) -> Result<ExtractResult> {
    if html.trim_matches(text::is_space).is_empty() {
        return Err(Error::Empty);
    }

    let doc = dom::parse(html);
    let mut session = Session::new(options);

    // Metadata comes off the intact document, before any cleanup
    session.metadata = metadata::harvest(&doc);

    preprocess::remove_root_siblings(&doc);
    session.set_base_url_from_doc(&doc);
    preprocess::prep_document(&doc);

    let article_html = grabber::grab_article(&doc, &mut session)?;

    // The winning attempt gets its own tree for the presentation passes
    let fragment = dom::parse_fragment(&article_html);
    let wrapper = dom::document_element(&fragment).ok_or(Error::NoContent)?;

    postprocess::postprocess_article(&wrapper, &mut session);
    metadata::clean(&mut session.metadata);

    // Discard the wrapping div; the main div is the article
    let main_div = dom::first_element_child(&wrapper).ok_or(Error::NoContent)?;

    if let Some(template) = &options.template {
        postprocess::attach_template(&main_div, &session, template)?;
    }

    let content_text = text::normalized_text(&main_div).trim_matches(' ').to_string();
    Ok(ExtractResult {
        content_html: dom::outer_html(&main_div),
        content_text,
        metadata: session.metadata,
    })
}
