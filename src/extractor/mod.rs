//! Primary article extraction.
//!
//! The primary extractor produces a first reading of the page: headline,
//! description, authors, tags, a declared publication date, the body text,
//! and whether that body looks like a real article. Later stages only fill in
//! what it misses.
//!
//! # Module Structure
//!
//! - `fields`: title, description, authors, tags and the declared date
//! - `body`: body text (readability or paragraph scoring) and the validity verdict

pub mod body;
pub mod fields;

use std::fmt;

use tracing::debug;

use crate::date::{DateParser, FuzzyDateParser};
use crate::dom::{self, Document};
use crate::error::Result;
use crate::result::PublishedDate;
use crate::Options;

/// First reading of a page by a structural extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrimaryArticle {
    pub title: String,
    /// Body text; replaced by text recovery when `valid_body` is false.
    pub text: String,
    /// The extractor's own verdict on `text`.
    pub valid_body: bool,
    pub publish_date: Option<PublishedDate>,
    pub meta_description: String,
    pub authors: Vec<String>,
    pub tags: Vec<String>,
    /// HTML the extractor worked on.
    pub html: String,
    pub url: String,
}

impl PrimaryArticle {
    /// Replace the body text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

/// Produces a `PrimaryArticle` from raw HTML.
pub trait StructuralExtractor: Send + Sync + fmt::Debug {
    fn extract(&self, url: &str, html: &str) -> Result<PrimaryArticle>;
}

/// DOM-based extractor built on `dom_query` (and `dom_smoothie` for the
/// readability pass).
#[derive(Debug)]
pub struct DomArticleExtractor {
    options: Options,
    parser: Box<dyn DateParser>,
}

impl DomArticleExtractor {
    #[must_use]
    pub fn new(options: &Options) -> Self {
        Self {
            options: options.clone(),
            parser: Box::new(FuzzyDateParser::new()),
        }
    }

    /// Use another parser for declared dates.
    #[must_use]
    pub fn with_date_parser(mut self, parser: Box<dyn DateParser>) -> Self {
        self.parser = parser;
        self
    }
}

impl StructuralExtractor for DomArticleExtractor {
    fn extract(&self, url: &str, html: &str) -> Result<PrimaryArticle> {
        let doc = Document::from(html);

        let title = fields::extract_title(&doc);
        let text = body::extract_body(&doc, &self.options);
        let og_type = dom::meta_content(&doc, "property", "og:type");
        let valid_body = body::is_valid_body(&text, &title, og_type.as_deref(), url, html, &self.options);

        debug!(
            words = dom::word_count(&text),
            valid_body,
            "primary extraction finished"
        );

        Ok(PrimaryArticle {
            title,
            text,
            valid_body,
            publish_date: fields::extract_publish_date(&doc, self.parser.as_ref()),
            meta_description: fields::extract_description(&doc),
            authors: fields::extract_authors(&doc),
            tags: fields::extract_tags(&doc),
            html: html.to_string(),
            url: url.to_string(),
        })
    }
}
