//! Publication date resolution.
//!
//! A page's publication date can hide in many places, none of them reliable
//! on its own. `DateResolver` runs an ordered list of strategies, from
//! authoritative metadata down to scraped text, and returns the first date
//! any of them produces. A strategy that finds nothing, or finds a string
//! that does not parse, simply yields to the next one; only exhausting the
//! whole list is an error.

pub mod parser;
pub mod strategies;

use std::fmt;

use tracing::debug;

use crate::dom::Document;
use crate::error::{Error, Result};
use crate::result::PublishedDate;

pub use parser::{DateParseError, DateParser, FuzzyDateParser};
pub use strategies::{
    InlineScript, JsonLd, MetaTags, OpenGraph, PrimaryDate, SiteSpecificTags, UrlPath,
};

/// Inputs shared by every strategy for one page.
#[derive(Clone, Copy)]
pub struct DateContext<'a> {
    /// Date already found by the primary extractor.
    pub primary_date: Option<PublishedDate>,
    /// Source URL of the page.
    pub url: &'a str,
    /// Raw HTML of the page.
    pub html: &'a str,
    /// Parsed document tree.
    pub document: &'a Document,
}

/// One way of finding a publication date.
pub trait DateStrategy: Send + Sync + fmt::Debug {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Look for a date; `None` hands over to the next strategy.
    fn find(&self, ctx: &DateContext<'_>, parser: &dyn DateParser) -> Option<PublishedDate>;
}

/// Ordered chain of date strategies.
#[derive(Debug)]
pub struct DateResolver {
    strategies: Vec<Box<dyn DateStrategy>>,
    parser: Box<dyn DateParser>,
}

impl Default for DateResolver {
    fn default() -> Self {
        Self::new(Box::new(FuzzyDateParser::new()))
    }
}

impl DateResolver {
    /// Resolver with the standard strategy order.
    #[must_use]
    pub fn new(parser: Box<dyn DateParser>) -> Self {
        Self::with_strategies(parser, default_strategies())
    }

    /// Resolver with a custom strategy list, tried in the given order.
    #[must_use]
    pub fn with_strategies(parser: Box<dyn DateParser>, strategies: Vec<Box<dyn DateStrategy>>) -> Self {
        Self { strategies, parser }
    }

    /// Names of the configured strategies, in order.
    #[must_use]
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Resolve the publication date of a page.
    pub fn resolve(
        &self,
        primary_date: Option<PublishedDate>,
        url: &str,
        html: &str,
        document: &Document,
    ) -> Result<PublishedDate> {
        let ctx = DateContext {
            primary_date,
            url,
            html,
            document,
        };

        for strategy in &self.strategies {
            if let Some(date) = strategy.find(&ctx, self.parser.as_ref()) {
                debug!(strategy = strategy.name(), %date, "publication date resolved");
                return Ok(date);
            }
            debug!(strategy = strategy.name(), "no publication date");
        }

        Err(Error::DateNotFound {
            url: url.to_string(),
        })
    }
}

/// The standard order: primary extractor, URL path, JSON-LD, site-specific
/// tags, Open Graph, meta tags, inline scripts.
#[must_use]
pub fn default_strategies() -> Vec<Box<dyn DateStrategy>> {
    vec![
        Box::new(PrimaryDate),
        Box::new(UrlPath),
        Box::new(JsonLd),
        Box::new(SiteSpecificTags::default()),
        Box::new(OpenGraph),
        Box::new(MetaTags::default()),
        Box::new(InlineScript),
    ]
}

/// Parse a candidate string, logging and swallowing failures.
pub(crate) fn try_parse(parser: &dyn DateParser, source: &str, candidate: &str) -> Option<PublishedDate> {
    match parser.parse(candidate) {
        Ok(date) => Some(date),
        Err(err) => {
            debug!(source, candidate, %err, "date candidate rejected");
            None
        }
    }
}
