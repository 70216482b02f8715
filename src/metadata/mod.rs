//! Structured metadata extraction.
//!
//! Collects the machine-readable annotations a page embeds independently of
//! its visible text: Open Graph `<meta property>` tags, JSON-LD script blocks
//! and microdata items. URLs inside microdata are resolved against the page's
//! base URL, which honours a `<base href>` element.
//!
//! `StructuredData` is public output for callers that want the full picture.
//! Date resolution only needs Open Graph and uses [`extract_opengraph_only`].

pub mod json_ld;
pub mod microdata;
pub mod opengraph;

use dom_query::Document;
use serde::Serialize;
use url::Url;

use crate::dom;

pub use microdata::{MicrodataItem, MicrodataValue};
pub use opengraph::OpenGraphItem;

/// Everything structured found on one page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StructuredData {
    /// One entry per `<head>` carrying Open Graph properties.
    pub opengraph: Vec<OpenGraphItem>,

    /// Decoded JSON-LD documents, arrays flattened.
    pub json_ld: Vec<serde_json::Value>,

    /// Top-level microdata items.
    pub microdata: Vec<MicrodataItem>,
}

impl StructuredData {
    /// Values of an Open Graph property across all items, in document order.
    pub fn opengraph_values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.opengraph.iter().flat_map(move |og| {
            og.properties
                .iter()
                .filter(move |(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        })
    }
}

/// Extract structured metadata from raw HTML.
#[must_use]
pub fn extract(html: &str, base_url: &str) -> StructuredData {
    let doc = Document::from(html);
    extract_from_document(&doc, base_url)
}

/// Extract structured metadata from an already parsed document.
#[must_use]
pub fn extract_from_document(doc: &Document, base_url: &str) -> StructuredData {
    StructuredData {
        opengraph: opengraph::extract_opengraph(doc),
        json_ld: json_ld::extract_json_ld(doc),
        microdata: microdata::extract_microdata(doc, base_url),
    }
}

/// Open Graph items only; JSON-LD and microdata stay empty.
#[must_use]
pub fn extract_opengraph_only(doc: &Document) -> StructuredData {
    StructuredData {
        opengraph: opengraph::extract_opengraph(doc),
        ..StructuredData::default()
    }
}

/// Base URL of a page: its `<base href>` resolved against the page URL, or
/// the page URL itself.
#[must_use]
pub fn base_url(doc: &Document, page_url: &str) -> String {
    let Some(href) = dom::select_first(doc, "base[href]").and_then(|b| dom::attribute_text(&b, "href")) else {
        return page_url.to_string();
    };
    resolve_url(page_url, &href)
}

/// Resolve a possibly relative reference against a base URL.
///
/// Falls back to the reference unchanged when the base is not absolute.
#[must_use]
pub fn resolve_url(base: &str, reference: &str) -> String {
    match Url::parse(base).and_then(|b| b.join(reference)) {
        Ok(url) => url.to_string(),
        Err(_) => reference.to_string(),
    }
}
