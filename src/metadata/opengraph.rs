//! Open Graph extraction.
//!
//! A property is kept when its prefix (`og` in `og:title`) is a known Open
//! Graph namespace or is declared in a `prefix` attribute on `<html>` or
//! `<head>`. Only `<meta>` elements directly under `<head>` are considered.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use dom_query::{Document, Selection};
use regex::Regex;
use serde::Serialize;

use crate::dom;

/// Well-known namespaces, accepted without a `prefix` declaration.
const OG_NAMESPACES: &[(&str, &str)] = &[
    ("og", "http://ogp.me/ns#"),
    ("fb", "http://www.facebook.com/2008/fbml"),
    ("music", "http://ogp.me/ns/music#"),
    ("video", "http://ogp.me/ns/video#"),
    ("article", "http://ogp.me/ns/article#"),
    ("book", "http://ogp.me/ns/book#"),
    ("profile", "http://ogp.me/ns/profile#"),
    ("website", "http://ogp.me/ns/website#"),
];

/// `prefix="og: http://ogp.me/ns# article: http://ogp.me/ns/article#"`
#[allow(clippy::expect_used)]
static PREFIX_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*(\w+):\s*([^\s]+)").expect("valid regex")
});

/// Open Graph properties of one `<head>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OpenGraphItem {
    /// Namespace prefix to URI, for every namespace in use.
    pub namespace: BTreeMap<String, String>,

    /// `(property, content)` pairs in document order.
    pub properties: Vec<(String, String)>,
}

fn declared_namespaces(sel: &Selection, into: &mut BTreeMap<String, String>) {
    if let Some(prefix) = dom::get_attribute(sel, "prefix") {
        for caps in PREFIX_PATTERN.captures_iter(&prefix) {
            into.insert(caps[1].to_string(), caps[2].to_string());
        }
    }
}

/// Extract Open Graph items, one per `<head>` with at least one property.
#[must_use]
pub fn extract_opengraph(doc: &Document) -> Vec<OpenGraphItem> {
    let mut items = Vec::new();

    for head in dom::select_each(doc, "head") {
        let mut namespace = BTreeMap::new();
        let html = head.parent();
        if dom::tag_name(&html).as_deref() == Some("html") {
            declared_namespaces(&html, &mut namespace);
        }
        declared_namespaces(&head, &mut namespace);

        let mut properties = Vec::new();
        for meta in head.children().nodes() {
            let meta = Selection::from(*meta);
            if dom::tag_name(&meta).as_deref() != Some("meta") {
                continue;
            }
            let (Some(property), Some(content)) = (
                dom::get_attribute(&meta, "property"),
                dom::get_attribute(&meta, "content"),
            ) else {
                continue;
            };
            if content.is_empty() {
                continue;
            }

            let prefix = property.split(':').next().unwrap_or_default();
            if let Some((ns, uri)) = OG_NAMESPACES.iter().find(|(ns, _)| *ns == prefix) {
                namespace.insert((*ns).to_string(), (*uri).to_string());
            }
            if namespace.contains_key(prefix) {
                properties.push((property, content));
            }
        }

        if !properties.is_empty() {
            items.push(OpenGraphItem {
                namespace,
                properties,
            });
        }
    }

    items
}
