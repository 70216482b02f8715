//! Microdata extraction.
//!
//! Top-level items are `itemscope` elements that are not themselves a
//! property of another item. An item's properties are the `itemprop`
//! descendants reachable without entering a nested `itemscope`; a nested item
//! becomes the value of the property it is attached to.

use dom_query::{Document, NodeRef, Selection};
use serde::Serialize;

use crate::dom;
use crate::metadata::resolve_url;

/// A microdata property value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MicrodataValue {
    Text(String),
    Item(MicrodataItem),
}

/// One `itemscope` element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MicrodataItem {
    /// `itemtype` URLs.
    #[serde(rename = "type")]
    pub item_type: Vec<String>,

    /// `itemid`, if present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// `(name, value)` pairs in document order; names may repeat.
    pub properties: Vec<(String, MicrodataValue)>,
}

impl MicrodataItem {
    /// First text value of a property.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        self.properties.iter().find_map(|(k, v)| match v {
            MicrodataValue::Text(t) if k == name => Some(t.as_str()),
            _ => None,
        })
    }
}

/// Extract all top-level microdata items.
#[must_use]
pub fn extract_microdata(doc: &Document, base_url: &str) -> Vec<MicrodataItem> {
    dom::select_each(doc, "[itemscope]")
        .iter()
        .filter(|sel| !sel.has_attr("itemprop"))
        .map(|sel| build_item(sel, base_url))
        .collect()
}

fn build_item(scope: &Selection, base_url: &str) -> MicrodataItem {
    let item_type = dom::get_attribute(scope, "itemtype")
        .map(|t| t.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default();
    let id = dom::attribute_text(scope, "itemid");

    let mut properties = Vec::new();
    if let Some(node) = scope.nodes().first() {
        collect_properties(node, base_url, &mut properties);
    }

    MicrodataItem {
        item_type,
        id,
        properties,
    }
}

fn collect_properties(node: &NodeRef, base_url: &str, out: &mut Vec<(String, MicrodataValue)>) {
    for child in node.children() {
        if !child.is_element() {
            continue;
        }
        let sel = Selection::from(child);
        let nested_scope = sel.has_attr("itemscope");

        if let Some(names) = dom::get_attribute(&sel, "itemprop") {
            let value = if nested_scope {
                MicrodataValue::Item(build_item(&sel, base_url))
            } else {
                MicrodataValue::Text(property_value(&sel, base_url))
            };
            for name in names.split_whitespace() {
                out.push((name.to_string(), value.clone()));
            }
        }

        if !nested_scope {
            collect_properties(&child, base_url, out);
        }
    }
}

/// Value of a non-item property, per element type.
fn property_value(sel: &Selection, base_url: &str) -> String {
    let tag = dom::tag_name(sel).unwrap_or_default();
    let url_attr = |name: &str| {
        dom::attribute_text(sel, name)
            .map(|v| resolve_url(base_url, &v))
            .unwrap_or_default()
    };

    match tag.as_str() {
        "meta" => dom::get_attribute(sel, "content").unwrap_or_default(),
        "audio" | "embed" | "iframe" | "img" | "source" | "track" | "video" => url_attr("src"),
        "a" | "area" | "link" => url_attr("href"),
        "object" => url_attr("data"),
        "data" | "meter" => dom::get_attribute(sel, "value").unwrap_or_default(),
        "time" => dom::attribute_text(sel, "datetime")
            .unwrap_or_else(|| dom::normalize_whitespace(&dom::text_content(sel))),
        _ => dom::normalize_whitespace(&dom::text_content(sel)),
    }
}
