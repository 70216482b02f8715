//! DOM Operations Adapter
//!
//! Thin helpers over the `dom_query` crate shared by the extractor, the text
//! recoverer and the date strategies. Everything here is read-only: the
//! document tree is built once per invocation and never mutated.

// Re-export core types for external use
pub use dom_query::{Document, NodeRef, Selection};

// Re-export StrTendril for external use
pub use tendril::StrTendril;

// === Attribute Operations ===

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Get a non-empty, trimmed attribute value
#[must_use]
pub fn attribute_text(sel: &Selection, name: &str) -> Option<String> {
    let value = sel.attr(name)?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

// === Tag/Node Information ===

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(NodeRef::node_name)
        .map(|t| t.to_ascii_lowercase())
}

/// Tag name of a node's parent element.
///
/// Returns `None` when the parent is the document itself (or the node is
/// detached), which callers treat as the document root.
#[must_use]
pub fn parent_tag(node: &NodeRef) -> Option<String> {
    let parent = node.parent()?;
    if !parent.is_element() {
        return None;
    }
    parent.node_name().map(|t| t.to_ascii_lowercase())
}

// === Text Content ===

/// Get all text content of node and descendants
///
/// Returns `StrTendril` for zero-copy passing. Use `.to_string()` only when
/// you need owned storage.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Text content with surrounding whitespace removed.
#[must_use]
pub fn trimmed_text(sel: &Selection) -> String {
    sel.text().trim().to_string()
}

/// Text nodes under the first node of a selection, in document order.
#[must_use]
pub fn text_nodes<'a>(sel: &Selection<'a>) -> Vec<NodeRef<'a>> {
    let Some(root) = sel.nodes().first() else {
        return Vec::new();
    };
    root.descendants()
        .into_iter()
        .filter(NodeRef::is_text)
        .collect()
}

/// Collapse runs of whitespace into single spaces.
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Number of whitespace-separated words.
#[inline]
#[must_use]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

// === Querying ===

/// Query all elements by CSS selector, one `Selection` per element.
#[must_use]
pub fn select_each<'a>(doc: &'a Document, selector: &str) -> Vec<Selection<'a>> {
    doc.select(selector)
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .collect()
}

/// First element matching a CSS selector.
#[must_use]
pub fn select_first<'a>(doc: &'a Document, selector: &str) -> Option<Selection<'a>> {
    doc.select(selector)
        .nodes()
        .first()
        .map(|node| Selection::from(*node))
}

/// Content attribute of the first `<meta>` whose `attr` equals `value`.
#[must_use]
pub fn meta_content(doc: &Document, attr: &str, value: &str) -> Option<String> {
    select_each(doc, &format!(r#"meta[{attr}="{value}"]"#))
        .iter()
        .find_map(|meta| attribute_text(meta, "content"))
}
