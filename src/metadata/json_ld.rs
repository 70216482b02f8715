//! JSON-LD block decoding.
//!
//! Blocks that fail strict decoding get one retry after stripping HTML comment
//! markers and a trailing semicolon, both common in CMS templates. Blocks that
//! still fail are skipped.

use dom_query::Document;
use serde_json::Value;
use tracing::debug;

use crate::dom;

/// Selector for JSON-LD script blocks.
pub const JSON_LD_SELECTOR: &str = r#"script[type="application/ld+json"]"#;

/// Raw, trimmed text of every non-empty JSON-LD block in document order.
#[must_use]
pub fn json_ld_blocks(doc: &Document) -> Vec<String> {
    dom::select_each(doc, JSON_LD_SELECTOR)
        .iter()
        .map(dom::trimmed_text)
        .filter(|text| !text.is_empty())
        .collect()
}

fn decode_lenient(raw: &str) -> Option<Value> {
    if let Ok(value) = serde_json::from_str(raw) {
        return Some(value);
    }
    let cleaned = raw
        .trim()
        .trim_start_matches("<!--")
        .trim_end_matches("-->")
        .trim()
        .trim_end_matches(';');
    serde_json::from_str(cleaned).ok()
}

/// Decode every JSON-LD block; top-level arrays are flattened.
#[must_use]
pub fn extract_json_ld(doc: &Document) -> Vec<Value> {
    let mut items = Vec::new();
    for raw in json_ld_blocks(doc) {
        match decode_lenient(&raw) {
            Some(Value::Array(values)) => items.extend(values),
            Some(value) => items.push(value),
            None => debug!(len = raw.len(), "skipping undecodable JSON-LD block"),
        }
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrays_are_flattened() {
        let doc = Document::from(
            r#"<script type="application/ld+json">[{"@type": "A"}, {"@type": "B"}]</script>
               <script type="application/ld+json">{"@type": "C"}</script>"#,
        );
        let items = extract_json_ld(&doc);
        let types: Vec<&str> = items.iter().filter_map(|v| v["@type"].as_str()).collect();
        assert_eq!(types, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_comment_wrapped_block() {
        let doc = Document::from(
            r#"<script type="application/ld+json"><!-- {"@type": "A"}; --></script>"#,
        );
        assert_eq!(extract_json_ld(&doc).len(), 1);
    }

    #[test]
    fn test_broken_block_is_skipped() {
        let doc = Document::from(
            r#"<script type="application/ld+json">{"@type": "A",,}</script>
               <script type="application/ld+json">   </script>"#,
        );
        assert!(extract_json_ld(&doc).is_empty());
        assert_eq!(json_ld_blocks(&doc).len(), 1);
    }
}
