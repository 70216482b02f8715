//! Body text extraction and the body-validity verdict.
//!
//! The body comes from a readability pass when the `readability` feature is
//! enabled and it produces text; otherwise paragraphs are scored and the
//! container holding the densest run of prose is taken.

use std::collections::{HashMap, HashSet};

use dom_query::NodeId;
use tracing::debug;

use crate::dom::{self, Document, NodeRef, Selection};
use crate::Options;

/// Block elements whose text forms the paragraphs of a body.
const BLOCK_SELECTOR: &str = "p, h2, h3, h4, h5, h6, pre";

/// Containers whose paragraphs are never body text.
const BOILERPLATE_TAGS: &[&str] = &[
    "nav", "footer", "header", "aside", "form", "script", "style", "noscript", "figcaption",
];

/// URL fragments of media pages, whose text is accepted at any length.
const MEDIA_URL_MARKERS: &[&str] = &["/video", "/slide", "/gallery", "/powerpoint", "/fashion", "/glamour", "/cloth"];

/// Paragraphs with fewer words carry no score.
const MIN_PARAGRAPH_WORDS: usize = 3;

// === Block text ===

/// Text of the block elements under `root`, one paragraph per block,
/// separated by blank lines. Falls back to the whole text when there are no
/// blocks.
#[must_use]
pub fn block_text(root: &Selection) -> String {
    let mut seen = HashSet::new();
    let blocks: Vec<String> = root
        .select(BLOCK_SELECTOR)
        .nodes()
        .iter()
        .map(|node| dom::normalize_whitespace(&node.text()))
        .filter(|text| !text.is_empty() && seen.insert(text.clone()))
        .collect();

    if blocks.is_empty() {
        dom::normalize_whitespace(&dom::text_content(root))
    } else {
        blocks.join("\n\n")
    }
}

// === Readability ===

#[cfg(feature = "readability")]
fn readability_text(doc: &Document) -> Option<String> {
    use dom_smoothie::Readability;

    let mut reader = match Readability::with_document(doc.clone(), None, None) {
        Ok(reader) => reader,
        Err(err) => {
            debug!(%err, "readability setup failed");
            return None;
        }
    };
    let article = match reader.parse() {
        Ok(article) => article,
        Err(err) => {
            debug!(%err, "readability found no article");
            return None;
        }
    };

    let content_doc = Document::from(article.content.to_string());
    let text = block_text(&content_doc.select("body"));
    (!text.is_empty()).then_some(text)
}

#[cfg(not(feature = "readability"))]
fn readability_text(_doc: &Document) -> Option<String> {
    None
}

// === Paragraph scoring ===

fn inside_boilerplate(node: &NodeRef) -> bool {
    let mut current = node.parent();
    while let Some(parent) = current {
        if let Some(name) = parent.node_name() {
            if BOILERPLATE_TAGS.contains(&name.to_ascii_lowercase().as_str()) {
                return true;
            }
        }
        current = parent.parent();
    }
    false
}

/// Container with the highest paragraph score.
///
/// Each paragraph scores its word count; its parent receives the full score
/// and its grandparent half of it.
#[must_use]
pub fn best_container<'a>(doc: &'a Document) -> Option<Selection<'a>> {
    let mut scores: HashMap<NodeId, (NodeRef<'a>, f64)> = HashMap::new();

    for paragraph in doc.select("body p").nodes() {
        if inside_boilerplate(paragraph) {
            continue;
        }
        let words = dom::word_count(&paragraph.text());
        if words < MIN_PARAGRAPH_WORDS {
            continue;
        }
        #[allow(clippy::cast_precision_loss)]
        let score = words as f64;

        let Some(parent) = paragraph.parent() else {
            continue;
        };
        scores.entry(parent.id).or_insert((parent, 0.0)).1 += score;
        if let Some(grandparent) = parent.parent().filter(NodeRef::is_element) {
            scores.entry(grandparent.id).or_insert((grandparent, 0.0)).1 += score / 2.0;
        }
    }

    scores
        .into_values()
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(node, score)| {
            debug!(score, "best paragraph container");
            Selection::from(node)
        })
}

/// Body text of a page: readability first (if enabled), then the
/// paragraph scorer. Empty when neither finds anything.
#[must_use]
pub fn extract_body(doc: &Document, options: &Options) -> String {
    if options.use_readability {
        if let Some(text) = readability_text(doc) {
            return text;
        }
    }
    best_container(doc)
        .map(|container| block_text(&container))
        .unwrap_or_default()
}

// === Validity ===

/// Whether the URL points at a media page (video, gallery, ...).
#[must_use]
pub fn is_media_url(url: &str) -> bool {
    MEDIA_URL_MARKERS.iter().any(|marker| url.contains(marker))
}

/// Whether an extracted body is trustworthy as the article text.
///
/// An `og:type` of `article` with more than `min_word_count` words is
/// enough. Otherwise the body needs text (media pages excepted), a title of
/// two or more words, and enough words and sentences.
#[must_use]
pub fn is_valid_body(
    text: &str,
    title: &str,
    og_type: Option<&str>,
    url: &str,
    html: &str,
    options: &Options,
) -> bool {
    let words = dom::word_count(text);
    if og_type == Some("article") && words > options.min_word_count {
        return true;
    }
    if text.trim().is_empty() {
        return false;
    }
    if is_media_url(url) {
        return true;
    }
    if dom::word_count(title) < 2 {
        return false;
    }
    if words < options.min_word_count {
        return false;
    }
    let sentences = text.split(". ").count();
    if sentences < options.min_sentence_count {
        return false;
    }
    !html.is_empty()
}
