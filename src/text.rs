//! Body text recovery.
//!
//! When the primary extractor judges its own body invalid, the longest
//! rendering of an `<article>` or `<main>` element is used instead. Rendering
//! keeps every text node except those sitting directly inside boilerplate
//! tags such as `script` or `header`.

use tracing::debug;

use crate::dom::{self, Document, Selection};

/// Parent tags whose direct text never contributes to a rendering.
///
/// `[document]` stands for text attached to the document root itself.
pub const TEXT_TAG_BLACKLIST: &[&str] = &[
    "[document]",
    "noscript",
    "header",
    "meta",
    "head",
    "input",
    "script",
    "style",
    "svg",
    "iframe",
    "figcaption",
];

/// Candidate container tags, in scan order. Later tags win only on a
/// strictly greater word count.
const CANDIDATE_TAGS: &[&str] = &["article", "main"];

/// Render the text under an element.
///
/// Each kept text node is followed by a single space, so the result always
/// ends in a space when non-empty.
#[must_use]
pub fn render_text(element: &Selection) -> String {
    let mut output = String::new();
    for node in dom::text_nodes(element) {
        let parent = dom::parent_tag(&node).unwrap_or_else(|| "[document]".to_string());
        if TEXT_TAG_BLACKLIST.contains(&parent.as_str()) {
            continue;
        }
        output.push_str(&node.text());
        output.push(' ');
    }
    output
}

/// Recovers body text from the document tree when the primary body is unusable.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRecoverer;

impl TextRecoverer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Returns a replacement body, or `None` if the primary text should stand.
    #[must_use]
    pub fn recover(&self, valid_body: bool, document: &Document) -> Option<String> {
        if valid_body {
            return None;
        }

        let mut best = String::new();
        let mut best_words = 0;
        for tag in CANDIDATE_TAGS {
            for element in dom::select_each(document, tag) {
                let rendering = render_text(&element);
                let words = dom::word_count(&rendering);
                if words > best_words {
                    debug!(tag, words, "text recovery candidate");
                    best = rendering;
                    best_words = words;
                }
            }
        }

        if best_words == 0 {
            None
        } else {
            Some(best)
        }
    }
}
