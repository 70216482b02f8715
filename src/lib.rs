//! # newsmeta
//!
//! Structured metadata extraction from the raw HTML of news articles.
//!
//! Given a page and its URL, newsmeta produces an [`ArticleItem`]: headline,
//! description, authors, tags, publication date, body text, the body's
//! language and, for articles not already in the target language, a
//! translated copy of the body.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use newsmeta::{parse_with_options, Options};
//!
//! let html = r#"<html><head><title>Storm hits coast</title></head>
//! <body><article><p>Main content here.</p></article></body></html>"#;
//!
//! let options = Options { translate: false, ..Options::default() };
//! if let Some(item) = parse_with_options(html, "https://example.com/2024/03/07/storm", &options)? {
//!     println!("{} ({})", item.title(), item.published_date());
//! }
//! # Ok::<(), newsmeta::Error>(())
//! ```
//!
//! ## Fallbacks
//!
//! - **Body text**: when the primary extractor's body looks invalid, the
//!   largest `<article>` or `<main>` element is rendered instead
//! - **Publication date**: seven strategies, from the extractor's own date
//!   through the URL path, JSON-LD, known site markup, Open Graph, meta tags
//!   and inline scripts
//! - **Translation**: text is chunked for a size-limited backend and chunks
//!   that fail are dropped instead of failing the article

mod error;
mod options;
mod pipeline;
mod result;

/// DOM helpers over `dom_query`.
pub mod dom;

/// Primary article extraction (title, authors, body, validity).
pub mod extractor;

/// Body text recovery from `<article>`/`<main>`.
pub mod text;

/// Publication date strategies and the fuzzy date parser.
pub mod date;

/// Structured metadata extraction (Open Graph, JSON-LD, microdata).
pub mod metadata;

/// Language identification.
pub mod language;

/// Chunked translation and translation backends.
pub mod translate;

// Public API - re-exports
pub use error::{Error, Result};
pub use options::Options;
pub use pipeline::Pipeline;
pub use result::{ArticleItem, PublishedDate, Translation};

/// Parses one page with default options.
///
/// Returns `Ok(None)` when the page has no recoverable body text, and
/// `Err(Error::DateNotFound)` when no publication date can be found.
///
/// # Example
///
/// ```rust,no_run
/// let html = std::fs::read_to_string("article.html")?;
/// let item = newsmeta::parse(&html, "https://example.com/2024/03/07/story")?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse(html: &str, url: &str) -> Result<Option<ArticleItem>> {
    parse_with_options(html, url, &Options::default())
}

/// Parses one page with custom options.
///
/// Builds a fresh [`Pipeline`]; reuse a `Pipeline` directly when parsing
/// many pages.
pub fn parse_with_options(html: &str, url: &str, options: &Options) -> Result<Option<ArticleItem>> {
    Pipeline::new(options.clone())?.parse(html, url)
}
