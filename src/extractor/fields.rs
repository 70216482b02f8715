//! Page-level metadata fields: title, description, authors, tags and the
//! declared publication date.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::date::{self, DateParser};
use crate::dom::{self, Document, Selection};
use crate::result::PublishedDate;

// ============================================================
// REGEX PATTERNS
// ============================================================

/// Separators between a headline and the site name in `<title>`.
#[allow(clippy::expect_used)]
static TITLE_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*[\|–—·»]\s*|\s+-\s+|\s*:\s+").expect("valid regex")
});

/// Leading "By" of a byline.
#[allow(clippy::expect_used)]
static BYLINE_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:written\s+)?by\s*:?\s+").expect("valid regex")
});

/// Separators between names in a byline.
#[allow(clippy::expect_used)]
static NAME_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*(?:,|;|&|\||\band\b)\s*").expect("valid regex")
});

#[allow(clippy::expect_used)]
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\S+@\S+\.\S+").expect("valid regex")
});

// ============================================================
// TITLE
// ============================================================

/// `<title>` text with a trailing or leading site name cut off.
///
/// The longest separator-delimited part wins if it is substantial.
#[must_use]
pub fn clean_title_element(doc: &Document) -> Option<String> {
    let title = dom::normalize_whitespace(&dom::text_content(&dom::select_first(doc, "title")?));
    if title.is_empty() {
        return None;
    }

    let parts: Vec<&str> = TITLE_SEPARATOR.split(&title).collect();
    if parts.len() > 1 {
        if let Some(part) = parts.iter().map(|p| p.trim()).max_by_key(|p| p.chars().count()) {
            if part.chars().count() > 10 {
                return Some(part.to_string());
            }
        }
    }

    Some(title)
}

/// Headline: `og:title`, then the cleaned `<title>`, then the first `<h1>`.
#[must_use]
pub fn extract_title(doc: &Document) -> String {
    if let Some(og) = dom::meta_content(doc, "property", "og:title") {
        return dom::normalize_whitespace(&og);
    }
    if let Some(title) = clean_title_element(doc) {
        return title;
    }
    dom::select_each(doc, "h1")
        .iter()
        .map(|h1| dom::normalize_whitespace(&dom::text_content(h1)))
        .find(|t| !t.is_empty())
        .unwrap_or_default()
}

/// `meta[name=description]`, then `og:description`.
#[must_use]
pub fn extract_description(doc: &Document) -> String {
    dom::meta_content(doc, "name", "description")
        .or_else(|| dom::meta_content(doc, "property", "og:description"))
        .map(|d| dom::normalize_whitespace(&d))
        .unwrap_or_default()
}

// ============================================================
// AUTHORS
// ============================================================

const AUTHOR_ATTRS: &[&str] = &["name", "rel", "itemprop", "class", "id"];
const AUTHOR_VALUES: &[&str] = &["author", "byline", "dc.creator", "byl"];

/// Split a byline into individual names.
#[must_use]
pub fn parse_byline(byline: &str) -> Vec<String> {
    let byline = dom::normalize_whitespace(byline);
    let byline = BYLINE_PREFIX.replace(&byline, "");
    let byline = EMAIL_PATTERN.replace_all(&byline, "");

    NAME_SEPARATOR
        .split(&byline)
        .map(str::trim)
        .filter(|name| {
            let words = dom::word_count(name);
            name.chars().count() > 1
                && (1..=5).contains(&words)
                && !name.chars().any(|c| c.is_ascii_digit())
                && !name.contains("http")
        })
        .map(str::to_string)
        .collect()
}

fn author_source_text(sel: &Selection) -> String {
    if dom::tag_name(sel).as_deref() == Some("meta") {
        dom::get_attribute(sel, "content").unwrap_or_default()
    } else {
        dom::text_content(sel).to_string()
    }
}

/// Authors named by byline-like elements, deduplicated case-insensitively.
#[must_use]
pub fn extract_authors(doc: &Document) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut authors = Vec::new();

    for attr in AUTHOR_ATTRS {
        for value in AUTHOR_VALUES {
            for sel in dom::select_each(doc, &format!(r#"[{attr}="{value}"]"#)) {
                for name in parse_byline(&author_source_text(&sel)) {
                    if seen.insert(name.to_lowercase()) {
                        authors.push(name);
                    }
                }
            }
        }
    }

    authors
}

// ============================================================
// TAGS
// ============================================================

/// Links that point at tag or topic listings.
const TAG_LINK_SELECTORS: &[&str] = &[
    r#"a[rel="tag"]"#,
    r#"a[href*="/tag/"]"#,
    r#"a[href*="/tags/"]"#,
    r#"a[href*="/topic/"]"#,
    r#"a[href*="?keyword="]"#,
];

/// Tag link texts, then `article:tag` meta values, deduplicated in order.
#[must_use]
pub fn extract_tags(doc: &Document) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    let mut push = |tag: String| {
        if !tag.is_empty() && tag.chars().count() < 100 && !tags.contains(&tag) {
            tags.push(tag);
        }
    };

    for selector in TAG_LINK_SELECTORS {
        for link in dom::select_each(doc, selector) {
            push(dom::normalize_whitespace(&dom::text_content(&link)));
        }
    }
    for meta in dom::select_each(doc, r#"meta[property="article:tag"]"#) {
        if let Some(content) = dom::attribute_text(&meta, "content") {
            push(content);
        }
    }

    tags
}

// ============================================================
// DECLARED DATE
// ============================================================

/// `(selector, attribute)` pairs declaring a publication date, in priority order.
const PUBLISH_DATE_TAGS: &[(&str, &str)] = &[
    (r#"meta[property="article:published_time"]"#, "content"),
    (r#"meta[property="og:published_time"]"#, "content"),
    (r#"[itemprop="datePublished"]"#, "content"),
    (r#"[itemprop="datePublished"]"#, "datetime"),
    (r#"meta[name="publication_date"]"#, "content"),
    (r#"meta[name="sailthru.date"]"#, "content"),
    (r#"meta[name="PublishDate"]"#, "content"),
    (r#"meta[name="article_date_original"]"#, "content"),
];

/// First declared publication date that parses.
#[must_use]
pub fn extract_publish_date(doc: &Document, parser: &dyn DateParser) -> Option<PublishedDate> {
    PUBLISH_DATE_TAGS.iter().find_map(|(selector, attr)| {
        dom::select_each(doc, selector)
            .iter()
            .filter_map(|sel| dom::attribute_text(sel, attr))
            .find_map(|value| date::try_parse(parser, "primary_extractor", &value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::FuzzyDateParser;
    use chrono::NaiveDate;

    #[test]
    fn test_title_priority() {
        let doc = Document::from(
            r#"<html><head><title>Storm hits the coast overnight | Daily News</title></head>
            <body><h1>Heading</h1></body></html>"#,
        );
        assert_eq!(extract_title(&doc), "Storm hits the coast overnight");

        let doc = Document::from(
            r#"<html><head><meta property="og:title" content="OG headline">
            <title>Other | Site</title></head><body></body></html>"#,
        );
        assert_eq!(extract_title(&doc), "OG headline");

        let doc = Document::from("<html><body><h1> Only  heading </h1></body></html>");
        assert_eq!(extract_title(&doc), "Only heading");
    }

    #[test]
    fn test_description_fallback() {
        let doc = Document::from(
            r#"<html><head><meta property="og:description" content="From OG"></head></html>"#,
        );
        assert_eq!(extract_description(&doc), "From OG");
    }

    #[test]
    fn test_parse_byline() {
        assert_eq!(parse_byline("By Jane Doe and John Smith"), vec!["Jane Doe", "John Smith"]);
        assert_eq!(parse_byline("by Ana Lima, Rui Costa"), vec!["Ana Lima", "Rui Costa"]);
        assert_eq!(parse_byline("Jane Doe jane@example.com"), vec!["Jane Doe"]);
        assert!(parse_byline("Updated 2024").is_empty());
    }

    #[test]
    fn test_authors_deduplicated() {
        let doc = Document::from(
            r#"<html><head><meta name="author" content="Jane Doe"></head>
            <body><span class="byline">By Jane Doe and Max Roe</span></body></html>"#,
        );
        assert_eq!(extract_authors(&doc), vec!["Jane Doe", "Max Roe"]);
    }

    #[test]
    fn test_tags_from_links_and_meta() {
        let doc = Document::from(
            r#"<html><head><meta property="article:tag" content="Weather"></head><body>
            <a rel="tag" href="/t/storms">Storms</a>
            <a href="/topic/weather">Weather</a>
            <a href="/about">About</a>
            </body></html>"#,
        );
        assert_eq!(extract_tags(&doc), vec!["Storms", "Weather"]);
    }

    #[test]
    fn test_publish_date_tags() {
        let doc = Document::from(
            r#"<html><body><time itemprop="datePublished" datetime="2024-03-07T08:00:00Z">Mar 7</time></body></html>"#,
        );
        let date = extract_publish_date(&doc, &FuzzyDateParser::new());
        assert_eq!(date.map(|d| d.date()), NaiveDate::from_ymd_opt(2024, 3, 7));
    }

    #[test]
    fn test_pubdate_meta_is_not_a_declared_date() {
        let doc = Document::from(r#"<html><head><meta name="pubdate" content="2024-03-07"></head></html>"#);
        assert!(extract_publish_date(&doc, &FuzzyDateParser::new()).is_none());
    }
}
