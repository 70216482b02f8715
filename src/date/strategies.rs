//! The individual date strategies, in the order `DateResolver` runs them.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::{try_parse, DateContext, DateParser, DateStrategy};
use crate::dom;
use crate::metadata::{self, json_ld};
use crate::result::PublishedDate;

/// `"datePublished": "..."` inside a JSON-LD block that failed to decode.
#[allow(clippy::expect_used)]
static DATE_PUBLISHED_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""datePublished":[^"]*"([^"]*)"#).expect("valid regex")
});

/// `"publish_date": "..."` inside an inline script.
#[allow(clippy::expect_used)]
static PUBLISH_DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""publish_date":\s*"([^"]*)""#).expect("valid regex")
});

// ============================================================
// 1. PRIMARY EXTRACTOR
// ============================================================

/// Trusts the date the primary extractor already found.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrimaryDate;

impl DateStrategy for PrimaryDate {
    fn name(&self) -> &'static str {
        "primary"
    }

    fn find(&self, ctx: &DateContext<'_>, _parser: &dyn DateParser) -> Option<PublishedDate> {
        ctx.primary_date
    }
}

// ============================================================
// 2. URL PATH
// ============================================================

/// `(minimum segment count, year index, month index, day index)`, most
/// specific layout first. Index 0 is the empty segment before the leading `/`.
const URL_HYPOTHESES: &[(usize, usize, usize, usize)] = &[(6, 1, 4, 5), (5, 1, 3, 4), (4, 1, 2, 3)];

/// Reads `/{year}/.../{month}/{day}/...` layouts from the URL path.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlPath;

fn url_path(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url.split(['?', '#']).next().unwrap_or_default().to_string(),
    }
}

impl DateStrategy for UrlPath {
    fn name(&self) -> &'static str {
        "url_path"
    }

    fn find(&self, ctx: &DateContext<'_>, parser: &dyn DateParser) -> Option<PublishedDate> {
        let path = url_path(ctx.url);
        let segments: Vec<&str> = path.split('/').collect();

        URL_HYPOTHESES
            .iter()
            .filter(|(min_len, ..)| segments.len() >= *min_len)
            .find_map(|&(_, y, m, d)| {
                let candidate = format!("{}/{}/{}", segments[y], segments[m], segments[d]);
                try_parse(parser, self.name(), &candidate)
            })
    }
}

// ============================================================
// 3. JSON-LD
// ============================================================

/// Reads `datePublished` from JSON-LD blocks, scraping the raw text with a
/// pattern when a block is not valid JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLd;

/// `datePublished` strings of a decoded block: the top-level object, then
/// members of a top-level array or of `@graph`.
fn date_published_values(value: &Value) -> Vec<&str> {
    fn direct(v: &Value) -> Option<&str> {
        v.get("datePublished").and_then(Value::as_str)
    }

    let mut out = Vec::new();
    match value {
        Value::Object(map) => {
            out.extend(direct(value));
            if let Some(Value::Array(graph)) = map.get("@graph") {
                out.extend(graph.iter().filter_map(direct));
            }
        }
        Value::Array(items) => out.extend(items.iter().filter_map(direct)),
        _ => {}
    }
    out
}

impl JsonLd {
    fn from_block(&self, raw: &str, parser: &dyn DateParser) -> Option<PublishedDate> {
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => date_published_values(&value)
                .into_iter()
                .find_map(|candidate| try_parse(parser, self.name(), candidate)),
            Err(err) => {
                debug!(%err, "JSON-LD block is not valid JSON, scraping it");
                let caps = DATE_PUBLISHED_PATTERN.captures(raw)?;
                try_parse(parser, self.name(), &caps[1])
            }
        }
    }
}

impl DateStrategy for JsonLd {
    fn name(&self) -> &'static str {
        "json_ld"
    }

    fn find(&self, ctx: &DateContext<'_>, parser: &dyn DateParser) -> Option<PublishedDate> {
        json_ld::json_ld_blocks(ctx.document)
            .iter()
            .find_map(|raw| self.from_block(raw, parser))
    }
}

// ============================================================
// 4. SITE-SPECIFIC TAGS
// ============================================================

/// An element known to hold a visible date on some site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteDateTag {
    pub tag: String,
    pub attribute: String,
    pub value: String,
}

impl SiteDateTag {
    #[must_use]
    pub fn new(tag: &str, attribute: &str, value: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attribute: attribute.to_string(),
            value: value.to_string(),
        }
    }

    /// CSS selector for the entry. Classes match as whitespace-separated tokens.
    #[must_use]
    pub fn selector(&self) -> String {
        let op = if self.attribute == "class" { "~=" } else { "=" };
        format!(r#"{}[{}{}"{}"]"#, self.tag, self.attribute, op, self.value)
    }
}

/// Reads dates from a fixed list of site-specific elements.
///
/// Entries are tried in list order; each contributes at most its first
/// matching element.
#[derive(Debug, Clone)]
pub struct SiteSpecificTags {
    entries: Vec<SiteDateTag>,
}

impl Default for SiteSpecificTags {
    fn default() -> Self {
        Self::new(vec![
            SiteDateTag::new("span", "class", "date"),
            SiteDateTag::new("div", "class", "cnnix-timestamp"),
            SiteDateTag::new("span", "stream", "time_62656"),
        ])
    }
}

impl SiteSpecificTags {
    #[must_use]
    pub fn new(entries: Vec<SiteDateTag>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[SiteDateTag] {
        &self.entries
    }
}

impl DateStrategy for SiteSpecificTags {
    fn name(&self) -> &'static str {
        "site_specific_tags"
    }

    fn find(&self, ctx: &DateContext<'_>, parser: &dyn DateParser) -> Option<PublishedDate> {
        self.entries.iter().find_map(|entry| {
            let element = dom::select_first(ctx.document, &entry.selector())?;
            let text = dom::normalize_whitespace(&dom::text_content(&element));
            let text = text.replace("Updated", "");
            try_parse(parser, self.name(), text.trim())
        })
    }
}

// ============================================================
// 5. OPEN GRAPH
// ============================================================

/// Reads `og:pubdate` from the page's Open Graph properties.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenGraph;

impl DateStrategy for OpenGraph {
    fn name(&self) -> &'static str {
        "opengraph"
    }

    fn find(&self, ctx: &DateContext<'_>, parser: &dyn DateParser) -> Option<PublishedDate> {
        let data = metadata::extract_opengraph_only(ctx.document);
        let found = data
            .opengraph_values("og:pubdate")
            .find_map(|value| try_parse(parser, self.name(), value));
        found
    }
}

// ============================================================
// 6. META TAGS
// ============================================================

/// Reads `<meta name="...">` date tags.
#[derive(Debug, Clone)]
pub struct MetaTags {
    names: Vec<String>,
}

impl Default for MetaTags {
    fn default() -> Self {
        Self::new(&["pubdate", "lastmod", "date"])
    }
}

impl MetaTags {
    #[must_use]
    pub fn new(names: &[&str]) -> Self {
        Self {
            names: names.iter().map(|n| (*n).to_string()).collect(),
        }
    }
}

impl DateStrategy for MetaTags {
    fn name(&self) -> &'static str {
        "meta_tags"
    }

    fn find(&self, ctx: &DateContext<'_>, parser: &dyn DateParser) -> Option<PublishedDate> {
        self.names.iter().find_map(|name| {
            let content = dom::meta_content(ctx.document, "name", name)?;
            try_parse(parser, self.name(), &content)
        })
    }
}

// ============================================================
// 7. INLINE SCRIPTS
// ============================================================

/// Scrapes `"publish_date": "..."` out of inline scripts.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineScript;

impl DateStrategy for InlineScript {
    fn name(&self) -> &'static str {
        "inline_script"
    }

    fn find(&self, ctx: &DateContext<'_>, parser: &dyn DateParser) -> Option<PublishedDate> {
        dom::select_each(ctx.document, "script").iter().find_map(|script| {
            let text = dom::text_content(script);
            let caps = PUBLISH_DATE_PATTERN.captures(text.trim())?;
            try_parse(parser, self.name(), &caps[1])
        })
    }
}
