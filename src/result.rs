//! Result types for article parsing.
//!
//! This module defines the record produced for one parsed page and the
//! timestamp type shared by the date resolver and the date parser.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};

/// A publication timestamp.
///
/// Sources disagree on whether they carry a timezone: a URL path only yields a
/// calendar day, while JSON-LD usually carries a full RFC 3339 value. The
/// variant records which one was found rather than inventing an offset.
///
/// Serializes as its `Display` string, so JSON output and `to_string` agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishedDate {
    /// Timestamp without timezone information.
    Naive(NaiveDateTime),
    /// Timestamp with a known UTC offset.
    Aware(DateTime<FixedOffset>),
}

impl PublishedDate {
    /// Calendar day of the timestamp, in its own timezone.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.naive_local().date()
    }

    /// Wall-clock time, dropping any offset.
    #[must_use]
    pub fn naive_local(&self) -> NaiveDateTime {
        match self {
            Self::Naive(dt) => *dt,
            Self::Aware(dt) => dt.naive_local(),
        }
    }

    /// Returns `true` if the timestamp carries a UTC offset.
    #[must_use]
    pub fn is_aware(&self) -> bool {
        matches!(self, Self::Aware(_))
    }
}

impl From<NaiveDate> for PublishedDate {
    fn from(date: NaiveDate) -> Self {
        Self::Naive(date.and_time(chrono::NaiveTime::MIN))
    }
}

impl From<NaiveDateTime> for PublishedDate {
    fn from(dt: NaiveDateTime) -> Self {
        Self::Naive(dt)
    }
}

impl From<DateTime<FixedOffset>> for PublishedDate {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Self::Aware(dt)
    }
}

impl fmt::Display for PublishedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Naive(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S")),
            Self::Aware(dt) => write!(f, "{}", dt.to_rfc3339()),
        }
    }
}

impl Serialize for PublishedDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A translated copy of the article body.
///
/// Carried as one value so that the language and the content can only be
/// present together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    /// Language the body was translated into.
    pub language: String,
    /// Best-effort translated body; may be empty if every chunk failed.
    pub content: String,
}

/// Structured metadata extracted from one news page.
///
/// Built once by the pipeline and never modified afterwards. Fields are
/// read through accessors; `translated_language` and `translated_content`
/// are either both present or both absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleItem {
    title: String,
    description: String,
    url: String,
    published_date: PublishedDate,
    content: String,
    authors: Vec<String>,
    tags: Vec<String>,
    language: String,
    translated_language: Option<String>,
    translated_content: Option<String>,
}

impl ArticleItem {
    /// Assemble an item. The translation, if any, supplies both translated fields.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        title: String,
        description: String,
        url: String,
        published_date: PublishedDate,
        content: String,
        authors: Vec<String>,
        tags: Vec<String>,
        language: String,
        translation: Option<Translation>,
    ) -> Self {
        let (translated_language, translated_content) = match translation {
            Some(t) => (Some(t.language), Some(t.content)),
            None => (None, None),
        };
        Self {
            title,
            description,
            url,
            published_date,
            content,
            authors,
            tags,
            language,
            translated_language,
            translated_content,
        }
    }

    /// Article headline.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Meta description; may be empty.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Source URL as supplied by the caller.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Resolved publication timestamp.
    #[must_use]
    pub fn published_date(&self) -> PublishedDate {
        self.published_date
    }

    /// Body text; never empty.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Author names in document order.
    #[must_use]
    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    /// Tags in first-seen order, without duplicates.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Detected language code of `content`.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    #[must_use]
    pub fn translated_language(&self) -> Option<&str> {
        self.translated_language.as_deref()
    }

    #[must_use]
    pub fn translated_content(&self) -> Option<&str> {
        self.translated_content.as_deref()
    }
}
