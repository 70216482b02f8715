//! Pipeline orchestration.
//!
//! `Pipeline::parse` runs the stages in order:
//!
//! 1. Primary extraction
//! 2. Body text recovery when the primary body is invalid
//! 3. Language identification
//! 4. Publication date resolution
//! 5. Translation into the target language
//!
//! Collaborators are built once and reused for every page.

use tracing::{debug, info};

use crate::date::{DateParser, DateResolver};
use crate::dom::Document;
use crate::error::Result;
use crate::extractor::{DomArticleExtractor, StructuralExtractor};
use crate::language::{LanguageIdentifier, WhatlangIdentifier};
use crate::result::{ArticleItem, Translation};
use crate::text::TextRecoverer;
use crate::translate::Translator;
use crate::Options;

/// Article parsing pipeline.
///
/// # Example
///
/// ```rust,no_run
/// use newsmeta::{Options, Pipeline};
///
/// let pipeline = Pipeline::new(Options {
///     translate: false,
///     ..Options::default()
/// })?;
/// let item = pipeline.parse("<html>...</html>", "https://example.com/2024/03/07/story")?;
/// # Ok::<(), newsmeta::Error>(())
/// ```
#[derive(Debug)]
pub struct Pipeline {
    options: Options,
    extractor: Box<dyn StructuralExtractor>,
    recoverer: TextRecoverer,
    language: Box<dyn LanguageIdentifier>,
    dates: DateResolver,
    translator: Option<Translator>,
}

impl Pipeline {
    /// Pipeline with the default collaborators.
    ///
    /// Builds the HTTP client of the translation backend unless translation
    /// is disabled.
    pub fn new(options: Options) -> Result<Self> {
        let translator = if options.translate {
            Some(Translator::google(options.google.clone(), options.translator.clone())?)
        } else {
            None
        };
        info!(translate = options.translate, target = %options.target_language, "pipeline ready");

        Ok(Self {
            extractor: Box::new(DomArticleExtractor::new(&options)),
            recoverer: TextRecoverer::new(),
            language: Box::new(WhatlangIdentifier::new()),
            dates: DateResolver::default(),
            translator,
            options,
        })
    }

    #[must_use]
    pub fn with_extractor(mut self, extractor: Box<dyn StructuralExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    #[must_use]
    pub fn with_language_identifier(mut self, language: Box<dyn LanguageIdentifier>) -> Self {
        self.language = language;
        self
    }

    /// Replace the parser the date strategies use.
    #[must_use]
    pub fn with_date_parser(mut self, parser: Box<dyn DateParser>) -> Self {
        self.dates = DateResolver::new(parser);
        self
    }

    #[must_use]
    pub fn with_date_resolver(mut self, dates: DateResolver) -> Self {
        self.dates = dates;
        self
    }

    /// Replace the translator. Translation still only runs when
    /// `Options::translate` is set.
    #[must_use]
    pub fn with_translator(mut self, translator: Translator) -> Self {
        self.translator = Some(translator);
        self
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Parse one page.
    ///
    /// Returns `Ok(None)` when no body text can be found.
    pub fn parse(&self, html: &str, url: &str) -> Result<Option<ArticleItem>> {
        let mut primary = self.extractor.extract(url, html)?;
        let document = Document::from(primary.html.as_str());

        if let Some(text) = self.recoverer.recover(primary.valid_body, &document) {
            primary.set_text(text);
        }
        if primary.text.trim().is_empty() {
            debug!(url, "no article text");
            return Ok(None);
        }

        let language = self.language.detect(&primary.text)?;
        let published_date = self
            .dates
            .resolve(primary.publish_date, url, &primary.html, &document)?;

        let translation = self.translate(&primary.text, &language);

        Ok(Some(ArticleItem::new(
            primary.title,
            primary.meta_description,
            url.to_string(),
            published_date,
            primary.text,
            primary.authors,
            primary.tags,
            language,
            translation,
        )))
    }

    fn translate(&self, text: &str, language: &str) -> Option<Translation> {
        let target = &self.options.target_language;
        if !self.options.translate || language == target {
            return None;
        }
        let translator = self.translator.as_ref()?;
        debug!(from = language, to = %target, "translating article");
        Some(Translation {
            language: target.clone(),
            content: translator.translate(text, target),
        })
    }
}
