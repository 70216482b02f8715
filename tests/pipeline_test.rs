use chrono::NaiveDate;
use newsmeta::extractor::{PrimaryArticle, StructuralExtractor};
use newsmeta::language::LanguageIdentifier;
use newsmeta::translate::{TranslationBackend, TranslationError, Translator, TranslatorConfig};
use newsmeta::{Error, Options, Pipeline, PublishedDate};

/// Extractor returning a fixed reading of the page.
#[derive(Debug, Clone)]
struct FixedExtractor(PrimaryArticle);

impl StructuralExtractor for FixedExtractor {
    fn extract(&self, url: &str, html: &str) -> newsmeta::Result<PrimaryArticle> {
        Ok(PrimaryArticle {
            html: html.to_string(),
            url: url.to_string(),
            ..self.0.clone()
        })
    }
}

#[derive(Debug)]
struct FixedLanguage(&'static str);

impl LanguageIdentifier for FixedLanguage {
    fn detect(&self, _text: &str) -> newsmeta::Result<String> {
        Ok(self.0.to_string())
    }
}

/// Fails if language detection is reached at all.
#[derive(Debug)]
struct Unreachable;

impl LanguageIdentifier for Unreachable {
    fn detect(&self, _text: &str) -> newsmeta::Result<String> {
        Err(Error::LanguageDetection)
    }
}

#[derive(Debug)]
struct Bracketing;

impl TranslationBackend for Bracketing {
    fn translate(&self, text: &str, _source: &str, target: &str) -> Result<Option<String>, TranslationError> {
        Ok(Some(format!("[{target}] {text}")))
    }

    fn name(&self) -> &str {
        "bracketing"
    }
}

const STORY_URL: &str = "https://example.com/2024/03/07/breaking-news";

fn valid_primary(text: &str) -> PrimaryArticle {
    PrimaryArticle {
        title: "Breaking news today".to_string(),
        text: text.to_string(),
        valid_body: true,
        meta_description: "What happened".to_string(),
        authors: vec!["Ana Lima".to_string()],
        tags: vec!["World".to_string()],
        ..PrimaryArticle::default()
    }
}

fn pipeline(options: Options, primary: PrimaryArticle, language: &'static str) -> Pipeline {
    Pipeline::new(options)
        .expect("pipeline builds")
        .with_extractor(Box::new(FixedExtractor(primary)))
        .with_language_identifier(Box::new(FixedLanguage(language)))
        .with_translator(Translator::new(Box::new(Bracketing), TranslatorConfig::default()))
}

#[test]
fn english_article_is_not_translated() {
    let item = pipeline(Options::default(), valid_primary("Storm hits the coast."), "en")
        .parse("<html><body></body></html>", STORY_URL)
        .expect("parse ok")
        .expect("article found");

    assert_eq!(item.title(), "Breaking news today");
    assert_eq!(item.description(), "What happened");
    assert_eq!(item.url(), STORY_URL);
    assert_eq!(item.content(), "Storm hits the coast.");
    assert_eq!(item.authors(), ["Ana Lima"]);
    assert_eq!(item.tags(), ["World"]);
    assert_eq!(item.language(), "en");
    assert_eq!(item.published_date().date(), NaiveDate::from_ymd_opt(2024, 3, 7).expect("date"));
    assert!(item.translated_language().is_none());
    assert!(item.translated_content().is_none());
}

#[test]
fn foreign_article_carries_both_translation_fields() {
    let item = pipeline(Options::default(), valid_primary("La tormenta llega.\nSegundo párrafo."), "es")
        .parse("<html><body></body></html>", STORY_URL)
        .expect("parse ok")
        .expect("article found");

    assert_eq!(item.language(), "es");
    assert_eq!(item.translated_language(), Some("en"));
    assert_eq!(
        item.translated_content(),
        Some("[en] La tormenta llega.\n[en] Segundo párrafo.")
    );
}

#[test]
fn translation_disabled_keeps_both_fields_absent() {
    let options = Options {
        translate: false,
        ..Options::default()
    };
    let item = pipeline(options, valid_primary("La tormenta llega."), "es")
        .parse("<html></html>", STORY_URL)
        .expect("parse ok")
        .expect("article found");

    assert!(item.translated_language().is_none());
    assert!(item.translated_content().is_none());
}

#[test]
fn empty_body_short_circuits_before_language_detection() {
    let primary = PrimaryArticle {
        valid_body: false,
        ..valid_primary("   ")
    };
    let result = pipeline(Options::default(), primary, "en")
        .with_language_identifier(Box::new(Unreachable))
        .parse("<html><body><div>No article element.</div></body></html>", STORY_URL)
        .expect("empty body is not an error");

    assert!(result.is_none());
}

#[test]
fn invalid_body_is_replaced_by_recovered_text() {
    let primary = PrimaryArticle {
        valid_body: false,
        ..valid_primary("Share this")
    };
    let html = r#"<html><body>
        <article><p>The recovered article body has many more words.</p>
        <script>trackPageView();</script></article>
    </body></html>"#;

    let item = pipeline(Options::default(), primary, "en")
        .parse(html, STORY_URL)
        .expect("parse ok")
        .expect("article found");

    assert!(item.content().contains("The recovered article body has many more words."));
    assert!(!item.content().contains("trackPageView"));
}

#[test]
fn primary_date_wins_over_url() {
    let primary = PrimaryArticle {
        publish_date: Some(PublishedDate::from(NaiveDate::from_ymd_opt(2020, 1, 2).expect("date"))),
        ..valid_primary("Text.")
    };
    let item = pipeline(Options::default(), primary, "en")
        .parse("<html></html>", STORY_URL)
        .expect("parse ok")
        .expect("article found");

    assert_eq!(item.published_date().date(), NaiveDate::from_ymd_opt(2020, 1, 2).expect("date"));
}

#[test]
fn missing_date_is_an_error() {
    let result = pipeline(Options::default(), valid_primary("Text."), "en")
        .parse("<html><body><p>Text.</p></body></html>", "https://example.com/news/story");

    match result {
        Err(Error::DateNotFound { url }) => assert_eq!(url, "https://example.com/news/story"),
        other => panic!("expected DateNotFound, got {other:?}"),
    }
}

#[test]
fn language_failure_propagates() {
    let result = pipeline(Options::default(), valid_primary("Text."), "en")
        .with_language_identifier(Box::new(Unreachable))
        .parse("<html></html>", STORY_URL);

    assert!(matches!(result, Err(Error::LanguageDetection)));
}

#[test]
fn default_extractor_end_to_end() {
    let html = r#"<html><head>
        <title>Council approves new budget | City Times</title>
        <meta name="description" content="The council passed the budget.">
        <script type="application/ld+json">{"@type": "NewsArticle", "datePublished": "2024-03-07T18:00:00Z"}</script>
        </head><body>
        <nav><a href="/">Home</a></nav>
        <article>
            <p class="byline">By Jane Doe</p>
            <p>The city council approved the new budget on Tuesday after a long debate.</p>
            <p>Funding for schools and parks rises by ten percent next year.</p>
            <a rel="tag" href="/tag/budget">Budget</a>
        </article>
        </body></html>"#;

    let options = Options {
        translate: false,
        use_readability: false,
        ..Options::default()
    };
    let item = Pipeline::new(options)
        .expect("pipeline builds")
        .with_language_identifier(Box::new(FixedLanguage("en")))
        .parse(html, "https://example.com/news/budget")
        .expect("parse ok")
        .expect("article found");

    assert_eq!(item.title(), "Council approves new budget");
    assert_eq!(item.description(), "The council passed the budget.");
    assert!(item.content().contains("approved the new budget"));
    assert_eq!(item.tags(), ["Budget"]);
    assert!(item.published_date().is_aware());
    assert_eq!(item.published_date().date(), NaiveDate::from_ymd_opt(2024, 3, 7).expect("date"));

    let json = serde_json::to_value(&item).expect("serializes");
    assert_eq!(json["published_date"], "2024-03-07T18:00:00+00:00");
    assert!(json["translated_language"].is_null());
}
