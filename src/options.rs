//! Configuration options for article parsing.
//!
//! The `Options` struct controls the primary extractor's validity thresholds,
//! the language the pipeline translates into, and the translation backend.

use crate::translate::{GoogleTranslateConfig, TranslatorConfig};

/// Configuration options for the parsing pipeline.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use newsmeta::Options;
///
/// let options = Options {
///     translate: false,
///     min_word_count: 150,
///     ..Options::default()
/// };
/// assert_eq!(options.target_language, "en");
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Language code articles are translated into.
    ///
    /// Articles whose detected language equals this code are not translated.
    ///
    /// Default: `"en"`
    pub target_language: String,

    /// Translate non-target-language articles.
    ///
    /// When false, no article carries translated fields.
    ///
    /// Default: `true`
    pub translate: bool,

    /// Minimum number of words for the primary body to count as valid.
    ///
    /// Below this, text recovery from `<article>`/`<main>` is attempted.
    ///
    /// Default: `300`
    pub min_word_count: usize,

    /// Minimum number of sentences for the primary body to count as valid.
    ///
    /// Default: `7`
    pub min_sentence_count: usize,

    /// Run a readability pass before the paragraph scorer.
    ///
    /// Requires the `readability` feature flag.
    ///
    /// Default: `true`
    pub use_readability: bool,

    /// Chunking and language settings for the translator.
    pub translator: TranslatorConfig,

    /// HTTP settings for the default translation backend.
    pub google: GoogleTranslateConfig,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            target_language: "en".to_string(),
            translate: true,
            min_word_count: 300,
            min_sentence_count: 7,
            use_readability: true,
            translator: TranslatorConfig::default(),
            google: GoogleTranslateConfig::default(),
        }
    }
}
