//! Chunked translation of article text.
//!
//! Translation services cap the size of one request. `Translator` splits text
//! into paragraphs, packs each paragraph's words into chunks no longer than
//! `TranslatorConfig::chunk_limit` characters, and sends chunks to a
//! `TranslationBackend` one at a time. A chunk the backend rejects is dropped;
//! the rest of the text is still translated.

pub mod backend;
pub mod google;

use tracing::{debug, warn};

use crate::error::Result;

pub use backend::{TranslationBackend, TranslationError};
pub use google::{GoogleTranslateBackend, GoogleTranslateConfig};

/// Chunking and language settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatorConfig {
    /// Source language passed to the backend; `"auto"` lets it detect.
    pub source_language: String,
    /// Default target language.
    pub target_language: String,
    /// Maximum chunk length in characters.
    pub chunk_limit: usize,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            source_language: "auto".to_string(),
            target_language: "en".to_string(),
            chunk_limit: 4000,
        }
    }
}

/// Split one paragraph into chunks of whole words.
///
/// Words are joined by single spaces and a chunk never exceeds `limit`
/// characters, except a single word longer than `limit`, which forms its own
/// chunk.
#[must_use]
pub fn chunk_paragraph(paragraph: &str, limit: usize) -> Vec<String> {
    let mut chunks: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in paragraph.split_whitespace() {
        let word_len = word.chars().count();
        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len > limit {
            chunks.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        } else {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Translates arbitrary-length text through a size-limited backend.
#[derive(Debug)]
pub struct Translator {
    backend: Box<dyn TranslationBackend>,
    config: TranslatorConfig,
}

impl Translator {
    #[must_use]
    pub fn new(backend: Box<dyn TranslationBackend>, config: TranslatorConfig) -> Self {
        Self { backend, config }
    }

    /// Translator over the Google Translate backend.
    pub fn google(google: GoogleTranslateConfig, config: TranslatorConfig) -> Result<Self> {
        Ok(Self::new(Box::new(GoogleTranslateBackend::new(google)?), config))
    }

    #[must_use]
    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// Translate `text` into `target_language`.
    ///
    /// Never fails: chunks the backend cannot translate are left out. The
    /// output has one line per non-empty input paragraph.
    #[must_use]
    pub fn translate(&self, text: &str, target_language: &str) -> String {
        let mut paragraphs = Vec::new();

        for paragraph in text.split('\n').map(str::trim).filter(|p| !p.is_empty()) {
            let mut parts = Vec::new();
            for chunk in chunk_paragraph(paragraph, self.config.chunk_limit) {
                match self
                    .backend
                    .translate(&chunk, &self.config.source_language, target_language)
                {
                    Ok(Some(translated)) => parts.push(translated),
                    Ok(None) => {
                        debug!(backend = self.backend.name(), "chunk came back untranslated, dropping");
                    }
                    Err(err) => {
                        warn!(backend = self.backend.name(), %err, "dropping chunk");
                    }
                }
            }
            paragraphs.push(parts.join(" "));
        }

        paragraphs.join("\n")
    }
}
