//! Language identification of article text.

use std::fmt;

use tracing::debug;
use whatlang::Lang;

use crate::error::{Error, Result};

/// Identifies the language of a piece of text.
pub trait LanguageIdentifier: Send + Sync + fmt::Debug {
    /// Language code of `text`, ISO 639-1 where one exists.
    fn detect(&self, text: &str) -> Result<String>;
}

/// Trigram-based identifier backed by `whatlang`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhatlangIdentifier;

impl WhatlangIdentifier {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl LanguageIdentifier for WhatlangIdentifier {
    fn detect(&self, text: &str) -> Result<String> {
        let info = whatlang::detect(text).ok_or(Error::LanguageDetection)?;
        debug!(lang = ?info.lang(), confidence = info.confidence(), "language detected");
        Ok(iso_639_1(info.lang()))
    }
}

/// Two-letter code for a `whatlang` language; three-letter code otherwise.
fn iso_639_1(lang: Lang) -> String {
    let code = match lang {
        Lang::Eng => "en",
        Lang::Rus => "ru",
        Lang::Cmn => "zh",
        Lang::Spa => "es",
        Lang::Por => "pt",
        Lang::Ita => "it",
        Lang::Fra => "fr",
        Lang::Deu => "de",
        Lang::Ukr => "uk",
        Lang::Ara => "ar",
        Lang::Hin => "hi",
        Lang::Jpn => "ja",
        Lang::Heb => "he",
        Lang::Pol => "pl",
        Lang::Kor => "ko",
        Lang::Nob => "no",
        Lang::Dan => "da",
        Lang::Swe => "sv",
        Lang::Fin => "fi",
        Lang::Tur => "tr",
        Lang::Nld => "nl",
        Lang::Hun => "hu",
        Lang::Ces => "cs",
        Lang::Ell => "el",
        Lang::Bul => "bg",
        Lang::Ron => "ro",
        Lang::Slv => "sl",
        Lang::Hrv => "hr",
        Lang::Srp => "sr",
        Lang::Lit => "lt",
        Lang::Lav => "lv",
        Lang::Est => "et",
        Lang::Vie => "vi",
        Lang::Tha => "th",
        Lang::Ind => "id",
        Lang::Pes => "fa",
        Lang::Urd => "ur",
        Lang::Ben => "bn",
        Lang::Tam => "ta",
        Lang::Tel => "te",
        Lang::Cat => "ca",
        Lang::Slk => "sk",
        Lang::Lat => "la",
        Lang::Afr => "af",
        Lang::Epo => "eo",
        other => other.code(),
    };
    code.to_string()
}
