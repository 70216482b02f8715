//! Error types for newsmeta.
//!
//! Only failures that block producing an article escape the pipeline. Per-step
//! failures (a date string that does not parse, a translation chunk the backend
//! rejects) have their own error types in `date` and `translate` and are
//! recovered where they happen.

/// Error type for article parsing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Every publication-date strategy was exhausted.
    #[error("Could not find published date for article: {url}")]
    DateNotFound {
        /// Source URL of the document, for diagnostics.
        url: String,
    },

    /// The structural extractor could not process the document.
    #[error("Article extraction failed: {0}")]
    Extraction(String),

    /// No language could be identified for the body text.
    #[error("Language detection failed")]
    LanguageDetection,

    /// A collaborator could not be constructed.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for parsing operations.
pub type Result<T> = std::result::Result<T, Error>;
