//! Translation backend trait definitions.

use std::fmt::Debug;

/// Errors a backend can report for one chunk.
///
/// The translator drops the chunk on either variant and carries on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslationError {
    /// The text was rejected before any request was made (empty, too long).
    #[error("Invalid translation payload: {0}")]
    InvalidPayload(String),

    /// The request failed or the service answered with an error status.
    #[error("Translation request failed: {0}")]
    Request(String),
}

/// A service that translates bounded-size text.
///
/// Object-safe, so the translator holds it as `Box<dyn TranslationBackend>`.
pub trait TranslationBackend: Send + Sync + Debug {
    /// Translate `text` from `source` (or `"auto"`) into `target`.
    ///
    /// `Ok(None)` means the service answered without a translation.
    fn translate(&self, text: &str, source: &str, target: &str) -> Result<Option<String>, TranslationError>;

    /// Backend name for logs.
    fn name(&self) -> &str;
}
