//! Google Translate backend over the public mobile web endpoint.

use std::time::Duration;

use dom_query::Document;
use reqwest::blocking::Client;
use tracing::{debug, info};

use super::backend::{TranslationBackend, TranslationError};
use crate::dom;
use crate::error::{Error, Result};

/// Longest text the endpoint accepts in one request, in characters.
pub const MAX_PAYLOAD_CHARS: usize = 5000;

const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// Configuration for the Google Translate backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleTranslateConfig {
    /// Endpoint answering `GET ?tl=..&sl=..&q=..` with an HTML page.
    pub endpoint: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GoogleTranslateConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://translate.google.com/m".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Translation backend scraping Google Translate's mobile page.
#[derive(Debug)]
pub struct GoogleTranslateBackend {
    client: Client,
    config: GoogleTranslateConfig,
}

impl GoogleTranslateBackend {
    /// Build the backend and its HTTP client.
    pub fn new(config: GoogleTranslateConfig) -> Result<Self> {
        info!(endpoint = %config.endpoint, "initializing Google Translate backend");

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }
}

/// Reject payloads the endpoint cannot take.
pub(crate) fn validate_payload(text: &str) -> std::result::Result<(), TranslationError> {
    let len = text.chars().count();
    if text.trim().is_empty() {
        return Err(TranslationError::InvalidPayload("empty text".to_string()));
    }
    if len > MAX_PAYLOAD_CHARS {
        return Err(TranslationError::InvalidPayload(format!(
            "{len} characters exceeds the {MAX_PAYLOAD_CHARS} character limit"
        )));
    }
    Ok(())
}

/// Translated text from the endpoint's HTML answer.
fn parse_result(body: &str) -> Option<String> {
    let doc = Document::from(body);
    let container = dom::select_first(&doc, "div.result-container")
        .or_else(|| dom::select_first(&doc, "div.t0"))?;
    let text = dom::trimmed_text(&container);
    (!text.is_empty()).then_some(text)
}

impl TranslationBackend for GoogleTranslateBackend {
    fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> std::result::Result<Option<String>, TranslationError> {
        validate_payload(text)?;
        if source == target {
            return Ok(Some(text.to_string()));
        }

        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&[("tl", target), ("sl", source), ("q", text.trim())])
            .send()
            .map_err(|e| TranslationError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslationError::Request(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .map_err(|e| TranslationError::Request(e.to_string()))?;
        let translated = parse_result(&body);
        if translated.is_none() {
            debug!(chars = text.chars().count(), "no translation in response");
        }
        Ok(translated)
    }

    fn name(&self) -> &str {
        "google"
    }
}
