use std::sync::Mutex;

use newsmeta::translate::{chunk_paragraph, TranslationBackend, TranslationError, Translator, TranslatorConfig};

/// Upper-cases its input and records every call.
#[derive(Debug, Default)]
struct RecordingBackend {
    calls: Mutex<Vec<(String, String, String)>>,
    fail_containing: Option<&'static str>,
    empty_containing: Option<&'static str>,
}

impl RecordingBackend {
    fn calls(&self) -> Vec<(String, String, String)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl TranslationBackend for RecordingBackend {
    fn translate(&self, text: &str, source: &str, target: &str) -> Result<Option<String>, TranslationError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((text.to_string(), source.to_string(), target.to_string()));
        }
        if self.fail_containing.is_some_and(|m| text.contains(m)) {
            return Err(TranslationError::Request("HTTP 503".to_string()));
        }
        if self.empty_containing.is_some_and(|m| text.contains(m)) {
            return Ok(None);
        }
        Ok(Some(text.to_uppercase()))
    }

    fn name(&self) -> &str {
        "recording"
    }
}

/// Shares a `RecordingBackend` with the test while the translator owns a box.
#[derive(Debug)]
struct Shared(std::sync::Arc<RecordingBackend>);

impl TranslationBackend for Shared {
    fn translate(&self, text: &str, source: &str, target: &str) -> Result<Option<String>, TranslationError> {
        self.0.translate(text, source, target)
    }

    fn name(&self) -> &str {
        self.0.name()
    }
}

fn translator(backend: RecordingBackend) -> (Translator, std::sync::Arc<RecordingBackend>) {
    let backend = std::sync::Arc::new(backend);
    let translator = Translator::new(Box::new(Shared(backend.clone())), TranslatorConfig::default());
    (translator, backend)
}

#[test]
fn paragraphs_are_translated_separately() {
    let (translator, backend) = translator(RecordingBackend::default());

    let out = translator.translate("hola mundo\n\n  \nadiós amigos  ", "en");
    assert_eq!(out, "HOLA MUNDO\nADIÓS AMIGOS");

    let calls = backend.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], ("hola mundo".to_string(), "auto".to_string(), "en".to_string()));
}

#[test]
fn long_paragraph_splits_at_4000_characters() {
    let (translator, backend) = translator(RecordingBackend::default());

    // 1000 words of 4 chars: 4999 chars joined, so two chunks.
    let paragraph = vec!["word"; 1000].join(" ");
    let out = translator.translate(&paragraph, "en");

    let calls = backend.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls.iter().all(|(text, ..)| text.chars().count() <= 4000));
    // 800 words fit: 800 * 5 - 1 = 3999.
    assert_eq!(calls[0].0.split(' ').count(), 800);
    assert_eq!(calls[1].0.split(' ').count(), 200);
    // Chunks rejoin with one space.
    assert_eq!(out, paragraph.to_uppercase());
}

#[test]
fn failed_chunk_is_dropped_and_the_rest_survives() {
    let (translator, _) = translator(RecordingBackend {
        fail_containing: Some("roto"),
        ..RecordingBackend::default()
    });

    let out = translator.translate("uno\nroto aquí\ntres", "en");
    assert_eq!(out, "UNO\n\nTRES");
}

#[test]
fn failed_middle_chunk_leaves_its_neighbours_joined() {
    let (translator, backend) = translator(RecordingBackend {
        fail_containing: Some("b"),
        ..RecordingBackend::default()
    });

    let (first, middle, last) = ("a".repeat(3000), "b".repeat(3000), "c".repeat(3000));
    let paragraph = format!("{first} {middle} {last}");
    let out = translator.translate(&paragraph, "en");

    assert_eq!(backend.calls().len(), 3);
    assert_eq!(out, format!("{} {}", first.to_uppercase(), last.to_uppercase()));
}

#[test]
fn missing_translation_is_dropped() {
    let (translator, _) = translator(RecordingBackend {
        empty_containing: Some("nada"),
        ..RecordingBackend::default()
    });

    let word = "a".repeat(2500);
    let paragraph = format!("{word} nada {word}");
    // Chunks: "{word} nada", "{word}"; the first comes back empty.
    let out = translator.translate(&paragraph, "en");
    assert_eq!(out, word.to_uppercase());
}

#[test]
fn every_chunk_failing_still_returns_text() {
    let (translator, _) = translator(RecordingBackend {
        fail_containing: Some(""),
        ..RecordingBackend::default()
    });
    assert_eq!(translator.translate("uno\ndos", "en"), "\n");
}

#[test]
fn empty_text_makes_no_requests() {
    let (translator, backend) = translator(RecordingBackend::default());
    assert_eq!(translator.translate(" \n\n ", "en"), "");
    assert!(backend.calls().is_empty());
}

#[test]
fn chunking_never_exceeds_the_limit() {
    let text: String = (0..3000).map(|i| format!("w{i} ")).collect();
    for chunk in chunk_paragraph(&text, 4000) {
        assert!(chunk.chars().count() <= 4000);
    }
}
