//! Statistical recognizer adapter
//!
//! Wraps an optional external named-entity recognizer behind a trait so the
//! pipeline never depends on a concrete model. Absence is a valid, supported
//! configuration; a recognizer that errors at call time degrades detection
//! to pattern-only instead of failing the document.

use crate::domain::{DetectionSource, PiiCategory, RawSpan, Result, ShomerError};
use tracing::debug;

/// A raw label produced by an external recognizer backend
#[derive(Debug, Clone)]
pub struct NerSpan {
    /// Backend-native label, e.g. "PER", "ORG", "LOC"
    pub label: String,
    pub start: usize,
    pub end: usize,
    pub text: String,
    /// Backend score in [0.0, 1.0]
    pub score: f32,
}

/// Pluggable named-entity recognizer capability
///
/// Implementations wrap whatever model is available; serialization of
/// concurrent calls into a shared underlying model is the implementation's
/// own responsibility.
pub trait NamedEntityRecognizer: Send + Sync {
    /// Recognize entities in text, returning backend-native labels
    fn recognize(&self, text: &str) -> Result<Vec<NerSpan>>;

    /// Human-readable backend name, for rationale notes
    fn name(&self) -> &str;
}

/// Recognizer capability selected at configuration time
pub enum RecognizerCapability {
    /// No statistical recognizer configured; detection is pattern-only
    Absent,
    /// A backend is available
    Present(Box<dyn NamedEntityRecognizer>),
}

/// Result of one statistical detection pass
#[derive(Debug)]
pub struct StatisticalDetection {
    pub spans: Vec<RawSpan>,
    /// Backend labels that had no mapping into the category enum
    pub dropped_labels: usize,
    /// Backend spans with offsets that do not address the text and were
    /// discarded before merging
    pub invalid_spans: usize,
}

impl RecognizerCapability {
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Run the recognizer, mapping native labels into the core categories
    ///
    /// Absent capability returns no spans. Unmapped labels are dropped and
    /// counted, never propagated as errors. A backend failure surfaces as
    /// `CapabilityUnavailable` so the caller can degrade gracefully.
    pub fn detect(&self, text: &str) -> Result<StatisticalDetection> {
        let backend = match self {
            Self::Absent => {
                return Ok(StatisticalDetection {
                    spans: Vec::new(),
                    dropped_labels: 0,
                    invalid_spans: 0,
                })
            }
            Self::Present(backend) => backend,
        };

        let ner_spans = backend.recognize(text).map_err(|e| {
            ShomerError::CapabilityUnavailable(format!(
                "recognizer '{}' failed: {e}",
                backend.name()
            ))
        })?;

        let mut spans = Vec::new();
        let mut dropped = 0;
        let mut invalid = 0;
        for ner in ner_spans {
            // Backend offsets are untrusted; a span must address the text
            // exactly or the merge and rewrite invariants break.
            if !span_addresses_text(&ner, text) {
                debug!(
                    label = %ner.label,
                    start = ner.start,
                    end = ner.end,
                    "dropping recognizer span with invalid offsets"
                );
                invalid += 1;
                continue;
            }
            match map_label(&ner.label) {
                Some(category) => spans.push(RawSpan {
                    start: ner.start,
                    end: ner.end,
                    category,
                    matched_text: ner.text,
                    source: DetectionSource::Statistical,
                    confidence: ner.score.clamp(0.0, 1.0),
                    validator_passed: None,
                }),
                None => {
                    debug!(label = %ner.label, "dropping unmapped recognizer label");
                    dropped += 1;
                }
            }
        }

        Ok(StatisticalDetection {
            spans,
            dropped_labels: dropped,
            invalid_spans: invalid,
        })
    }
}

/// A backend span is usable only when it is in bounds, lands on character
/// boundaries, and carries the exact text it claims to cover
fn span_addresses_text(ner: &NerSpan, text: &str) -> bool {
    ner.start < ner.end
        && ner.end <= text.len()
        && text.is_char_boundary(ner.start)
        && text.is_char_boundary(ner.end)
        && text[ner.start..ner.end] == ner.text
}

/// Static mapping from common NER label schemes to the category enum
fn map_label(label: &str) -> Option<PiiCategory> {
    match label.to_uppercase().as_str() {
        "PER" | "PERSON" => Some(PiiCategory::Person),
        "ORG" | "ORGANIZATION" => Some(PiiCategory::Organization),
        "LOC" | "LOCATION" | "GPE" | "FAC" => Some(PiiCategory::Location),
        _ => None,
    }
}
