//! Pipeline engine
//!
//! Wires the stages together: detect with patterns and the optional
//! statistical recognizer, merge, score, anonymize, audit. Each document's
//! analysis is a synchronous pure computation over the read-only
//! configuration; batches fan documents out across blocking workers.

use crate::anonymize::AnonymizationRewriter;
use crate::audit::AuditLogger;
use crate::classify::SensitivityClassifier;
use crate::detection::{PatternRegistry, RecognizerCapability};
use crate::domain::{AnonymizedDocument, ResolvedEntity, Result, RiskAssessment, ShomerError};
use crate::merge::resolve_spans;
use crate::risk::RiskEngine;
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Full analysis of one document
#[derive(Debug, Clone, Serialize)]
pub struct DocumentAnalysis {
    pub document_id: String,
    pub entities: Vec<ResolvedEntity>,
    pub assessment: RiskAssessment,
    pub anonymized: AnonymizedDocument,
    /// Degradation notes surfaced to the caller, e.g. a recognizer that
    /// failed and left this analysis pattern-only
    pub warnings: Vec<String>,
    pub processing_time_ms: u64,
}

/// Outcome of one document inside a batch
pub enum BatchOutcome {
    Analyzed(Box<DocumentAnalysis>),
    /// Document skipped; the rest of the batch is unaffected
    Skipped { document_id: String, reason: String },
}

/// One document submitted to a batch run
#[derive(Debug, Clone)]
pub struct BatchDocument {
    pub document_id: String,
    pub text: String,
}

/// The analysis pipeline with its read-only configuration
pub struct PipelineEngine {
    patterns: PatternRegistry,
    recognizer: RecognizerCapability,
    classifier: SensitivityClassifier,
    risk: RiskEngine,
    rewriter: AnonymizationRewriter,
    audit: AuditLogger,
}

impl PipelineEngine {
    pub fn new(
        patterns: PatternRegistry,
        recognizer: RecognizerCapability,
        classifier: SensitivityClassifier,
        risk: RiskEngine,
        rewriter: AnonymizationRewriter,
        audit: AuditLogger,
    ) -> Self {
        Self {
            patterns,
            recognizer,
            classifier,
            risk,
            rewriter,
            audit,
        }
    }

    /// Analyze one document
    ///
    /// A recognizer failure degrades detection to pattern-only with a
    /// warning instead of failing the document. The only errors that
    /// surface here are audit I/O failures.
    pub fn analyze(&self, document_id: &str, text: &str, consent: bool) -> Result<DocumentAnalysis> {
        let started = Instant::now();
        let mut warnings = Vec::new();

        let mut spans = self.patterns.detect(text);
        debug!(document_id, pattern_spans = spans.len(), "pattern detection complete");

        match self.recognizer.detect(text) {
            Ok(statistical) => {
                if statistical.dropped_labels > 0 || statistical.invalid_spans > 0 {
                    debug!(
                        document_id,
                        dropped = statistical.dropped_labels,
                        invalid = statistical.invalid_spans,
                        "recognizer spans dropped before merging"
                    );
                }
                spans.extend(statistical.spans);
            }
            Err(ShomerError::CapabilityUnavailable(reason)) => {
                warn!(document_id, %reason, "degrading to pattern-only detection");
                warnings.push(format!(
                    "statistical recognizer unavailable, pattern-only detection: {reason}"
                ));
            }
            Err(e) => return Err(e),
        }

        let entities = resolve_spans(spans, &self.classifier);
        let assessment = self.risk.assess(&entities, consent, &warnings);
        let anonymized = self.rewriter.anonymize(text, &entities);

        let processing_time_ms = started.elapsed().as_millis() as u64;
        self.audit.log_analysis(
            document_id,
            &entities,
            &assessment,
            self.rewriter.mode(),
            processing_time_ms,
        )?;

        Ok(DocumentAnalysis {
            document_id: document_id.to_string(),
            entities,
            assessment,
            anonymized,
            warnings,
            processing_time_ms,
        })
    }

    /// Analyze a batch of documents in parallel
    ///
    /// Documents are independent; one failing document is reported as
    /// skipped and never blocks or corrupts the others. Outcomes preserve
    /// submission order.
    pub async fn analyze_batch(
        self: Arc<Self>,
        documents: Vec<BatchDocument>,
        consent: bool,
    ) -> Vec<BatchOutcome> {
        let mut handles = Vec::with_capacity(documents.len());

        for doc in documents {
            let engine = Arc::clone(&self);
            handles.push((
                doc.document_id.clone(),
                tokio::task::spawn_blocking(move || {
                    engine.analyze(&doc.document_id, &doc.text, consent)
                }),
            ));
        }

        let (document_ids, joins): (Vec<_>, Vec<_>) = handles.into_iter().unzip();
        let results = join_all(joins).await;

        let mut outcomes = Vec::with_capacity(results.len());
        for (document_id, result) in document_ids.into_iter().zip(results) {
            let outcome = match result {
                Ok(Ok(analysis)) => BatchOutcome::Analyzed(Box::new(analysis)),
                Ok(Err(e)) => {
                    warn!(%document_id, error = %e, "skipping document");
                    BatchOutcome::Skipped {
                        document_id,
                        reason: e.to_string(),
                    }
                }
                Err(e) => {
                    warn!(%document_id, error = %e, "analysis task panicked");
                    BatchOutcome::Skipped {
                        document_id,
                        reason: format!("analysis task failed: {e}"),
                    }
                }
            };
            outcomes.push(outcome);
        }

        outcomes
    }
}
