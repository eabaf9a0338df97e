//! Scan reporting
//!
//! Aggregates per-document analyses into a batch report with detection
//! statistics, decision counts, sample rewrites, and warnings.

use crate::domain::{Decision, PiiCategory};
use crate::engine::DocumentAnalysis;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const MAX_SAMPLES: usize = 20;
const SAMPLES_PER_DOCUMENT: usize = 3;
const SAMPLE_TRUNCATE_LEN: usize = 50;

/// Batch scan report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// Unique identifier of this scan run, for audit correlation
    pub run_id: String,

    /// Total documents analyzed
    pub total_documents: usize,

    /// Documents skipped due to per-document failures
    pub skipped_documents: usize,

    /// Total PII entities detected
    pub total_pii_detected: usize,

    /// Detections by category
    pub detections_by_category: HashMap<PiiCategory, usize>,

    /// Decision counts across the batch
    pub decisions: HashMap<Decision, usize>,

    /// Sample rewrites (before/after examples)
    pub samples: Vec<RewriteSample>,

    /// Warnings, including degradation notes and skip reasons
    pub warnings: Vec<String>,

    /// Processing statistics
    pub stats: ProcessingStats,
}

/// Sample rewrite showing before/after
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewriteSample {
    /// Original value, truncated for privacy
    pub original: String,
    pub anonymized: String,
    pub category: PiiCategory,
    pub document_id: String,
    pub confidence: f32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessingStats {
    pub avg_processing_time_ms: u64,
    pub total_processing_time_ms: u64,
    pub documents_with_pii: usize,
    pub documents_without_pii: usize,
    pub max_risk_score: u8,
}

impl ScanReport {
    pub fn new() -> Self {
        Self {
            run_id: uuid::Uuid::new_v4().to_string(),
            total_documents: 0,
            skipped_documents: 0,
            total_pii_detected: 0,
            detections_by_category: HashMap::new(),
            decisions: HashMap::new(),
            samples: Vec::new(),
            warnings: Vec::new(),
            stats: ProcessingStats::default(),
        }
    }

    /// Fold one document's analysis into the report
    pub fn add_analysis(&mut self, analysis: &DocumentAnalysis) {
        self.total_documents += 1;
        self.stats.total_processing_time_ms += analysis.processing_time_ms;
        *self.decisions.entry(analysis.assessment.decision).or_insert(0) += 1;
        self.stats.max_risk_score = self.stats.max_risk_score.max(analysis.assessment.score);

        if analysis.entities.is_empty() {
            self.stats.documents_without_pii += 1;
        } else {
            self.stats.documents_with_pii += 1;
            self.total_pii_detected += analysis.entities.len();

            for entity in &analysis.entities {
                *self
                    .detections_by_category
                    .entry(entity.category)
                    .or_insert(0) += 1;
            }

            for (entity, applied) in analysis
                .entities
                .iter()
                .zip(&analysis.anonymized.applied_spans)
                .take(SAMPLES_PER_DOCUMENT)
            {
                if self.samples.len() >= MAX_SAMPLES {
                    break;
                }
                self.samples.push(RewriteSample {
                    original: truncate(entity.matched_text()),
                    anonymized: applied.replacement.clone(),
                    category: entity.category,
                    document_id: analysis.document_id.clone(),
                    confidence: entity.confidence,
                });
            }
        }

        for warning in &analysis.warnings {
            self.warnings
                .push(format!("{}: {warning}", analysis.document_id));
        }

        self.stats.avg_processing_time_ms =
            self.stats.total_processing_time_ms / self.total_documents as u64;
    }

    /// Record one skipped document
    pub fn add_skipped(&mut self, document_id: &str, reason: &str) {
        self.skipped_documents += 1;
        self.warnings.push(format!("{document_id}: skipped: {reason}"));
    }

    /// Format report for console output
    pub fn format_console(&self) -> String {
        let mut output = String::new();

        output.push('\n');
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push_str("                       PII SCAN REPORT                         \n");
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push('\n');

        output.push_str("SUMMARY\n");
        output.push_str("───────────────────────────────────────────────────────────────\n");
        output.push_str(&format!("  Run ID:                 {}\n", self.run_id));
        output.push_str(&format!(
            "  Documents Analyzed:     {}\n",
            self.total_documents
        ));
        output.push_str(&format!(
            "  Documents Skipped:      {}\n",
            self.skipped_documents
        ));
        output.push_str(&format!(
            "  Documents with PII:     {}\n",
            self.stats.documents_with_pii
        ));
        output.push_str(&format!(
            "  Documents without PII:  {}\n",
            self.stats.documents_without_pii
        ));
        output.push_str(&format!(
            "  PII Entities Detected:  {}\n",
            self.total_pii_detected
        ));
        output.push_str(&format!(
            "  Highest Risk Score:     {}\n",
            self.stats.max_risk_score
        ));
        output.push_str(&format!(
            "  Avg Processing Time:    {} ms\n",
            self.stats.avg_processing_time_ms
        ));
        output.push('\n');

        if !self.decisions.is_empty() {
            output.push_str("DECISIONS\n");
            output.push_str("───────────────────────────────────────────────────────────────\n");
            let mut decisions: Vec<_> = self.decisions.iter().collect();
            decisions.sort_by_key(|(decision, _)| **decision);
            for (decision, count) in decisions {
                output.push_str(&format!("  {:30} {:>5}\n", decision.to_string(), count));
            }
            output.push('\n');
        }

        if !self.detections_by_category.is_empty() {
            output.push_str("DETECTIONS BY CATEGORY\n");
            output.push_str("───────────────────────────────────────────────────────────────\n");
            let mut categories: Vec<_> = self.detections_by_category.iter().collect();
            categories.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.label().cmp(b.0.label())));
            for (category, count) in categories {
                output.push_str(&format!("  {:30} {:>5}\n", category.label(), count));
            }
            output.push('\n');
        }

        if !self.samples.is_empty() {
            output.push_str("SAMPLE REWRITES\n");
            output.push_str("───────────────────────────────────────────────────────────────\n");
            for (i, sample) in self.samples.iter().take(10).enumerate() {
                output.push_str(&format!("\n  Sample #{}\n", i + 1));
                output.push_str(&format!("    Document:    {}\n", sample.document_id));
                output.push_str(&format!("    Category:    {}\n", sample.category));
                output.push_str(&format!(
                    "    Confidence:  {:.2}%\n",
                    sample.confidence * 100.0
                ));
                output.push_str(&format!("    Original:    \"{}\"\n", sample.original));
                output.push_str(&format!("    Anonymized:  \"{}\"\n", sample.anonymized));
            }
            output.push('\n');
        }

        if !self.warnings.is_empty() {
            output.push_str("WARNINGS\n");
            output.push_str("───────────────────────────────────────────────────────────────\n");
            for warning in &self.warnings {
                output.push_str(&format!("  • {warning}\n"));
            }
            output.push('\n');
        }

        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push('\n');

        output
    }

    /// Format report as JSON
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write the JSON report to a file
    pub fn write_to_file(&self, path: &std::path::Path) -> std::io::Result<()> {
        let json = self.format_json().map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}

impl Default for ScanReport {
    fn default() -> Self {
        Self::new()
    }
}

fn truncate(value: &str) -> String {
    if value.chars().count() > SAMPLE_TRUNCATE_LEN {
        let kept: String = value.chars().take(SAMPLE_TRUNCATE_LEN - 3).collect();
        format!("{kept}...")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        AnonymizationMode, AnonymizedDocument, AppliedSpan, DetectionSource, RawSpan,
        ResolvedEntity, RiskAssessment, SensitivityTier,
    };

    fn analysis(document_id: &str, entities: Vec<ResolvedEntity>) -> DocumentAnalysis {
        let applied_spans = entities
            .iter()
            .map(|e| AppliedSpan {
                start: e.start,
                end: e.end,
                category: e.category,
                replacement: format!("[REDACTED:{}]", e.category.label()),
                mode: AnonymizationMode::Redact,
            })
            .collect();

        DocumentAnalysis {
            document_id: document_id.to_string(),
            assessment: RiskAssessment {
                score: if entities.is_empty() { 0 } else { 30 },
                decision: if entities.is_empty() {
                    Decision::Approved
                } else {
                    Decision::ApprovedWithConditions
                },
                rationale: Vec::new(),
                confidence: 0.9,
                findings: Vec::new(),
                required_actions: Vec::new(),
                estimated_remediation_time: "none required".to_string(),
            },
            anonymized: AnonymizedDocument {
                original_length: 0,
                transformed_text: String::new(),
                applied_spans,
            },
            entities,
            warnings: Vec::new(),
            processing_time_ms: 10,
        }
    }

    fn email_entity() -> ResolvedEntity {
        ResolvedEntity {
            start: 0,
            end: 16,
            category: PiiCategory::Email,
            confidence: 0.95,
            tier: SensitivityTier::Standard,
            evidence: vec![RawSpan {
                start: 0,
                end: 16,
                category: PiiCategory::Email,
                matched_text: "dana@example.com".to_string(),
                source: DetectionSource::Pattern,
                confidence: 0.95,
                validator_passed: None,
            }],
        }
    }

    #[test]
    fn test_empty_report() {
        let report = ScanReport::new();
        assert_eq!(report.total_documents, 0);
        assert!(report.samples.is_empty());
    }

    #[test]
    fn test_add_analysis_without_pii() {
        let mut report = ScanReport::new();
        report.add_analysis(&analysis("clean", Vec::new()));

        assert_eq!(report.total_documents, 1);
        assert_eq!(report.stats.documents_without_pii, 1);
        assert_eq!(report.decisions.get(&Decision::Approved), Some(&1));
    }

    #[test]
    fn test_add_analysis_with_pii_collects_samples() {
        let mut report = ScanReport::new();
        report.add_analysis(&analysis("doc-1", vec![email_entity()]));

        assert_eq!(report.total_pii_detected, 1);
        assert_eq!(
            report.detections_by_category.get(&PiiCategory::Email),
            Some(&1)
        );
        assert_eq!(report.samples.len(), 1);
        assert_eq!(report.samples[0].anonymized, "[REDACTED:EMAIL]");
    }

    #[test]
    fn test_skipped_documents_recorded() {
        let mut report = ScanReport::new();
        report.add_skipped("bad.txt", "file is not valid UTF-8");
        assert_eq!(report.skipped_documents, 1);
        assert!(report.warnings[0].contains("bad.txt"));
    }

    #[test]
    fn test_format_console_sections() {
        let mut report = ScanReport::new();
        report.add_analysis(&analysis("doc-1", vec![email_entity()]));

        let output = report.format_console();
        assert!(output.contains("PII SCAN REPORT"));
        assert!(output.contains("Documents Analyzed:     1"));
        assert!(output.contains("EMAIL"));
        assert!(output.contains("APPROVED_WITH_CONDITIONS"));
    }

    #[test]
    fn test_format_json_roundtrip() {
        let mut report = ScanReport::new();
        report.add_analysis(&analysis("doc-1", vec![email_entity()]));
        let json = report.format_json().unwrap();
        let parsed: ScanReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.total_pii_detected, 1);
    }
}
