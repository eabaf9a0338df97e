//! Audit logger for document analyses
//!
//! Appends one JSONL entry per analyzed document. Matched text is recorded
//! only as a SHA-256 hash; plaintext PII never reaches the audit trail.

use crate::domain::{AnonymizationMode, ResolvedEntity, Result, RiskAssessment, ShomerError};
use chrono::Utc;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
struct AuditEntry {
    timestamp: String,
    document_id: String,
    entity_count: usize,
    score: u8,
    decision: String,
    anonymization_mode: String,
    processing_time_ms: u64,
    detections: Vec<AuditDetection>,
}

#[derive(Debug, Serialize)]
struct AuditDetection {
    category: String,
    start: usize,
    end: usize,
    confidence: f32,
    validated: bool,
    /// SHA-256 of the matched text, never the plaintext
    value_hash: String,
}

/// Append-only JSONL audit logger
pub struct AuditLogger {
    log_path: PathBuf,
    enabled: bool,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf, enabled: bool) -> Result<Self> {
        if enabled {
            if let Some(parent) = log_path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    ShomerError::Configuration(format!(
                        "failed to create audit log directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        Ok(Self { log_path, enabled })
    }

    /// Disabled logger that drops every entry
    pub fn disabled() -> Self {
        Self {
            log_path: PathBuf::new(),
            enabled: false,
        }
    }

    /// Record one analyzed document
    pub fn log_analysis(
        &self,
        document_id: &str,
        entities: &[ResolvedEntity],
        assessment: &RiskAssessment,
        mode: AnonymizationMode,
        processing_time_ms: u64,
    ) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let entry = AuditEntry {
            timestamp: Utc::now().to_rfc3339(),
            document_id: document_id.to_string(),
            entity_count: entities.len(),
            score: assessment.score,
            decision: assessment.decision.to_string(),
            anonymization_mode: mode.to_string(),
            processing_time_ms,
            detections: entities
                .iter()
                .map(|e| AuditDetection {
                    category: e.category.label().to_string(),
                    start: e.start,
                    end: e.end,
                    confidence: e.confidence,
                    validated: e.is_validated(),
                    value_hash: hash_value(e.matched_text()),
                })
                .collect(),
        };

        self.write_entry(&entry)
    }

    fn write_entry(&self, entry: &AuditEntry) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;

        let line = serde_json::to_string(entry)?;
        writeln!(file, "{line}")?;
        Ok(())
    }
}

fn hash_value(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let digest = hasher.finalize();
    format!("{digest:x}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Decision, DetectionSource, PiiCategory, RawSpan, SensitivityTier};
    use tempfile::tempdir;

    fn assessment() -> RiskAssessment {
        RiskAssessment {
            score: 45,
            decision: Decision::RequiresChanges,
            rationale: Vec::new(),
            confidence: 0.9,
            findings: Vec::new(),
            required_actions: Vec::new(),
            estimated_remediation_time: "5-10 minutes".to_string(),
        }
    }

    fn entity(text: &str) -> ResolvedEntity {
        ResolvedEntity {
            start: 0,
            end: text.len(),
            category: PiiCategory::Email,
            confidence: 0.95,
            tier: SensitivityTier::Standard,
            evidence: vec![RawSpan {
                start: 0,
                end: text.len(),
                category: PiiCategory::Email,
                matched_text: text.to_string(),
                source: DetectionSource::Pattern,
                confidence: 0.95,
                validator_passed: None,
            }],
        }
    }

    #[test]
    fn test_hash_value_is_stable() {
        assert_eq!(hash_value("dana@example.com"), hash_value("dana@example.com"));
        assert_ne!(hash_value("dana@example.com"), hash_value("noa@example.com"));
    }

    #[test]
    fn test_log_entry_never_contains_plaintext() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("audit.jsonl");
        let logger = AuditLogger::new(log_path.clone(), true).unwrap();

        logger
            .log_analysis(
                "doc-1",
                &[entity("dana@example.com")],
                &assessment(),
                AnonymizationMode::Redact,
                12,
            )
            .unwrap();

        let content = std::fs::read_to_string(&log_path).unwrap();
        assert!(content.contains("doc-1"));
        assert!(content.contains("EMAIL"));
        assert!(!content.contains("dana@example.com"));
    }

    #[test]
    fn test_disabled_logger_writes_nothing() {
        let logger = AuditLogger::disabled();
        logger
            .log_analysis("doc-2", &[], &assessment(), AnonymizationMode::Hash, 1)
            .unwrap();
    }

    #[test]
    fn test_entries_append_as_jsonl() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("audit.jsonl");
        let logger = AuditLogger::new(log_path.clone(), true).unwrap();

        for id in ["a", "b", "c"] {
            logger
                .log_analysis(id, &[], &assessment(), AnonymizationMode::Mask, 1)
                .unwrap();
        }

        let content = std::fs::read_to_string(&log_path).unwrap();
        assert_eq!(content.lines().count(), 3);
        for line in content.lines() {
            serde_json::from_str::<serde_json::Value>(line).unwrap();
        }
    }
}
