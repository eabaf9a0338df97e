//! Scan command implementation
//!
//! Runs the full pipeline over one or more input files, prints a batch
//! report, and optionally writes anonymized copies and a JSON report.

use crate::anonymize::AnonymizationRewriter;
use crate::audit::AuditLogger;
use crate::classify::SensitivityClassifier;
use crate::config::{default_config, load_config, ShomerConfig};
use crate::detection::{PatternRegistry, RecognizerCapability, ValidatorRegistry};
use crate::domain::AnonymizationMode;
use crate::engine::{BatchDocument, BatchOutcome, PipelineEngine};
use crate::report::ScanReport;
use crate::risk::RiskEngine;
use clap::Args;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Arguments for the scan command
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Input text files to scan
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Data subject consent for specially sensitive information
    #[arg(long)]
    pub consent: bool,

    /// Override the configured anonymization mode (redact, mask, replace, hash)
    #[arg(long)]
    pub mode: Option<String>,

    /// Directory to write anonymized copies into
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Write the JSON report to this file
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Print the report as JSON instead of the console format
    #[arg(long)]
    pub json: bool,

    /// Analyze and report without writing any anonymized output
    #[arg(long, conflicts_with = "out_dir")]
    pub dry_run: bool,
}

impl ScanArgs {
    /// Execute the scan command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path, inputs = self.inputs.len(), "Starting scan");

        let config = match self.load(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ Configuration error: {e}");
                return Ok(2);
            }
        };

        let engine = match self.build_engine(&config) {
            Ok(e) => Arc::new(e),
            Err(e) => {
                eprintln!("❌ Configuration error: {e}");
                return Ok(2);
            }
        };

        let mut report = ScanReport::new();

        // Per-document input failures are recorded and skipped; they never
        // abort the batch.
        let mut documents = Vec::new();
        for input in &self.inputs {
            let document_id = input.display().to_string();
            match read_document(input) {
                Ok(text) => documents.push(BatchDocument { document_id, text }),
                Err(e) => {
                    tracing::warn!(%document_id, error = %e, "skipping input");
                    report.add_skipped(&document_id, &e.to_string());
                }
            }
        }

        let outcomes = engine.analyze_batch(documents, self.consent).await;
        for outcome in &outcomes {
            match outcome {
                BatchOutcome::Analyzed(analysis) => {
                    report.add_analysis(analysis);
                    if !self.dry_run {
                        if let Some(dir) = &self.out_dir {
                            write_anonymized(
                                dir,
                                &analysis.document_id,
                                &analysis.anonymized.transformed_text,
                            )?;
                        }
                    }
                }
                BatchOutcome::Skipped {
                    document_id,
                    reason,
                } => report.add_skipped(document_id, reason),
            }
        }

        if self.json {
            println!("{}", report.format_json()?);
        } else {
            if self.dry_run {
                println!("🔍 Dry run: no anonymized output written");
            }
            print!("{}", report.format_console());
        }

        if let Some(path) = &self.report {
            report.write_to_file(path)?;
            tracing::info!(path = %path.display(), "Report written");
        }

        Ok(if report.skipped_documents > 0 { 3 } else { 0 })
    }

    fn load(&self, config_path: &str) -> crate::domain::Result<ShomerConfig> {
        let mut config = if Path::new(config_path).exists() {
            load_config(config_path)?
        } else {
            tracing::debug!(config_path, "no configuration file, using defaults");
            default_config()?
        };

        if let Some(mode) = &self.mode {
            config.anonymization.mode = parse_mode(mode)?;
            config.validate().map_err(crate::domain::ShomerError::Configuration)?;
        }

        Ok(config)
    }

    fn build_engine(&self, config: &ShomerConfig) -> crate::domain::Result<PipelineEngine> {
        let validators = ValidatorRegistry::builtin();
        let patterns = match &config.detection.pattern_file {
            Some(path) => PatternRegistry::from_file(path, &validators)?,
            None => PatternRegistry::default_patterns()?,
        };

        let classifier = SensitivityClassifier::new()?;
        let risk = RiskEngine::new(config.risk.clone())?;
        let rewriter = AnonymizationRewriter::new(
            config.anonymization.mode,
            config.anonymization.mask_char(),
            config.anonymization.hash_salt.clone(),
        );
        let audit = AuditLogger::new(PathBuf::from(&config.audit.log_path), config.audit.enabled)?;

        Ok(PipelineEngine::new(
            patterns,
            RecognizerCapability::Absent,
            classifier,
            risk,
            rewriter,
            audit,
        ))
    }
}

fn parse_mode(value: &str) -> crate::domain::Result<AnonymizationMode> {
    match value.to_lowercase().as_str() {
        "redact" => Ok(AnonymizationMode::Redact),
        "mask" => Ok(AnonymizationMode::Mask),
        "replace" => Ok(AnonymizationMode::Replace),
        "hash" => Ok(AnonymizationMode::Hash),
        _ => Err(crate::domain::ShomerError::Configuration(format!(
            "unknown anonymization mode '{value}', expected redact, mask, replace, or hash"
        ))),
    }
}

/// Read one input document, rejecting non-UTF-8 content
fn read_document(path: &Path) -> crate::domain::Result<String> {
    let bytes = std::fs::read(path).map_err(|e| {
        crate::domain::ShomerError::Input(format!("failed to read {}: {e}", path.display()))
    })?;
    String::from_utf8(bytes).map_err(|_| {
        crate::domain::ShomerError::Input(format!("{} is not valid UTF-8", path.display()))
    })
}

fn write_anonymized(dir: &Path, document_id: &str, text: &str) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir)?;
    let file_name = Path::new(document_id)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "document.txt".to_string());
    let target = dir.join(format!("anonymized_{file_name}"));
    std::fs::write(&target, text)?;
    tracing::info!(path = %target.display(), "Anonymized copy written");
    Ok(())
}
