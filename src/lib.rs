// Shomer - PII Detection and Anonymization Tool
// Copyright (c) 2026 Shomer Contributors
// Licensed under the MIT License

//! # Shomer - PII detection and anonymization
//!
//! Shomer scans free text for personally identifiable information, assesses
//! the privacy risk under the Israeli Privacy Protection Law (Amendment 13),
//! and produces position-exact anonymized rewrites.
//!
//! ## Pipeline
//!
//! Each document flows through five stages, each a pure function of its
//! inputs and the once-loaded, read-only configuration:
//!
//! 1. **Detection** - a regex pattern library with checksum validators, plus
//!    an optional statistical named-entity recognizer
//! 2. **Merge** - overlapping raw spans are resolved into non-overlapping
//!    entities with deterministic conflict priority
//! 3. **Classification** - every category maps to a legal sensitivity tier
//! 4. **Risk scoring** - weighted, capped scoring with an ordered rationale
//!    trace and a compliance decision
//! 5. **Anonymization** - redact, mask, replace, or hash rewriting
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`detection`] - Pattern library, validators, recognizer adapter
//! - [`merge`] - Span merger and conflict resolver
//! - [`classify`] - Sensitivity tier classifier
//! - [`risk`] - Risk scoring and decision engine
//! - [`anonymize`] - Anonymization rewriter
//! - [`engine`] - Pipeline wiring and batch execution
//! - [`audit`] - Append-only audit trail with hashed values
//! - [`report`] - Batch scan reporting
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use shomer::anonymize::AnonymizationRewriter;
//! use shomer::audit::AuditLogger;
//! use shomer::classify::SensitivityClassifier;
//! use shomer::detection::{PatternRegistry, RecognizerCapability};
//! use shomer::domain::AnonymizationMode;
//! use shomer::engine::PipelineEngine;
//! use shomer::risk::{RiskConfig, RiskEngine};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let engine = PipelineEngine::new(
//!         PatternRegistry::default_patterns()?,
//!         RecognizerCapability::Absent,
//!         SensitivityClassifier::new()?,
//!         RiskEngine::new(RiskConfig::default())?,
//!         AnonymizationRewriter::new(AnonymizationMode::Redact, '*', ""),
//!         AuditLogger::disabled(),
//!     );
//!
//!     let analysis = engine.analyze("doc-1", "phone 052-1234567", true)?;
//!     println!("score {}, {}", analysis.assessment.score, analysis.assessment.decision);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`domain::Result`] with
//! [`domain::ShomerError`]. Configuration problems fail at load time;
//! per-document input problems skip the document; a failing recognizer
//! degrades detection to pattern-only instead of failing.

pub mod anonymize;
pub mod audit;
pub mod classify;
pub mod cli;
pub mod config;
pub mod detection;
pub mod domain;
pub mod engine;
pub mod logging;
pub mod merge;
pub mod report;
pub mod risk;
