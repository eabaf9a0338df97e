//! Pattern library for PII detection

use crate::detection::validators::{ValidatorFn, ValidatorRegistry};
use crate::domain::{DetectionSource, PiiCategory, RawSpan, Result, ShomerError};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Pattern definition from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct PatternDefinition {
    /// Regex patterns for this category
    pub patterns: Vec<String>,
    /// Confidence score (0.0 - 1.0)
    pub confidence: f32,
    /// PII category label
    pub category: String,
    /// Optional checksum validator name; must exist in the registry
    pub validator: Option<String>,
}

/// Compiled pattern with metadata
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pub regex: Regex,
    pub category: PiiCategory,
    pub confidence: f32,
    pub validator: Option<ValidatorFn>,
}

#[derive(Debug, Deserialize)]
struct PatternLibrary {
    patterns: HashMap<String, PatternDefinition>,
}

/// Pattern registry for PII detection
///
/// All compilation and validator resolution happens at load time; detection
/// itself is a pure function of the text and never fails.
#[derive(Debug)]
pub struct PatternRegistry {
    patterns: Vec<CompiledPattern>,
    patterns_by_category: HashMap<PiiCategory, Vec<CompiledPattern>>,
}

impl PatternRegistry {
    /// Create a pattern registry from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P, validators: &ValidatorRegistry) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ShomerError::Configuration(format!(
                "failed to read pattern library {}: {e}",
                path.as_ref().display()
            ))
        })?;
        Self::from_toml(&content, validators)
    }

    /// Create a pattern registry from TOML content
    pub fn from_toml(content: &str, validators: &ValidatorRegistry) -> Result<Self> {
        let library: PatternLibrary = toml::from_str(content)?;

        let mut patterns = Vec::new();
        let mut patterns_by_category: HashMap<PiiCategory, Vec<CompiledPattern>> = HashMap::new();

        // Sort by name so detection order (and therefore raw-span order)
        // is stable across runs regardless of map iteration order.
        let mut definitions: Vec<_> = library.patterns.into_iter().collect();
        definitions.sort_by(|a, b| a.0.cmp(&b.0));

        for (name, def) in definitions {
            let category = PiiCategory::parse(&def.category).ok_or_else(|| {
                ShomerError::Configuration(format!(
                    "unknown category in pattern '{name}': {}",
                    def.category
                ))
            })?;

            if !(0.0..=1.0).contains(&def.confidence) {
                return Err(ShomerError::Configuration(format!(
                    "confidence out of range in pattern '{name}': {}",
                    def.confidence
                )));
            }

            let validator = def
                .validator
                .as_deref()
                .map(|v| validators.resolve(v))
                .transpose()?;

            for pattern_str in &def.patterns {
                let regex = Regex::new(pattern_str).map_err(|e| {
                    ShomerError::Configuration(format!(
                        "invalid regex in pattern '{name}': {e}"
                    ))
                })?;

                let compiled = CompiledPattern {
                    regex,
                    category,
                    confidence: def.confidence,
                    validator,
                };

                patterns.push(compiled.clone());
                patterns_by_category
                    .entry(category)
                    .or_default()
                    .push(compiled);
            }
        }

        Ok(Self {
            patterns,
            patterns_by_category,
        })
    }

    /// Registry with the embedded default pattern library
    pub fn default_patterns() -> Result<Self> {
        let default_toml = include_str!("../../patterns/pii_patterns.toml");
        Self::from_toml(default_toml, &ValidatorRegistry::builtin())
    }

    /// Detect PII spans in text
    ///
    /// Pure function of `text` plus the loaded tables. A match for a
    /// category with a declared validator is kept only when the validator
    /// accepts it; categories without a validator report
    /// `validator_passed: None`.
    pub fn detect(&self, text: &str) -> Vec<RawSpan> {
        let mut spans = Vec::new();

        for pattern in &self.patterns {
            for matched in pattern.regex.find_iter(text) {
                let matched_text = matched.as_str();
                let validator_passed = match pattern.validator {
                    Some(validate) => {
                        if !validate(matched_text) {
                            continue;
                        }
                        Some(true)
                    }
                    None => None,
                };

                spans.push(RawSpan {
                    start: matched.start(),
                    end: matched.end(),
                    category: pattern.category,
                    matched_text: matched_text.to_string(),
                    source: DetectionSource::Pattern,
                    confidence: pattern.confidence,
                    validator_passed,
                });
            }
        }

        spans
    }

    /// Get all compiled patterns
    pub fn all_patterns(&self) -> &[CompiledPattern] {
        &self.patterns
    }

    /// Get patterns for a specific category
    pub fn patterns_for_category(&self, category: PiiCategory) -> Option<&[CompiledPattern]> {
        self.patterns_by_category
            .get(&category)
            .map(|v| v.as_slice())
    }
}
