//! Risk scoring and decision engine
//!
//! Aggregates resolved entities into a deterministic risk score, compliance
//! decision, and an ordered rationale trace. All weights, penalties, and
//! thresholds are static configuration validated at load time; assessment
//! itself never fails on well-formed entities.

use crate::domain::{
    ComplianceFinding, Decision, PiiCategory, RationaleEntry, ResolvedEntity, Result,
    RiskAssessment, SensitivityTier, ShomerError,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Score boundaries for the ordered threshold decision mapping
///
/// A score strictly below `approved` maps to APPROVED, below
/// `approved_with_conditions` to APPROVED_WITH_CONDITIONS, and so on;
/// anything at or above `rejected` is CRITICAL_VIOLATION.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionThresholds {
    pub approved: u8,
    pub approved_with_conditions: u8,
    pub requires_changes: u8,
    pub rejected: u8,
}

impl Default for DecisionThresholds {
    fn default() -> Self {
        Self {
            approved: 20,
            approved_with_conditions: 40,
            requires_changes: 65,
            rejected: 85,
        }
    }
}

/// Static risk engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// Per-entity score weight for each category
    pub weights: HashMap<PiiCategory, u32>,
    /// Cap on one category's total contribution, so a repeated field
    /// cannot dominate the score on its own
    pub per_category_cap: u32,
    /// Fixed penalty when specially sensitive data appears without consent
    pub consent_penalty: u32,
    pub thresholds: DecisionThresholds,
    /// Categories that force CRITICAL_VIOLATION regardless of score.
    /// Empty by default; severity is expressed through the weights.
    pub always_critical: Vec<PiiCategory>,
    /// Confidence discount factor applied in proportion to the share of
    /// entities with no pattern or validator corroboration
    pub uncorroborated_discount: f32,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            weights: default_weights(),
            per_category_cap: 30,
            consent_penalty: 25,
            thresholds: DecisionThresholds::default(),
            always_critical: Vec::new(),
            uncorroborated_discount: 0.3,
        }
    }
}

impl RiskConfig {
    /// Validate weight and threshold tables
    pub fn validate(&self) -> Result<()> {
        for category in PiiCategory::ALL {
            match self.weights.get(category) {
                None => {
                    return Err(ShomerError::Configuration(format!(
                        "no risk weight configured for category {category}"
                    )))
                }
                Some(weight) if *weight > 100 => {
                    return Err(ShomerError::Configuration(format!(
                        "risk weight for category {category} exceeds 100: {weight}"
                    )))
                }
                Some(_) => {}
            }
        }

        let t = &self.thresholds;
        if !(t.approved < t.approved_with_conditions
            && t.approved_with_conditions < t.requires_changes
            && t.requires_changes < t.rejected
            && t.rejected <= 100)
        {
            return Err(ShomerError::Configuration(format!(
                "decision thresholds must be strictly ascending and at most 100, \
                 got {}/{}/{}/{}",
                t.approved, t.approved_with_conditions, t.requires_changes, t.rejected
            )));
        }

        if !(0.0..=1.0).contains(&self.uncorroborated_discount) {
            return Err(ShomerError::Configuration(format!(
                "uncorroborated_discount out of range: {}",
                self.uncorroborated_discount
            )));
        }

        Ok(())
    }
}

/// Deterministic risk scorer
#[derive(Debug)]
pub struct RiskEngine {
    config: RiskConfig,
}

impl RiskEngine {
    pub fn new(config: RiskConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Assess one document's resolved entities
    ///
    /// `consent` is externally supplied, never inferred from text.
    /// `degradation_notes` carries zero-point rationale entries such as a
    /// recognizer falling back to pattern-only detection.
    pub fn assess(
        &self,
        entities: &[ResolvedEntity],
        consent: bool,
        degradation_notes: &[String],
    ) -> RiskAssessment {
        let mut rationale: Vec<RationaleEntry> = Vec::new();
        let mut findings: Vec<ComplianceFinding> = Vec::new();
        let mut required_actions: Vec<String> = Vec::new();
        let mut score: u32 = 0;

        // Per-category contributions in declaration order, capped so a
        // repeated field cannot dominate the score.
        for category in PiiCategory::ALL {
            let count = entities.iter().filter(|e| e.category == *category).count() as u32;
            if count == 0 {
                continue;
            }

            let weight = self.config.weights[category];
            let contribution = weight
                .saturating_mul(count)
                .min(self.config.per_category_cap);
            score = score.saturating_add(contribution);

            rationale.push(RationaleEntry {
                rule: format!("{category} x{count}"),
                points: contribution,
            });
            required_actions.push(format!(
                "Remove or anonymize {category} ({count} occurrence{})",
                if count == 1 { "" } else { "s" }
            ));
        }

        // Specially sensitive data without consent is a statutory violation.
        let special: Vec<&ResolvedEntity> = entities
            .iter()
            .filter(|e| e.tier == SensitivityTier::Special)
            .collect();
        if !special.is_empty() && !consent {
            score = score.saturating_add(self.config.consent_penalty);
            let categories = distinct_labels(&special);
            rationale.push(RationaleEntry {
                rule: "specially sensitive data without consent".to_string(),
                points: self.config.consent_penalty,
            });
            findings.push(ComplianceFinding {
                section_ref: "Section 7(c), Privacy Protection Law (Amendment 13), 2024"
                    .to_string(),
                violated: true,
                description: format!(
                    "Specially sensitive information present without explicit consent: {}",
                    categories.join(", ")
                ),
                recommendation:
                    "Obtain explicit consent for the specially sensitive data or remove it"
                        .to_string(),
            });
            required_actions.push(
                "Obtain explicit consent for specially sensitive data or remove it".to_string(),
            );
        }

        for note in degradation_notes {
            rationale.push(RationaleEntry {
                rule: note.clone(),
                points: 0,
            });
        }

        let score = score.min(100) as u8;
        let decision = self.decide(score, entities);
        let confidence = self.decision_confidence(entities);

        RiskAssessment {
            score,
            decision,
            rationale,
            confidence,
            findings,
            required_actions,
            estimated_remediation_time: remediation_time(entities.len()),
        }
    }

    fn decide(&self, score: u8, entities: &[ResolvedEntity]) -> Decision {
        let critical = entities
            .iter()
            .any(|e| self.config.always_critical.contains(&e.category));
        if critical {
            return Decision::CriticalViolation;
        }

        let t = &self.config.thresholds;
        if score < t.approved {
            Decision::Approved
        } else if score < t.approved_with_conditions {
            Decision::ApprovedWithConditions
        } else if score < t.requires_changes {
            Decision::RequiresChanges
        } else if score < t.rejected {
            Decision::Rejected
        } else {
            Decision::CriticalViolation
        }
    }

    /// Mean entity confidence, discounted by the statistical-only share
    fn decision_confidence(&self, entities: &[ResolvedEntity]) -> f32 {
        if entities.is_empty() {
            return 1.0;
        }

        let mean: f32 =
            entities.iter().map(|e| e.confidence).sum::<f32>() / entities.len() as f32;
        let uncorroborated =
            entities.iter().filter(|e| e.is_statistical_only()).count() as f32
                / entities.len() as f32;

        (mean * (1.0 - self.config.uncorroborated_discount * uncorroborated)).clamp(0.0, 1.0)
    }
}

fn distinct_labels(entities: &[&ResolvedEntity]) -> Vec<String> {
    let mut labels: Vec<String> = entities
        .iter()
        .map(|e| e.category.label().to_string())
        .collect();
    labels.sort();
    labels.dedup();
    labels
}

/// Remediation effort band by entity count
fn remediation_time(entity_count: usize) -> String {
    match entity_count {
        0 => "none required".to_string(),
        1..=3 => "5-10 minutes".to_string(),
        4..=10 => "15-30 minutes".to_string(),
        11..=20 => "30-60 minutes".to_string(),
        _ => "1-2 hours".to_string(),
    }
}

/// Default per-entity weights, small for standard categories and large for
/// the specially sensitive tier
fn default_weights() -> HashMap<PiiCategory, u32> {
    use PiiCategory::*;
    [
        (IdNumber, 25),
        (PassportNumber, 12),
        (DriversLicense, 10),
        (Person, 5),
        (Phone, 5),
        (Email, 5),
        (Address, 7),
        (DateOfBirth, 7),
        (Organization, 3),
        (Location, 3),
        (MedicalInfo, 20),
        (GeneticInfo, 25),
        (BiometricId, 25),
        (SexualOrientation, 20),
        (PoliticalOpinion, 20),
        (ReligiousBelief, 20),
        (CriminalRecord, 22),
        (EthnicOrigin, 20),
        (SalaryFinancial, 15),
        (CreditCard, 25),
        (BankAccount, 15),
    ]
    .into_iter()
    .collect()
}
