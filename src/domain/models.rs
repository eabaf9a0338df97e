//! Core data model for the detection pipeline
//!
//! Types flow strictly left to right through the pipeline: raw spans from the
//! detectors, resolved entities from the merger, a risk assessment from the
//! decision engine, and an anonymized document from the rewriter. Nothing here
//! outlives a single document's run.

use serde::{Deserialize, Serialize};
use std::fmt;

/// PII category per the Israeli Privacy Protection Law (Amendment No. 13), 2024
///
/// Standard personal information plus the specially sensitive categories of
/// Section 7(c) (heightened protection).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PiiCategory {
    // Standard personal information
    /// Israeli ID number (9 digits, check digit validated)
    IdNumber,
    /// Passport number
    PassportNumber,
    /// Driver's license number
    DriversLicense,
    /// Person name
    Person,
    /// Telephone number
    Phone,
    /// Email address
    Email,
    /// Residential address
    Address,
    /// Date of birth
    DateOfBirth,
    /// Organization name
    Organization,
    /// Geographic location
    Location,

    // Specially sensitive information (Section 7(c), Amendment 13)
    /// Medical information, health conditions, treatments
    MedicalInfo,
    /// Genetic information and DNA data
    GeneticInfo,
    /// Biometric identifiers (fingerprints, face recognition)
    BiometricId,
    /// Sexual orientation
    SexualOrientation,
    /// Political opinions and affiliations
    PoliticalOpinion,
    /// Religious beliefs and practices
    ReligiousBelief,
    /// Criminal history and records
    CriminalRecord,
    /// Ethnic or racial origin
    EthnicOrigin,
    /// Salary and financial activity data
    SalaryFinancial,
    /// Credit card number
    CreditCard,
    /// Bank account number
    BankAccount,
}

impl PiiCategory {
    /// All categories, in declaration order
    ///
    /// The sensitivity classifier verifies total coverage against this slice
    /// at startup, so a category added here without a tier entry fails fast.
    pub const ALL: &'static [PiiCategory] = &[
        Self::IdNumber,
        Self::PassportNumber,
        Self::DriversLicense,
        Self::Person,
        Self::Phone,
        Self::Email,
        Self::Address,
        Self::DateOfBirth,
        Self::Organization,
        Self::Location,
        Self::MedicalInfo,
        Self::GeneticInfo,
        Self::BiometricId,
        Self::SexualOrientation,
        Self::PoliticalOpinion,
        Self::ReligiousBelief,
        Self::CriminalRecord,
        Self::EthnicOrigin,
        Self::SalaryFinancial,
        Self::CreditCard,
        Self::BankAccount,
    ];

    /// Stable label used in pattern tables, reports, and anonymization tags
    pub fn label(&self) -> &'static str {
        match self {
            Self::IdNumber => "ID_NUMBER",
            Self::PassportNumber => "PASSPORT_NUMBER",
            Self::DriversLicense => "DRIVERS_LICENSE",
            Self::Person => "PERSON",
            Self::Phone => "PHONE",
            Self::Email => "EMAIL",
            Self::Address => "ADDRESS",
            Self::DateOfBirth => "DATE_OF_BIRTH",
            Self::Organization => "ORGANIZATION",
            Self::Location => "LOCATION",
            Self::MedicalInfo => "MEDICAL_INFO",
            Self::GeneticInfo => "GENETIC_INFO",
            Self::BiometricId => "BIOMETRIC_ID",
            Self::SexualOrientation => "SEXUAL_ORIENTATION",
            Self::PoliticalOpinion => "POLITICAL_OPINION",
            Self::ReligiousBelief => "RELIGIOUS_BELIEF",
            Self::CriminalRecord => "CRIMINAL_RECORD",
            Self::EthnicOrigin => "ETHNIC_ORIGIN",
            Self::SalaryFinancial => "SALARY_FINANCIAL",
            Self::CreditCard => "CREDIT_CARD",
            Self::BankAccount => "BANK_ACCOUNT",
        }
    }

    /// Parse a category label as it appears in pattern tables and config
    pub fn parse(s: &str) -> Option<PiiCategory> {
        match s.to_uppercase().as_str() {
            "ID_NUMBER" | "ISRAELI_ID" => Some(Self::IdNumber),
            "PASSPORT_NUMBER" | "PASSPORT" => Some(Self::PassportNumber),
            "DRIVERS_LICENSE" | "LICENSE" => Some(Self::DriversLicense),
            "PERSON" | "NAME" => Some(Self::Person),
            "PHONE" | "PHONE_NUMBER" => Some(Self::Phone),
            "EMAIL" => Some(Self::Email),
            "ADDRESS" => Some(Self::Address),
            "DATE_OF_BIRTH" | "DOB" => Some(Self::DateOfBirth),
            "ORGANIZATION" | "ORG" => Some(Self::Organization),
            "LOCATION" => Some(Self::Location),
            "MEDICAL_INFO" | "MEDICAL" => Some(Self::MedicalInfo),
            "GENETIC_INFO" | "GENETIC" => Some(Self::GeneticInfo),
            "BIOMETRIC_ID" | "BIOMETRIC" => Some(Self::BiometricId),
            "SEXUAL_ORIENTATION" => Some(Self::SexualOrientation),
            "POLITICAL_OPINION" | "POLITICAL" => Some(Self::PoliticalOpinion),
            "RELIGIOUS_BELIEF" | "RELIGIOUS" => Some(Self::ReligiousBelief),
            "CRIMINAL_RECORD" | "CRIMINAL" => Some(Self::CriminalRecord),
            "ETHNIC_ORIGIN" | "ETHNICITY" => Some(Self::EthnicOrigin),
            "SALARY_FINANCIAL" | "FINANCIAL" => Some(Self::SalaryFinancial),
            "CREDIT_CARD" => Some(Self::CreditCard),
            "BANK_ACCOUNT" => Some(Self::BankAccount),
            _ => None,
        }
    }
}

impl fmt::Display for PiiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Legal sensitivity tier of a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensitivityTier {
    /// Standard personal information
    Standard,
    /// Specially sensitive information under Section 7(c), Amendment 13
    Special,
}

/// Which detector produced a raw span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionSource {
    /// Regex pattern library (with optional checksum validator)
    Pattern,
    /// Statistical named-entity recognizer
    Statistical,
}

/// Raw detection span over the document text, half-open `[start, end)`
///
/// Offsets are byte indices into the original buffer; `matched_text` always
/// equals `text[start..end]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSpan {
    pub start: usize,
    pub end: usize,
    pub category: PiiCategory,
    pub matched_text: String,
    pub source: DetectionSource,
    /// Detector confidence in [0.0, 1.0]
    pub confidence: f32,
    /// `Some(true)` when a checksum validator accepted the match,
    /// `None` when the category declares no validator
    pub validator_passed: Option<bool>,
}

impl RawSpan {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// True when a checksum validator corroborated this span
    pub fn is_validated(&self) -> bool {
        self.validator_passed == Some(true)
    }

    pub fn overlaps(&self, other: &RawSpan) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A merged, conflict-resolved entity
///
/// Over one document all resolved entities are pairwise non-overlapping and
/// sorted ascending by `start`. Every raw span either backs exactly one
/// entity's `evidence` or was discarded during the merge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedEntity {
    pub start: usize,
    pub end: usize,
    pub category: PiiCategory,
    /// Combined confidence after cross-detector agreement boosts
    pub confidence: f32,
    pub tier: SensitivityTier,
    /// Raw spans consumed by this entity, winner first
    pub evidence: Vec<RawSpan>,
}

impl ResolvedEntity {
    /// The winning span's matched text
    pub fn matched_text(&self) -> &str {
        &self.evidence[0].matched_text
    }

    /// True when any backing span passed a checksum validator
    pub fn is_validated(&self) -> bool {
        self.evidence.iter().any(RawSpan::is_validated)
    }

    /// True when the entity rests solely on the statistical recognizer,
    /// with no pattern or validator corroboration
    pub fn is_statistical_only(&self) -> bool {
        self.evidence
            .iter()
            .all(|s| s.source == DetectionSource::Statistical)
    }
}

/// Compliance decision, ordered from best to worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    /// Document is clean enough to use as-is
    Approved,
    /// Usable after minor fixes
    ApprovedWithConditions,
    /// Must be fixed before use
    RequiresChanges,
    /// Not acceptable in its current state
    Rejected,
    /// Severe privacy violation, must not be used or shared
    CriticalViolation,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Approved => "APPROVED",
            Self::ApprovedWithConditions => "APPROVED_WITH_CONDITIONS",
            Self::RequiresChanges => "REQUIRES_CHANGES",
            Self::Rejected => "REJECTED",
            Self::CriticalViolation => "CRITICAL_VIOLATION",
        };
        f.write_str(s)
    }
}

/// One statutory violation derived during assessment
///
/// Findings exist only inside a [`RiskAssessment`]; they are never persisted
/// on their own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceFinding {
    /// Statutory reference, e.g. "Section 7(c), Privacy Protection Law (Amendment 13)"
    pub section_ref: String,
    pub violated: bool,
    pub description: String,
    pub recommendation: String,
}

/// One ordered entry of the assessment rationale trace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RationaleEntry {
    /// Which category or rule contributed
    pub rule: String,
    /// Score points contributed (zero for informational notes)
    pub points: u32,
}

/// Deterministic risk assessment for one document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Aggregate risk score in [0, 100]
    pub score: u8,
    pub decision: Decision,
    /// Ordered trace of score contributions, for reproducible explanation
    pub rationale: Vec<RationaleEntry>,
    /// Confidence in the decision, in [0.0, 1.0]
    pub confidence: f32,
    pub findings: Vec<ComplianceFinding>,
    pub required_actions: Vec<String>,
    pub estimated_remediation_time: String,
}

/// Anonymization transformation strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnonymizationMode {
    /// Replace span with `[REDACTED:CATEGORY]`
    Redact,
    /// Preserve length, keep a category-specific suffix, mask the rest
    Mask,
    /// Deterministic category-typed placeholder, independent of matched text
    Replace,
    /// One-way content-derived token, stable within one configuration
    Hash,
}

impl fmt::Display for AnonymizationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Redact => "redact",
            Self::Mask => "mask",
            Self::Replace => "replace",
            Self::Hash => "hash",
        };
        f.write_str(s)
    }
}

/// One applied rewrite, mirroring a resolved entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppliedSpan {
    /// Span in the original buffer
    pub start: usize,
    pub end: usize,
    pub category: PiiCategory,
    pub replacement: String,
    pub mode: AnonymizationMode,
}

/// Position-exact anonymized rewrite of a document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnonymizedDocument {
    /// Byte length of the original text
    pub original_length: usize,
    pub transformed_text: String,
    /// Count and order mirror the resolved-entity set
    pub applied_spans: Vec<AppliedSpan>,
}
