//! Core domain types and models

pub mod errors;
pub mod models;
pub mod result;

pub use errors::ShomerError;
pub use models::{
    AnonymizationMode, AnonymizedDocument, AppliedSpan, ComplianceFinding, Decision,
    DetectionSource, PiiCategory, RationaleEntry, RawSpan, ResolvedEntity, RiskAssessment,
    SensitivityTier,
};
pub use result::Result;
