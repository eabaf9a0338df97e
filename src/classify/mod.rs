//! Sensitivity classifier
//!
//! Static lookup from category to legal sensitivity tier and statutory
//! references under the Privacy Protection Law (Amendment 13). Coverage is
//! total: a category without a tier entry is a fatal configuration error at
//! startup, never a per-document failure.

use crate::domain::{PiiCategory, Result, SensitivityTier, ShomerError};
use std::collections::HashMap;

/// Tier entry for one category
#[derive(Debug, Clone)]
pub struct TierEntry {
    pub tier: SensitivityTier,
    /// Statutory references cited in compliance findings
    pub section_refs: Vec<String>,
}

/// Static category → tier classifier
#[derive(Debug)]
pub struct SensitivityClassifier {
    tiers: HashMap<PiiCategory, TierEntry>,
}

impl SensitivityClassifier {
    /// Build the classifier from the built-in Amendment 13 table,
    /// verifying total coverage of the category enum.
    pub fn new() -> Result<Self> {
        Self::from_entries(default_tier_table())
    }

    /// Build from an explicit table, verifying total coverage
    pub fn from_entries(entries: Vec<(PiiCategory, TierEntry)>) -> Result<Self> {
        let tiers: HashMap<PiiCategory, TierEntry> = entries.into_iter().collect();

        for category in PiiCategory::ALL {
            if !tiers.contains_key(category) {
                return Err(ShomerError::Configuration(format!(
                    "no sensitivity tier mapped for category {category}"
                )));
            }
        }

        Ok(Self { tiers })
    }

    /// Classify a category into its tier and statutory references
    ///
    /// Total coverage is enforced at construction, so lookup cannot miss.
    pub fn classify(&self, category: PiiCategory) -> (SensitivityTier, &[String]) {
        let entry = &self.tiers[&category];
        (entry.tier, &entry.section_refs)
    }

    pub fn tier(&self, category: PiiCategory) -> SensitivityTier {
        self.tiers[&category].tier
    }

    /// All categories in the SPECIAL tier
    pub fn special_categories(&self) -> Vec<PiiCategory> {
        PiiCategory::ALL
            .iter()
            .copied()
            .filter(|c| self.tier(*c) == SensitivityTier::Special)
            .collect()
    }
}

/// Built-in tier table per the Privacy Protection Law (Amendment 13), 2024
fn default_tier_table() -> Vec<(PiiCategory, TierEntry)> {
    use PiiCategory::*;
    use SensitivityTier::{Special, Standard};

    let standard = |refs: &[&str]| TierEntry {
        tier: Standard,
        section_refs: refs.iter().map(|s| s.to_string()).collect(),
    };
    let special = |refs: &[&str]| TierEntry {
        tier: Special,
        section_refs: refs.iter().map(|s| s.to_string()).collect(),
    };

    vec![
        (IdNumber, standard(&["Section 7, Privacy Protection Law (Amendment 13)"])),
        (PassportNumber, standard(&["Section 7, Privacy Protection Law (Amendment 13)"])),
        (DriversLicense, standard(&["Section 7, Privacy Protection Law (Amendment 13)"])),
        (Person, standard(&["Section 2, Privacy Protection Law"])),
        (Phone, standard(&["Section 2, Privacy Protection Law"])),
        (Email, standard(&["Section 2, Privacy Protection Law"])),
        (Address, standard(&["Section 2, Privacy Protection Law"])),
        (DateOfBirth, standard(&["Section 2, Privacy Protection Law"])),
        (Organization, standard(&["Section 2, Privacy Protection Law"])),
        (Location, standard(&["Section 2, Privacy Protection Law"])),
        (MedicalInfo, special(&["Section 7(c)(2), Privacy Protection Law (Amendment 13)"])),
        (GeneticInfo, special(&["Section 7(c)(3), Privacy Protection Law (Amendment 13)"])),
        (BiometricId, special(&["Section 7(c)(4), Privacy Protection Law (Amendment 13)"])),
        (SexualOrientation, special(&["Section 7(c)(5), Privacy Protection Law (Amendment 13)"])),
        (PoliticalOpinion, special(&["Section 7(c)(6), Privacy Protection Law (Amendment 13)"])),
        (ReligiousBelief, special(&["Section 7(c)(6), Privacy Protection Law (Amendment 13)"])),
        (CriminalRecord, special(&["Section 7(c)(7), Privacy Protection Law (Amendment 13)"])),
        (EthnicOrigin, special(&["Section 7(c), Privacy Protection Law (Amendment 13)"])),
        (SalaryFinancial, special(&["Section 7(c)(1), Privacy Protection Law (Amendment 13)"])),
        (CreditCard, special(&["Section 7(c)(1), Privacy Protection Law (Amendment 13)"])),
        (BankAccount, special(&["Section 7(c)(1), Privacy Protection Law (Amendment 13)"])),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_covers_all_categories() {
        let classifier = SensitivityClassifier::new().unwrap();
        for category in PiiCategory::ALL {
            // Coverage verified at construction; classify must not panic.
            let (_, refs) = classifier.classify(*category);
            assert!(!refs.is_empty());
        }
    }

    #[test]
    fn test_standard_and_special_assignments() {
        let classifier = SensitivityClassifier::new().unwrap();
        assert_eq!(classifier.tier(PiiCategory::Phone), SensitivityTier::Standard);
        assert_eq!(classifier.tier(PiiCategory::IdNumber), SensitivityTier::Standard);
        assert_eq!(
            classifier.tier(PiiCategory::MedicalInfo),
            SensitivityTier::Special
        );
        assert_eq!(
            classifier.tier(PiiCategory::CreditCard),
            SensitivityTier::Special
        );
    }

    #[test]
    fn test_missing_entry_is_config_error() {
        let mut entries = default_tier_table();
        entries.retain(|(c, _)| *c != PiiCategory::Phone);
        let err = SensitivityClassifier::from_entries(entries).unwrap_err();
        assert!(matches!(err, ShomerError::Configuration(_)));
        assert!(err.to_string().contains("PHONE"));
    }

    #[test]
    fn test_special_categories_listing() {
        let classifier = SensitivityClassifier::new().unwrap();
        let special = classifier.special_categories();
        assert!(special.contains(&PiiCategory::CreditCard));
        assert!(!special.contains(&PiiCategory::Email));
    }
}
