//! Anonymization rewriter
//!
//! Rewrites resolved entity spans in the original text according to one of
//! four strategies. The rewrite is a pure function of the text, the entity
//! set, and static configuration; bytes outside spans are carried over
//! untouched and the applied-span list mirrors the entity list one to one.

use crate::domain::{AnonymizationMode, AnonymizedDocument, AppliedSpan, PiiCategory, ResolvedEntity};
use sha2::{Digest, Sha256};

/// Hex characters kept from a span hash token
const HASH_TOKEN_LEN: usize = 16;

/// Configured anonymization rewriter
pub struct AnonymizationRewriter {
    mode: AnonymizationMode,
    mask_symbol: char,
    hash_salt: String,
}

impl AnonymizationRewriter {
    pub fn new(mode: AnonymizationMode, mask_symbol: char, hash_salt: impl Into<String>) -> Self {
        Self {
            mode,
            mask_symbol,
            hash_salt: hash_salt.into(),
        }
    }

    pub fn mode(&self) -> AnonymizationMode {
        self.mode
    }

    /// Anonymize one document
    ///
    /// `entities` must be non-overlapping and sorted ascending by `start`,
    /// which the merger guarantees. The output buffer is rebuilt in a single
    /// ascending pass so earlier rewrites never invalidate later offsets.
    pub fn anonymize(&self, text: &str, entities: &[ResolvedEntity]) -> AnonymizedDocument {
        let mut transformed = String::with_capacity(text.len());
        let mut applied = Vec::with_capacity(entities.len());
        let mut cursor = 0;

        for entity in entities {
            transformed.push_str(&text[cursor..entity.start]);

            let original = &text[entity.start..entity.end];
            let replacement = self.replacement_for(original, entity.category);
            transformed.push_str(&replacement);

            applied.push(AppliedSpan {
                start: entity.start,
                end: entity.end,
                category: entity.category,
                replacement,
                mode: self.mode,
            });
            cursor = entity.end;
        }
        transformed.push_str(&text[cursor..]);

        AnonymizedDocument {
            original_length: text.len(),
            transformed_text: transformed,
            applied_spans: applied,
        }
    }

    fn replacement_for(&self, original: &str, category: PiiCategory) -> String {
        match self.mode {
            AnonymizationMode::Redact => format!("[REDACTED:{}]", category.label()),
            AnonymizationMode::Mask => self.mask(original, category),
            AnonymizationMode::Replace => placeholder(category).to_string(),
            AnonymizationMode::Hash => self.hash_token(original, category),
        }
    }

    /// Length-preserving mask keeping a category-specific reveal suffix
    fn mask(&self, original: &str, category: PiiCategory) -> String {
        let chars: Vec<char> = original.chars().collect();
        let reveal = reveal_suffix(category).min(chars.len());
        let masked_len = chars.len() - reveal;

        let mut out = String::with_capacity(original.len());
        for _ in 0..masked_len {
            out.push(self.mask_symbol);
        }
        out.extend(&chars[masked_len..]);
        out
    }

    /// One-way content-derived token, stable for a given salt
    fn hash_token(&self, original: &str, category: PiiCategory) -> String {
        let mut hasher = Sha256::new();
        hasher.update(category.label().as_bytes());
        hasher.update(b"|");
        hasher.update(original.as_bytes());
        hasher.update(b"|");
        hasher.update(self.hash_salt.as_bytes());
        let digest = hasher.finalize();

        let hex: String = digest
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect::<String>();
        format!("{}_{}", category.label(), &hex[..HASH_TOKEN_LEN])
    }
}

/// Trailing characters left visible under MASK
fn reveal_suffix(category: PiiCategory) -> usize {
    match category {
        PiiCategory::Phone => 2,
        PiiCategory::CreditCard => 4,
        _ => 0,
    }
}

/// Fixed per-category placeholder for REPLACE, independent of matched text
fn placeholder(category: PiiCategory) -> &'static str {
    match category {
        PiiCategory::IdNumber => "000000000",
        PiiCategory::PassportNumber => "P0000000",
        PiiCategory::DriversLicense => "0000000",
        PiiCategory::Person => "PLONI ALMONI",
        PiiCategory::Phone => "050-0000000",
        PiiCategory::Email => "user@example.invalid",
        PiiCategory::Address => "1 Example Street",
        PiiCategory::DateOfBirth => "01/01/1900",
        PiiCategory::Organization => "ACME LTD",
        PiiCategory::Location => "SOMEWHERE",
        PiiCategory::MedicalInfo => "[MEDICAL]",
        PiiCategory::GeneticInfo => "[GENETIC]",
        PiiCategory::BiometricId => "[BIOMETRIC]",
        PiiCategory::SexualOrientation => "[PRIVATE]",
        PiiCategory::PoliticalOpinion => "[POLITICAL]",
        PiiCategory::ReligiousBelief => "[RELIGIOUS]",
        PiiCategory::CriminalRecord => "[RECORD]",
        PiiCategory::EthnicOrigin => "[ORIGIN]",
        PiiCategory::SalaryFinancial => "[FINANCIAL]",
        PiiCategory::CreditCard => "0000-0000-0000-0000",
        PiiCategory::BankAccount => "00-000-00",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DetectionSource, RawSpan, SensitivityTier};

    fn entity(start: usize, end: usize, category: PiiCategory, text: &str) -> ResolvedEntity {
        ResolvedEntity {
            start,
            end,
            category,
            confidence: 0.9,
            tier: SensitivityTier::Standard,
            evidence: vec![RawSpan {
                start,
                end,
                category,
                matched_text: text.to_string(),
                source: DetectionSource::Pattern,
                confidence: 0.9,
                validator_passed: None,
            }],
        }
    }

    fn rewriter(mode: AnonymizationMode) -> AnonymizationRewriter {
        AnonymizationRewriter::new(mode, '*', "test-salt")
    }

    #[test]
    fn test_redact_inserts_category_tag() {
        let text = "call 052-1234567 now";
        let entities = vec![entity(5, 16, PiiCategory::Phone, "052-1234567")];
        let doc = rewriter(AnonymizationMode::Redact).anonymize(text, &entities);
        assert_eq!(doc.transformed_text, "call [REDACTED:PHONE] now");
        assert_eq!(doc.original_length, text.len());
    }

    #[test]
    fn test_text_outside_spans_is_byte_identical() {
        let text = "before 052-1234567 middle dana@example.com after";
        let entities = vec![
            entity(7, 18, PiiCategory::Phone, "052-1234567"),
            entity(26, 42, PiiCategory::Email, "dana@example.com"),
        ];
        let doc = rewriter(AnonymizationMode::Redact).anonymize(text, &entities);
        assert!(doc.transformed_text.starts_with("before "));
        assert!(doc.transformed_text.contains(" middle "));
        assert!(doc.transformed_text.ends_with(" after"));
    }

    #[test]
    fn test_mask_preserves_length_and_reveal_suffix() {
        let text = "052-1234567";
        let entities = vec![entity(0, 11, PiiCategory::Phone, text)];
        let doc = rewriter(AnonymizationMode::Mask).anonymize(text, &entities);
        assert_eq!(doc.transformed_text.chars().count(), 11);
        assert!(doc.transformed_text.ends_with("67"));
        assert!(doc.transformed_text.starts_with("*********"));
    }

    #[test]
    fn test_mask_id_reveals_nothing() {
        let text = "123456782";
        let entities = vec![entity(0, 9, PiiCategory::IdNumber, text)];
        let doc = rewriter(AnonymizationMode::Mask).anonymize(text, &entities);
        assert_eq!(doc.transformed_text, "*********");
    }

    #[test]
    fn test_replace_is_text_independent() {
        let a = rewriter(AnonymizationMode::Replace)
            .anonymize("123456782", &[entity(0, 9, PiiCategory::IdNumber, "123456782")]);
        let b = rewriter(AnonymizationMode::Replace)
            .anonymize("328764538", &[entity(0, 9, PiiCategory::IdNumber, "328764538")]);
        assert_eq!(a.transformed_text, b.transformed_text);
    }

    #[test]
    fn test_hash_is_deterministic_and_content_derived() {
        let rw = rewriter(AnonymizationMode::Hash);
        let first = rw.anonymize("123456782", &[entity(0, 9, PiiCategory::IdNumber, "123456782")]);
        let again = rw.anonymize("123456782", &[entity(0, 9, PiiCategory::IdNumber, "123456782")]);
        let other = rw.anonymize("328764538", &[entity(0, 9, PiiCategory::IdNumber, "328764538")]);

        assert_eq!(first.transformed_text, again.transformed_text);
        assert_ne!(first.transformed_text, other.transformed_text);
        assert!(first.transformed_text.starts_with("ID_NUMBER_"));
        assert!(!first.transformed_text.contains("123456782"));
    }

    #[test]
    fn test_hash_differs_across_salts() {
        let entities = vec![entity(0, 9, PiiCategory::IdNumber, "123456782")];
        let a = AnonymizationRewriter::new(AnonymizationMode::Hash, '*', "salt-a")
            .anonymize("123456782", &entities);
        let b = AnonymizationRewriter::new(AnonymizationMode::Hash, '*', "salt-b")
            .anonymize("123456782", &entities);
        assert_ne!(a.transformed_text, b.transformed_text);
    }

    #[test]
    fn test_applied_spans_mirror_entities() {
        let text = "id 123456782 phone 052-1234567";
        let entities = vec![
            entity(3, 12, PiiCategory::IdNumber, "123456782"),
            entity(19, 30, PiiCategory::Phone, "052-1234567"),
        ];
        let doc = rewriter(AnonymizationMode::Redact).anonymize(text, &entities);
        assert_eq!(doc.applied_spans.len(), 2);
        assert_eq!(doc.applied_spans[0].start, 3);
        assert_eq!(doc.applied_spans[0].category, PiiCategory::IdNumber);
        assert_eq!(doc.applied_spans[1].category, PiiCategory::Phone);
    }

    #[test]
    fn test_no_entities_is_identity() {
        let text = "nothing sensitive here";
        let doc = rewriter(AnonymizationMode::Hash).anonymize(text, &[]);
        assert_eq!(doc.transformed_text, text);
        assert!(doc.applied_spans.is_empty());
    }

    #[test]
    fn test_mask_shorter_than_reveal_suffix() {
        let text = "7";
        let entities = vec![entity(0, 1, PiiCategory::Phone, text)];
        let doc = rewriter(AnonymizationMode::Mask).anonymize(text, &entities);
        assert_eq!(doc.transformed_text, "7");
    }
}
