//! Checksum validators for pattern matches
//!
//! Validators are referenced by name from the pattern library. A category
//! that names a validator not present in the registry is a configuration
//! error at load time, never a per-document failure.

use crate::domain::{Result, ShomerError};
use std::collections::HashMap;

/// A validator takes the matched text and decides whether to keep the match
pub type ValidatorFn = fn(&str) -> bool;

/// Registry of named checksum validators
pub struct ValidatorRegistry {
    validators: HashMap<&'static str, ValidatorFn>,
}

impl ValidatorRegistry {
    /// Registry with the built-in validators
    pub fn builtin() -> Self {
        let mut validators: HashMap<&'static str, ValidatorFn> = HashMap::new();
        validators.insert("luhn", card_number_valid);
        validators.insert("israeli_id", israeli_id_valid);
        Self { validators }
    }

    /// Resolve a validator by name, failing with a configuration error
    /// when the name is not registered
    pub fn resolve(&self, name: &str) -> Result<ValidatorFn> {
        self.validators.get(name).copied().ok_or_else(|| {
            ShomerError::Configuration(format!("unregistered validator: {name}"))
        })
    }
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Luhn checksum over a digit sequence
///
/// Doubles every second digit from the right, subtracting 9 where the
/// doubled value exceeds 9; valid iff the total is divisible by 10.
pub fn luhn_checksum(digits: &[u32]) -> bool {
    let mut checksum = 0;
    for (i, &digit) in digits.iter().rev().enumerate() {
        let mut value = digit;
        if i % 2 == 1 {
            value *= 2;
            if value > 9 {
                value -= 9;
            }
        }
        checksum += value;
    }
    checksum % 10 == 0
}

/// Payment card validation: 13-19 digits (separators ignored), a plausible
/// issuer prefix (major networks start with 2-6), and a passing Luhn
/// checksum. The prefix check rejects digit-soup like `1111222233334444`
/// that happens to Luhn-sum to zero.
pub fn card_number_valid(text: &str) -> bool {
    let digits: Vec<u32> = text.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() < 13 || digits.len() > 19 {
        return false;
    }
    if !(2..=6).contains(&digits[0]) {
        return false;
    }
    luhn_checksum(&digits)
}

/// Israeli ID check digit: 9 digits, weights alternate 1 and 2 from the
/// left, two-digit products reduce to their digit sum, total mod 10 == 0
pub fn israeli_id_valid(text: &str) -> bool {
    if text.len() != 9 || text.chars().any(|c| !c.is_ascii_digit()) {
        return false;
    }

    let total: u32 = text
        .chars()
        .filter_map(|c| c.to_digit(10))
        .enumerate()
        .map(|(i, d)| {
            let product = d * if i % 2 == 0 { 1 } else { 2 };
            if product > 9 {
                product / 10 + product % 10
            } else {
                product
            }
        })
        .sum();
    total % 10 == 0
}
