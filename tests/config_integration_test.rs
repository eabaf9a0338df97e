//! Configuration loading integration tests

use shomer::config::{load_config, ShomerConfig};
use shomer::domain::AnonymizationMode;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn empty_file_yields_defaults() {
    let file = write_config("");
    let config = load_config(file.path()).unwrap();
    assert_eq!(config.application.log_level, "info");
    assert_eq!(config.anonymization.mode, AnonymizationMode::Redact);
    assert_eq!(config.risk.per_category_cap, 30);
    assert!(!config.audit.enabled);
}

#[test]
fn full_config_roundtrip() {
    let file = write_config(
        r##"
[application]
log_level = "debug"

[detection]
pattern_file = "patterns/custom.toml"

[anonymization]
mode = "mask"
mask_symbol = "#"

[risk]
per_category_cap = 40
consent_penalty = 30
always_critical = ["ID_NUMBER", "CREDIT_CARD", "BIOMETRIC_ID"]

[risk.thresholds]
approved = 10
approved_with_conditions = 30
requires_changes = 50
rejected = 80

[audit]
enabled = true
log_path = "audit/shomer.jsonl"

[logging]
local_enabled = true
local_path = "logs"
"##,
    );

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.application.log_level, "debug");
    assert_eq!(
        config.detection.pattern_file.as_deref(),
        Some("patterns/custom.toml")
    );
    assert_eq!(config.anonymization.mode, AnonymizationMode::Mask);
    assert_eq!(config.anonymization.mask_char(), '#');
    assert_eq!(config.risk.per_category_cap, 40);
    assert_eq!(config.risk.always_critical.len(), 3);
    assert_eq!(config.risk.thresholds.rejected, 80);
    assert!(config.audit.enabled);
    assert!(config.logging.local_enabled);
}

#[test]
fn partial_risk_section_keeps_default_weights() {
    let file = write_config(
        r#"
[risk]
consent_penalty = 50
"#,
    );

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.risk.consent_penalty, 50);
    // Missing fields fall back to defaults, including the full weight table
    assert_eq!(
        config.risk.weights.len(),
        shomer::domain::PiiCategory::ALL.len()
    );
}

#[test]
fn env_substitution_fills_placeholders() {
    std::env::set_var("SHOMER_IT_SALT", "from-env");
    let file = write_config(
        r#"
[anonymization]
mode = "hash"
hash_salt = "${SHOMER_IT_SALT}"
"#,
    );

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.anonymization.hash_salt, "from-env");
    std::env::remove_var("SHOMER_IT_SALT");
}

#[test]
fn invalid_threshold_order_is_rejected() {
    let file = write_config(
        r#"
[risk.thresholds]
approved = 50
approved_with_conditions = 40
requires_changes = 65
rejected = 85
"#,
    );

    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("Configuration"));
}

#[test]
fn hash_mode_without_salt_is_rejected() {
    let file = write_config(
        r#"
[anonymization]
mode = "hash"
"#,
    );
    assert!(load_config(file.path()).is_err());
}

#[test]
fn missing_file_is_a_configuration_error() {
    let err = load_config("does-not-exist.toml").unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[test]
fn defaults_validate() {
    assert!(ShomerConfig::default().validate().is_ok());
}
