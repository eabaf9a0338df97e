//! Configuration management
//!
//! TOML-based configuration with environment variable substitution
//! (`${VAR_NAME}`), `SHOMER_*` environment overrides, defaults for every
//! section, and validation on load.
//!
//! # Example configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [anonymization]
//! mode = "hash"
//! hash_salt = "${SHOMER_ANONYMIZATION_HASH_SALT}"
//!
//! [audit]
//! enabled = true
//! log_path = "logs/audit.jsonl"
//! ```

pub mod loader;
pub mod schema;

pub use loader::{default_config, load_config};
pub use schema::{
    AnonymizationConfig, ApplicationConfig, AuditConfig, DetectionConfig, LoggingConfig,
    ShomerConfig,
};
