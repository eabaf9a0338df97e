//! Domain error types
//!
//! Three-way taxonomy: configuration errors are fatal at process start,
//! input errors are reported per document (the batch continues), and a
//! missing or failing statistical recognizer degrades detection instead of
//! failing the pipeline. Errors never expose third-party types.

use thiserror::Error;

/// Main Shomer error type
#[derive(Debug, Error)]
pub enum ShomerError {
    /// Malformed static tables (unregistered validator, missing tier
    /// mapping, malformed thresholds). Detected at load time, aborts startup.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Document text not decodable or usable. The document is skipped,
    /// batch processing continues.
    #[error("Input error: {0}")]
    Input(String),

    /// Statistical recognizer absent or erroring at call time. Non-fatal;
    /// detection degrades to pattern-only with a rationale note.
    #[error("Recognizer capability unavailable: {0}")]
    CapabilityUnavailable(String),

    /// Invariant violation inside the pipeline. Aborts only the affected
    /// document's analysis.
    #[error("Pipeline error: {0}")]
    Pipeline(String),

    /// I/O errors (audit log, report files)
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for ShomerError {
    fn from(err: std::io::Error) -> Self {
        ShomerError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ShomerError {
    fn from(err: serde_json::Error) -> Self {
        ShomerError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for ShomerError {
    fn from(err: toml::de::Error) -> Self {
        ShomerError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<regex::Error> for ShomerError {
    fn from(err: regex::Error) -> Self {
        ShomerError::Configuration(format!("Invalid regex: {err}"))
    }
}
