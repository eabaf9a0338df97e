//! PII detection
//!
//! Two independent detectors feed the merger: a deterministic regex pattern
//! library with checksum validators, and an optional statistical recognizer
//! behind a capability adapter.

pub mod patterns;
pub mod recognizer;
pub mod validators;

pub use patterns::PatternRegistry;
pub use recognizer::{NamedEntityRecognizer, NerSpan, RecognizerCapability};
pub use validators::ValidatorRegistry;
