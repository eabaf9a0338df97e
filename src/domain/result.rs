//! Crate-wide result alias

use super::errors::ShomerError;

/// Result type used throughout Shomer
pub type Result<T> = std::result::Result<T, ShomerError>;
