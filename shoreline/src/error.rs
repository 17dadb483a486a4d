//! Error types used by the crate.

use shoreline_types::ShorelineTypesError;
use std::path::PathBuf;
use thiserror::Error;

/// Shoreline error type.
#[derive(Debug, Error)]
pub enum ShorelineError {
    /// Invalid construction parameter, e.g. an unrecognized resolution name.
    #[error("invalid configuration: {0}")]
    Configuration(String),
    /// A required per-level boundary data source does not exist.
    #[error("boundary data source not found: {0}")]
    SourceNotFound(PathBuf),
    /// The boundary data contains a record that cannot be interpreted.
    #[error("corrupted boundary data: {0}")]
    DataCorruption(String),
    /// Batch input arrays are malformed.
    #[error("invalid input: {0}")]
    InputValidation(String),
    /// A numeric computation failed to produce a result.
    #[error("computation failed: {0}")]
    Computation(String),
}

impl From<ShorelineTypesError> for ShorelineError {
    fn from(value: ShorelineTypesError) -> Self {
        Self::DataCorruption(value.to_string())
    }
}
