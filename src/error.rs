//! Error types for the garden contract crate

use thiserror::Error;

use crate::validate::ValidationReport;

/// Result type for contract operations
pub type Result<T> = std::result::Result<T, GardenError>;

/// Garden contract errors
#[derive(Error, Debug)]
pub enum GardenError {
    #[error("Unknown contract: {0}")]
    UnknownContract(String),

    #[error("Invalid contract document {name}: {reason}")]
    InvalidContract { name: String, reason: String },

    #[error("{source_name}: {} contract violation(s)", .report.violations.len())]
    Invalid {
        /// What was being validated (a file path or "<inline>")
        source_name: String,
        /// Every violation found, not just the first
        report: ValidationReport,
    },

    #[error("Crop not found: {0}")]
    CropNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GardenError {
    /// Build a validation failure for a named source
    pub fn invalid(source_name: impl Into<String>, report: ValidationReport) -> Self {
        Self::Invalid {
            source_name: source_name.into(),
            report,
        }
    }
}
