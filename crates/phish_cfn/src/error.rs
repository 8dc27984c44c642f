//! Error types for the template model.

use thiserror::Error;

/// Result type alias for template operations.
pub type CfnResult<T> = Result<T, CfnError>;

/// Errors that can occur while assembling a template.
#[derive(Error, Debug)]
pub enum CfnError {
    #[error("Duplicate logical id in {section}: {id}")]
    DuplicateLogicalId { section: &'static str, id: String },

    #[error("Export not produced by the referenced template: {0}")]
    UnknownExport(String),

    #[error("Duplicate export name: {0}")]
    DuplicateExport(String),

    #[error("Unknown template parameter: {0}")]
    UnknownParameter(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
