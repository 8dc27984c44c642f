//! Error types for stack generation.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for stack operations.
pub type StackResult<T> = Result<T, StackError>;

/// Errors that can occur while generating stacks.
#[derive(Error, Debug)]
pub enum StackError {
    #[error("At least one domain is required")]
    NoDomains,

    #[error("Domain list has {stack} entries but hosted zones export {zones}")]
    DomainCountMismatch { stack: usize, zones: usize },

    #[error("Domain {index} is {stack} but its hosted zone was exported for {zone}")]
    DomainMismatch {
        index: usize,
        stack: String,
        zone: String,
    },

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(PathBuf),

    #[error(transparent)]
    Template(#[from] phish_cfn::CfnError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}
