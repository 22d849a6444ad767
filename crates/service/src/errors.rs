use std::path::PathBuf;

use common::utils::fs::FileCheckError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("field {0:?} is reserved and cannot be set as an extra attribute")]
    ReservedField(String),
    #[error("username {0} already exists")]
    UserExists(String),
    #[error("role {0:?} is not allowed")]
    InvalidRole(String),
    #[error("{tier} {value:?} does not exist")]
    InvalidLevel { tier: &'static str, value: String },
    #[error("backing file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("backing file {} is corrupt: {source}", .path.display())]
    Corrupt { path: PathBuf, #[source] source: serde_json::Error },
    #[error("cannot encode records for {}: {source}", .path.display())]
    Encode { path: PathBuf, #[source] source: serde_json::Error },
    #[error("io error on {}: {source}", .path.display())]
    Io { path: PathBuf, #[source] source: std::io::Error },
    #[error(transparent)]
    Path(#[from] FileCheckError),
}

impl StoreError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            StoreError::MissingField(_) => 1001,
            StoreError::ReservedField(_) => 1002,
            StoreError::UserExists(_) => 1003,
            StoreError::InvalidRole(_) => 1004,
            StoreError::InvalidLevel { .. } => 1005,
            StoreError::NotFound(_) => 1101,
            StoreError::Corrupt { .. } => 1102,
            StoreError::Io { .. } => 1103,
            StoreError::Path(_) => 1104,
            StoreError::Encode { .. } => 1105,
        }
    }
}
