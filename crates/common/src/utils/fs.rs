//! Backing-file checks
//!
//! Stores only bind to files that already exist; these helpers fail fast otherwise.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileCheckError {
    #[error("path does not exist: {}", .0.display())]
    NotPath(PathBuf),
    #[error("path is not a regular file: {}", .0.display())]
    NotFile(PathBuf),
}

/// Ensure `path` exists and is a regular file.
pub fn check_file(path: impl AsRef<Path>) -> Result<(), FileCheckError> {
    let path = path.as_ref();
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => Ok(()),
        Ok(_) => Err(FileCheckError::NotFile(path.to_path_buf())),
        Err(_) => Err(FileCheckError::NotPath(path.to_path_buf())),
    }
}
