//! Error types for the gradebook crate.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GradebookError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Member not found: {0}")]
    MemberNotFound(u32),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GradebookError>;
