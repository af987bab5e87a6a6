// ABOUTME: Error types for host fact collection
// ABOUTME: Raised when the local system cannot be described

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FactsError {
    #[error("Failed to get hostname: {0}")]
    Hostname(std::io::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FactsError>;
