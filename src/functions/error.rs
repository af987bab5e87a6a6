// ABOUTME: Error types for execution functions
// ABOUTME: Reported back to scripts as runtime errors when a registry call fails

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FunctionError {
    #[error("'{name}' is not available")]
    NotAvailable { name: String },

    #[error("Invalid arguments for {name}: {reason}")]
    InvalidArguments { name: String, reason: String },

    #[error("{name} failed: {message}")]
    CallFailed { name: String, message: String },
}

pub type Result<T> = std::result::Result<T, FunctionError>;
