// ABOUTME: Error types for rendering state scripts
// ABOUTME: Distinguishes missing templates from failures reported by the script executor

use std::path::PathBuf;
use thiserror::Error;

/// Message used when the executor reports failure without a diagnostic.
pub const DEFAULT_RENDER_ERROR: &str = "Unknown render error in renderer";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Template {} is not a file!", path.display())]
    TemplateNotFound { path: PathBuf },

    #[error("{0}")]
    RenderError(String),
}

impl TemplateError {
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::TemplateNotFound { path: path.into() }
    }

    /// True when the template was rejected before any script code ran.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::TemplateNotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, TemplateError>;
