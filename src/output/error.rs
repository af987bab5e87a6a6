// ABOUTME: Error types for output handling operations
// ABOUTME: Covers serialization of rendered trees and writing them to their destination

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("YAML serialization error: {0}")]
    YamlSerializationError(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, OutputError>;
