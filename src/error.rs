//! Error handling for the resume scorer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeScorerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document extraction error: {0}")]
    DocumentExtraction(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Vectorization error: {0}")]
    Vectorization(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, ResumeScorerError>;
