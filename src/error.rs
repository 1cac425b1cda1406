use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the fault prediction service
#[derive(Error, Debug)]
pub enum FaultError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    // Model artifact errors
    #[error("Model file '{}' not found. Ensure the artifact exists at the configured path.", path.display())]
    ModelNotFound { path: PathBuf },

    #[error("Invalid model artifact: {0}")]
    InvalidModel(String),

    // Inference errors
    #[error("Found unknown category '{value}' for feature '{feature}'")]
    UnknownCategory { feature: String, value: String },

    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("Could not convert label to float: {0}")]
    LabelCoercion(String),

    #[error("Inference error: {0}")]
    Inference(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for FaultError
pub type Result<T> = std::result::Result<T, FaultError>;
