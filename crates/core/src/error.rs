//! Core error types

use thiserror::Error;

/// Core error type for PilotOps
#[derive(Debug, Error)]
pub enum CoreError {
    /// A coordinate string or value could not be turned into a position
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// Configuration could not be parsed or failed validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
