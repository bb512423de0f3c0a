//! Error types for HBA

use thiserror::Error;

/// Result type alias for HBA operations
pub type Result<T> = std::result::Result<T, HbaError>;

/// Main error type for HBA
#[derive(Error, Debug)]
pub enum HbaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Logging error: {0}")]
    Logging(String),
}

impl HbaError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}
