//! Shared error types for model construction and report output

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for mh2graph operations
#[derive(Debug, Error)]
pub enum Error {
    /// A model parameter is outside its admissible range
    #[error("Invalid parameter {name} = {value}: {message}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        message: String,
    },

    /// Parameters are individually valid but produce an undefined phase rate
    #[error("Domain error: {0}")]
    Domain(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// File system related errors
    #[error("File system error: {message}")]
    FileSystem {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Generic errors with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an invalid parameter error
    pub fn invalid_parameter(name: &'static str, value: f64, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            value,
            message: message.into(),
        }
    }

    /// Create a file system error with path context and the underlying cause
    pub fn file_system(
        message: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystem {
            message: message.into(),
            path: Some(path.into()),
            source: Some(source),
        }
    }

    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            message: self.to_string(),
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}
