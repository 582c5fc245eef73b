use std::path::Path;
use thiserror::Error;

/// Main error type for deptviz
#[derive(Error, Debug, Clone)]
pub enum VizError {
    /// Input file exists but could not be read or parsed
    #[error("Dataset unavailable: {path} - {message}")]
    DatasetUnavailable {
        path: String,
        message: String,
    },

    /// Report destination could not be written
    #[error("Output write error: {path} - {message}")]
    OutputWrite {
        path: String,
        message: String,
    },

    /// Chart backend errors
    #[error("Render error: {0}")]
    Render(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl VizError {
    /// Create a dataset error for the given input path
    pub fn dataset_unavailable(path: &Path, message: impl ToString) -> Self {
        VizError::DatasetUnavailable {
            path: path.display().to_string(),
            message: message.to_string(),
        }
    }

    /// Create an output error for the given destination path
    pub fn output_write(path: &Path, message: impl ToString) -> Self {
        VizError::OutputWrite {
            path: path.display().to_string(),
            message: message.to_string(),
        }
    }

    pub fn render(message: impl ToString) -> Self {
        VizError::Render(message.to_string())
    }
}

/// Result type for deptviz operations
pub type VizResult<T> = Result<T, VizError>;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InputParse,
    OutputWrite,
    RenderFailed,
    ConfigInvalid,
    InvalidOperation,
}

impl VizError {
    /// Get the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            VizError::DatasetUnavailable { .. } => ErrorCode::InputParse,
            VizError::OutputWrite { .. } => ErrorCode::OutputWrite,
            VizError::Render(_) => ErrorCode::RenderFailed,
            VizError::Configuration(_) => ErrorCode::ConfigInvalid,
            VizError::InvalidInput(_) => ErrorCode::InvalidOperation,
        }
    }

    /// Process exit status for this error. Every failure is fatal.
    pub fn exit_code(&self) -> u8 {
        1
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            VizError::DatasetUnavailable { path, message } => {
                format!("Dataset Unavailable: could not parse '{}': {}\n\nThe input file exists but is not a valid CSV table. Fix or remove it to fall back to the synthetic dataset.", path, message)
            }
            VizError::OutputWrite { path, message } => {
                format!("Output Write Error: could not write '{}': {}\n\nCheck that the destination directory exists and is writable.", path, message)
            }
            VizError::Configuration(msg) => {
                format!("Configuration Error: {}\n\nCheck deptviz.json or delete it to use the defaults.", msg)
            }
            _ => self.to_string(),
        }
    }
}
