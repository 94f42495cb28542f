//! Error handling for build configuration and execution
//!
//! This module provides the error types shared by the resolver, the
//! settings layer, and the build pipeline.

use thiserror::Error;

/// Main error type for buildman operations
#[derive(Error, Debug)]
pub enum BuildmanError {
    /// Invalid argument passed to a resolver operation
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        message: String,
        field: Option<String>,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        field: Option<String>,
    },

    /// Build execution errors
    #[error("Build execution error: {message}")]
    Execution {
        message: String,
        target: Option<String>,
    },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors
    #[error("Error: {0}")]
    Generic(#[from] anyhow::Error),
}

impl BuildmanError {
    /// Create a new invalid-argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
            field: None,
        }
    }

    /// Create an invalid-argument error naming the offending field
    pub fn invalid_argument_with_field<S: Into<String>, F: Into<String>>(
        message: S,
        field: F,
    ) -> Self {
        Self::InvalidArgument {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            field: None,
        }
    }

    /// Create a configuration error naming the offending field
    pub fn configuration_with_field<S: Into<String>, F: Into<String>>(message: S, field: F) -> Self {
        Self::Configuration {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new execution error
    pub fn execution<S: Into<String>>(message: S) -> Self {
        Self::Execution {
            message: message.into(),
            target: None,
        }
    }

    /// Create an execution error carrying the build target name
    pub fn execution_for_target<S: Into<String>, T: Into<String>>(message: S, target: T) -> Self {
        Self::Execution {
            message: message.into(),
            target: Some(target.into()),
        }
    }
}

/// Result type for buildman operations
pub type BuildmanResult<T> = Result<T, BuildmanError>;
