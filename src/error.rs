//! Error types for the change set client.
//!
//! Errors fall into two families: local validation failures raised before
//! any remote call is attempted, and remote API failures returned by
//! CloudFormation. Remote failures are carried through untouched so callers
//! see the original message and cause.

use std::path::PathBuf;
use thiserror::Error;

/// Boxed error cause preserved from the remote SDK.
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The main error type for change set operations.
#[derive(Debug, Error)]
pub enum ChangeSetError {
    /// Local validation errors.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Remote CloudFormation API errors.
    #[error("CloudFormation API error: {0}")]
    Remote(#[from] RemoteApiError),

    /// Configuration errors.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors detected locally, before the remote API is contacted.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The template file does not exist.
    #[error("{path} not found")]
    TemplateNotFound {
        /// Path to the missing template.
        path: PathBuf,
    },

    /// The template file exists but could not be read as text.
    #[error("Failed to read template {path}: {source}")]
    TemplateUnreadable {
        /// Path to the template.
        path: PathBuf,
        /// Underlying read error.
        #[source]
        source: std::io::Error,
    },

    /// A required field is missing or empty.
    #[error("Missing required field: {field}")]
    MissingField {
        /// Name of the missing field.
        field: String,
    },
}

/// A failure reported by the remote change set API.
#[derive(Debug, Error)]
pub enum RemoteApiError {
    /// The API call itself failed.
    #[error("{operation} failed: {message}")]
    Call {
        /// Name of the API operation.
        operation: &'static str,
        /// Service error code, when the service provided one.
        code: Option<String>,
        /// Full error message, including the cause chain.
        message: String,
        /// Original error returned by the SDK.
        #[source]
        source: Option<BoxedCause>,
    },

    /// `CreateChangeSet` succeeded but returned no change set id.
    #[error("CreateChangeSet returned no id for change set '{name}'")]
    MissingChangeSetId {
        /// Change set name that was requested.
        name: String,
    },
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable is missing.
    #[error("Missing environment variable: {name}")]
    MissingEnvVar {
        /// Name of the missing variable.
        name: String,
    },

    /// The `.env` file could not be loaded.
    #[error("Failed to load environment file {path}: {message}")]
    EnvFile {
        /// Path to the env file.
        path: PathBuf,
        /// Description of the failure.
        message: String,
    },
}

/// Result type alias for change set operations.
pub type Result<T> = std::result::Result<T, ChangeSetError>;

impl ChangeSetError {
    /// Returns true if the error was raised locally, before any remote call.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Config(_))
    }

    /// Returns true if the error came from the remote API.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }
}

impl ValidationError {
    /// Creates a missing field error.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }
}

impl RemoteApiError {
    /// Creates a call failure without an attached cause.
    #[must_use]
    pub fn call(operation: &'static str, code: Option<&str>, message: impl Into<String>) -> Self {
        Self::Call {
            operation,
            code: code.map(ToString::to_string),
            message: message.into(),
            source: None,
        }
    }

    /// Creates a call failure that keeps the original error as its source.
    #[must_use]
    pub fn with_source(
        operation: &'static str,
        code: Option<&str>,
        message: impl Into<String>,
        source: impl Into<BoxedCause>,
    ) -> Self {
        Self::Call {
            operation,
            code: code.map(ToString::to_string),
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Returns the service error code, if any.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Call { code, .. } => code.as_deref(),
            Self::MissingChangeSetId { .. } => None,
        }
    }
}
