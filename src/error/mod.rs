//! Error handling for grasshopper.
//!
//! - [`GrasshopperError`]: the error enum for all fallible operations
//! - [`ErrorCode`]: standardized codes for machine parsing
//! - [`StructuredError`]: serializable error with suggestion and context

mod codes;

use std::io;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::version::VersionParseError;

pub use codes::ErrorCode;

/// Main error type for grasshopper operations.
#[derive(Error, Debug)]
pub enum GrasshopperError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid version: {0}")]
    InvalidVersion(#[from] VersionParseError),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Release metadata error: {0}")]
    ReleaseMetadata(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

impl GrasshopperError {
    /// Get the error code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::SerializationError,
            Self::Config(_) => ErrorCode::ConfigInvalid,
            Self::InvalidVersion(_) => ErrorCode::VersionInvalid,
            Self::Network(_) => ErrorCode::NetworkUnreachable,
            Self::ReleaseMetadata(_) => ErrorCode::ReleaseMetadataInvalid,
            Self::ValidationFailed(_) => ErrorCode::ValidationFailed,
        }
    }

    /// Get context information for this error as JSON.
    #[must_use]
    pub fn context(&self) -> Option<Value> {
        match self {
            Self::InvalidVersion(VersionParseError::WrongComponentCount { raw, found }) => {
                Some(serde_json::json!({ "version": raw, "components": found }))
            }
            Self::InvalidVersion(VersionParseError::InvalidComponent { raw, component }) => {
                Some(serde_json::json!({ "version": raw, "component": component }))
            }
            _ => None,
        }
    }

    /// Convert this error to a structured error.
    #[must_use]
    pub fn to_structured(&self) -> StructuredError {
        StructuredError::from_error(self)
    }
}

/// A structured error with machine-readable code, suggestion, and context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// The error code (e.g., "VERSION_INVALID")
    pub code: ErrorCode,

    /// The numeric error code (e.g., 801)
    pub numeric_code: u16,

    /// Human-readable error message
    pub message: String,

    /// Actionable suggestion for recovery
    pub suggestion: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,

    pub recoverable: bool,

    /// Error category (e.g., "config", "network")
    pub category: String,
}

impl StructuredError {
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            numeric_code: code.numeric(),
            message: message.into(),
            suggestion: code.suggestion().to_string(),
            context: None,
            recoverable: code.is_recoverable(),
            category: code.category().to_string(),
        }
    }

    #[must_use]
    pub fn from_error(err: &GrasshopperError) -> Self {
        let mut structured = Self::new(err.code(), err.to_string());
        structured.context = err.context();
        structured
    }
}

impl std::fmt::Display for StructuredError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// Result type alias using GrasshopperError.
pub type Result<T> = std::result::Result<T, GrasshopperError>;
