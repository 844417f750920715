//! Standardized error codes for machine-parseable output.
//!
//! Error codes follow a numeric taxonomy:
//! - 3xx: Config errors
//! - 5xx: Network errors
//! - 6xx: Storage errors
//! - 8xx: Validation errors

use serde::{Deserialize, Serialize};

/// Standardized error codes for JSON output.
///
/// Each variant maps to a numeric code (e.g., `VersionInvalid` -> E801).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // ========================================
    // Config errors (3xx)
    // ========================================
    /// E301: Config file has invalid syntax or values
    ConfigInvalid,

    // ========================================
    // Network errors (5xx)
    // ========================================
    /// E501: Cannot reach the release server
    NetworkUnreachable,
    /// E502: Release server answered with something unusable
    ReleaseMetadataInvalid,

    // ========================================
    // Storage errors (6xx)
    // ========================================
    /// E601: IO operation failed
    IoError,
    /// E602: JSON/TOML (de)serialization failed
    SerializationError,

    // ========================================
    // Validation errors (8xx)
    // ========================================
    /// E801: A version string did not parse
    VersionInvalid,
    /// E802: A value failed validation
    ValidationFailed,
}

impl ErrorCode {
    /// Get the numeric error code (e.g., `VersionInvalid` -> 801).
    #[must_use]
    pub const fn numeric(&self) -> u16 {
        match self {
            Self::ConfigInvalid => 301,

            Self::NetworkUnreachable => 501,
            Self::ReleaseMetadataInvalid => 502,

            Self::IoError => 601,
            Self::SerializationError => 602,

            Self::VersionInvalid => 801,
            Self::ValidationFailed => 802,
        }
    }

    /// Get the error code as a formatted string (e.g., "E801").
    #[must_use]
    pub fn code_string(&self) -> String {
        format!("E{}", self.numeric())
    }

    /// Get the default suggestion for this error code.
    #[must_use]
    pub const fn suggestion(&self) -> &'static str {
        match self {
            Self::ConfigInvalid => "Check ~/.config/grasshopper/config.toml (or GRASSHOPPER_CONFIG) for syntax errors",
            Self::NetworkUnreachable => "Check your network connection; the update check can be retried later",
            Self::ReleaseMetadataInvalid => "Verify `update.repo` points at a repository with published releases",
            Self::IoError => "Check file permissions and available disk space",
            Self::SerializationError => "The input is not valid JSON/TOML; inspect it for truncation or typos",
            Self::VersionInvalid => "Versions must look like MAJOR.MINOR.PATCH with digits only, e.g. 1.4.0",
            Self::ValidationFailed => "Fill in the required fields and try again",
        }
    }

    /// Whether the user can fix this without a new build.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::ConfigInvalid
            | Self::NetworkUnreachable
            | Self::ReleaseMetadataInvalid
            | Self::VersionInvalid
            | Self::ValidationFailed => true,
            Self::IoError | Self::SerializationError => false,
        }
    }

    /// Get the error category name.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self.numeric() / 100 {
            3 => "config",
            5 => "network",
            6 => "storage",
            8 => "validation",
            _ => "unknown",
        }
    }

    /// Iterate over all error codes.
    pub fn all() -> impl Iterator<Item = Self> {
        [
            Self::ConfigInvalid,
            Self::NetworkUnreachable,
            Self::ReleaseMetadataInvalid,
            Self::IoError,
            Self::SerializationError,
            Self::VersionInvalid,
            Self::ValidationFailed,
        ]
        .into_iter()
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code_string())
    }
}
