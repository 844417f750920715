//! Dotted `major.minor.patch` versions.
//!
//! Leading zeros are accepted (`01.2.3` parses and compares equal to
//! `1.2.3`). Anything else outside exactly three all-digit components is
//! rejected with an ordinary `Err`.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use thiserror::Error;

const COMPONENT_COUNT: usize = 3;

/// Why a version string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionParseError {
    #[error("version '{raw}' has {found} components (expected 3)")]
    WrongComponentCount { raw: String, found: usize },

    #[error("version '{raw}' has a non-numeric component '{component}'")]
    InvalidComponent { raw: String, component: String },
}

/// A parsed `major.minor.patch` version.
///
/// Holding a `Version` means the input was well formed. Equality, ordering
/// and hashing only look at the numeric triple; `raw` is kept for display.
#[derive(Debug, Clone)]
pub struct Version {
    major: u64,
    minor: u64,
    patch: u64,
    raw: String,
}

impl Version {
    /// Parse a dotted version string.
    ///
    /// # Errors
    ///
    /// Returns [`VersionParseError`] when the string does not split into
    /// exactly three non-empty, all-digit components.
    pub fn parse(text: &str) -> Result<Self, VersionParseError> {
        let parts: Vec<&str> = text.split('.').collect();
        if parts.len() != COMPONENT_COUNT {
            return Err(VersionParseError::WrongComponentCount {
                raw: text.to_string(),
                found: parts.len(),
            });
        }

        let major = parse_component(text, parts[0])?;
        let minor = parse_component(text, parts[1])?;
        let patch = parse_component(text, parts[2])?;

        Ok(Self {
            major,
            minor,
            patch,
            raw: text.to_string(),
        })
    }

    #[must_use]
    pub const fn major(&self) -> u64 {
        self.major
    }

    #[must_use]
    pub const fn minor(&self) -> u64 {
        self.minor
    }

    #[must_use]
    pub const fn patch(&self) -> u64 {
        self.patch
    }

    /// The string this version was parsed from.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub const fn triple(&self) -> (u64, u64, u64) {
        (self.major, self.minor, self.patch)
    }
}

// `u64::from_str` accepts a leading '+', so digits are checked first.
fn parse_component(raw: &str, component: &str) -> Result<u64, VersionParseError> {
    let invalid = || VersionParseError::InvalidComponent {
        raw: raw.to_string(),
        component: component.to_string(),
    };

    if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    component.parse::<u64>().map_err(|_| invalid())
}

/// True when `candidate` is strictly newer than `reference`.
#[must_use]
pub fn is_newer(candidate: &Version, reference: &Version) -> bool {
    candidate > reference
}

impl FromStr for Version {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.triple() == other.triple()
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.triple().hash(state);
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.triple().cmp(&other.triple())
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
