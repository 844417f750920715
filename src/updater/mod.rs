//! Update checks against published GitHub releases.
//!
//! The decision step ([`check_for_update`]) is pure and runs over data that
//! has already been fetched. [`UpdateChecker`] adds the one blocking HTTP call
//! in front of it, and [`spawn_update_check`] moves that call off the
//! caller's thread.

mod github;

use std::fmt;
use std::time::Duration;

use crossbeam_channel::Receiver;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::UpdateConfig;
use crate::error::{GrasshopperError, Result};
use crate::version::{Version, is_newer};

use github::GitHubClient;

/// Repository whose releases are checked when nothing else is configured.
pub const DEFAULT_REPO: &str = "campbellmbrown/grasshopper";

pub const DEFAULT_API_BASE: &str = "https://api.github.com";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Latest release as reported by the release-listing API.
///
/// `url` and `published_at` are opaque and passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseDescriptor {
    pub tag: String,
    pub url: String,
    pub published_at: String,
}

/// Why no update is being offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoUpdateReason {
    #[serde(rename = "malformed version")]
    MalformedVersion,
    #[serde(rename = "up to date")]
    UpToDate,
}

impl NoUpdateReason {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MalformedVersion => "malformed version",
            Self::UpToDate => "up to date",
        }
    }
}

impl fmt::Display for NoUpdateReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of comparing the installed version with the latest release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UpdateDecision {
    /// `tag` has any leading `v` stripped.
    UpdateAvailable {
        tag: String,
        url: String,
        published_at: String,
    },
    NoUpdate { reason: NoUpdateReason },
}

impl UpdateDecision {
    #[must_use]
    pub const fn is_update_available(&self) -> bool {
        matches!(self, Self::UpdateAvailable { .. })
    }
}

/// Decide whether `latest` should be offered over the installed version.
///
/// Never fails: a tag or installed version that does not parse yields
/// `NoUpdate { reason: MalformedVersion }` and a warning in the log.
#[must_use]
pub fn check_for_update(current: &str, latest: &ReleaseDescriptor) -> UpdateDecision {
    let tag = latest.tag.strip_prefix('v').unwrap_or(&latest.tag);

    let latest_version = match Version::parse(tag) {
        Ok(version) => version,
        Err(err) => {
            warn!(tag = %tag, error = %err, "Latest release tag is not in the expected format");
            return UpdateDecision::NoUpdate {
                reason: NoUpdateReason::MalformedVersion,
            };
        }
    };

    // The installed version comes from our own build, so this is a packaging bug.
    let current_version = match Version::parse(current) {
        Ok(version) => version,
        Err(err) => {
            warn!(current = %current, error = %err, "Installed version is not in the expected format");
            return UpdateDecision::NoUpdate {
                reason: NoUpdateReason::MalformedVersion,
            };
        }
    };

    if is_newer(&latest_version, &current_version) {
        info!(current = %current_version, latest = %latest_version, "New version available");
        info!(url = %latest.url, "Download at");
        UpdateDecision::UpdateAvailable {
            tag: tag.to_string(),
            url: latest.url.clone(),
            published_at: latest.published_at.clone(),
        }
    } else {
        info!(current = %current_version, latest = %latest_version, "No new version available");
        UpdateDecision::NoUpdate {
            reason: NoUpdateReason::UpToDate,
        }
    }
}

/// Fetches the latest release of a repository and decides on it.
#[derive(Debug, Clone)]
pub struct UpdateChecker {
    current_version: String,
    repo: String,
    api_base: String,
    timeout: Duration,
    token: Option<String>,
}

impl UpdateChecker {
    /// Create a checker for `repo` (`owner/name` or a GitHub URL).
    pub fn new(current_version: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            current_version: current_version.into(),
            repo: repo.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
            token: token_from_env(),
        }
    }

    /// Create a checker from the `[update]` config section.
    pub fn from_config(current_version: impl Into<String>, config: &UpdateConfig) -> Self {
        Self::new(current_version, config.repo.clone())
            .with_api_base(config.api_base.clone())
            .with_timeout(Duration::from_secs(config.timeout_seconds))
    }

    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the GitHub token for authenticated requests.
    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    #[must_use]
    pub fn current_version(&self) -> &str {
        &self.current_version
    }

    #[must_use]
    pub fn repo(&self) -> &str {
        &self.repo
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch the latest release descriptor.
    ///
    /// # Errors
    ///
    /// Network failures, non-success HTTP statuses and releases missing
    /// `tag_name`, `html_url` or `published_at`.
    pub fn fetch_latest(&self) -> Result<ReleaseDescriptor> {
        let (owner, repo) = parse_repo(&self.repo)?;
        let client = GitHubClient::new(&self.api_base, self.timeout, self.token.clone())?;
        client.latest_release(&owner, &repo)
    }

    /// Fetch the latest release and decide whether it is an update.
    ///
    /// # Errors
    ///
    /// Only fetch failures; malformed versions become a `NoUpdate` decision.
    pub fn check(&self) -> Result<UpdateDecision> {
        let latest = self.fetch_latest()?;
        Ok(check_for_update(&self.current_version, &latest))
    }
}

/// Run `checker` once on a background thread.
///
/// The returned receiver yields at most one decision. When the fetch fails
/// the failure is logged and the channel disconnects without a message.
///
/// # Errors
///
/// Returns an error if the worker thread cannot be spawned.
pub fn spawn_update_check(checker: UpdateChecker) -> Result<Receiver<UpdateDecision>> {
    let (tx, rx) = crossbeam_channel::bounded(1);

    std::thread::Builder::new()
        .name("update-check".to_string())
        .spawn(move || match checker.check() {
            Ok(decision) => {
                if tx.send(decision).is_err() {
                    debug!("Update check finished after the receiver was dropped");
                }
            }
            Err(err) => warn!(error = %err, "Failed to get latest release"),
        })?;

    Ok(rx)
}

fn token_from_env() -> Option<String> {
    std::env::var("GRASSHOPPER_GITHUB_TOKEN")
        .ok()
        .or_else(|| std::env::var("GITHUB_TOKEN").ok())
        .or_else(|| std::env::var("GH_TOKEN").ok())
}

/// Split `owner/repo`, accepting GitHub URLs and a `.git` suffix.
///
/// # Errors
///
/// Returns `ValidationFailed` when either half is missing.
pub fn parse_repo(input: &str) -> Result<(String, String)> {
    let cleaned = input
        .strip_prefix("https://github.com/")
        .or_else(|| input.strip_prefix("http://github.com/"))
        .or_else(|| input.strip_prefix("github.com/"))
        .unwrap_or(input);

    let parts: Vec<&str> = cleaned.split('/').collect();
    if parts.len() < 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(GrasshopperError::ValidationFailed(format!(
            "invalid repo reference: {input}"
        )));
    }

    Ok((
        parts[0].to_string(),
        parts[1].trim_end_matches(".git").to_string(),
    ))
}
