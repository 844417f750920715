// --- Internal GitHub client ---

use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use tracing::info;

use super::ReleaseDescriptor;
use crate::error::{GrasshopperError, Result};

const USER_AGENT: &str = concat!("grasshopper/", env!("CARGO_PKG_VERSION"));

pub(super) struct GitHubClient {
    client: reqwest::blocking::Client,
    api_base: String,
    token: Option<String>,
}

impl GitHubClient {
    pub(super) fn new(api_base: &str, timeout: Duration, token: Option<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| GrasshopperError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub(super) fn latest_release(&self, owner: &str, repo: &str) -> Result<ReleaseDescriptor> {
        let url = format!("{}/repos/{owner}/{repo}/releases/latest", self.api_base);
        info!(url = %url, "Checking latest release");

        let mut request = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .map_err(|e| GrasshopperError::Network(format!("github request failed: {e}")))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(GrasshopperError::ReleaseMetadata(format!(
                "no published releases for {owner}/{repo}"
            )));
        }
        if !status.is_success() {
            return Err(GrasshopperError::Network(format!(
                "failed to get latest release: HTTP {status}"
            )));
        }

        let raw: GitHubRelease = response.json().map_err(|e| {
            GrasshopperError::ReleaseMetadata(format!("failed to parse release: {e}"))
        })?;
        raw.into_descriptor()
    }
}

/// Only the fields the update check needs; all optional so a missing one
/// gets a precise error instead of a generic decode failure.
#[derive(Debug, Deserialize)]
struct GitHubRelease {
    tag_name: Option<String>,
    html_url: Option<String>,
    published_at: Option<String>,
}

impl GitHubRelease {
    fn into_descriptor(self) -> Result<ReleaseDescriptor> {
        let missing =
            |field: &str| GrasshopperError::ReleaseMetadata(format!("latest release has no {field}"));

        Ok(ReleaseDescriptor {
            tag: self.tag_name.ok_or_else(|| missing("tag_name"))?,
            url: self.html_url.ok_or_else(|| missing("html_url"))?,
            published_at: self.published_at.ok_or_else(|| missing("published_at"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_release_converts() {
        let raw: GitHubRelease = serde_json::from_str(
            r#"{
                "tag_name": "v1.4.0",
                "html_url": "https://github.com/o/r/releases/tag/v1.4.0",
                "published_at": "2024-05-01T10:00:00Z",
                "assets": []
            }"#,
        )
        .unwrap();

        let descriptor = raw.into_descriptor().unwrap();
        assert_eq!(descriptor.tag, "v1.4.0");
        assert_eq!(descriptor.url, "https://github.com/o/r/releases/tag/v1.4.0");
        assert_eq!(descriptor.published_at, "2024-05-01T10:00:00Z");
    }

    #[test]
    fn missing_fields_are_reported_by_name() {
        let cases = [
            (r#"{"html_url": "u", "published_at": "p"}"#, "tag_name"),
            (r#"{"tag_name": "v1.0.0", "published_at": "p"}"#, "html_url"),
            (r#"{"tag_name": "v1.0.0", "html_url": "u"}"#, "published_at"),
        ];

        for (json, field) in cases {
            let raw: GitHubRelease = serde_json::from_str(json).unwrap();
            let err = raw.into_descriptor().unwrap_err();
            assert!(
                matches!(&err, GrasshopperError::ReleaseMetadata(msg) if msg.contains(field)),
                "expected {field} in {err}"
            );
        }
    }

    #[test]
    fn non_string_tag_fails_to_decode() {
        let result: std::result::Result<GitHubRelease, _> =
            serde_json::from_str(r#"{"tag_name": 14, "html_url": "u", "published_at": "p"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn client_trims_trailing_slash() {
        let client = GitHubClient::new("http://localhost:9/", Duration::from_secs(1), None).unwrap();
        assert_eq!(client.api_base, "http://localhost:9");
    }
}
