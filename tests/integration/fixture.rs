//! Mock release server shared by the integration tests.

use std::time::Duration;

use grasshopper::updater::UpdateChecker;
use httpmock::prelude::*;
use serde_json::{Value, json};

pub const OWNER_REPO: &str = "owner/app";
pub const LATEST_PATH: &str = "/repos/owner/app/releases/latest";

pub struct ReleaseServer {
    pub server: MockServer,
}

impl ReleaseServer {
    pub fn start() -> Self {
        Self {
            server: MockServer::start(),
        }
    }

    pub fn release_body(tag: &str) -> Value {
        json!({
            "tag_name": tag,
            "name": format!("Release {tag}"),
            "html_url": format!("https://github.com/owner/app/releases/tag/{tag}"),
            "published_at": "2024-11-02T18:00:00Z",
            "draft": false,
            "prerelease": false,
            "assets": []
        })
    }

    /// Serve `body` with `status` for the latest-release endpoint.
    pub fn respond(&self, status: u16, body: Value) -> httpmock::Mock<'_> {
        self.server.mock(|when, then| {
            when.method(GET).path(LATEST_PATH);
            then.status(status)
                .header("content-type", "application/json")
                .json_body(body);
        })
    }

    pub fn checker(&self, current: &str) -> UpdateChecker {
        UpdateChecker::new(current, OWNER_REPO)
            .with_api_base(self.server.base_url())
            .with_timeout(Duration::from_secs(5))
            .with_token(None)
    }
}
