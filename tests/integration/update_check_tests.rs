//! Update checks against a mock GitHub releases endpoint.

use std::time::Duration;

use grasshopper::GrasshopperError;
use grasshopper::updater::{NoUpdateReason, UpdateDecision, spawn_update_check};
use httpmock::prelude::*;
use serde_json::json;

use crate::fixture::{LATEST_PATH, ReleaseServer};

#[test]
fn newer_release_is_offered() {
    let fixture = ReleaseServer::start();
    let latest = fixture.respond(200, ReleaseServer::release_body("v0.5.0"));

    let decision = fixture.checker("0.4.0").check().unwrap();

    latest.assert();
    assert_eq!(
        decision,
        UpdateDecision::UpdateAvailable {
            tag: "0.5.0".to_string(),
            url: "https://github.com/owner/app/releases/tag/v0.5.0".to_string(),
            published_at: "2024-11-02T18:00:00Z".to_string(),
        }
    );
}

#[test]
fn same_release_is_up_to_date() {
    let fixture = ReleaseServer::start();
    fixture.respond(200, ReleaseServer::release_body("v0.4.0"));

    let decision = fixture.checker("0.4.0").check().unwrap();
    assert_eq!(
        decision,
        UpdateDecision::NoUpdate {
            reason: NoUpdateReason::UpToDate
        }
    );
}

#[test]
fn numeric_not_lexicographic_comparison() {
    let fixture = ReleaseServer::start();
    fixture.respond(200, ReleaseServer::release_body("v0.10.0"));

    assert!(fixture.checker("0.9.0").check().unwrap().is_update_available());
}

#[test]
fn prerelease_tag_is_malformed() {
    let fixture = ReleaseServer::start();
    fixture.respond(200, ReleaseServer::release_body("v0.5.0-rc.1"));

    assert_eq!(
        fixture.checker("0.4.0").check().unwrap(),
        UpdateDecision::NoUpdate {
            reason: NoUpdateReason::MalformedVersion
        }
    );
}

#[test]
fn missing_published_at_is_release_metadata_error() {
    let fixture = ReleaseServer::start();
    fixture.respond(
        200,
        json!({ "tag_name": "v0.5.0", "html_url": "https://example.com" }),
    );

    let err = fixture.checker("0.4.0").check().unwrap_err();
    assert!(
        matches!(&err, GrasshopperError::ReleaseMetadata(msg) if msg.contains("published_at")),
        "unexpected error: {err}"
    );
}

#[test]
fn no_releases_is_release_metadata_error() {
    let fixture = ReleaseServer::start();
    fixture.respond(404, json!({ "message": "Not Found" }));

    let err = fixture.checker("0.4.0").check().unwrap_err();
    assert!(matches!(err, GrasshopperError::ReleaseMetadata(_)));
}

#[test]
fn server_error_is_network_error() {
    let fixture = ReleaseServer::start();
    fixture.respond(503, json!({}));

    let err = fixture.checker("0.4.0").check().unwrap_err();
    assert!(matches!(err, GrasshopperError::Network(_)));
}

#[test]
fn token_is_sent_as_bearer() {
    let fixture = ReleaseServer::start();
    let authed = fixture.server.mock(|when, then| {
        when.method(GET)
            .path(LATEST_PATH)
            .header("authorization", "Bearer s3cret");
        then.status(200)
            .json_body(ReleaseServer::release_body("v0.4.0"));
    });

    fixture
        .checker("0.4.0")
        .with_token(Some("s3cret".to_string()))
        .check()
        .unwrap();
    authed.assert();
}

#[test]
fn slow_server_times_out() {
    let fixture = ReleaseServer::start();
    fixture.server.mock(|when, then| {
        when.method(GET).path(LATEST_PATH);
        then.status(200)
            .delay(Duration::from_secs(3))
            .json_body(ReleaseServer::release_body("v0.5.0"));
    });

    let err = fixture
        .checker("0.4.0")
        .with_timeout(Duration::from_millis(200))
        .check()
        .unwrap_err();
    assert!(matches!(err, GrasshopperError::Network(_)));
}

// =========================================================================
// Background worker
// =========================================================================

#[test]
fn background_check_delivers_one_decision() {
    let fixture = ReleaseServer::start();
    fixture.respond(200, ReleaseServer::release_body("v1.0.0"));

    let rx = spawn_update_check(fixture.checker("0.4.0")).unwrap();
    let decision = rx.recv_timeout(Duration::from_secs(10)).unwrap();
    assert!(decision.is_update_available());

    // Nothing further; the worker has exited.
    assert!(rx.recv_timeout(Duration::from_secs(10)).is_err());
}

#[test]
fn background_check_is_silent_on_failure() {
    let fixture = ReleaseServer::start();
    fixture.respond(500, json!({}));

    let rx = spawn_update_check(fixture.checker("0.4.0")).unwrap();
    assert!(matches!(
        rx.recv_timeout(Duration::from_secs(10)),
        Err(crossbeam_channel::RecvTimeoutError::Disconnected)
    ));
}
