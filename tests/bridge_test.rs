//! Integration tests for the host bridge
//!
//! Covers the two request/response operations, the update subscription, and
//! the channel-based service the status page talks to.

mod common;

use std::path::PathBuf;
use std::time::Duration;

use arx_launcher::cancel::CancelToken;
use arx_launcher::services::bridge::spawn_bridge_service;
use arx_launcher::services::{BridgeRequest, BridgeResponse, ExtensionInfo};
use common::{bridge_for, default_path_in, sample_extension, ExtensionServer, UNREACHABLE_URL};

/// Test: With nothing stored, a download goes to the default location
#[tokio::test]
async fn test_download_without_stored_path_uses_default() {
    let dir = tempfile::tempdir().unwrap();
    let server = ExtensionServer::start(sample_extension("1.0.0")).await;
    let bridge = bridge_for(&server.url, dir.path());

    let result = bridge.download_extension(None, &CancelToken::new()).await;

    let expected = default_path_in(dir.path());
    assert!(result.success, "download failed: {}", result.message);
    assert_eq!(result.message, "Extension downloaded successfully");
    assert_eq!(PathBuf::from(&result.path), expected);
    assert!(expected.join("manifest.json").is_file());

    let info = bridge.get_extension_info();
    assert_eq!(PathBuf::from(&info.path), expected);
    assert!(info.last_updated > 0);
}

/// Test: An explicit location gets `arx-crx` appended and becomes the stored path
#[tokio::test]
async fn test_download_to_chosen_location() {
    let dir = tempfile::tempdir().unwrap();
    let server = ExtensionServer::start(sample_extension("1.0.0")).await;
    let bridge = bridge_for(&server.url, dir.path());
    let chosen = dir.path().join("chosen");

    let result = bridge
        .download_extension(Some(chosen.clone()), &CancelToken::new())
        .await;

    assert!(result.success);
    let expected = chosen.join("arx-crx");
    assert_eq!(PathBuf::from(&result.path), expected);
    assert!(expected.join("manifest.json").is_file());

    // Later downloads without a location reuse it
    assert_eq!(bridge.resolve_target(None), expected);
}

/// Test: A chosen location already ending in `arx-crx` is not doubled
#[tokio::test]
async fn test_download_to_location_already_named_arx_crx() {
    let dir = tempfile::tempdir().unwrap();
    let server = ExtensionServer::start(sample_extension("1.0.0")).await;
    let bridge = bridge_for(&server.url, dir.path());
    let chosen = dir.path().join("arx-crx");

    let result = bridge
        .download_extension(Some(chosen.clone()), &CancelToken::new())
        .await;

    assert!(result.success);
    assert_eq!(PathBuf::from(&result.path), chosen);
    assert!(!chosen.join("arx-crx").exists());
}

/// Test: Failures collapse into success=false with a readable message
#[tokio::test]
async fn test_download_failure_is_reported_not_raised() {
    let dir = tempfile::tempdir().unwrap();
    let bridge = bridge_for(UNREACHABLE_URL, dir.path());

    let result = bridge.download_extension(None, &CancelToken::new()).await;

    assert!(!result.success);
    assert!(
        result.message.starts_with("Failed to download extension: "),
        "got: {}",
        result.message
    );
    assert!(result.message.len() > "Failed to download extension: ".len());

    let info = bridge.get_extension_info();
    assert_eq!(
        info,
        ExtensionInfo {
            path: String::new(),
            last_updated: 0
        }
    );
}

/// Test: A cancelled download never reaches the server
#[tokio::test]
async fn test_cancelled_download() {
    let dir = tempfile::tempdir().unwrap();
    let server = ExtensionServer::start(sample_extension("1.0.0")).await;
    let bridge = bridge_for(&server.url, dir.path());

    let cancel = CancelToken::new();
    cancel.cancel();
    let result = bridge.download_extension(None, &cancel).await;

    assert!(!result.success);
    assert_eq!(result.message, "Cancelled");
    assert_eq!(server.hits(), 0);
    assert!(bridge.get_extension_info().path.is_empty());
}

/// Test: Subscribers hear host refreshes, and stop hearing after unsubscribing
#[tokio::test]
async fn test_subscription_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let server = ExtensionServer::start(sample_extension("1.0.0")).await;
    let bridge = bridge_for(&server.url, dir.path());

    let mut subscription = bridge.subscribe();
    assert_eq!(bridge.subscriber_count(), 1);

    // UI-initiated downloads do not notify
    assert!(bridge.download_extension(None, &CancelToken::new()).await.success);
    assert!(subscription.try_recv().is_none());

    let sent = bridge.refresh_stored(&CancelToken::new()).await.unwrap();
    let received = tokio::time::timeout(Duration::from_secs(5), subscription.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(received, sent);

    let info = bridge.get_extension_info();
    assert_eq!(received.path, info.path);
    assert_eq!(received.timestamp, info.last_updated);

    subscription.unsubscribe();
    assert_eq!(bridge.subscriber_count(), 0);

    // Publishing with nobody listening is fine
    assert!(bridge.refresh_stored(&CancelToken::new()).await.is_some());
}

/// Test: Refresh with no stored path does nothing
#[tokio::test]
async fn test_refresh_without_stored_path_is_noop() {
    let dir = tempfile::tempdir().unwrap();
    let server = ExtensionServer::start(sample_extension("1.0.0")).await;
    let bridge = bridge_for(&server.url, dir.path());
    let mut subscription = bridge.subscribe();

    assert!(bridge.refresh_stored(&CancelToken::new()).await.is_none());
    assert_eq!(server.hits(), 0);
    assert!(subscription.try_recv().is_none());
}

/// Test: A failed refresh sends no notification
#[tokio::test]
async fn test_failed_refresh_does_not_notify() {
    let dir = tempfile::tempdir().unwrap();
    let server = ExtensionServer::start(sample_extension("1.0.0")).await;
    let bridge = bridge_for(&server.url, dir.path());
    assert!(bridge.download_extension(None, &CancelToken::new()).await.success);

    let mut subscription = bridge.subscribe();
    server.set_status(axum::http::StatusCode::INTERNAL_SERVER_ERROR);

    assert!(bridge.refresh_stored(&CancelToken::new()).await.is_none());
    assert!(subscription.try_recv().is_none());
}

/// Test: The channel service answers both request kinds
#[tokio::test]
async fn test_bridge_service_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let server = ExtensionServer::start(sample_extension("1.0.0")).await;
    let bridge = bridge_for(&server.url, dir.path());
    let (request_tx, mut response_rx) = spawn_bridge_service(bridge);

    request_tx
        .send(BridgeRequest::DownloadExtension {
            save_path: None,
            cancel: CancelToken::new(),
        })
        .unwrap();
    let response = tokio::time::timeout(Duration::from_secs(10), response_rx.recv())
        .await
        .unwrap()
        .unwrap();
    let BridgeResponse::Download(result) = response else {
        panic!("expected a download result, got {:?}", response);
    };
    assert!(result.success);

    request_tx.send(BridgeRequest::GetExtensionInfo).unwrap();
    let response = tokio::time::timeout(Duration::from_secs(5), response_rx.recv())
        .await
        .unwrap()
        .unwrap();
    let BridgeResponse::ExtensionInfo(info) = response else {
        panic!("expected extension info, got {:?}", response);
    };
    assert_eq!(info.path, result.path);
}

/// Test: The bridge reports the origin its client fetches from, without a trailing slash
#[tokio::test]
async fn test_server_url_matches_client_origin() {
    let dir = tempfile::tempdir().unwrap();
    let server = ExtensionServer::start(sample_extension("1.0.0")).await;

    let bridge = bridge_for(&server.url, dir.path());
    assert_eq!(bridge.server_url(), server.url);

    let slashed = bridge_for(&format!("{}/", server.url), dir.path());
    assert_eq!(slashed.server_url(), server.url);
    assert!(slashed.download_extension(None, &CancelToken::new()).await.success);
}

/// Test: Bridge records serialize with camelCase field names
#[test]
fn test_bridge_records_serialize_camel_case() {
    let info = ExtensionInfo {
        path: "/tmp/arx-crx".to_string(),
        last_updated: 5,
    };
    let json = serde_json::to_value(&info).unwrap();
    assert_eq!(json["lastUpdated"], 5);
    assert_eq!(json["path"], "/tmp/arx-crx");
}
