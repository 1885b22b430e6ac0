//! Shared fixtures for integration tests
//!
//! A local HTTP server standing in for the extension origin, plus helpers to
//! build zip archives and wire a bridge against a scratch directory.

#![allow(dead_code)]

use axum::{extract::State, http::StatusCode, routing::get, Router};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use arx_launcher::api::ExtensionClient;
use arx_launcher::installer::ExtensionInstaller;
use arx_launcher::services::HostBridge;
use arx_launcher::settings::SettingsStore;

/// Nothing listens on port 1
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:1";

#[derive(Clone)]
struct ServerState {
    status: Arc<Mutex<StatusCode>>,
    body: Arc<Mutex<Vec<u8>>>,
    hits: Arc<AtomicUsize>,
}

/// Handle to a running fake origin
pub struct ExtensionServer {
    pub url: String,
    state: ServerState,
}

impl ExtensionServer {
    /// Serve `body` at `/extension` with status 200
    pub async fn start(body: Vec<u8>) -> Self {
        let state = ServerState {
            status: Arc::new(Mutex::new(StatusCode::OK)),
            body: Arc::new(Mutex::new(body)),
            hits: Arc::new(AtomicUsize::new(0)),
        };

        let app = Router::new()
            .route("/extension", get(serve_extension))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            url: format!("http://{}", addr),
            state,
        }
    }

    /// Replace the archive served from now on
    pub fn set_body(&self, body: Vec<u8>) {
        *self.state.body.lock().unwrap() = body;
    }

    pub fn set_status(&self, status: StatusCode) {
        *self.state.status.lock().unwrap() = status;
    }

    /// Number of `/extension` requests served so far
    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }
}

async fn serve_extension(State(state): State<ServerState>) -> (StatusCode, Vec<u8>) {
    state.hits.fetch_add(1, Ordering::SeqCst);
    let status = *state.status.lock().unwrap();
    let body = state.body.lock().unwrap().clone();
    (status, body)
}

/// Build an in-memory zip from (name, contents) pairs; names ending in `/`
/// become directories
pub fn build_zip(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();

    for (name, contents) in entries {
        if name.ends_with('/') {
            writer.add_directory(*name, options).unwrap();
        } else {
            writer.start_file(*name, options).unwrap();
            writer.write_all(contents.as_bytes()).unwrap();
        }
    }

    writer.finish().unwrap().into_inner()
}

/// A typical unpacked extension
pub fn sample_extension(version: &str) -> Vec<u8> {
    let manifest = format!(
        r#"{{"manifest_version": 3, "name": "Arxena", "version": "{}"}}"#,
        version
    );
    build_zip(&[
        ("manifest.json", &manifest),
        ("background.js", "console.log('bg');"),
        ("icons/", ""),
        ("icons/icon128.png", "png"),
    ])
}

/// Settings store backed by `<dir>/settings.json`
pub fn settings_in(dir: &Path) -> Arc<SettingsStore> {
    Arc::new(SettingsStore::open(dir.join("settings.json")))
}

pub fn installer_for(url: &str, settings: Arc<SettingsStore>) -> Arc<ExtensionInstaller> {
    let client = ExtensionClient::new(url, Some(std::time::Duration::from_secs(5))).unwrap();
    Arc::new(ExtensionInstaller::new(client, settings))
}

/// Default install path under a scratch directory
pub fn default_path_in(dir: &Path) -> PathBuf {
    dir.join("candidate_cvs").join("arx-crx")
}

/// Bridge against `url` whose settings and default path live under `dir`
pub fn bridge_for(url: &str, dir: &Path) -> HostBridge {
    let settings = settings_in(dir);
    HostBridge::new(installer_for(url, settings), default_path_in(dir))
}
