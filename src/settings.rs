//! Persisted settings record
//!
//! Two fields, stored as JSON under the per-user config directory with the
//! same key names the launcher has always used (`extensionPath`,
//! `lastUpdated`). The store is an owned object shared through `Arc`; every
//! mutation goes through one lock and is written to disk before the lock is
//! released, so concurrent writers resolve as last-write-wins and the file is
//! never torn.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Where the extension is unpacked, empty until the first success
    pub extension_path: String,
    /// Epoch milliseconds of the last successful download, 0 if never
    pub last_updated: i64,
}

pub struct SettingsStore {
    path: PathBuf,
    record: Mutex<Settings>,
}

impl SettingsStore {
    /// Open the store at `path`, falling back to defaults if the file is
    /// missing or unreadable
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let record = Self::load(&path);
        Self {
            path,
            record: Mutex::new(record),
        }
    }

    /// Open the store in the platform config directory
    pub fn open_default() -> Result<Self> {
        let dir = Self::get_settings_dir()?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create settings directory {}", dir.display()))?;
        Ok(Self::open(dir.join("settings.json")))
    }

    fn get_settings_dir() -> Result<PathBuf> {
        if let Some(config_dir) = dirs::config_dir() {
            Ok(config_dir.join("arx-launcher"))
        } else {
            Ok(crate::utils::get_settings_fallback_path())
        }
    }

    fn load(path: &Path) -> Settings {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Settings file is corrupt, using defaults"
                    );
                    Settings::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Settings::default(),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to read settings, using defaults"
                );
                Settings::default()
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, Settings> {
        // A panic while holding the lock cannot leave a half-written record
        self.record
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Snapshot of the current record
    pub fn get(&self) -> Settings {
        self.lock().clone()
    }

    pub fn extension_path(&self) -> String {
        self.lock().extension_path.clone()
    }

    pub fn last_updated(&self) -> i64 {
        self.lock().last_updated
    }

    /// Replace the stored path, keeping the timestamp
    pub fn set_extension_path(&self, extension_path: &str) -> Result<()> {
        self.update(|record| record.extension_path = extension_path.to_string())
    }

    /// Record a successful download: path and timestamp in a single write
    pub fn record_success(&self, extension_path: &str, timestamp: i64) -> Result<()> {
        self.update(|record| {
            record.extension_path = extension_path.to_string();
            record.last_updated = timestamp;
        })
    }

    fn update(&self, apply: impl FnOnce(&mut Settings)) -> Result<()> {
        let mut record = self.lock();
        let mut next = record.clone();
        apply(&mut next);
        self.persist(&next)?;
        *record = next;
        Ok(())
    }

    fn persist(&self, record: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(record)?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json)
            .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;
        Ok(())
    }
}
