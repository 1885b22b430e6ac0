//! Extension fetch-and-replace
//!
//! The sequence is: fetch the archive, write it next to the target, extract
//! into a staging sibling, and only then swap the staging directory in for
//! the old one. The old directory is parked beside the target during the
//! swap and put back if the swap fails, so any failure leaves the previous
//! extension and the settings record untouched. Installs are serialized,
//! so a timer refresh and a user refresh never interleave on disk.

use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::api::ExtensionClient;
use crate::cancel::{CancelToken, Cancelled};
use crate::logic::formatting::now_millis;
use crate::logic::path::normalize_extension_path;
use crate::settings::SettingsStore;
use crate::utils::format_bytes;

/// Name of the temporary archive written next to the target directory
pub const ARCHIVE_FILE_NAME: &str = "extension.zip";

/// Outcome of a successful install
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    /// Normalized directory the extension now lives in
    pub path: PathBuf,
    /// Top-level entries of the extracted directory, sorted
    pub entries: Vec<String>,
    /// Number of files written
    pub file_count: usize,
    pub archive_bytes: u64,
    /// Epoch milliseconds recorded in the settings
    pub timestamp: i64,
}

pub struct ExtensionInstaller {
    client: ExtensionClient,
    settings: Arc<SettingsStore>,
    install_lock: Mutex<()>,
}

impl ExtensionInstaller {
    pub fn new(client: ExtensionClient, settings: Arc<SettingsStore>) -> Self {
        Self {
            client,
            settings,
            install_lock: Mutex::new(()),
        }
    }

    pub fn settings(&self) -> &Arc<SettingsStore> {
        &self.settings
    }

    pub fn client(&self) -> &ExtensionClient {
        &self.client
    }

    /// Download and unpack the extension into `target`
    pub async fn install(&self, target: &Path) -> Result<InstallReport> {
        self.install_with_cancel(target, &CancelToken::new()).await
    }

    /// Like [`install`](Self::install), giving up when `cancel` fires
    ///
    /// Cancellation is honoured while waiting for another install and while
    /// downloading. Once extraction starts the install runs to completion.
    pub async fn install_with_cancel(
        &self,
        target: &Path,
        cancel: &CancelToken,
    ) -> Result<InstallReport> {
        let target = normalize_extension_path(target);
        if target.as_os_str().is_empty() || target.file_name().is_none() {
            anyhow::bail!("Invalid extension path: {:?}", target);
        }

        let _guard = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(Cancelled.into()),
            guard = self.install_lock.lock() => guard,
        };

        tracing::info!(target = %target.display(), url = %self.client.extension_url(), "Downloading extension");

        let bytes = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(Cancelled.into()),
            result = self.client.fetch_archive() => result?,
        };
        let archive_bytes = bytes.len() as u64;
        tracing::info!(size = %format_bytes(archive_bytes), "Received extension archive");

        let extract_target = target.clone();
        let (entries, file_count) =
            tokio::task::spawn_blocking(move || replace_directory(&extract_target, &bytes))
                .await
                .context("Extraction task failed")??;

        tracing::info!(
            path = %target.display(),
            files = file_count,
            entries = ?entries,
            "Extracted extension"
        );

        let timestamp = now_millis();
        self.settings
            .record_success(&target.to_string_lossy(), timestamp)
            .context("Failed to save settings")?;

        Ok(InstallReport {
            path: target,
            entries,
            file_count,
            archive_bytes,
            timestamp,
        })
    }
}

/// Staging directory used while extracting: `<parent>/.<name>.staging`
pub fn staging_path(target: &Path) -> PathBuf {
    hidden_sibling(target, "staging")
}

/// Where the previous extension is parked during the swap: `<parent>/.<name>.old`
pub fn backup_path(target: &Path) -> PathBuf {
    hidden_sibling(target, "old")
}

fn hidden_sibling(target: &Path, suffix: &str) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    parent_dir(target).join(format!(".{}.{}", name, suffix))
}

/// Remove a file or directory tree, whichever `path` is
fn remove_path(path: &Path) -> io::Result<()> {
    if fs::symlink_metadata(path)?.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

fn path_exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

fn parent_dir(target: &Path) -> PathBuf {
    target
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Write the archive beside `target`, extract it, and swap it in
///
/// Returns the sorted top-level entries and the number of files extracted.
pub fn replace_directory(target: &Path, archive: &[u8]) -> Result<(Vec<String>, usize)> {
    let parent = parent_dir(target);
    if !parent.exists() {
        tracing::debug!(dir = %parent.display(), "Creating base directory");
        fs::create_dir_all(&parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let archive_path = parent.join(ARCHIVE_FILE_NAME);
    fs::write(&archive_path, archive)
        .with_context(|| format!("Failed to write {}", archive_path.display()))?;
    tracing::debug!(path = %archive_path.display(), "Wrote extension archive");

    let result = extract_and_swap(&archive_path, target);

    if let Err(e) = fs::remove_file(&archive_path) {
        tracing::warn!(path = %archive_path.display(), error = %e, "Failed to remove temporary archive");
    }

    result
}

fn extract_and_swap(archive_path: &Path, target: &Path) -> Result<(Vec<String>, usize)> {
    let staging = staging_path(target);
    if path_exists(&staging) {
        remove_path(&staging)
            .with_context(|| format!("Failed to clear stale staging directory {}", staging.display()))?;
    }
    fs::create_dir_all(&staging)?;

    let file_count = match extract_archive(archive_path, &staging) {
        Ok(count) => count,
        Err(e) => {
            let _ = fs::remove_dir_all(&staging);
            return Err(e);
        }
    };

    install_staged(&staging, target, &backup_path(target))?;

    Ok((list_entries(target)?, file_count))
}

/// Move `staging` onto `target`, parking the old target at `backup`
///
/// Either the new directory ends up at `target` or the old one stays there.
/// `staging` is removed when the swap fails.
fn install_staged(staging: &Path, target: &Path, backup: &Path) -> Result<()> {
    let result = swap_into_place(staging, target, backup);
    if result.is_err() && path_exists(staging) {
        if let Err(e) = remove_path(staging) {
            tracing::warn!(path = %staging.display(), error = %e, "Failed to remove staging directory");
        }
    }
    result
}

fn swap_into_place(staging: &Path, target: &Path, backup: &Path) -> Result<()> {
    if path_exists(backup) {
        remove_path(backup).with_context(|| {
            format!("Failed to clear stale backup {}", backup.display())
        })?;
    }

    let had_previous = path_exists(target);
    if had_previous {
        fs::rename(target, backup).with_context(|| {
            format!("Failed to move old extension aside from {}", target.display())
        })?;
    }

    if let Err(e) = fs::rename(staging, target) {
        if had_previous {
            if let Err(restore) = fs::rename(backup, target) {
                tracing::error!(
                    backup = %backup.display(),
                    error = %restore,
                    "Failed to restore previous extension"
                );
            }
        }
        return Err(e)
            .with_context(|| format!("Failed to move extension into {}", target.display()));
    }

    if had_previous {
        if let Err(e) = remove_path(backup) {
            tracing::warn!(path = %backup.display(), error = %e, "Failed to remove previous extension");
        }
    }

    Ok(())
}

/// Extract every entry of a zip archive under `dest`
///
/// Entries whose names would escape `dest` are skipped. Returns the number of
/// files written.
pub fn extract_archive(archive_path: &Path, dest: &Path) -> Result<usize> {
    let file = fs::File::open(archive_path)?;
    let mut archive =
        zip::ZipArchive::new(file).context("Extension archive is not a valid zip file")?;

    let mut files = 0;
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let Some(relative) = entry.enclosed_name() else {
            tracing::warn!(name = entry.name(), "Skipping archive entry outside the target");
            continue;
        };
        let out_path = dest.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&out_path)?;
        } else {
            if let Some(parent) = out_path.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut outfile = fs::File::create(&out_path)?;
            io::copy(&mut entry, &mut outfile)?;
            files += 1;
        }
    }

    Ok(files)
}

fn list_entries(dir: &Path) -> Result<Vec<String>> {
    let mut entries = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
        .collect::<io::Result<Vec<_>>>()?;
    entries.sort();
    Ok(entries)
}
