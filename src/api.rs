use anyhow::{Context, Result};
use bytes::Bytes;
use reqwest::Client;
use std::time::Duration;

/// HTTP client for the extension server
///
/// One endpoint: `GET {base_url}/extension` returning the zipped extension.
/// No authentication and no conditional-fetch headers are sent.
#[derive(Clone)]
pub struct ExtensionClient {
    base_url: String,
    client: Client,
}

impl ExtensionClient {
    /// Build a client; `timeout` of `None` keeps the transport default
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let base_url: String = base_url.into();

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn extension_url(&self) -> String {
        format!("{}/extension", self.base_url)
    }

    /// Download the extension archive into memory
    pub async fn fetch_archive(&self) -> Result<Bytes> {
        let url = self.extension_url();
        tracing::debug!(url = %url, "Fetching extension archive");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", url))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Server returned HTTP {} for {}", status, url);
        }

        let bytes = response
            .bytes()
            .await
            .context("Failed to read extension archive")?;

        Ok(bytes)
    }
}
