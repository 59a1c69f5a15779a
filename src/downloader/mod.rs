use std::path::PathBuf;

use futures_util::StreamExt;
use log::{error, info};
use reqwest::Client;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::api::SongRecord;
use crate::config::AdapterConfig;
use crate::errors::{AppError, Result};
use crate::utils::ensure_dir_exists;

/// The service serves m4a/mp4 audio regardless of quality.
pub const AUDIO_EXTENSION: &str = "m4a";

/// Streams resolved download links to the local download directory.
///
/// Downloads are idempotent per song id: an existing file at the destination
/// path is returned without touching the network. No integrity check is run
/// against pre-existing files.
#[derive(Debug, Clone)]
pub struct AudioDownloader {
    client: Client,
    download_dir: PathBuf,
    preferred_quality: &'static str,
}

impl AudioDownloader {
    pub fn new(config: &AdapterConfig) -> Result<Self> {
        // No overall deadline on this client: a full track streams for as
        // long as the transport keeps delivering chunks.
        let mut builder = Client::builder().user_agent(config.user_agent.as_str());

        if let Some(proxy_url) = &config.proxy {
            if let Ok(proxy) = reqwest::Proxy::all(proxy_url) {
                builder = builder.proxy(proxy);
            }
        }

        Ok(Self {
            client: builder.build()?,
            download_dir: config.download_dir.clone(),
            preferred_quality: config.preferred_quality.label(),
        })
    }

    /// Destination path for a song id, derived deterministically.
    pub fn destination_for(&self, id: &str) -> PathBuf {
        self.download_dir.join(format!("{}.{}", id, AUDIO_EXTENSION))
    }

    /// Picks the link matching the preferred quality, falling back to the
    /// last entry (the service orders links ascending by quality).
    pub fn select_download_url<'a>(&self, record: &'a SongRecord) -> Result<&'a str> {
        for link in &record.download_url {
            if link.quality == self.preferred_quality {
                return Ok(link.url.as_str());
            }
        }

        if let Some(last) = record.download_url.last() {
            return Ok(last.url.as_str());
        }

        error!("❌ [DOWNLOAD] No download URL in record: {}", record.id);
        Err(AppError::NoDownloadUrl(format!(
            "record '{}' carries no download links",
            record.id
        )))
    }

    /// Resolves a record to a local audio file, streaming it down if needed.
    pub async fn fetch(&self, record: &SongRecord) -> Result<PathBuf> {
        let file_url = self.select_download_url(record)?;
        let file_path = self.destination_for(&record.id);

        if file_path.exists() {
            info!("📂 [LOCAL] File exists: {}", record.name);
            return Ok(file_path);
        }

        ensure_dir_exists(&self.download_dir).await?;

        info!("⬇️ [DOWNLOAD] Downloading: {}", record.name);
        let response = self.client.get(file_url).send().await?;

        if !response.status().is_success() {
            error!(
                "❌ [DOWNLOAD] Failed to download file stream: {}",
                response.status()
            );
            return Err(AppError::StreamFailure(format!(
                "stream request failed with status {}",
                response.status()
            )));
        }

        let mut file = File::create(&file_path).await?;
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
        }

        file.flush().await?;
        info!("✅ [DOWNLOAD] Download complete: {:?}", file_path);
        Ok(file_path)
    }
}
