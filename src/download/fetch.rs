//! Streaming image downloads.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};

use crate::error::{Error, Result};
use crate::output::create_download_bar;

/// Write buffer size; the body reaches the disk in chunks of this size.
pub const CHUNK_SIZE: usize = 1024;

/// Minimum file size to show progress bar (5 MB).
const PROGRESS_THRESHOLD: u64 = 5 * 1024 * 1024;

/// Result of a fetch that reached the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The body was written to the destination.
    Saved { path: PathBuf, bytes: u64 },
    /// The server answered with a non-success status; nothing was written.
    Rejected { status: u16 },
}

impl FetchOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, FetchOutcome::Saved { .. })
    }
}

/// Retrieves a URL into a file.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    /// Download `url` to `destination`. Non-success statuses are logged and
    /// reported as [`FetchOutcome::Rejected`], not as errors.
    async fn fetch(&self, url: &str, destination: &Path) -> Result<FetchOutcome>;
}

/// Plain streaming GET.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
    show_progress: bool,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, show_progress: bool) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| Error::Download(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            show_progress,
        })
    }
}

#[async_trait]
impl ImageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, destination: &Path) -> Result<FetchOutcome> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Failed to download {}: HTTP {}", url, status);
            return Ok(FetchOutcome::Rejected {
                status: status.as_u16(),
            });
        }

        let progress = match response.content_length() {
            Some(len) if self.show_progress && len > PROGRESS_THRESHOLD => {
                let name = destination
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                Some(create_download_bar(len, &name))
            }
            _ => None,
        };

        // Stream to file
        let file = File::create(destination).await?;
        let mut writer = BufWriter::with_capacity(CHUNK_SIZE, file);
        let mut stream = response.bytes_stream();
        let mut downloaded: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| Error::Download(format!("Stream error: {}", e)))?;
            if chunk.is_empty() {
                break;
            }
            writer.write_all(&chunk).await?;
            downloaded += chunk.len() as u64;

            if let Some(ref pb) = progress {
                pb.set_position(downloaded);
            }
        }

        writer.flush().await?;

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        Ok(FetchOutcome::Saved {
            path: destination.to_path_buf(),
            bytes: downloaded,
        })
    }
}
