//! The download loop: walks the accepted posts until both quotas are met.

use std::path::PathBuf;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::download::fetch::{FetchOutcome, ImageFetcher};
use crate::download::rate::wait_for_credits;
use crate::download::state::{DownloadTarget, QuotaLimits, RunCounters};
use crate::error::{Error, Result};
use crate::fs::{archive_directory, derive_filename, RunLayout};
use crate::imgur::AlbumHost;
use crate::reddit::{is_acceptable, Post};

/// Knobs of a single run.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub limits: QuotaLimits,
    /// Minimum album-host credits before a request is made.
    pub credit_threshold: u32,
    /// Delay between credit checks while below the threshold.
    pub credit_poll_interval: Duration,
}

/// Drives one run over a sequence of posts.
pub struct Runner<'a> {
    album_host: &'a dyn AlbumHost,
    fetcher: &'a dyn ImageFetcher,
    layout: &'a RunLayout,
    settings: RunSettings,
    cancel: CancellationToken,
}

impl<'a> Runner<'a> {
    pub fn new(
        album_host: &'a dyn AlbumHost,
        fetcher: &'a dyn ImageFetcher,
        layout: &'a RunLayout,
        settings: RunSettings,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            album_host,
            fetcher,
            layout,
            settings,
            cancel,
        }
    }

    /// Decide how `post` would be downloaded.
    pub fn classify(&self, post: &Post) -> DownloadTarget {
        if !is_acceptable(post) {
            DownloadTarget::Rejected
        } else if !self.album_host.handles(&post.url) {
            DownloadTarget::DirectFetch
        } else if self.album_host.is_album(&post.url) {
            DownloadTarget::Album
        } else {
            DownloadTarget::SingleImage
        }
    }

    /// Download posts in order until both quotas are met or the posts run out.
    ///
    /// Progress is recorded in `counters` as it happens, so it stays accurate
    /// when the run ends early with [`Error::Cancelled`].
    pub async fn run(&self, posts: &[Post], counters: &mut RunCounters) -> Result<()> {
        let limits = self.settings.limits;

        for post in posts {
            if counters.quotas_met(&limits) {
                tracing::info!("All quotas reached");
                break;
            }

            if self.cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }

            match self.classify(post) {
                DownloadTarget::Rejected => {
                    tracing::debug!("Skipping rejected post: {}", post.url);
                    counters.increment_skipped();
                }
                DownloadTarget::DirectFetch => {
                    if counters.standalone_quota_met(&limits) {
                        counters.increment_skipped();
                        continue;
                    }
                    self.fetch_direct(post).await;
                    counters.increment_standalone();
                }
                target => {
                    // Check the api rate limit; it resets every hour
                    wait_for_credits(
                        self.album_host,
                        self.settings.credit_threshold,
                        self.settings.credit_poll_interval,
                        &self.cancel,
                    )
                    .await?;

                    if counters.quota_met_for(target, &limits) {
                        tracing::debug!("Quota met, skipping {:?}: {}", target, post.url);
                        counters.increment_skipped();
                        continue;
                    }

                    tracing::info!("Downloading imgur post: {}", post.title);
                    let images = self
                        .album_host
                        .resolve_and_download(&post.url, &post.title)
                        .await;

                    match images {
                        0 => tracing::warn!("Nothing downloaded for {}", post.url),
                        1 => tracing::info!("Downloaded image: {}", post.url),
                        n => tracing::info!("Downloaded album of {} images: {}", n, post.url),
                    }
                    counters.record_album_host(images);
                }
            }
        }

        Ok(())
    }

    /// Fetch a post from a host without an API into the standalone directory.
    async fn fetch_direct(&self, post: &Post) {
        let destination = self.layout.images.join(derive_filename(&post.url));
        tracing::info!("Downloading image: {}", post.title);

        match self.fetcher.fetch(&post.url, &destination).await {
            Ok(FetchOutcome::Saved { .. }) => tracing::info!("Downloaded image: {}", post.url),
            Ok(FetchOutcome::Rejected { status }) => {
                tracing::debug!("{} answered HTTP {}", post.url, status)
            }
            Err(e) => tracing::warn!("Failed to download {}: {}", post.url, e),
        }
    }
}

/// Zip the standalone directory and each album directory separately.
///
/// Failures are logged per directory and do not stop the others. Returns the
/// archives that were written.
pub async fn archive_outputs(layout: &RunLayout, delete_source: bool) -> Vec<PathBuf> {
    let mut targets = Vec::new();
    if layout.images.is_dir() {
        targets.push(layout.images.clone());
    }

    match std::fs::read_dir(&layout.albums) {
        Ok(entries) => {
            let mut albums: Vec<PathBuf> = entries
                .filter_map(|entry| match entry {
                    Ok(entry) => Some(entry.path()),
                    Err(e) => {
                        tracing::warn!("Failed to read album entry: {}", e);
                        None
                    }
                })
                .filter(|path| path.is_dir())
                .collect();
            albums.sort();
            targets.extend(albums);
        }
        Err(e) => tracing::warn!("Failed to list {}: {}", layout.albums.display(), e),
    }

    let mut archives = Vec::with_capacity(targets.len());
    for directory in targets {
        let source = directory.clone();
        let result =
            tokio::task::spawn_blocking(move || archive_directory(&source, delete_source)).await;

        match result {
            Ok(Ok(zip_path)) => {
                tracing::info!("Archived {}", zip_path.display());
                archives.push(zip_path);
            }
            Ok(Err(e)) => tracing::warn!("{}", e),
            Err(e) => tracing::warn!("Archiving {} panicked: {}", directory.display(), e),
        }
    }

    archives
}
