//! Imgur image and album downloading.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::download::{FetchOutcome, ImageFetcher};
use crate::error::Result;
use crate::fs::{album_dir_name, imgur_filename, RunLayout};
use crate::imgur::client::ImgurClient;
use crate::imgur::types::{AlbumData, Credits, ImgurImage};

/// A host that serves both single images and albums behind a rate-limited API.
#[async_trait]
pub trait AlbumHost: Send + Sync {
    /// Whether `url` belongs to this host.
    fn handles(&self, url: &str) -> bool;

    /// Whether `url` points at an album, judged from its shape alone.
    fn is_album(&self, url: &str) -> bool;

    /// Requests left in the current rate window.
    async fn remaining_credits(&self) -> Result<i64>;

    /// Download whatever `url` points at and return how many images were saved.
    ///
    /// Multi-image albums go to a directory named after `album_title`. API
    /// failures are logged and count as zero images.
    async fn resolve_and_download(&self, url: &str, album_title: &str) -> usize;
}

/// Downloads imgur images and albums into the run layout.
pub struct ImgurDownloader<F> {
    client: ImgurClient,
    fetcher: F,
    image_dir: PathBuf,
    album_dir: PathBuf,
}

impl<F: ImageFetcher> ImgurDownloader<F> {
    pub fn new(client: ImgurClient, fetcher: F, layout: &RunLayout) -> Self {
        Self {
            client,
            fetcher,
            image_dir: layout.images.clone(),
            album_dir: layout.albums.clone(),
        }
    }

    /// Full credit table, for reporting.
    pub async fn credits(&self) -> Result<Credits> {
        self.client.credits().await
    }

    async fn try_resolve(&self, url: &str, album_title: &str) -> Result<usize> {
        let Some(imgur_id) = imgur_id(url) else {
            tracing::debug!("No imgur id in {}", url);
            return Ok(0);
        };

        if self.is_album(url) {
            let album = self.client.get_album(imgur_id).await?;
            Ok(self.download_album(album, &album_dir_name(album_title)).await)
        } else if url.contains("imgur.com/gallery/") {
            tracing::info!("Skipping unsupported imgur gallery: {}", url);
            Ok(0)
        } else {
            let image = self.client.get_image(imgur_id).await?;
            let saved = self
                .download_image(&ImgurImage::from(image), &self.image_dir)
                .await?;
            Ok(usize::from(saved))
        }
    }

    /// Download every image of an album; returns the number saved.
    ///
    /// A single-image album is stored with the standalone images.
    async fn download_album(&self, album: AlbumData, dir_name: &str) -> usize {
        let images: Vec<ImgurImage> = album
            .images
            .iter()
            .filter_map(|raw| match ImgurImage::from_keyed(raw) {
                Ok(image) => Some(image),
                Err(e) => {
                    tracing::warn!("Skipping image in album {}: {}", album.id, e);
                    None
                }
            })
            .collect();

        if images.len() != album.images_count {
            tracing::debug!(
                "Album {} reports {} images, {} usable",
                album.id,
                album.images_count,
                images.len()
            );
        }

        let destination = if images.len() == 1 {
            self.image_dir.clone()
        } else {
            self.album_dir.join(dir_name)
        };

        let mut saved = 0;
        for image in &images {
            match self.download_image(image, &destination).await {
                Ok(true) => saved += 1,
                Ok(false) => {}
                Err(e) => tracing::warn!("Failed to download imgur image {}: {}", image.id, e),
            }
        }
        saved
    }

    /// Download one image into `destination`, creating it if needed.
    async fn download_image(&self, image: &ImgurImage, destination: &Path) -> Result<bool> {
        tokio::fs::create_dir_all(destination).await?;

        let path = destination.join(imgur_filename(&image.id, &image.mime_type));
        let outcome = self.fetcher.fetch(&image.link, &path).await?;

        if let FetchOutcome::Rejected { status } = outcome {
            tracing::warn!("Imgur image {} returned HTTP {}", image.id, status);
            return Ok(false);
        }
        Ok(true)
    }
}

#[async_trait]
impl<F: ImageFetcher> AlbumHost for ImgurDownloader<F> {
    fn handles(&self, url: &str) -> bool {
        url.contains("imgur.com")
    }

    fn is_album(&self, url: &str) -> bool {
        url.contains("imgur.com/a/")
    }

    async fn remaining_credits(&self) -> Result<i64> {
        Ok(self.client.credits().await?.user_remaining)
    }

    async fn resolve_and_download(&self, url: &str, album_title: &str) -> usize {
        match self.try_resolve(url, album_title).await {
            Ok(count) => count,
            Err(e) => {
                tracing::warn!("Imgur download of {} failed: {}", url, e);
                0
            }
        }
    }
}

/// Extract the imgur id from an image or album URL: the last path segment
/// without extension, query or fragment.
pub fn imgur_id(url: &str) -> Option<&str> {
    if !url.contains("imgur") {
        return None;
    }

    let url = url.split(|c: char| c == '?' || c == '#').next().unwrap_or(url);
    let segment = url.rfind('/').map_or(url, |idx| &url[idx + 1..]);
    let id = segment.split('.').next().unwrap_or(segment);

    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}
