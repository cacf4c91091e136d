//! Imgur module.
//!
//! This module provides:
//! - HTTP client for the imgur REST API
//! - API response types and the normalized image record
//! - The album-capable downloader used by the download loop

pub mod client;
pub mod downloader;
pub mod types;

pub use client::ImgurClient;
pub use downloader::{imgur_id, AlbumHost, ImgurDownloader};
pub use types::{Credits, ImgurImage};
