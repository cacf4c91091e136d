//! Wally - a wallpaper harvester.
//!
//! Reads the top posts of a reddit multireddit, keeps the ones that link to
//! images, downloads imgur albums and single images up to per-run quotas,
//! and zips the results.
//!
//! # Features
//!
//! - Application-only reddit OAuth with listing pagination
//! - Imgur album and image resolution with rate-budget waiting
//! - Host-aware file naming for direct image links
//! - Zip archiving of the downloaded directories
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use wally::{validate_config, Config, PostFeed, RedditClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(Path::new("wally.toml"))?;
//!     let limits = validate_config(&config)?;
//!
//!     let reddit = RedditClient::new(&config.reddit)?;
//!     let posts = reddit.fetch_candidate_posts(config.reddit.time_window).await?;
//!     println!("{} candidates, quotas {:?}", posts.len(), limits);
//!
//!     // ... download logic
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod fs;
pub mod imgur;
pub mod output;
pub mod reddit;

// Re-exports for convenience
pub use config::{validate_config, Config};
pub use download::{archive_outputs, QuotaLimits, RunCounters, RunSettings, Runner};
pub use error::{Error, Result};
pub use fs::RunLayout;
pub use imgur::{AlbumHost, ImgurClient, ImgurDownloader};
pub use reddit::{filter_posts, Post, PostFeed, RedditClient};
