//! Configuration structures and loading logic.

use crate::config::settings::{LimitSetting, TimeWindow, Toggle};
use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub download: DownloadConfig,

    #[serde(default)]
    pub reddit: RedditConfig,

    #[serde(default)]
    pub imgur: ImgurConfig,
}

/// Download options configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadConfig {
    /// Base directory for the run. Empty or absent means today's date.
    #[serde(default)]
    pub download_dir: Option<PathBuf>,

    /// Maximum number of albums per run.
    #[serde(default)]
    pub album_limit: Option<LimitSetting>,

    /// Maximum number of standalone images per run.
    #[serde(default)]
    pub standalone_limit: Option<LimitSetting>,

    /// Subdirectory for standalone images.
    #[serde(default = "default_standalone_path")]
    pub standalone_path: String,

    /// Subdirectory for album directories.
    #[serde(default = "default_album_path")]
    pub album_path: String,

    /// Whether to zip the downloaded directories at the end of the run.
    #[serde(default)]
    pub compress: Toggle,

    /// Whether to delete the source directories once zipped.
    #[serde(default)]
    pub remove_after_compress: Toggle,

    /// Minimum imgur credits required before issuing a request.
    #[serde(default = "default_credit_threshold")]
    pub credit_threshold: u32,

    /// Seconds to wait between imgur credit checks while below the threshold.
    #[serde(default = "default_credit_poll_seconds")]
    pub credit_poll_seconds: u64,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            download_dir: None,
            album_limit: None,
            standalone_limit: None,
            standalone_path: default_standalone_path(),
            album_path: default_album_path(),
            compress: Toggle::default(),
            remove_after_compress: Toggle::default(),
            credit_threshold: default_credit_threshold(),
            credit_poll_seconds: default_credit_poll_seconds(),
        }
    }
}

/// Reddit feed configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RedditConfig {
    /// User agent sent with every reddit request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Reddit application id.
    #[serde(default)]
    pub app_id: String,

    /// Reddit application secret.
    #[serde(default)]
    pub secret: String,

    /// Owner of the multireddit to read.
    #[serde(default)]
    pub multireddit_owner: String,

    /// Name of the multireddit to read.
    #[serde(default)]
    pub multireddit_name: String,

    /// Window of the "top" listing.
    #[serde(default)]
    pub time_window: TimeWindow,

    /// Maximum number of candidate posts to fetch.
    #[serde(default = "default_post_limit")]
    pub post_limit: usize,
}

impl Default for RedditConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            app_id: String::new(),
            secret: String::new(),
            multireddit_owner: String::new(),
            multireddit_name: String::new(),
            time_window: TimeWindow::default(),
            post_limit: default_post_limit(),
        }
    }
}

/// Imgur API credentials.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImgurConfig {
    #[serde(default)]
    pub app_id: String,

    #[serde(default)]
    pub secret: String,
}

fn default_standalone_path() -> String {
    "images".to_string()
}

fn default_album_path() -> String {
    "albums".to_string()
}

fn default_credit_threshold() -> u32 {
    50
}

fn default_credit_poll_seconds() -> u64 {
    3600
}

fn default_user_agent() -> String {
    format!("wally/{} (wallpaper harvester)", env!("CARGO_PKG_VERSION"))
}

fn default_post_limit() -> usize {
    100
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}. Create one from wally.example.toml",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the effective download directory.
    pub fn download_directory(&self) -> PathBuf {
        match &self.download.download_dir {
            Some(dir) if !dir.as_os_str().is_empty() => dir.clone(),
            _ => PathBuf::from(chrono::Local::now().format("%Y-%m-%d").to_string()),
        }
    }
}
