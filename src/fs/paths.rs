//! Path and directory management.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::Result;

/// Directories produced by a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunLayout {
    /// Base directory of the run.
    pub root: PathBuf,
    /// Standalone images.
    pub images: PathBuf,
    /// Parent of one directory per album.
    pub albums: PathBuf,
}

impl RunLayout {
    /// Build the layout described by the configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.download_directory(),
            &config.download.standalone_path,
            &config.download.album_path,
        )
    }

    pub fn new(root: PathBuf, standalone_path: &str, album_path: &str) -> Self {
        let images = root.join(standalone_path.trim_matches('/'));
        let albums = root.join(album_path.trim_matches('/'));
        Self {
            root,
            images,
            albums,
        }
    }

    /// Directory for a single album, given its already sanitized name.
    pub fn album_dir(&self, name: &str) -> PathBuf {
        self.albums.join(name)
    }

    /// Create the standalone and album directories, including parents.
    pub fn create(&self) -> Result<()> {
        ensure_dir(&self.images)?;
        ensure_dir(&self.albums)?;
        Ok(())
    }
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
