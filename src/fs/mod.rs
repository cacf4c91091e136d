//! Filesystem module.
//!
//! Provides:
//! - Filename derivation per image host
//! - Run directory layout
//! - Zip archiving of finished directories

pub mod archive;
pub mod naming;
pub mod paths;

pub use archive::{archive_directory, archive_path};
pub use naming::{album_dir_name, derive_filename, imgur_filename, IMAGE_EXTENSIONS};
pub use paths::{ensure_dir, RunLayout};
