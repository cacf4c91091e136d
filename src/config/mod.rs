//! Configuration module for wally.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Setting value types (quotas, yes/no switches, time windows)
//! - Configuration validation

pub mod loader;
pub mod settings;
pub mod validation;

pub use loader::{Config, DownloadConfig, ImgurConfig, RedditConfig};
pub use settings::{LimitSetting, TimeWindow, Toggle};
pub use validation::{parse_limit, validate_config};
