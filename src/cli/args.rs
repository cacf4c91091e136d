//! Command-line argument definitions using clap.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::{Config, LimitSetting, TimeWindow, Toggle};

/// Wallpaper harvester CLI.
#[derive(Parser, Debug)]
#[command(
    name = "wally",
    version,
    about = "Download the top wallpapers of a reddit multireddit",
    long_about = "Fetches the top posts of a reddit multireddit, downloads the linked images \
                  and imgur albums up to the configured quotas, and zips the results."
)]
pub struct Args {
    /// Base directory for the run (defaults to today's date).
    #[arg(short = 'd', long = "directory")]
    pub download_dir: Option<PathBuf>,

    /// Maximum number of albums to download.
    #[arg(short = 'a', long)]
    pub album_limit: Option<String>,

    /// Maximum number of standalone images to download.
    #[arg(short = 's', long)]
    pub standalone_limit: Option<String>,

    /// Time window of the top listing.
    #[arg(short, long, value_enum)]
    pub window: Option<TimeWindowArg>,

    /// Imgur application id.
    #[arg(long = "imgur-id", env = "WALLY_IMGUR_ID")]
    pub imgur_id: Option<String>,

    /// Imgur application secret.
    #[arg(long = "imgur-secret", env = "WALLY_IMGUR_SECRET", hide_env_values = true)]
    pub imgur_secret: Option<String>,

    /// Reddit application id.
    #[arg(long = "reddit-id", env = "WALLY_REDDIT_ID")]
    pub reddit_id: Option<String>,

    /// Reddit application secret.
    #[arg(long = "reddit-secret", env = "WALLY_REDDIT_SECRET", hide_env_values = true)]
    pub reddit_secret: Option<String>,

    /// Path to configuration file.
    #[arg(short, long, default_value = "wally.toml")]
    pub config: PathBuf,

    /// Leave the downloaded directories uncompressed.
    #[arg(long)]
    pub no_compress: bool,

    /// Keep the source directories after compressing them.
    #[arg(long)]
    pub keep_sources: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

/// CLI time window argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TimeWindowArg {
    Hour,
    Day,
    Week,
    Month,
    Year,
    All,
}

impl From<TimeWindowArg> for TimeWindow {
    fn from(arg: TimeWindowArg) -> Self {
        match arg {
            TimeWindowArg::Hour => TimeWindow::Hour,
            TimeWindowArg::Day => TimeWindow::Day,
            TimeWindowArg::Week => TimeWindow::Week,
            TimeWindowArg::Month => TimeWindow::Month,
            TimeWindowArg::Year => TimeWindow::Year,
            TimeWindowArg::All => TimeWindow::All,
        }
    }
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(self, config: &mut Config) {
        if let Some(dir) = self.download_dir {
            config.download.download_dir = Some(dir);
        }

        // Limits stay raw so validation reports bad CLI values the same way as file values
        if let Some(limit) = self.album_limit {
            config.download.album_limit = Some(LimitSetting::from(limit));
        }

        if let Some(limit) = self.standalone_limit {
            config.download.standalone_limit = Some(LimitSetting::from(limit));
        }

        if let Some(window) = self.window {
            config.reddit.time_window = window.into();
        }

        if let Some(id) = self.imgur_id {
            config.imgur.app_id = id;
        }

        if let Some(secret) = self.imgur_secret {
            config.imgur.secret = secret;
        }

        if let Some(id) = self.reddit_id {
            config.reddit.app_id = id;
        }

        if let Some(secret) = self.reddit_secret {
            config.reddit.secret = secret;
        }

        if self.no_compress {
            config.download.compress = Toggle(false);
        }

        if self.keep_sources {
            config.download.remove_after_compress = Toggle(false);
        }
    }
}
