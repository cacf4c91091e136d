//! Progress indicators.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Spinner shown while waiting on the feed.
pub fn create_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner().with_message(message.to_string());
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg} [{elapsed}]")
            .unwrap(),
    );
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

/// Byte progress for one large image; `name` is the file being written.
pub fn create_download_bar(total: u64, name: &str) -> ProgressBar {
    ProgressBar::new(total)
        .with_style(
            ProgressStyle::with_template(
                "{msg:30!} [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} {bytes_per_sec}",
            )
            .unwrap()
            .progress_chars("=> "),
        )
        .with_message(name.to_string())
}
