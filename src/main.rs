//! Wally - CLI entry point.

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{fmt, EnvFilter};

use wally::{
    cli::Args,
    config::{validate_config, Config},
    download::{archive_outputs, HttpFetcher, RunCounters, RunSettings, Runner},
    error::{exit_codes, Error, Result},
    fs::RunLayout,
    imgur::{ImgurClient, ImgurDownloader},
    output::{
        create_spinner, print_banner, print_config_summary, print_credits, print_error,
        print_info, print_run_summary, print_success, print_warning,
    },
    reddit::{filter_posts, PostFeed, RedditClient},
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            match e {
                Error::Cancelled => ExitCode::from(exit_codes::ABORT as u8),
                Error::Config(_) | Error::ConfigValidation { .. } | Error::MissingConfig(_) => {
                    ExitCode::from(exit_codes::CONFIG_ERROR as u8)
                }
                Error::Authentication(_) | Error::Api(_) | Error::Http(_) | Error::Json(_) => {
                    ExitCode::from(exit_codes::API_ERROR as u8)
                }
                Error::Download(_) | Error::Imgur { .. } | Error::Archive { .. } => {
                    ExitCode::from(exit_codes::DOWNLOAD_ERROR as u8)
                }
                _ => ExitCode::from(exit_codes::UNEXPECTED_ERROR as u8),
            }
        }
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    print_banner();

    // Load configuration; credentials have no defaults, so the file is required
    let config_path = args.config.clone();
    let mut config = Config::load(&config_path)?;
    args.merge_into_config(&mut config);

    // Validate everything before touching the network
    let limits = validate_config(&config)?;

    let layout = RunLayout::from_config(&config);
    print_config_summary(
        &format!(
            "{}/{}",
            config.reddit.multireddit_owner, config.reddit.multireddit_name
        ),
        &config.reddit.time_window.to_string(),
        (limits.albums, limits.standalones),
        &layout.root.display().to_string(),
    );

    // Fetch and filter the feed
    let reddit = RedditClient::new(&config.reddit)?;
    let spinner = create_spinner("Fetching posts from reddit...");
    let fetched = reddit
        .fetch_candidate_posts(config.reddit.time_window)
        .await;
    spinner.finish_and_clear();
    let posts = filter_posts(fetched?);
    print_info(&format!("{} posts to consider", posts.len()));

    layout.create()?;

    let fetcher = HttpFetcher::new(&config.reddit.user_agent, true)?;
    let imgur = ImgurClient::new(&config.imgur.app_id)?;
    let album_host = ImgurDownloader::new(imgur, fetcher.clone(), &layout);

    // Ctrl-C stops the loop but still archives and reports
    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            print_warning("Interrupted, finishing up...");
            on_signal.cancel();
        }
    });

    let settings = RunSettings {
        limits,
        credit_threshold: config.download.credit_threshold,
        credit_poll_interval: Duration::from_secs(config.download.credit_poll_seconds),
    };
    let runner = Runner::new(&album_host, &fetcher, &layout, settings, cancel.clone());

    let mut counters = RunCounters::default();
    let outcome = runner.run(&posts, &mut counters).await;

    if config.download.compress.is_on() {
        print_info("Compressing downloads...");
        let archives =
            archive_outputs(&layout, config.download.remove_after_compress.is_on()).await;
        print_success(&format!("Wrote {} archive(s)", archives.len()));
    }

    print_run_summary(&counters);

    match album_host.credits().await {
        Ok(credits) => print_credits(&credits),
        Err(e) => tracing::warn!("Could not read imgur credits: {}", e),
    }

    outcome
}
