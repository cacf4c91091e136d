//! End-of-run reporting.

use console::style;

use crate::download::RunCounters;
use crate::imgur::Credits;

/// Print what the run downloaded.
pub fn print_run_summary(counters: &RunCounters) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!(
        "Downloaded {} images and {} albums.",
        style(counters.standalones).green(),
        style(counters.albums).green()
    );
    if counters.skipped > 0 {
        println!("  Skipped: {}", style(counters.skipped).yellow());
    }
    println!("{}", style("═".repeat(50)).dim());
}

/// Print the imgur rate limit table.
pub fn print_credits(credits: &Credits) {
    let reset = chrono::DateTime::from_timestamp(credits.user_reset, 0)
        .map(|at| at.with_timezone(&chrono::Local).format("%H:%M:%S").to_string())
        .unwrap_or_else(|| credits.user_reset.to_string());

    println!("{}", style("Imgur credits:").bold());
    println!(
        "  User:   {}/{} (resets {})",
        credits.user_remaining, credits.user_limit, reset
    );
    println!(
        "  Client: {}/{}",
        credits.client_remaining, credits.client_limit
    );
}
