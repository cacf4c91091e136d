//! Console output utilities.

use console::style;

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("OK").green().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print the application banner.
pub fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════════════════════╗
║     Wally                                             ║
║     Top wallpapers from a multireddit, zipped         ║
╚═══════════════════════════════════════════════════════╝
"#;
    println!("{}", style(banner).cyan());
}

/// Print configuration summary.
pub fn print_config_summary(
    multireddit: &str,
    time_window: &str,
    limits: (u32, u32),
    download_dir: &str,
) {
    println!();
    println!("{}", style("Configuration:").bold());
    println!("  Multireddit: {}", multireddit);
    println!("  Window: {}", time_window);
    println!("  Albums: {}", limits.0);
    println!("  Images: {}", limits.1);
    println!("  Directory: {}", download_dir);
    println!();
}
