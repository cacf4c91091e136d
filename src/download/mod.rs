//! Download module.
//!
//! This module provides:
//! - Streaming image fetches
//! - Run counters and quota checks
//! - The cancellable rate-budget wait
//! - The download loop and end-of-run archiving

pub mod fetch;
pub mod rate;
pub mod run;
pub mod state;

pub use fetch::{FetchOutcome, HttpFetcher, ImageFetcher, CHUNK_SIZE};
pub use rate::wait_for_credits;
pub use run::{archive_outputs, RunSettings, Runner};
pub use state::{DownloadTarget, QuotaLimits, RunCounters};
