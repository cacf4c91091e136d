//! Reddit feed module.
//!
//! This module provides:
//! - Application-only OAuth client for multireddit listings
//! - Listing and post types
//! - The post filter deciding which posts are worth downloading

pub mod client;
pub mod filter;
pub mod types;

pub use client::{PostFeed, RedditClient};
pub use filter::{filter_posts, is_acceptable, ALLOWED_HOSTS};
pub use types::Post;
