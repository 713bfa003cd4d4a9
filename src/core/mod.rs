//! Core utilities for the Yahoo Fantasy session
//!
//! - `cache`: file helpers and the URL-keyed web cache

pub mod cache;

// Re-export commonly used items for convenience
pub use cache::{cache_key, try_read_to_string, write_string, CacheEntry, WebCache};
