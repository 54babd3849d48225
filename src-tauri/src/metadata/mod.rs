//! App metadata lookup with a local SQLite cache in front of the appstream
//! endpoint.

pub mod cache;
pub mod resolver;

pub use cache::MetadataCache;
pub use resolver::MetadataResolver;

/// Metadata rarely changes within a day.
pub const CACHE_TTL_HOURS: i64 = 24;

pub const CACHE_FILE: &str = "app_metadata.db";
