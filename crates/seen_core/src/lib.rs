//! Fixed-size seeded Bloom filter for "have I seen this key before?" checks,
//! plus a first-seen counter built on it.

pub mod consts;
pub mod errors;
pub mod hash;
pub mod filter;
pub mod config;
pub mod tracker;

pub use config::FilterConfig;
pub use errors::{Result, SeenError};
pub use filter::Filter;
pub use hash::{seeded_hash, SeedHasher};
pub use tracker::UniqueTracker;
