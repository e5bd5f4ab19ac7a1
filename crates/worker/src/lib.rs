//! Catalog price tracking.
//!
//! Fetches each tracked shop page, extracts the price with the catalog's
//! selector and stores a parse result per attempt. Used by the
//! `switchdeck-worker` binary and by the API's periodic refresh task.

pub mod config;
pub mod fetcher;
pub mod price_tracker;

pub use config::{ConfigError, WorkerConfig};
pub use fetcher::{FetchError, HttpPageFetcher, PageFetcher};
