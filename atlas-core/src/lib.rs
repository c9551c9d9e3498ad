//! Domain types and SQLite-backed storage for the atlas country statistics
//! service.
//!
//! The crate models two related records: a region, created lazily the first
//! time an import mentions it, and a country, keyed by name and owned by
//! exactly one region. [`SqliteCountryStore`] persists both and answers the
//! per-region aggregate query served by the stats endpoint.

#![forbid(unsafe_code)]

mod country;
mod progress;
mod stats;
pub mod store;
mod summary;

pub use country::Country;
pub use progress::{LogProgress, NullProgress, Progress};
pub use stats::RegionStats;
pub use store::{SCHEMA_VERSION, SchemaError, SqliteCountryStore, StoreError, initialise_schema};
pub use summary::ImportSummary;
