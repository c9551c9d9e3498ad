//! Facade crate for the atlas country statistics service.
//!
//! Re-exports the domain types and SQLite store from [`atlas_core`] together
//! with the import pipeline from [`atlas_data`], so applications can depend on
//! a single crate.

#![forbid(unsafe_code)]

pub use atlas_core::{
    Country, ImportSummary, LogProgress, NullProgress, Progress, RegionStats, SCHEMA_VERSION,
    SchemaError, SqliteCountryStore, StoreError,
};

pub use atlas_data::listing::{
    CountrySource, DEFAULT_LISTING_URL, HttpCountrySource, ImportError, ImportOptions, ListingUrl,
    TransportError, import_countries,
};
