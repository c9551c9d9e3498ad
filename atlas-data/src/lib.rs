//! Import pipeline for the atlas country statistics service.
//!
//! Fetches a remote JSON country listing, validates its shape, and upserts
//! the surviving elements into an [`atlas_core::SqliteCountryStore`] as one
//! atomic batch.

#![forbid(unsafe_code)]

pub mod listing;

pub use listing::{
    CountrySource, DEFAULT_LISTING_URL, HttpCountrySource, ImportError, ImportOptions, ListingUrl,
    TransportError, import_countries,
};
