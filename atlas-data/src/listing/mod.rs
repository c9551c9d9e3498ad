//! Facilities for fetching and importing the remote country listing.
#![forbid(unsafe_code)]

mod error;
mod ops;
mod source;
mod types;

#[cfg(test)]
mod test_support;

pub use error::{ImportError, TransportError};
pub use ops::import_countries;
pub use source::{CountrySource, DEFAULT_USER_AGENT, HttpCountrySource};
pub use types::{DEFAULT_LISTING_URL, DEFAULT_TIMEOUT, ImportOptions, ListingUrl};
