//! Error types produced by the country listing import.

use std::io;

use atlas_core::StoreError;
use thiserror::Error;

/// Errors produced while importing the country listing.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ImportError {
    /// The source URL could not be parsed.
    #[error("invalid source URL {url:?}: {source}")]
    InvalidUrl {
        /// The rejected URL string.
        url: String,
        /// Parse failure reported by the `url` crate.
        #[source]
        source: url::ParseError,
    },
    /// The source URL parsed but lacks a host.
    #[error("invalid source URL {url:?}: missing host")]
    UrlMissingHost {
        /// The rejected URL string.
        url: String,
    },
    /// The listing could not be fetched.
    #[error("failed to fetch country listing: {source}")]
    Fetch { source: TransportError },
    /// The response body was not valid JSON.
    #[error("failed to parse country listing as JSON: {source}")]
    Parse { source: serde_json::Error },
    /// The response body was valid JSON but not an array of countries.
    #[error("country listing did not contain a JSON array")]
    NotAnArray,
    /// Writing the batch to the store failed; the transaction rolled back.
    #[error("failed to persist country listing: {source}")]
    Persist { source: StoreError },
}

/// Transport-level errors encountered while issuing HTTP requests.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransportError {
    /// The server returned an HTTP error status.
    #[error("request to {url} failed with status {status}: {message}")]
    Http {
        /// Fully qualified request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Short error description supplied by the server.
        message: String,
    },
    /// The request failed due to a timeout or I/O error.
    #[error("network error contacting {url}: {source}")]
    Network {
        /// Fully qualified request URL.
        url: String,
        /// I/O error reported by the transport.
        source: io::Error,
    },
}
