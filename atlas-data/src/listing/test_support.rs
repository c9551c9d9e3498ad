//! Shared fixtures for listing import tests.

use std::time::Duration;

use async_trait::async_trait;

use super::{CountrySource, ListingUrl, TransportError};

/// Stub [`CountrySource`] implementation backed by in-memory data.
#[derive(Debug, Clone)]
pub(crate) struct StubSource {
    body: Vec<u8>,
    status: u16,
}

impl StubSource {
    /// Construct a stub source answering requests with `body`.
    pub(crate) fn new(body: impl Into<Vec<u8>>) -> Self {
        Self {
            body: body.into(),
            status: 200,
        }
    }

    /// Construct a stub source answering every request with an HTTP error.
    pub(crate) fn with_status(status: u16) -> Self {
        Self {
            body: Vec::new(),
            status,
        }
    }
}

#[async_trait(?Send)]
impl CountrySource for StubSource {
    async fn fetch_listing(
        &self,
        url: &ListingUrl,
        _timeout: Duration,
    ) -> Result<Vec<u8>, TransportError> {
        if !(200..300).contains(&self.status) {
            return Err(TransportError::Http {
                url: url.to_string(),
                status: self.status,
                message: format!("stub responded with status {}", self.status),
            });
        }
        Ok(self.body.clone())
    }
}

/// Drive a future to completion on a current-thread runtime.
pub(crate) fn block_on_for_tests<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("build test runtime")
        .block_on(future)
}
