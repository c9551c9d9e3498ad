//! Transport abstraction over the remote country listing.

use std::{io, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::USER_AGENT;

use super::{ListingUrl, TransportError};

/// User agent sent with listing requests.
pub const DEFAULT_USER_AGENT: &str = "atlas-country-import/0.1";

/// Source of country listing documents.
#[async_trait(?Send)]
pub trait CountrySource {
    /// Fetch the listing at `url`, honouring `timeout` for the whole request.
    async fn fetch_listing(
        &self,
        url: &ListingUrl,
        timeout: Duration,
    ) -> Result<Vec<u8>, TransportError>;
}

/// HTTP implementation of [`CountrySource`].
#[derive(Debug)]
pub struct HttpCountrySource {
    client: Client,
    user_agent: String,
}

impl HttpCountrySource {
    /// Construct an HTTP-backed listing source.
    #[must_use]
    pub fn new() -> Self {
        let client = Client::builder()
            .build()
            .expect("client builder only fails with invalid configuration");
        Self {
            client,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }

    /// Override the default user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for HttpCountrySource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl CountrySource for HttpCountrySource {
    async fn fetch_listing(
        &self,
        url: &ListingUrl,
        timeout: Duration,
    ) -> Result<Vec<u8>, TransportError> {
        let response = self
            .client
            .get(url.as_str())
            .timeout(timeout)
            .header(USER_AGENT, self.user_agent.as_str())
            .send()
            .await
            .map_err(|err| convert_reqwest_error(err, url.as_str()))?
            .error_for_status()
            .map_err(|err| convert_reqwest_error(err, url.as_str()))?;
        let body = response
            .bytes()
            .await
            .map_err(|err| convert_reqwest_error(err, url.as_str()))?;
        Ok(body.to_vec())
    }
}

fn convert_reqwest_error(error: reqwest::Error, url: &str) -> TransportError {
    if let Some(status) = error.status() {
        return TransportError::Http {
            url: url.to_owned(),
            status: status.as_u16(),
            message: error.to_string(),
        };
    }

    let kind = if error.is_timeout() {
        io::ErrorKind::TimedOut
    } else {
        io::ErrorKind::Other
    };
    TransportError::Network {
        url: url.to_owned(),
        source: io::Error::new(kind, error),
    }
}
