//! Typed wrappers and options for the country listing import.

use std::{fmt, time::Duration};

use serde::{Deserialize, Deserializer};
use url::Url;

use super::ImportError;

/// Default remote location of the country listing.
pub const DEFAULT_LISTING_URL: &str =
    "https://storage.googleapis.com/dcr-django-test/countries.json";

/// Default network timeout for fetching the listing.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A validated URL pointing at a country listing document.
///
/// Construction rejects strings that fail to parse or lack a host, so a
/// [`ListingUrl`] is always safe to hand to the transport.
///
/// # Examples
/// ```
/// use atlas_data::listing::ListingUrl;
///
/// let url = ListingUrl::parse("https://example.org/countries.json").expect("valid URL");
/// assert_eq!(url.as_str(), "https://example.org/countries.json");
/// assert!(ListingUrl::parse("not a url").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingUrl(Url);

impl ListingUrl {
    /// Parse and validate a listing URL.
    pub fn parse(value: &str) -> Result<Self, ImportError> {
        let url = Url::parse(value).map_err(|source| ImportError::InvalidUrl {
            url: value.to_owned(),
            source,
        })?;
        if !url.has_host() {
            return Err(ImportError::UrlMissingHost {
                url: value.to_owned(),
            });
        }
        Ok(Self(url))
    }

    /// View the URL as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for ListingUrl {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ListingUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ListingUrl {
    type Error = ImportError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

/// Options controlling an import run.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use atlas_data::listing::ImportOptions;
///
/// let options = ImportOptions::default().with_timeout(Duration::from_secs(5));
/// assert_eq!(options.timeout, Duration::from_secs(5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOptions {
    /// Location of the listing document.
    pub url: String,
    /// Network timeout covering the whole request.
    pub timeout: Duration,
}

impl ImportOptions {
    /// Construct options targeting `url` with the default timeout.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the network timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self::new(DEFAULT_LISTING_URL)
    }
}

/// A single listing element as it appears on the wire.
///
/// Every field is optional at this stage; validation decides which elements
/// survive into the upsert batch.
#[derive(Debug, Deserialize)]
pub(crate) struct RawCountry {
    #[serde(default)]
    pub(crate) name: Option<String>,
    #[serde(default, rename = "alpha2Code")]
    pub(crate) alpha2_code: Option<String>,
    #[serde(default, rename = "alpha3Code")]
    pub(crate) alpha3_code: Option<String>,
    // Missing key and explicit null must read differently: an absent
    // population excludes the element, a null one defaults to zero.
    #[serde(default, deserialize_with = "nested_option")]
    pub(crate) population: Option<Option<i64>>,
    #[serde(default)]
    pub(crate) region: Option<String>,
    #[serde(default)]
    pub(crate) capital: Option<String>,
    #[serde(default, rename = "topLevelDomain")]
    pub(crate) top_level_domains: Option<Vec<String>>,
}

impl RawCountry {
    /// Name of the first missing required field, in document order.
    pub(crate) fn missing_required_field(&self) -> Option<&'static str> {
        if self.name.is_none() {
            Some("name")
        } else if self.alpha2_code.is_none() {
            Some("alpha2Code")
        } else if self.alpha3_code.is_none() {
            Some("alpha3Code")
        } else if self.population.is_none() {
            Some("population")
        } else if self.region.is_none() {
            Some("region")
        } else {
            None
        }
    }
}

fn nested_option<'de, D>(deserializer: D) -> Result<Option<Option<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<i64>::deserialize(deserializer).map(Some)
}
