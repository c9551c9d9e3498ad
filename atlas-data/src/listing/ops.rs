//! Orchestration of the country listing import.

use atlas_core::{Country, ImportSummary, Progress, SqliteCountryStore};

use super::source::CountrySource;
use super::types::{ListingUrl, RawCountry};
use super::{ImportError, ImportOptions};

/// Fetch the country listing and upsert it into the store.
///
/// The run validates the source URL, performs one HTTP GET with the
/// configured timeout, parses the body as a JSON array, and writes every
/// valid element inside a single transaction. An element missing a required
/// field is warned about through `progress` and excluded; it never aborts the
/// batch. Any other failure aborts the run and leaves the store untouched.
///
/// # Examples
/// ```no_run
/// use atlas_core::{LogProgress, SqliteCountryStore};
/// use atlas_data::listing::{HttpCountrySource, ImportOptions, import_countries};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut store = SqliteCountryStore::open("countries.db")?;
/// let source = HttpCountrySource::new();
/// let summary = tokio::runtime::Runtime::new()?.block_on(async {
///     import_countries(&source, &mut store, &ImportOptions::default(), &mut LogProgress).await
/// })?;
/// println!("{summary}");
/// # Ok(())
/// # }
/// ```
pub async fn import_countries<S: CountrySource + ?Sized>(
    source: &S,
    store: &mut SqliteCountryStore,
    options: &ImportOptions,
    progress: &mut dyn Progress,
) -> Result<ImportSummary, ImportError> {
    let url = ListingUrl::parse(&options.url)?;
    progress.info(&format!("Fetching country data from: {url}"));

    let body = source
        .fetch_listing(&url, options.timeout)
        .await
        .map_err(|source| ImportError::Fetch { source })?;

    let records = parse_listing(&body)?;
    log::debug!("parsed {} listing elements", records.len());
    let countries = validate_listing(records, progress);

    store
        .upsert_countries(&countries, progress)
        .map_err(|source| ImportError::Persist { source })
}

/// Parse the response body into raw listing elements.
///
/// Invalid JSON and a non-array root are distinct failures so the operator
/// message can say which contract the source broke.
pub(crate) fn parse_listing(body: &[u8]) -> Result<Vec<RawCountry>, ImportError> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|source| ImportError::Parse { source })?;
    if !value.is_array() {
        return Err(ImportError::NotAnArray);
    }
    serde_json::from_value(value).map_err(|source| ImportError::Parse { source })
}

/// Drop elements missing a required field, warning per skipped element.
///
/// A present-but-null `population` survives and defaults to zero; a wholly
/// absent `population` key excludes the element like any other missing
/// required field.
pub(crate) fn validate_listing(
    records: Vec<RawCountry>,
    progress: &mut dyn Progress,
) -> Vec<Country> {
    let mut countries = Vec::with_capacity(records.len());
    for record in records {
        if let Some(field) = record.missing_required_field() {
            progress.warn(&format!(
                "Skipping country: missing required field '{field}'"
            ));
            continue;
        }
        let RawCountry {
            name: Some(name),
            alpha2_code: Some(alpha2_code),
            alpha3_code: Some(alpha3_code),
            population: Some(population),
            region: Some(region),
            capital,
            top_level_domains,
        } = record
        else {
            continue;
        };
        countries.push(Country {
            name,
            alpha2_code,
            alpha3_code,
            population: population.unwrap_or(0),
            region,
            capital,
            top_level_domains: top_level_domains.unwrap_or_default(),
        });
    }
    countries
}
