#![forbid(unsafe_code)]

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use rusqlite::{Connection, Error as SqliteError, OptionalExtension};
use thiserror::Error;

use crate::{Country, ImportSummary, Progress, RegionStats};

use super::schema::{SchemaError, initialise_schema};

/// SQLite-backed store for regions and countries.
///
/// Opening a store enables foreign keys and initialises the schema, so a
/// fresh database file is usable immediately. Upserts run inside a single
/// transaction per batch: either every row in the batch lands or none does.
///
/// # Examples
/// ```
/// use atlas_core::{Country, NullProgress, SqliteCountryStore};
///
/// let mut store = SqliteCountryStore::open_in_memory().expect("open store");
/// let nigeria = Country::new("Nigeria", "NG", "NGA", 200_000_000, "Africa");
/// let summary = store
///     .upsert_countries(std::slice::from_ref(&nigeria), &mut NullProgress)
///     .expect("upsert countries");
/// assert_eq!(summary.regions_created, 1);
/// assert_eq!(summary.countries_created, 1);
///
/// let stats = store.region_stats().expect("query region stats");
/// assert_eq!(stats.len(), 1);
/// assert_eq!(stats[0].total_population, 200_000_000);
/// ```
pub struct SqliteCountryStore {
    connection: Connection,
}

impl SqliteCountryStore {
    /// Open (or create) a store backed by a database file on disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let connection =
            Connection::open(path.as_ref()).map_err(|source| StoreError::Open {
                path: path.as_ref().to_path_buf(),
                source,
            })?;
        Self::initialise(connection)
    }

    /// Open a store backed by an in-memory database.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let connection = Connection::open_in_memory().map_err(|source| StoreError::Sqlite {
            operation: "open in-memory database",
            source,
        })?;
        Self::initialise(connection)
    }

    fn initialise(mut connection: Connection) -> Result<Self, StoreError> {
        initialise_schema(&mut connection)?;
        Ok(Self { connection })
    }

    /// Access the underlying connection for ad-hoc queries.
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Upsert the supplied countries inside a single transaction.
    ///
    /// Regions are looked up by exact name and created on first sight.
    /// Countries are keyed by `name`: an existing row has its codes,
    /// population, capital, domains, and region overwritten; otherwise a new
    /// row is inserted. Per-entity notices go to `progress`.
    pub fn upsert_countries(
        &mut self,
        countries: &[Country],
        progress: &mut dyn Progress,
    ) -> Result<ImportSummary, StoreError> {
        let mut summary = ImportSummary::default();
        if countries.is_empty() {
            return Ok(summary);
        }

        let transaction =
            self.connection
                .transaction()
                .map_err(|source| StoreError::Sqlite {
                    operation: "begin import transaction",
                    source,
                })?;

        {
            let mut select_region = transaction
                .prepare_cached("SELECT id FROM regions WHERE name = ?1 LIMIT 1")
                .map_err(|source| StoreError::Sqlite {
                    operation: "prepare region lookup",
                    source,
                })?;
            let mut insert_region = transaction
                .prepare_cached("INSERT INTO regions (name) VALUES (?1)")
                .map_err(|source| StoreError::Sqlite {
                    operation: "prepare region insert",
                    source,
                })?;
            let mut select_country = transaction
                .prepare_cached("SELECT id FROM countries WHERE name = ?1 LIMIT 1")
                .map_err(|source| StoreError::Sqlite {
                    operation: "prepare country lookup",
                    source,
                })?;
            let mut insert_country = transaction
                .prepare_cached(
                    "INSERT INTO countries (
                        name,
                        alpha2_code,
                        alpha3_code,
                        population,
                        capital,
                        top_level_domains,
                        region_id
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                )
                .map_err(|source| StoreError::Sqlite {
                    operation: "prepare country insert",
                    source,
                })?;
            let mut update_country = transaction
                .prepare_cached(
                    "UPDATE countries SET
                        alpha2_code = ?1,
                        alpha3_code = ?2,
                        population = ?3,
                        capital = ?4,
                        top_level_domains = ?5,
                        region_id = ?6
                    WHERE id = ?7",
                )
                .map_err(|source| StoreError::Sqlite {
                    operation: "prepare country update",
                    source,
                })?;

            // Region names repeat heavily across a listing; resolve each once.
            let mut region_ids: HashMap<String, i64> = HashMap::new();

            for country in countries {
                let region_id = match region_ids.get(country.region.as_str()) {
                    Some(id) => *id,
                    None => {
                        let existing: Option<i64> = select_region
                            .query_row([country.region.as_str()], |row| row.get(0))
                            .optional()
                            .map_err(|source| StoreError::Sqlite {
                                operation: "look up region",
                                source,
                            })?;
                        let id = match existing {
                            Some(id) => id,
                            None => {
                                insert_region
                                    .execute([country.region.as_str()])
                                    .map_err(|source| StoreError::Sqlite {
                                        operation: "insert region",
                                        source,
                                    })?;
                                summary.regions_created += 1;
                                progress
                                    .info(&format!("Created new region: {}", country.region));
                                transaction.last_insert_rowid()
                            }
                        };
                        region_ids.insert(country.region.clone(), id);
                        id
                    }
                };

                let domains = encode_domains(country)?;
                let existing: Option<i64> = select_country
                    .query_row([country.name.as_str()], |row| row.get(0))
                    .optional()
                    .map_err(|source| StoreError::Sqlite {
                        operation: "look up country",
                        source,
                    })?;

                match existing {
                    Some(id) => {
                        update_country
                            .execute((
                                country.alpha2_code.as_str(),
                                country.alpha3_code.as_str(),
                                country.population,
                                country.capital.as_deref(),
                                domains.as_deref(),
                                region_id,
                                id,
                            ))
                            .map_err(|source| StoreError::Sqlite {
                                operation: "update country",
                                source,
                            })?;
                        summary.countries_updated += 1;
                        progress.info(&format!("Updated existing country: {}", country.name));
                    }
                    None => {
                        insert_country
                            .execute((
                                country.name.as_str(),
                                country.alpha2_code.as_str(),
                                country.alpha3_code.as_str(),
                                country.population,
                                country.capital.as_deref(),
                                domains.as_deref(),
                                region_id,
                            ))
                            .map_err(|source| StoreError::Sqlite {
                                operation: "insert country",
                                source,
                            })?;
                        summary.countries_created += 1;
                        progress.info(&format!("Created new country: {}", country.name));
                    }
                }
            }
        }

        transaction
            .commit()
            .map_err(|source| StoreError::Sqlite {
                operation: "commit import transaction",
                source,
            })?;

        Ok(summary)
    }

    /// Aggregate statistics for every region, including regions without
    /// countries.
    ///
    /// Counts and sums default to zero, never null. Every region appears
    /// exactly once; no further ordering is guaranteed.
    pub fn region_stats(&self) -> Result<Vec<RegionStats>, StoreError> {
        let mut statement = self
            .connection
            .prepare(
                "SELECT
                    regions.name,
                    COUNT(countries.id),
                    COALESCE(SUM(countries.population), 0)
                FROM regions
                LEFT JOIN countries ON countries.region_id = regions.id
                GROUP BY regions.id",
            )
            .map_err(|source| StoreError::Sqlite {
                operation: "prepare region statistics query",
                source,
            })?;
        let rows = statement
            .query_map([], |row| {
                Ok(RegionStats {
                    name: row.get(0)?,
                    number_countries: row.get(1)?,
                    total_population: row.get(2)?,
                })
            })
            .map_err(|source| StoreError::Sqlite {
                operation: "run region statistics query",
                source,
            })?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| StoreError::Sqlite {
                operation: "read region statistics rows",
                source,
            })?;
        Ok(rows)
    }

    /// Fetch a single country by its name, if present.
    ///
    /// The stored domain-list blob is decoded here; an absent blob yields an
    /// empty sequence.
    pub fn country_by_name(&self, name: &str) -> Result<Option<Country>, StoreError> {
        let mut statement = self
            .connection
            .prepare(
                "SELECT
                    countries.name,
                    countries.alpha2_code,
                    countries.alpha3_code,
                    countries.population,
                    countries.capital,
                    countries.top_level_domains,
                    regions.name
                FROM countries
                JOIN regions ON regions.id = countries.region_id
                WHERE countries.name = ?1
                LIMIT 1",
            )
            .map_err(|source| StoreError::Sqlite {
                operation: "prepare country query",
                source,
            })?;
        let row: Option<(String, String, String, i64, Option<String>, Option<String>, String)> =
            statement
                .query_row([name], |row| {
                    Ok((
                        row.get(0)?,
                        row.get(1)?,
                        row.get(2)?,
                        row.get(3)?,
                        row.get(4)?,
                        row.get(5)?,
                        row.get(6)?,
                    ))
                })
                .optional()
                .map_err(|source| StoreError::Sqlite {
                    operation: "read country row",
                    source,
                })?;

        row.map(
            |(name, alpha2_code, alpha3_code, population, capital, domains, region)| {
                let top_level_domains = decode_domains(&name, domains.as_deref())?;
                Ok(Country {
                    name,
                    alpha2_code,
                    alpha3_code,
                    population,
                    region,
                    capital,
                    top_level_domains,
                })
            },
        )
        .transpose()
    }
}

/// Encode a country's domain list for storage.
///
/// An empty list is stored as NULL so absent and empty read back the same.
fn encode_domains(country: &Country) -> Result<Option<String>, StoreError> {
    if country.top_level_domains.is_empty() {
        return Ok(None);
    }
    serde_json::to_string(&country.top_level_domains)
        .map(Some)
        .map_err(|source| StoreError::EncodeDomains {
            country: country.name.clone(),
            source,
        })
}

/// Decode a stored domain-list blob; NULL and empty decode to an empty vec.
fn decode_domains(country: &str, blob: Option<&str>) -> Result<Vec<String>, StoreError> {
    match blob {
        None => Ok(Vec::new()),
        Some(raw) if raw.is_empty() => Ok(Vec::new()),
        Some(raw) => serde_json::from_str(raw).map_err(|source| StoreError::DecodeDomains {
            country: country.to_owned(),
            source,
        }),
    }
}

/// Errors raised by the SQLite country store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to open SQLite database at {path:?}")]
    Open {
        path: PathBuf,
        #[source]
        source: SqliteError,
    },
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("failed to {operation}")]
    Sqlite {
        operation: &'static str,
        #[source]
        source: SqliteError,
    },
    #[error("failed to encode top-level domains for country {country}")]
    EncodeDomains {
        country: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to decode stored top-level domains for country {country}")]
    DecodeDomains {
        country: String,
        #[source]
        source: serde_json::Error,
    },
}
