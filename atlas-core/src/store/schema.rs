#![forbid(unsafe_code)]

use rusqlite::{Connection, Error as SqliteError, OptionalExtension};
use thiserror::Error;

/// Version recorded in the `schema_version` table by this build.
pub const SCHEMA_VERSION: i64 = 1;

/// Initialise the country store schema inside an existing SQLite database.
///
/// The function enables foreign keys, creates the `regions` and `countries`
/// tables with their indexes, and records the schema version. Existing
/// installations must already match the expected version; mismatches are
/// rejected so migrations can be applied explicitly.
///
/// # Examples
/// ```
/// use rusqlite::Connection;
/// use atlas_core::initialise_schema;
///
/// let mut conn = Connection::open_in_memory().expect("create in-memory database");
/// initialise_schema(&mut conn).expect("create country schema");
///
/// let version: i64 = conn
///     .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
///         row.get(0)
///     })
///     .expect("read schema version");
/// assert_eq!(version, 1);
/// ```
pub fn initialise_schema(connection: &mut Connection) -> Result<(), SchemaError> {
    connection
        .pragma_update(None, "foreign_keys", true)
        .map_err(|source| SchemaError::ForeignKeys { source })?;

    let transaction = connection
        .transaction()
        .map_err(|source| SchemaError::Migration {
            step: "begin schema transaction",
            source,
        })?;

    create_core_tables(&transaction)?;
    create_indexes(&transaction)?;
    ensure_schema_version(&transaction)?;

    transaction
        .commit()
        .map_err(|source| SchemaError::Migration {
            step: "commit schema transaction",
            source,
        })?;

    Ok(())
}

fn create_core_tables(transaction: &rusqlite::Transaction<'_>) -> Result<(), SchemaError> {
    run_migration_step(
        transaction,
        "create regions",
        "CREATE TABLE IF NOT EXISTS regions (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL CHECK (length(name) > 0)
        )",
    )?;
    run_migration_step(
        transaction,
        "create countries",
        "CREATE TABLE IF NOT EXISTS countries (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL CHECK (length(name) > 0),
            alpha2_code TEXT NOT NULL,
            alpha3_code TEXT NOT NULL,
            population INTEGER NOT NULL DEFAULT 0,
            capital TEXT,
            top_level_domains TEXT,
            region_id INTEGER NOT NULL,
            FOREIGN KEY (region_id) REFERENCES regions(id) ON DELETE CASCADE
        )",
    )
}

fn create_indexes(transaction: &rusqlite::Transaction<'_>) -> Result<(), SchemaError> {
    run_migration_step(
        transaction,
        "index regions name",
        "CREATE INDEX IF NOT EXISTS idx_regions_name ON regions(name)",
    )?;
    run_migration_step(
        transaction,
        "index countries name",
        "CREATE INDEX IF NOT EXISTS idx_countries_name ON countries(name)",
    )?;
    run_migration_step(
        transaction,
        "index countries region",
        "CREATE INDEX IF NOT EXISTS idx_countries_region ON countries(region_id)",
    )
}

fn ensure_schema_version(transaction: &rusqlite::Transaction<'_>) -> Result<(), SchemaError> {
    run_migration_step(
        transaction,
        "create schema version table",
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY CHECK (version > 0),
            applied_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ', 'now'))
        ) WITHOUT ROWID",
    )?;

    let existing_version: Option<i64> = transaction
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .optional()
        .map_err(|source| SchemaError::Migration {
            step: "read schema version",
            source,
        })?;

    match existing_version {
        Some(version) if version == SCHEMA_VERSION => {}
        Some(found) => {
            return Err(SchemaError::VersionMismatch {
                expected: SCHEMA_VERSION,
                found,
            });
        }
        None => {
            transaction
                .execute(
                    "INSERT INTO schema_version (version) VALUES (?1)",
                    [SCHEMA_VERSION],
                )
                .map_err(|source| SchemaError::Migration {
                    step: "record schema version",
                    source,
                })?;
        }
    }

    Ok(())
}

fn run_migration_step(
    transaction: &rusqlite::Transaction<'_>,
    step: &'static str,
    sql: &str,
) -> Result<(), SchemaError> {
    transaction
        .execute(sql, [])
        .map(|_| ())
        .map_err(|source| SchemaError::Migration { step, source })
}

/// Errors raised when initialising the country store schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to enable SQLite foreign keys")]
    ForeignKeys {
        #[source]
        source: SqliteError,
    },
    #[error("failed to execute migration step '{step}'")]
    Migration {
        step: &'static str,
        #[source]
        source: SqliteError,
    },
    #[error(
        "expected country store schema version {expected} but found {found}; apply migrations before retrying"
    )]
    VersionMismatch { expected: i64, found: i64 },
}
