//! SQLite persistence for regions and countries.
#![forbid(unsafe_code)]

mod schema;
mod sqlite;

pub use schema::{SCHEMA_VERSION, SchemaError, initialise_schema};
pub use sqlite::{SqliteCountryStore, StoreError};
