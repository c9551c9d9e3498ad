//! Import command implementation for the atlas CLI.

use std::{path::PathBuf, time::Duration};

use atlas_core::{Progress, SqliteCountryStore};
use atlas_data::listing::{
    DEFAULT_LISTING_URL, HttpCountrySource, ImportOptions, import_countries,
};
use clap::Parser;

use crate::CliError;

/// CLI arguments for the `import` subcommand.
#[derive(Debug, Clone, Parser)]
#[command(
    long_about = "Fetch the country listing from a remote URL and upsert it \
                 into the SQLite store. The whole batch commits in one \
                 transaction; elements missing required fields are skipped \
                 with a warning.",
    about = "Update the country listing from a remote file"
)]
pub(crate) struct ImportArgs {
    /// URL to fetch country data from.
    #[arg(long, env = "ATLAS_IMPORT_URL", default_value = DEFAULT_LISTING_URL, value_name = "url")]
    pub(crate) url: String,
    /// Request timeout in seconds.
    #[arg(long, env = "ATLAS_IMPORT_TIMEOUT", default_value_t = 30, value_name = "secs")]
    pub(crate) timeout: u64,
    /// Path to the SQLite country store.
    #[arg(long, env = "ATLAS_DB", default_value = "countries.db", value_name = "path")]
    pub(crate) db: PathBuf,
}

pub(crate) fn run(args: ImportArgs) -> Result<(), CliError> {
    let mut store = SqliteCountryStore::open(&args.db).map_err(|source| CliError::OpenStore {
        path: args.db.clone(),
        source,
    })?;
    let options =
        ImportOptions::new(args.url).with_timeout(Duration::from_secs(args.timeout));
    let source = HttpCountrySource::new();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|source| CliError::Runtime { source })?;
    let summary = runtime.block_on(import_countries(
        &source,
        &mut store,
        &options,
        &mut StdoutProgress,
    ))?;

    println!("Successfully updated country listing: {summary}");
    Ok(())
}

/// Operator-facing progress sink writing to standard output.
pub(crate) struct StdoutProgress;

impl Progress for StdoutProgress {
    fn info(&mut self, message: &str) {
        println!("{message}");
    }

    fn warn(&mut self, message: &str) {
        println!("Warning: {message}");
    }
}
