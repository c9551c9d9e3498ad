//! Error types emitted by the atlas CLI.

use std::path::PathBuf;

use atlas_core::StoreError;
use atlas_data::listing::ImportError;
use thiserror::Error;

/// Errors emitted by the atlas CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// The async runtime could not be started.
    #[error("failed to start async runtime: {source}")]
    Runtime {
        #[source]
        source: std::io::Error,
    },
    /// Opening or initialising the country store failed.
    #[error("failed to open country store at {path:?}: {source}")]
    OpenStore {
        path: PathBuf,
        #[source]
        source: StoreError,
    },
    /// The import run failed.
    #[error(transparent)]
    Import(#[from] ImportError),
    /// The stats server could not bind its listen address.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    /// The stats server stopped with an error.
    #[error("stats server failed: {source}")]
    Serve {
        #[source]
        source: std::io::Error,
    },
}
