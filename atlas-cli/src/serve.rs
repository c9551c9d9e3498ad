//! Serve command hosting the region statistics endpoint.

use std::{path::PathBuf, sync::Arc};

use atlas_core::SqliteCountryStore;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use clap::Parser;
use serde_json::json;

use crate::CliError;

/// CLI arguments for the `serve` subcommand.
#[derive(Debug, Clone, Parser)]
#[command(
    long_about = "Serve GET /stats, returning per-region country counts and \
                 population totals as JSON. Failures degrade to a generic \
                 500 body; details only reach the server logs.",
    about = "Serve region statistics over HTTP"
)]
pub(crate) struct ServeArgs {
    /// Path to the SQLite country store.
    #[arg(long, env = "ATLAS_DB", default_value = "countries.db", value_name = "path")]
    pub(crate) db: PathBuf,
    /// Socket address to listen on.
    #[arg(long, env = "ATLAS_BIND", default_value = "127.0.0.1:8000", value_name = "addr")]
    pub(crate) bind: String,
}

pub(crate) fn run(args: ServeArgs) -> Result<(), CliError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|source| CliError::Runtime { source })?;
    runtime.block_on(serve(args))
}

async fn serve(args: ServeArgs) -> Result<(), CliError> {
    let app = router(Arc::new(args.db));
    let listener = tokio::net::TcpListener::bind(&args.bind)
        .await
        .map_err(|source| CliError::Bind {
            addr: args.bind.clone(),
            source,
        })?;
    log::info!("serving region statistics on {}", args.bind);
    axum::serve(listener, app)
        .await
        .map_err(|source| CliError::Serve { source })
}

/// Build the stats router around the store's database path.
pub(crate) fn router(db: Arc<PathBuf>) -> Router {
    Router::new().route("/stats", get(stats)).with_state(db)
}

/// Statistics about regions and countries.
///
/// Each request opens the store and runs one aggregate query; rusqlite is
/// blocking, so the query runs on the blocking thread pool.
async fn stats(State(db): State<Arc<PathBuf>>) -> Response {
    let outcome = tokio::task::spawn_blocking(move || {
        let store = SqliteCountryStore::open(db.as_path())?;
        store.region_stats()
    })
    .await;

    match outcome {
        Ok(Ok(regions)) => (StatusCode::OK, Json(json!({ "regions": regions }))).into_response(),
        Ok(Err(err)) => {
            log::error!("region statistics query failed: {err}");
            internal_error()
        }
        Err(err) => {
            log::error!("region statistics task failed: {err}");
            internal_error()
        }
    }
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "An error occurred processing your request" })),
    )
        .into_response()
}
