//! Unit tests for argument parsing and the stats router.

use std::sync::Arc;

use atlas_core::{Country, NullProgress, SqliteCountryStore};
use atlas_data::listing::DEFAULT_LISTING_URL;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use clap::Parser;
use http_body_util::BodyExt;
use rstest::rstest;
use tempfile::TempDir;
use tower::ServiceExt;

use crate::{Cli, Command, serve};

#[rstest]
fn import_uses_documented_defaults() {
    let cli = Cli::try_parse_from(["atlas", "import"]).expect("parse arguments");
    let Command::Import(args) = cli.command else {
        panic!("expected import command");
    };
    assert_eq!(args.url, DEFAULT_LISTING_URL);
    assert_eq!(args.timeout, 30);
    assert_eq!(args.db, std::path::PathBuf::from("countries.db"));
}

#[rstest]
fn import_accepts_overrides() {
    let cli = Cli::try_parse_from([
        "atlas",
        "import",
        "--url",
        "https://example.org/countries.json",
        "--timeout",
        "5",
        "--db",
        "custom.db",
    ])
    .expect("parse arguments");
    let Command::Import(args) = cli.command else {
        panic!("expected import command");
    };
    assert_eq!(args.url, "https://example.org/countries.json");
    assert_eq!(args.timeout, 5);
    assert_eq!(args.db, std::path::PathBuf::from("custom.db"));
}

#[rstest]
fn serve_uses_documented_defaults() {
    let cli = Cli::try_parse_from(["atlas", "serve"]).expect("parse arguments");
    let Command::Serve(args) = cli.command else {
        panic!("expected serve command");
    };
    assert_eq!(args.bind, "127.0.0.1:8000");
    assert_eq!(args.db, std::path::PathBuf::from("countries.db"));
}

#[rstest]
fn rejects_unknown_subcommands() {
    assert!(Cli::try_parse_from(["atlas", "frobnicate"]).is_err());
}

fn seeded_db(temp_dir: &TempDir) -> std::path::PathBuf {
    let db_path = temp_dir.path().join("countries.db");
    let mut store = SqliteCountryStore::open(&db_path).expect("open store");
    let countries = [
        Country::new("Nigeria", "NG", "NGA", 200_000_000, "Africa"),
        Country::new("Egypt", "EG", "EGY", 100_000_000, "Africa"),
    ];
    store
        .upsert_countries(&countries, &mut NullProgress)
        .expect("seed store");
    store
        .connection()
        .execute("INSERT INTO regions (name) VALUES ('Empty Region')", [])
        .expect("insert empty region");
    db_path
}

#[tokio::test]
async fn stats_endpoint_reports_per_region_aggregates() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let app = serve::router(Arc::new(seeded_db(&temp_dir)));

    let response = app
        .oneshot(
            Request::get("/stats")
                .body(Body::empty())
                .expect("build request"),
        )
        .await
        .expect("run request");
    assert_eq!(response.status(), StatusCode::OK);

    let body = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    let value: serde_json::Value = serde_json::from_slice(&body).expect("parse body");
    let regions = value["regions"].as_array().expect("regions array");
    assert_eq!(regions.len(), 2);

    let africa = regions
        .iter()
        .find(|region| region["name"] == "Africa")
        .expect("Africa present");
    assert_eq!(africa["number_countries"], 2);
    assert_eq!(africa["total_population"], 300_000_000_i64);

    let empty = regions
        .iter()
        .find(|region| region["name"] == "Empty Region")
        .expect("empty region present");
    assert_eq!(empty["number_countries"], 0);
    assert_eq!(empty["total_population"], 0);
}

#[tokio::test]
async fn stats_endpoint_degrades_to_generic_error() {
    let temp_dir = TempDir::new().expect("create temp dir");
    // A directory is not a valid database file, so opening the store fails.
    let app = serve::router(Arc::new(temp_dir.path().to_path_buf()));

    let response = app
        .oneshot(
            Request::get("/stats")
                .body(Body::empty())
                .expect("build request"),
        )
        .await
        .expect("run request");
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    let value: serde_json::Value = serde_json::from_slice(&body).expect("parse body");
    assert_eq!(
        value["error"],
        "An error occurred processing your request"
    );
}
