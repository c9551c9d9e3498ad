//! Behaviour tests exercising the store against a database file on disk.

use atlas_core::{Country, NullProgress, SqliteCountryStore};
use rstest::{fixture, rstest};
use tempfile::TempDir;

#[fixture]
fn temp_dir() -> TempDir {
    TempDir::new().expect("create temp dir")
}

#[rstest]
fn store_survives_reopening(temp_dir: TempDir) {
    let db_path = temp_dir.path().join("countries.db");

    {
        let mut store = SqliteCountryStore::open(&db_path).expect("open store");
        let country = Country::new("Test Country", "TC", "TCO", 1_000_000, "Test Region");
        let summary = store
            .upsert_countries(std::slice::from_ref(&country), &mut NullProgress)
            .expect("upsert country");
        assert_eq!(summary.regions_created, 1);
        assert_eq!(summary.countries_created, 1);
    }

    let store = SqliteCountryStore::open(&db_path).expect("reopen store");
    let stats = store.region_stats().expect("query stats");
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].name, "Test Region");
    assert_eq!(stats[0].number_countries, 1);
    assert_eq!(stats[0].total_population, 1_000_000);

    let stored = store
        .country_by_name("Test Country")
        .expect("query country")
        .expect("country present");
    assert_eq!(stored.alpha3_code, "TCO");
    assert_eq!(stored.population, 1_000_000);
}

#[rstest]
fn reopening_keeps_upserts_idempotent(temp_dir: TempDir) {
    let db_path = temp_dir.path().join("countries.db");
    let country = Country::new("Test Country", "TC", "TCO", 1_000_000, "Test Region");

    {
        let mut store = SqliteCountryStore::open(&db_path).expect("open store");
        store
            .upsert_countries(std::slice::from_ref(&country), &mut NullProgress)
            .expect("first upsert");
    }

    let mut store = SqliteCountryStore::open(&db_path).expect("reopen store");
    let summary = store
        .upsert_countries(std::slice::from_ref(&country), &mut NullProgress)
        .expect("second upsert");
    assert_eq!(summary.countries_created, 0);
    assert_eq!(summary.countries_updated, 1);

    let countries: i64 = store
        .connection()
        .query_row("SELECT COUNT(*) FROM countries", [], |row| row.get(0))
        .expect("count countries");
    assert_eq!(countries, 1);
}
