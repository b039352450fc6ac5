use stillmind_core::db::migrations::latest_version;
use stillmind_core::db::{open_db, open_db_in_memory, DbError, SchemaRecovery};
use stillmind_core::{Store, StoreError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "mood_entries");
    assert_table_exists(&conn, "breathing_sessions");
    assert_table_exists(&conn, "gratitude_entries");
    assert_table_exists(&conn, "daily_intentions");
    assert_table_exists(&conn, "thought_records");
    assert_table_exists(&conn, "user_preferences");
    assert_table_exists(&conn, "emergency_sessions");
    assert_table_exists(&conn, "achievements");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stillmind.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "mood_entries");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn store_open_refuses_destructive_recovery_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = Store::open(&path).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Db(DbError::UnsupportedSchemaVersion { .. })
    ));
    // The incompatible file must be left untouched.
    assert!(path.exists());
    let conn = Connection::open(&path).unwrap();
    assert_eq!(schema_version(&conn), 999);
}

#[test]
fn confirmed_reset_recreates_an_incompatible_store_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let store = Store::open_with_recovery(&path, SchemaRecovery::ConfirmedReset).unwrap();
    assert!(store.moods().list(&Default::default()).unwrap().is_empty());
    drop(store);

    let conn = Connection::open(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
