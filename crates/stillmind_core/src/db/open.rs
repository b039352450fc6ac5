//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure connection pragmas required by core behavior.
//! - Trigger schema migrations before returning a usable connection.
//! - Perform confirmed destructive recovery from a newer on-disk schema.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON`.
//! - Returned connections have migrations fully applied.
//! - Recovery deletes the store only under `SchemaRecovery::ConfirmedReset`
//!   and attempts it at most once per open call.

use super::migrations::apply_migrations;
use super::{DbError, DbResult, SchemaRecovery};
use log::{error, info, warn};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

/// Opens a SQLite database file and applies all pending migrations.
///
/// Fails with `DbError::UnsupportedSchemaVersion` when the file was
/// written by a newer schema; see `open_db_with_recovery` for the
/// confirmed-reset path.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_db_with_recovery(path, SchemaRecovery::Fail)
}

/// Opens a SQLite database file, recovering per the given policy.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
/// - Under `SchemaRecovery::ConfirmedReset`, deletes and recreates the
///   store file when its schema version is unsupported. All persisted
///   data is lost; the caller owns obtaining user confirmation first.
pub fn open_db_with_recovery(
    path: impl AsRef<Path>,
    recovery: SchemaRecovery,
) -> DbResult<Connection> {
    let path = path.as_ref();
    match open_file(path) {
        Ok(conn) => Ok(conn),
        Err(DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        }) if recovery == SchemaRecovery::ConfirmedReset => {
            warn!(
                "event=db_recover module=db status=start db_version={db_version} \
                 latest_supported={latest_supported} action=confirmed_reset"
            );
            remove_store_files(path)?;
            let conn = open_file(path)?;
            warn!("event=db_recover module=db status=ok action=confirmed_reset");
            Ok(conn)
        }
        Err(err) => Err(err),
    }
}

/// Opens an in-memory SQLite database and applies all pending migrations.
pub fn open_db_in_memory() -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=memory");

    let mut conn = match Connection::open_in_memory() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode=memory duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match bootstrap_connection(&mut conn) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode=memory duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode=memory duration_ms={} error_code=db_bootstrap_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn open_file(path: &Path) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=file");

    let mut conn = match Connection::open(path) {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode=file duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match bootstrap_connection(&mut conn) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode=file duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode=file duration_ms={} error_code=db_bootstrap_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &mut Connection) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_secs(5))?;
    apply_migrations(conn)?;
    Ok(())
}

fn remove_store_files(path: &Path) -> DbResult<()> {
    std::fs::remove_file(path).map_err(DbError::ResetFailed)?;
    // WAL sidecars may or may not exist depending on journal mode.
    for suffix in ["-wal", "-shm"] {
        let mut sidecar = path.as_os_str().to_owned();
        sidecar.push(suffix);
        match std::fs::remove_file(Path::new(&sidecar)) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => return Err(DbError::ResetFailed(err)),
        }
    }
    Ok(())
}
