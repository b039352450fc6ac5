//! SQLite storage bootstrap and schema migration entry points.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the wellness store.
//! - Apply schema migrations in deterministic order.
//! - Gate destructive schema recovery behind an explicit caller opt-in.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - No application data is read or written before migrations succeed.
//! - An on-disk schema newer than this binary is never discarded without
//!   `SchemaRecovery::ConfirmedReset`.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory, open_db_with_recovery};

pub type DbResult<T> = Result<T, DbError>;

/// How `open_db_with_recovery` reacts to an incompatible on-disk schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaRecovery {
    /// Surface `DbError::UnsupportedSchemaVersion` and leave the file
    /// untouched. This is the default posture.
    #[default]
    Fail,
    /// Discard the store file and recreate it empty. Destroys all data;
    /// callers must only pass this after explicit user confirmation.
    ConfirmedReset,
}

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// Confirmed reset could not remove the incompatible store file.
    ResetFailed(std::io::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::ResetFailed(err) => {
                write!(f, "failed to remove incompatible store file: {err}")
            }
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
            Self::ResetFailed(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
