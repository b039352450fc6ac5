//! Repository layer: per-area query views and row mapping.
//!
//! # Responsibility
//! - Keep SQL details inside the core persistence boundary.
//! - Map rows back into validated domain records.
//!
//! # Invariants
//! - Read paths reject invalid persisted state (`InvalidData`) instead of
//!   masking it.
//! - List queries return point-in-time ordered sequences: `recorded_at`
//!   descending with the stable id as tiebreak, unless documented
//!   otherwise.
//! - Write entry points are crate-internal; all writes flow through the
//!   store's staged save transaction.

use crate::model::EntryId;
use crate::store::{StoreError, StoreResult};
use rusqlite::types::Value;
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

pub mod achievement_repo;
pub mod breathing_repo;
pub mod emergency_repo;
pub mod journal_repo;
pub mod mood_repo;
pub mod preferences_repo;

/// Encodes a list-valued field as a JSON array for a TEXT column.
pub(crate) fn encode_json_list<T: Serialize>(
    field: &'static str,
    values: &[T],
) -> StoreResult<String> {
    serde_json::to_string(values)
        .map_err(|err| StoreError::InvalidData(format!("cannot encode {field}: {err}")))
}

/// Decodes a JSON array column back into a typed list.
pub(crate) fn decode_json_list<T: DeserializeOwned>(
    field: &'static str,
    raw: &str,
) -> StoreResult<Vec<T>> {
    serde_json::from_str(raw)
        .map_err(|err| StoreError::InvalidData(format!("invalid JSON list in {field}: {err}")))
}

pub(crate) fn parse_entry_id(field: &'static str, raw: &str) -> StoreResult<EntryId> {
    Uuid::parse_str(raw)
        .map_err(|_| StoreError::InvalidData(format!("invalid uuid value `{raw}` in {field}")))
}

pub(crate) fn parse_bool(field: &'static str, raw: i64) -> StoreResult<bool> {
    match raw {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(StoreError::InvalidData(format!(
            "invalid boolean value `{other}` in {field}"
        ))),
    }
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

/// Appends LIMIT/OFFSET clauses and their bind values.
pub(crate) fn push_window(
    sql: &mut String,
    bind_values: &mut Vec<Value>,
    limit: Option<u32>,
    offset: u32,
) {
    if let Some(limit) = limit {
        sql.push_str(" LIMIT ?");
        bind_values.push(Value::Integer(i64::from(limit)));
        if offset > 0 {
            sql.push_str(" OFFSET ?");
            bind_values.push(Value::Integer(i64::from(offset)));
        }
    } else if offset > 0 {
        sql.push_str(" LIMIT -1 OFFSET ?");
        bind_values.push(Value::Integer(i64::from(offset)));
    }
}

/// Appends an inclusive `recorded_at` window filter.
pub(crate) fn push_time_window(
    sql: &mut String,
    bind_values: &mut Vec<Value>,
    from: Option<i64>,
    to: Option<i64>,
) {
    if let Some(from) = from {
        sql.push_str(" AND recorded_at >= ?");
        bind_values.push(Value::Integer(from));
    }
    if let Some(to) = to {
        sql.push_str(" AND recorded_at <= ?");
        bind_values.push(Value::Integer(to));
    }
}
