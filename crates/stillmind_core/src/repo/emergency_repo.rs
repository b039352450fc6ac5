//! Emergency session queries and SQLite row mapping.

use super::{decode_json_list, encode_json_list, parse_entry_id, push_time_window, push_window};
use crate::model::emergency::EmergencySession;
use crate::model::EntryId;
use crate::store::{StoreError, StoreResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const EMERGENCY_SELECT_SQL: &str = "SELECT
    uuid,
    recorded_at,
    trigger_emotion,
    intensity_before,
    techniques_used,
    duration_secs,
    intensity_after,
    notes
FROM emergency_sessions";

/// Predicate options for listing emergency sessions.
#[derive(Debug, Clone, Default)]
pub struct EmergencyQuery {
    pub from: Option<i64>,
    pub to: Option<i64>,
    /// Exact match on the triggering emotion.
    pub trigger_emotion: Option<String>,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Read view over persisted emergency sessions.
pub struct EmergencyRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> EmergencyRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Gets one emergency session by stable id.
    pub fn get(&self, id: EntryId) -> StoreResult<Option<EmergencySession>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EMERGENCY_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query(params![id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_emergency_row(row)?));
        }
        Ok(None)
    }

    /// Lists emergency sessions matching the query, newest first.
    pub fn list(&self, query: &EmergencyQuery) -> StoreResult<Vec<EmergencySession>> {
        let mut sql = format!("{EMERGENCY_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        push_time_window(&mut sql, &mut bind_values, query.from, query.to);

        if let Some(emotion) = &query.trigger_emotion {
            sql.push_str(" AND trigger_emotion = ?");
            bind_values.push(Value::Text(emotion.clone()));
        }

        sql.push_str(" ORDER BY recorded_at DESC, uuid ASC");
        push_window(&mut sql, &mut bind_values, query.limit, query.offset);

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut sessions = Vec::new();
        while let Some(row) = rows.next()? {
            sessions.push(parse_emergency_row(row)?);
        }
        Ok(sessions)
    }

    pub(crate) fn upsert(&self, session: &EmergencySession) -> StoreResult<()> {
        session.validate()?;

        self.conn.execute(
            "INSERT INTO emergency_sessions (
                uuid, recorded_at, trigger_emotion, intensity_before,
                techniques_used, duration_secs, intensity_after, notes
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT(uuid) DO UPDATE SET
                recorded_at = excluded.recorded_at,
                trigger_emotion = excluded.trigger_emotion,
                intensity_before = excluded.intensity_before,
                techniques_used = excluded.techniques_used,
                duration_secs = excluded.duration_secs,
                intensity_after = excluded.intensity_after,
                notes = excluded.notes;",
            params![
                session.uuid.to_string(),
                session.recorded_at,
                session.trigger_emotion.as_str(),
                session.intensity_before,
                encode_json_list(
                    "emergency_sessions.techniques_used",
                    &session.techniques_used
                )?,
                session.duration_secs,
                session.intensity_after,
                session.notes.as_deref(),
            ],
        )?;
        Ok(())
    }

    pub(crate) fn delete(&self, id: EntryId) -> StoreResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM emergency_sessions WHERE uuid = ?1;",
            [id.to_string()],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}

fn parse_emergency_row(row: &Row<'_>) -> StoreResult<EmergencySession> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = parse_entry_id("emergency_sessions.uuid", &uuid_text)?;

    let techniques_text: String = row.get("techniques_used")?;
    let techniques_used = decode_json_list("emergency_sessions.techniques_used", &techniques_text)?;

    let session = EmergencySession {
        uuid,
        recorded_at: row.get("recorded_at")?,
        trigger_emotion: row.get("trigger_emotion")?,
        intensity_before: row.get("intensity_before")?,
        techniques_used,
        duration_secs: row.get("duration_secs")?,
        intensity_after: row.get("intensity_after")?,
        notes: row.get("notes")?,
    };
    session.validate()?;
    Ok(session)
}
