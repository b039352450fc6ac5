//! Breathing session queries and SQLite row mapping.

use super::{parse_entry_id, push_time_window, push_window};
use crate::model::breathing::{BreathingPattern, BreathingSession, MAX_COMPLETION_PERCENT};
use crate::model::EntryId;
use crate::store::{StoreError, StoreResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const BREATHING_SELECT_SQL: &str = "SELECT
    uuid,
    recorded_at,
    pattern,
    duration_secs,
    completion_percent,
    mood_before,
    mood_after,
    mood_entry_id
FROM breathing_sessions";

/// Predicate options for listing breathing sessions.
#[derive(Debug, Clone, Default)]
pub struct BreathingQuery {
    /// Inclusive lower bound on `recorded_at`, epoch milliseconds.
    pub from: Option<i64>,
    /// Inclusive upper bound on `recorded_at`, epoch milliseconds.
    pub to: Option<i64>,
    /// Keep only sessions of this technique.
    pub pattern: Option<BreathingPattern>,
    /// Keep only sessions that ran to 100% completion.
    pub completed_only: bool,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Read view over persisted breathing sessions.
pub struct BreathingRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> BreathingRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Gets one breathing session by stable id.
    pub fn get(&self, id: EntryId) -> StoreResult<Option<BreathingSession>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BREATHING_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query(params![id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_breathing_row(row)?));
        }
        Ok(None)
    }

    /// Gets the session linked back to the given mood entry, if any.
    pub fn for_mood(&self, mood_entry_id: EntryId) -> StoreResult<Option<BreathingSession>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BREATHING_SELECT_SQL} WHERE mood_entry_id = ?1;"))?;
        let mut rows = stmt.query(params![mood_entry_id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_breathing_row(row)?));
        }
        Ok(None)
    }

    /// Lists breathing sessions matching the query, newest first.
    pub fn list(&self, query: &BreathingQuery) -> StoreResult<Vec<BreathingSession>> {
        let mut sql = format!("{BREATHING_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        push_time_window(&mut sql, &mut bind_values, query.from, query.to);

        if let Some(pattern) = query.pattern {
            sql.push_str(" AND pattern = ?");
            bind_values.push(Value::Text(pattern_to_db(pattern).to_string()));
        }

        if query.completed_only {
            sql.push_str(" AND completion_percent = ?");
            bind_values.push(Value::Integer(i64::from(MAX_COMPLETION_PERCENT)));
        }

        sql.push_str(" ORDER BY recorded_at DESC, uuid ASC");
        push_window(&mut sql, &mut bind_values, query.limit, query.offset);

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut sessions = Vec::new();

        while let Some(row) = rows.next()? {
            sessions.push(parse_breathing_row(row)?);
        }

        Ok(sessions)
    }

    pub(crate) fn upsert(&self, session: &BreathingSession) -> StoreResult<()> {
        session.validate()?;

        self.conn.execute(
            "INSERT INTO breathing_sessions (
                uuid,
                recorded_at,
                pattern,
                duration_secs,
                completion_percent,
                mood_before,
                mood_after,
                mood_entry_id
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT(uuid) DO UPDATE SET
                recorded_at = excluded.recorded_at,
                pattern = excluded.pattern,
                duration_secs = excluded.duration_secs,
                completion_percent = excluded.completion_percent,
                mood_before = excluded.mood_before,
                mood_after = excluded.mood_after,
                mood_entry_id = excluded.mood_entry_id;",
            params![
                session.uuid.to_string(),
                session.recorded_at,
                pattern_to_db(session.pattern),
                session.duration_secs,
                session.completion_percent,
                session.mood_before,
                session.mood_after,
                session.mood_entry_id.map(|id| id.to_string()),
            ],
        )?;

        Ok(())
    }

    pub(crate) fn delete(&self, id: EntryId) -> StoreResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM breathing_sessions WHERE uuid = ?1;",
            [id.to_string()],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}

fn parse_breathing_row(row: &Row<'_>) -> StoreResult<BreathingSession> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = parse_entry_id("breathing_sessions.uuid", &uuid_text)?;

    let pattern_text: String = row.get("pattern")?;
    let pattern = parse_pattern(&pattern_text).ok_or_else(|| {
        StoreError::InvalidData(format!(
            "invalid breathing pattern `{pattern_text}` in breathing_sessions.pattern"
        ))
    })?;

    let mood_entry_id = match row.get::<_, Option<String>>("mood_entry_id")? {
        Some(raw) => Some(parse_entry_id("breathing_sessions.mood_entry_id", &raw)?),
        None => None,
    };

    let session = BreathingSession {
        uuid,
        recorded_at: row.get("recorded_at")?,
        pattern,
        duration_secs: row.get("duration_secs")?,
        completion_percent: row.get("completion_percent")?,
        mood_before: row.get("mood_before")?,
        mood_after: row.get("mood_after")?,
        mood_entry_id,
    };
    session.validate()?;
    Ok(session)
}

pub(crate) fn pattern_to_db(pattern: BreathingPattern) -> &'static str {
    match pattern {
        BreathingPattern::Box => "box",
        BreathingPattern::FourSevenEight => "four_seven_eight",
        BreathingPattern::DeepBelly => "deep_belly",
        BreathingPattern::Coherent => "coherent",
        BreathingPattern::Resonance => "resonance",
    }
}

pub(crate) fn parse_pattern(value: &str) -> Option<BreathingPattern> {
    match value {
        "box" => Some(BreathingPattern::Box),
        "four_seven_eight" => Some(BreathingPattern::FourSevenEight),
        "deep_belly" => Some(BreathingPattern::DeepBelly),
        "coherent" => Some(BreathingPattern::Coherent),
        "resonance" => Some(BreathingPattern::Resonance),
        _ => None,
    }
}
