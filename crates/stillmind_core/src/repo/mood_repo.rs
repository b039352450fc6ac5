//! Mood entry queries and SQLite row mapping.
//!
//! # Invariants
//! - Rows are re-validated on read; a row that fails domain validation
//!   surfaces as `Validation`/`InvalidData`, never as a silent skip.

use super::{decode_json_list, encode_json_list, parse_entry_id, push_time_window, push_window};
use crate::model::mood::MoodEntry;
use crate::model::EntryId;
use crate::store::{StoreError, StoreResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const MOOD_SELECT_SQL: &str = "SELECT
    uuid,
    recorded_at,
    primary_emotion,
    emotion_intensity,
    energy_level,
    stress_level,
    sleep_quality,
    notes,
    triggers,
    weather_impact,
    breathing_session_id
FROM mood_entries";

/// Predicate options for listing mood entries.
#[derive(Debug, Clone, Default)]
pub struct MoodQuery {
    /// Inclusive lower bound on `recorded_at`, epoch milliseconds.
    pub from: Option<i64>,
    /// Inclusive upper bound on `recorded_at`, epoch milliseconds.
    pub to: Option<i64>,
    /// Exact match on `primary_emotion`.
    pub emotion: Option<String>,
    /// Keep only entries at or above this emotion intensity.
    pub min_intensity: Option<u8>,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Read view over persisted mood entries.
pub struct MoodRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> MoodRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Gets one mood entry by stable id.
    pub fn get(&self, id: EntryId) -> StoreResult<Option<MoodEntry>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{MOOD_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query(params![id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_mood_row(row)?));
        }
        Ok(None)
    }

    /// Lists mood entries matching the query, newest first.
    pub fn list(&self, query: &MoodQuery) -> StoreResult<Vec<MoodEntry>> {
        let mut sql = format!("{MOOD_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        push_time_window(&mut sql, &mut bind_values, query.from, query.to);

        if let Some(emotion) = &query.emotion {
            sql.push_str(" AND primary_emotion = ?");
            bind_values.push(Value::Text(emotion.clone()));
        }

        if let Some(min_intensity) = query.min_intensity {
            sql.push_str(" AND emotion_intensity >= ?");
            bind_values.push(Value::Integer(i64::from(min_intensity)));
        }

        sql.push_str(" ORDER BY recorded_at DESC, uuid ASC");
        push_window(&mut sql, &mut bind_values, query.limit, query.offset);

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut entries = Vec::new();

        while let Some(row) = rows.next()? {
            entries.push(parse_mood_row(row)?);
        }

        Ok(entries)
    }

    pub(crate) fn upsert(&self, entry: &MoodEntry) -> StoreResult<()> {
        entry.validate()?;

        self.conn.execute(
            "INSERT INTO mood_entries (
                uuid,
                recorded_at,
                primary_emotion,
                emotion_intensity,
                energy_level,
                stress_level,
                sleep_quality,
                notes,
                triggers,
                weather_impact,
                breathing_session_id
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            ON CONFLICT(uuid) DO UPDATE SET
                recorded_at = excluded.recorded_at,
                primary_emotion = excluded.primary_emotion,
                emotion_intensity = excluded.emotion_intensity,
                energy_level = excluded.energy_level,
                stress_level = excluded.stress_level,
                sleep_quality = excluded.sleep_quality,
                notes = excluded.notes,
                triggers = excluded.triggers,
                weather_impact = excluded.weather_impact,
                breathing_session_id = excluded.breathing_session_id;",
            params![
                entry.uuid.to_string(),
                entry.recorded_at,
                entry.primary_emotion.as_str(),
                entry.emotion_intensity,
                entry.energy_level,
                entry.stress_level,
                entry.sleep_quality,
                entry.notes.as_deref(),
                encode_json_list("mood_entries.triggers", &entry.triggers)?,
                entry.weather_impact.as_deref(),
                entry.breathing_session_id.map(|id| id.to_string()),
            ],
        )?;

        Ok(())
    }

    pub(crate) fn delete(&self, id: EntryId) -> StoreResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM mood_entries WHERE uuid = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}

fn parse_mood_row(row: &Row<'_>) -> StoreResult<MoodEntry> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = parse_entry_id("mood_entries.uuid", &uuid_text)?;

    let triggers_text: String = row.get("triggers")?;
    let triggers = decode_json_list("mood_entries.triggers", &triggers_text)?;

    let breathing_session_id = match row.get::<_, Option<String>>("breathing_session_id")? {
        Some(raw) => Some(parse_entry_id("mood_entries.breathing_session_id", &raw)?),
        None => None,
    };

    let entry = MoodEntry {
        uuid,
        recorded_at: row.get("recorded_at")?,
        primary_emotion: row.get("primary_emotion")?,
        emotion_intensity: row.get("emotion_intensity")?,
        energy_level: row.get("energy_level")?,
        stress_level: row.get("stress_level")?,
        sleep_quality: row.get("sleep_quality")?,
        notes: row.get("notes")?,
        triggers,
        weather_impact: row.get("weather_impact")?,
        breathing_session_id,
    };
    entry.validate()?;
    Ok(entry)
}
