//! Journal queries: gratitude entries, daily intentions, thought records.
//!
//! # Invariants
//! - Gratitude queries exclude private entries unless asked to include
//!   them, so sharing surfaces cannot leak private text by default.

use super::{
    bool_to_int, decode_json_list, encode_json_list, parse_bool, parse_entry_id, push_time_window,
    push_window,
};
use crate::model::gratitude::{GratitudeCategory, GratitudeEntry};
use crate::model::intention::{DailyIntention, IntentionCategory};
use crate::model::thought::{CognitiveDistortion, ThoughtRecord};
use crate::model::EntryId;
use crate::store::{StoreError, StoreResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const GRATITUDE_SELECT_SQL: &str = "SELECT
    uuid,
    recorded_at,
    gratitude_text,
    category,
    emotion_generated,
    is_private
FROM gratitude_entries";

const INTENTION_SELECT_SQL: &str = "SELECT
    uuid,
    recorded_at,
    intention_text,
    category,
    is_completed,
    reflection
FROM daily_intentions";

const THOUGHT_SELECT_SQL: &str = "SELECT
    uuid,
    recorded_at,
    situation,
    automatic_thought,
    emotion_before,
    intensity_before,
    cognitive_distortions,
    balanced_thought,
    emotion_after,
    intensity_after,
    action_plan
FROM thought_records";

/// Predicate options for listing gratitude entries.
#[derive(Debug, Clone, Default)]
pub struct GratitudeQuery {
    pub from: Option<i64>,
    pub to: Option<i64>,
    pub category: Option<GratitudeCategory>,
    /// Private entries are excluded unless this is set.
    pub include_private: bool,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Predicate options for listing daily intentions.
#[derive(Debug, Clone, Default)]
pub struct IntentionQuery {
    pub from: Option<i64>,
    pub to: Option<i64>,
    pub category: Option<IntentionCategory>,
    /// `Some(true)` keeps completed only, `Some(false)` open only.
    pub completed: Option<bool>,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Predicate options for listing thought records.
#[derive(Debug, Clone, Default)]
pub struct ThoughtQuery {
    pub from: Option<i64>,
    pub to: Option<i64>,
    /// Keep only records naming this distortion pattern.
    pub distortion: Option<CognitiveDistortion>,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Read view over the three journaling tables.
pub struct JournalRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> JournalRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Gets one gratitude entry by stable id, private or not.
    pub fn get_gratitude(&self, id: EntryId) -> StoreResult<Option<GratitudeEntry>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{GRATITUDE_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query(params![id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_gratitude_row(row)?));
        }
        Ok(None)
    }

    /// Lists gratitude entries matching the query, newest first.
    pub fn list_gratitude(&self, query: &GratitudeQuery) -> StoreResult<Vec<GratitudeEntry>> {
        let mut sql = format!("{GRATITUDE_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        push_time_window(&mut sql, &mut bind_values, query.from, query.to);

        if !query.include_private {
            sql.push_str(" AND is_private = 0");
        }

        if let Some(category) = query.category {
            sql.push_str(" AND category = ?");
            bind_values.push(Value::Text(gratitude_category_to_db(category).to_string()));
        }

        sql.push_str(" ORDER BY recorded_at DESC, uuid ASC");
        push_window(&mut sql, &mut bind_values, query.limit, query.offset);

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            entries.push(parse_gratitude_row(row)?);
        }
        Ok(entries)
    }

    /// Gets one daily intention by stable id.
    pub fn get_intention(&self, id: EntryId) -> StoreResult<Option<DailyIntention>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{INTENTION_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query(params![id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_intention_row(row)?));
        }
        Ok(None)
    }

    /// Lists daily intentions matching the query, newest first.
    pub fn list_intentions(&self, query: &IntentionQuery) -> StoreResult<Vec<DailyIntention>> {
        let mut sql = format!("{INTENTION_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        push_time_window(&mut sql, &mut bind_values, query.from, query.to);

        if let Some(category) = query.category {
            sql.push_str(" AND category = ?");
            bind_values.push(Value::Text(intention_category_to_db(category).to_string()));
        }

        if let Some(completed) = query.completed {
            sql.push_str(" AND is_completed = ?");
            bind_values.push(Value::Integer(bool_to_int(completed)));
        }

        sql.push_str(" ORDER BY recorded_at DESC, uuid ASC");
        push_window(&mut sql, &mut bind_values, query.limit, query.offset);

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut intentions = Vec::new();
        while let Some(row) = rows.next()? {
            intentions.push(parse_intention_row(row)?);
        }
        Ok(intentions)
    }

    /// Gets one thought record by stable id.
    pub fn get_thought(&self, id: EntryId) -> StoreResult<Option<ThoughtRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{THOUGHT_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query(params![id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_thought_row(row)?));
        }
        Ok(None)
    }

    /// Lists thought records matching the query, newest first.
    ///
    /// The distortion filter matches against the JSON-encoded pattern
    /// list, so it stays an index-free LIKE scan.
    pub fn list_thoughts(&self, query: &ThoughtQuery) -> StoreResult<Vec<ThoughtRecord>> {
        let mut sql = format!("{THOUGHT_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        push_time_window(&mut sql, &mut bind_values, query.from, query.to);

        if let Some(distortion) = query.distortion {
            sql.push_str(" AND cognitive_distortions LIKE ?");
            let tag = serde_json::to_string(&distortion).map_err(|err| {
                StoreError::InvalidData(format!("cannot encode distortion filter: {err}"))
            })?;
            bind_values.push(Value::Text(format!("%{tag}%")));
        }

        sql.push_str(" ORDER BY recorded_at DESC, uuid ASC");
        push_window(&mut sql, &mut bind_values, query.limit, query.offset);

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(parse_thought_row(row)?);
        }
        Ok(records)
    }

    pub(crate) fn upsert_gratitude(&self, entry: &GratitudeEntry) -> StoreResult<()> {
        entry.validate()?;

        self.conn.execute(
            "INSERT INTO gratitude_entries (
                uuid, recorded_at, gratitude_text, category, emotion_generated, is_private
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(uuid) DO UPDATE SET
                recorded_at = excluded.recorded_at,
                gratitude_text = excluded.gratitude_text,
                category = excluded.category,
                emotion_generated = excluded.emotion_generated,
                is_private = excluded.is_private;",
            params![
                entry.uuid.to_string(),
                entry.recorded_at,
                entry.gratitude_text.as_str(),
                gratitude_category_to_db(entry.category),
                entry.emotion_generated.as_str(),
                bool_to_int(entry.is_private),
            ],
        )?;
        Ok(())
    }

    pub(crate) fn upsert_intention(&self, intention: &DailyIntention) -> StoreResult<()> {
        intention.validate()?;

        self.conn.execute(
            "INSERT INTO daily_intentions (
                uuid, recorded_at, intention_text, category, is_completed, reflection
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(uuid) DO UPDATE SET
                recorded_at = excluded.recorded_at,
                intention_text = excluded.intention_text,
                category = excluded.category,
                is_completed = excluded.is_completed,
                reflection = excluded.reflection;",
            params![
                intention.uuid.to_string(),
                intention.recorded_at,
                intention.intention_text.as_str(),
                intention_category_to_db(intention.category),
                bool_to_int(intention.is_completed),
                intention.reflection.as_deref(),
            ],
        )?;
        Ok(())
    }

    pub(crate) fn upsert_thought(&self, record: &ThoughtRecord) -> StoreResult<()> {
        record.validate()?;

        self.conn.execute(
            "INSERT INTO thought_records (
                uuid, recorded_at, situation, automatic_thought, emotion_before,
                intensity_before, cognitive_distortions, balanced_thought,
                emotion_after, intensity_after, action_plan
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            ON CONFLICT(uuid) DO UPDATE SET
                recorded_at = excluded.recorded_at,
                situation = excluded.situation,
                automatic_thought = excluded.automatic_thought,
                emotion_before = excluded.emotion_before,
                intensity_before = excluded.intensity_before,
                cognitive_distortions = excluded.cognitive_distortions,
                balanced_thought = excluded.balanced_thought,
                emotion_after = excluded.emotion_after,
                intensity_after = excluded.intensity_after,
                action_plan = excluded.action_plan;",
            params![
                record.uuid.to_string(),
                record.recorded_at,
                record.situation.as_str(),
                record.automatic_thought.as_str(),
                record.emotion_before.as_str(),
                record.intensity_before,
                encode_json_list(
                    "thought_records.cognitive_distortions",
                    &record.cognitive_distortions
                )?,
                record.balanced_thought.as_str(),
                record.emotion_after.as_deref(),
                record.intensity_after,
                record.action_plan.as_deref(),
            ],
        )?;
        Ok(())
    }

    pub(crate) fn delete_gratitude(&self, id: EntryId) -> StoreResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM gratitude_entries WHERE uuid = ?1;",
            [id.to_string()],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    pub(crate) fn delete_intention(&self, id: EntryId) -> StoreResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM daily_intentions WHERE uuid = ?1;",
            [id.to_string()],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    pub(crate) fn delete_thought(&self, id: EntryId) -> StoreResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM thought_records WHERE uuid = ?1;",
            [id.to_string()],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}

fn parse_gratitude_row(row: &Row<'_>) -> StoreResult<GratitudeEntry> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = parse_entry_id("gratitude_entries.uuid", &uuid_text)?;

    let category_text: String = row.get("category")?;
    let category = parse_gratitude_category(&category_text).ok_or_else(|| {
        StoreError::InvalidData(format!(
            "invalid gratitude category `{category_text}` in gratitude_entries.category"
        ))
    })?;

    let entry = GratitudeEntry {
        uuid,
        recorded_at: row.get("recorded_at")?,
        gratitude_text: row.get("gratitude_text")?,
        category,
        emotion_generated: row.get("emotion_generated")?,
        is_private: parse_bool("gratitude_entries.is_private", row.get("is_private")?)?,
    };
    entry.validate()?;
    Ok(entry)
}

fn parse_intention_row(row: &Row<'_>) -> StoreResult<DailyIntention> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = parse_entry_id("daily_intentions.uuid", &uuid_text)?;

    let category_text: String = row.get("category")?;
    let category = parse_intention_category(&category_text).ok_or_else(|| {
        StoreError::InvalidData(format!(
            "invalid intention category `{category_text}` in daily_intentions.category"
        ))
    })?;

    let intention = DailyIntention {
        uuid,
        recorded_at: row.get("recorded_at")?,
        intention_text: row.get("intention_text")?,
        category,
        is_completed: parse_bool("daily_intentions.is_completed", row.get("is_completed")?)?,
        reflection: row.get("reflection")?,
    };
    intention.validate()?;
    Ok(intention)
}

fn parse_thought_row(row: &Row<'_>) -> StoreResult<ThoughtRecord> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = parse_entry_id("thought_records.uuid", &uuid_text)?;

    let distortions_text: String = row.get("cognitive_distortions")?;
    let cognitive_distortions = decode_json_list(
        "thought_records.cognitive_distortions",
        &distortions_text,
    )?;

    let record = ThoughtRecord {
        uuid,
        recorded_at: row.get("recorded_at")?,
        situation: row.get("situation")?,
        automatic_thought: row.get("automatic_thought")?,
        emotion_before: row.get("emotion_before")?,
        intensity_before: row.get("intensity_before")?,
        cognitive_distortions,
        balanced_thought: row.get("balanced_thought")?,
        emotion_after: row.get("emotion_after")?,
        intensity_after: row.get("intensity_after")?,
        action_plan: row.get("action_plan")?,
    };
    record.validate()?;
    Ok(record)
}

fn gratitude_category_to_db(category: GratitudeCategory) -> &'static str {
    match category {
        GratitudeCategory::People => "people",
        GratitudeCategory::Experiences => "experiences",
        GratitudeCategory::Personal => "personal",
        GratitudeCategory::Nature => "nature",
        GratitudeCategory::Health => "health",
        GratitudeCategory::SimplePleasures => "simple_pleasures",
    }
}

fn parse_gratitude_category(value: &str) -> Option<GratitudeCategory> {
    match value {
        "people" => Some(GratitudeCategory::People),
        "experiences" => Some(GratitudeCategory::Experiences),
        "personal" => Some(GratitudeCategory::Personal),
        "nature" => Some(GratitudeCategory::Nature),
        "health" => Some(GratitudeCategory::Health),
        "simple_pleasures" => Some(GratitudeCategory::SimplePleasures),
        _ => None,
    }
}

fn intention_category_to_db(category: IntentionCategory) -> &'static str {
    match category {
        IntentionCategory::Mindfulness => "mindfulness",
        IntentionCategory::Connection => "connection",
        IntentionCategory::Growth => "growth",
        IntentionCategory::Rest => "rest",
        IntentionCategory::Courage => "courage",
    }
}

fn parse_intention_category(value: &str) -> Option<IntentionCategory> {
    match value {
        "mindfulness" => Some(IntentionCategory::Mindfulness),
        "connection" => Some(IntentionCategory::Connection),
        "growth" => Some(IntentionCategory::Growth),
        "rest" => Some(IntentionCategory::Rest),
        "courage" => Some(IntentionCategory::Courage),
        _ => None,
    }
}
