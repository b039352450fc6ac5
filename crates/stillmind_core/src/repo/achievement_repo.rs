//! Achievement queries and SQLite row mapping.
//!
//! # Invariants
//! - Rows are re-validated on read, so the unlock-state invariants hold
//!   for every achievement handed to callers.

use super::{bool_to_int, parse_bool, parse_entry_id, push_window};
use crate::model::achievement::{Achievement, AchievementType};
use crate::model::EntryId;
use crate::store::{StoreError, StoreResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const ACHIEVEMENT_SELECT_SQL: &str = "SELECT
    uuid,
    title,
    description,
    achievement_type,
    is_unlocked,
    progress,
    required_progress,
    date_earned
FROM achievements";

/// Predicate options for listing achievements.
#[derive(Debug, Clone, Default)]
pub struct AchievementQuery {
    pub achievement_type: Option<AchievementType>,
    /// `Some(true)` keeps unlocked only, `Some(false)` locked only.
    pub unlocked: Option<bool>,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Read view over persisted achievements.
pub struct AchievementRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> AchievementRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Gets one achievement by stable id.
    pub fn get(&self, id: EntryId) -> StoreResult<Option<Achievement>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ACHIEVEMENT_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query(params![id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_achievement_row(row)?));
        }
        Ok(None)
    }

    /// Gets one achievement by its unique title.
    pub fn by_title(&self, title: &str) -> StoreResult<Option<Achievement>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ACHIEVEMENT_SELECT_SQL} WHERE title = ?1;"))?;
        let mut rows = stmt.query(params![title])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_achievement_row(row)?));
        }
        Ok(None)
    }

    /// Lists achievements matching the query, ordered by title.
    pub fn list(&self, query: &AchievementQuery) -> StoreResult<Vec<Achievement>> {
        let mut sql = format!("{ACHIEVEMENT_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(kind) = query.achievement_type {
            sql.push_str(" AND achievement_type = ?");
            bind_values.push(Value::Text(achievement_type_to_db(kind).to_string()));
        }

        if let Some(unlocked) = query.unlocked {
            sql.push_str(" AND is_unlocked = ?");
            bind_values.push(Value::Integer(bool_to_int(unlocked)));
        }

        sql.push_str(" ORDER BY title ASC");
        push_window(&mut sql, &mut bind_values, query.limit, query.offset);

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut achievements = Vec::new();
        while let Some(row) = rows.next()? {
            achievements.push(parse_achievement_row(row)?);
        }
        Ok(achievements)
    }

    pub(crate) fn upsert(&self, achievement: &Achievement) -> StoreResult<()> {
        achievement.validate()?;

        self.conn.execute(
            "INSERT INTO achievements (
                uuid, title, description, achievement_type,
                is_unlocked, progress, required_progress, date_earned
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT(uuid) DO UPDATE SET
                title = excluded.title,
                description = excluded.description,
                achievement_type = excluded.achievement_type,
                is_unlocked = excluded.is_unlocked,
                progress = excluded.progress,
                required_progress = excluded.required_progress,
                date_earned = excluded.date_earned;",
            params![
                achievement.uuid.to_string(),
                achievement.title.as_str(),
                achievement.description.as_str(),
                achievement_type_to_db(achievement.achievement_type),
                bool_to_int(achievement.is_unlocked),
                achievement.progress,
                achievement.required_progress,
                achievement.date_earned,
            ],
        )?;
        Ok(())
    }

    pub(crate) fn delete(&self, id: EntryId) -> StoreResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM achievements WHERE uuid = ?1;",
            [id.to_string()],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}

fn parse_achievement_row(row: &Row<'_>) -> StoreResult<Achievement> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = parse_entry_id("achievements.uuid", &uuid_text)?;

    let type_text: String = row.get("achievement_type")?;
    let achievement_type = parse_achievement_type(&type_text).ok_or_else(|| {
        StoreError::InvalidData(format!(
            "invalid achievement type `{type_text}` in achievements.achievement_type"
        ))
    })?;

    let achievement = Achievement {
        uuid,
        title: row.get("title")?,
        description: row.get("description")?,
        achievement_type,
        is_unlocked: parse_bool("achievements.is_unlocked", row.get("is_unlocked")?)?,
        progress: row.get("progress")?,
        required_progress: row.get("required_progress")?,
        date_earned: row.get("date_earned")?,
    };
    achievement.validate()?;
    Ok(achievement)
}

fn achievement_type_to_db(kind: AchievementType) -> &'static str {
    match kind {
        AchievementType::Streak => "streak",
        AchievementType::Milestone => "milestone",
        AchievementType::Exploration => "exploration",
        AchievementType::Consistency => "consistency",
    }
}

fn parse_achievement_type(value: &str) -> Option<AchievementType> {
    match value {
        "streak" => Some(AchievementType::Streak),
        "milestone" => Some(AchievementType::Milestone),
        "exploration" => Some(AchievementType::Exploration),
        "consistency" => Some(AchievementType::Consistency),
        _ => None,
    }
}
