//! User preferences singleton row access.
//!
//! # Invariants
//! - The table holds at most one row, keyed by the fixed slot 0.
//! - The stable uuid survives upserts of a loaded-and-modified record.

use super::{bool_to_int, decode_json_list, encode_json_list, parse_bool, parse_entry_id};
use crate::model::preferences::{PrivacyLevel, Theme, UserPreferences};
use crate::model::EntryId;
use crate::repo::breathing_repo::{parse_pattern, pattern_to_db};
use crate::store::{StoreError, StoreResult};
use rusqlite::{params, Connection, Row};

const PREFERENCES_SELECT_SQL: &str = "SELECT
    uuid,
    preferred_theme,
    notifications_enabled,
    reminder_times,
    preferred_breathing_pattern,
    sound_enabled,
    haptic_enabled,
    privacy_level
FROM user_preferences
WHERE slot = 0";

/// Read view over the singleton preferences row.
pub struct PreferencesRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> PreferencesRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Loads the preferences record, if one has been saved.
    pub fn load(&self) -> StoreResult<Option<UserPreferences>> {
        let mut stmt = self.conn.prepare(&format!("{PREFERENCES_SELECT_SQL};"))?;
        let mut rows = stmt.query([])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_preferences_row(row)?));
        }
        Ok(None)
    }

    pub(crate) fn upsert(&self, preferences: &UserPreferences) -> StoreResult<()> {
        preferences.validate()?;

        self.conn.execute(
            "INSERT INTO user_preferences (
                slot,
                uuid,
                preferred_theme,
                notifications_enabled,
                reminder_times,
                preferred_breathing_pattern,
                sound_enabled,
                haptic_enabled,
                privacy_level
            ) VALUES (0, ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT(slot) DO UPDATE SET
                uuid = excluded.uuid,
                preferred_theme = excluded.preferred_theme,
                notifications_enabled = excluded.notifications_enabled,
                reminder_times = excluded.reminder_times,
                preferred_breathing_pattern = excluded.preferred_breathing_pattern,
                sound_enabled = excluded.sound_enabled,
                haptic_enabled = excluded.haptic_enabled,
                privacy_level = excluded.privacy_level;",
            params![
                preferences.uuid.to_string(),
                theme_to_db(preferences.preferred_theme),
                bool_to_int(preferences.notifications_enabled),
                encode_json_list(
                    "user_preferences.reminder_times",
                    &preferences.reminder_times
                )?,
                pattern_to_db(preferences.preferred_breathing_pattern),
                bool_to_int(preferences.sound_enabled),
                bool_to_int(preferences.haptic_enabled),
                privacy_level_to_db(preferences.privacy_level),
            ],
        )?;
        Ok(())
    }

    pub(crate) fn delete(&self, id: EntryId) -> StoreResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM user_preferences WHERE slot = 0 AND uuid = ?1;",
            [id.to_string()],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}

fn parse_preferences_row(row: &Row<'_>) -> StoreResult<UserPreferences> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = parse_entry_id("user_preferences.uuid", &uuid_text)?;

    let theme_text: String = row.get("preferred_theme")?;
    let preferred_theme = parse_theme(&theme_text).ok_or_else(|| {
        StoreError::InvalidData(format!(
            "invalid theme `{theme_text}` in user_preferences.preferred_theme"
        ))
    })?;

    let pattern_text: String = row.get("preferred_breathing_pattern")?;
    let preferred_breathing_pattern = parse_pattern(&pattern_text).ok_or_else(|| {
        StoreError::InvalidData(format!(
            "invalid breathing pattern `{pattern_text}` in user_preferences.preferred_breathing_pattern"
        ))
    })?;

    let privacy_text: String = row.get("privacy_level")?;
    let privacy_level = parse_privacy_level(&privacy_text).ok_or_else(|| {
        StoreError::InvalidData(format!(
            "invalid privacy level `{privacy_text}` in user_preferences.privacy_level"
        ))
    })?;

    let reminder_text: String = row.get("reminder_times")?;
    let reminder_times = decode_json_list("user_preferences.reminder_times", &reminder_text)?;

    let preferences = UserPreferences {
        uuid,
        preferred_theme,
        notifications_enabled: parse_bool(
            "user_preferences.notifications_enabled",
            row.get("notifications_enabled")?,
        )?,
        reminder_times,
        preferred_breathing_pattern,
        sound_enabled: parse_bool("user_preferences.sound_enabled", row.get("sound_enabled")?)?,
        haptic_enabled: parse_bool(
            "user_preferences.haptic_enabled",
            row.get("haptic_enabled")?,
        )?,
        privacy_level,
    };
    preferences.validate()?;
    Ok(preferences)
}

fn theme_to_db(theme: Theme) -> &'static str {
    match theme {
        Theme::System => "system",
        Theme::Light => "light",
        Theme::Dark => "dark",
        Theme::Calm => "calm",
    }
}

fn parse_theme(value: &str) -> Option<Theme> {
    match value {
        "system" => Some(Theme::System),
        "light" => Some(Theme::Light),
        "dark" => Some(Theme::Dark),
        "calm" => Some(Theme::Calm),
        _ => None,
    }
}

fn privacy_level_to_db(level: PrivacyLevel) -> &'static str {
    match level {
        PrivacyLevel::Standard => "standard",
        PrivacyLevel::Private => "private",
        PrivacyLevel::Locked => "locked",
    }
}

fn parse_privacy_level(value: &str) -> Option<PrivacyLevel> {
    match value {
        "standard" => Some(PrivacyLevel::Standard),
        "private" => Some(PrivacyLevel::Private),
        "locked" => Some(PrivacyLevel::Locked),
        _ => None,
    }
}
