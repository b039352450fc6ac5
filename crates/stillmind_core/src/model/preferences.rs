//! User preferences domain model.
//!
//! # Invariants
//! - At most one preferences record exists per store (singleton row).
//! - Reminder times are 24-hour `HH:MM` strings; invalid syntax is
//!   rejected before staging, so the reminder collaborator can trust
//!   whatever it reads back.

use super::{check_id, EntryId, ValidationError};
use crate::model::breathing::BreathingPattern;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

static REMINDER_TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$").expect("valid reminder time regex"));

/// App-wide color theme choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    System,
    Light,
    Dark,
    Calm,
}

/// How strongly journal content is shielded in shared contexts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrivacyLevel {
    Standard,
    Private,
    Locked,
}

/// Singleton per-user settings record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub uuid: EntryId,
    pub preferred_theme: Theme,
    pub notifications_enabled: bool,
    /// 24-hour `HH:MM` reminder times. Read (never written) by the
    /// notification collaborator.
    pub reminder_times: Vec<String>,
    pub preferred_breathing_pattern: BreathingPattern,
    pub sound_enabled: bool,
    pub haptic_enabled: bool,
    pub privacy_level: PrivacyLevel,
}

impl UserPreferences {
    /// Creates the default preferences record with a generated stable id.
    pub fn new() -> Self {
        Self {
            uuid: Uuid::new_v4(),
            preferred_theme: Theme::System,
            notifications_enabled: false,
            reminder_times: Vec::new(),
            preferred_breathing_pattern: BreathingPattern::Box,
            sound_enabled: true,
            haptic_enabled: true,
            privacy_level: PrivacyLevel::Standard,
        }
    }

    /// Replaces the reminder schedule after validating every time string.
    ///
    /// # Errors
    /// - `ValidationError::InvalidReminderTime` for the first malformed
    ///   entry; the existing schedule is left untouched on error.
    pub fn set_reminder_times(&mut self, times: Vec<String>) -> Result<(), ValidationError> {
        for time in &times {
            check_reminder_time(time)?;
        }
        self.reminder_times = times;
        Ok(())
    }

    /// Re-checks all invariants after field mutation.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_id(self.uuid)?;
        for time in &self.reminder_times {
            check_reminder_time(time)?;
        }
        Ok(())
    }
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn check_reminder_time(value: &str) -> Result<(), ValidationError> {
    if !REMINDER_TIME_RE.is_match(value) {
        return Err(ValidationError::InvalidReminderTime {
            value: value.to_string(),
        });
    }
    Ok(())
}
