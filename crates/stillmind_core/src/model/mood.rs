//! Mood check-in domain model.
//!
//! # Invariants
//! - All four scale fields stay within 0..=10.
//! - `primary_emotion` is never empty.
//! - `breathing_session_id` may name at most one breathing session; the
//!   session may name this entry back (mutually optional one-to-one).

use super::{check_id, check_non_empty, check_scale, EntryId, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Bundled 0..=10 ratings captured during a mood check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodScales {
    pub emotion_intensity: u8,
    pub energy_level: u8,
    pub stress_level: u8,
    pub sleep_quality: u8,
}

/// One mood check-in record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    /// Stable id used for linking and queries.
    pub uuid: EntryId,
    /// Check-in timestamp in epoch milliseconds.
    pub recorded_at: i64,
    /// Dominant emotion as named by the user.
    pub primary_emotion: String,
    pub emotion_intensity: u8,
    pub energy_level: u8,
    pub stress_level: u8,
    pub sleep_quality: u8,
    /// Free-form notes. Treated as sensitive; never logged.
    pub notes: Option<String>,
    /// User-named situational triggers.
    pub triggers: Vec<String>,
    /// How weather affected the mood, when the user chose to record it.
    pub weather_impact: Option<String>,
    /// Optional link to the breathing session done with this check-in.
    pub breathing_session_id: Option<EntryId>,
}

impl MoodEntry {
    /// Creates a mood entry with a generated stable id.
    ///
    /// # Errors
    /// - `ValidationError::EmptyField` when `primary_emotion` is blank.
    /// - `ValidationError::ScaleOutOfRange` when any scale exceeds 10.
    pub fn new(
        recorded_at: i64,
        primary_emotion: impl Into<String>,
        scales: MoodScales,
    ) -> Result<Self, ValidationError> {
        let entry = Self {
            uuid: Uuid::new_v4(),
            recorded_at,
            primary_emotion: primary_emotion.into(),
            emotion_intensity: scales.emotion_intensity,
            energy_level: scales.energy_level,
            stress_level: scales.stress_level,
            sleep_quality: scales.sleep_quality,
            notes: None,
            triggers: Vec::new(),
            weather_impact: None,
            breathing_session_id: None,
        };
        entry.validate()?;
        Ok(entry)
    }

    /// Re-checks all invariants after field mutation.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_id(self.uuid)?;
        check_non_empty("primary_emotion", &self.primary_emotion)?;
        check_scale("emotion_intensity", self.emotion_intensity)?;
        check_scale("energy_level", self.energy_level)?;
        check_scale("stress_level", self.stress_level)?;
        check_scale("sleep_quality", self.sleep_quality)?;
        Ok(())
    }
}
