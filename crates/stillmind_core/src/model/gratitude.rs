//! Gratitude journal domain model.

use super::{check_id, check_non_empty, EntryId, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What a gratitude entry is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GratitudeCategory {
    People,
    Experiences,
    Personal,
    Nature,
    Health,
    SimplePleasures,
}

/// One gratitude journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GratitudeEntry {
    pub uuid: EntryId,
    /// Entry timestamp in epoch milliseconds.
    pub recorded_at: i64,
    /// The gratitude text itself. Treated as sensitive; never logged.
    pub gratitude_text: String,
    pub category: GratitudeCategory,
    /// Emotion the user reported the entry generated.
    pub emotion_generated: String,
    /// Private entries are excluded from default queries.
    pub is_private: bool,
}

impl GratitudeEntry {
    /// Creates a gratitude entry with a generated stable id.
    ///
    /// # Errors
    /// - `ValidationError::EmptyField` when the gratitude text is blank.
    pub fn new(
        recorded_at: i64,
        gratitude_text: impl Into<String>,
        category: GratitudeCategory,
        emotion_generated: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let entry = Self {
            uuid: Uuid::new_v4(),
            recorded_at,
            gratitude_text: gratitude_text.into(),
            category,
            emotion_generated: emotion_generated.into(),
            is_private: false,
        };
        entry.validate()?;
        Ok(entry)
    }

    /// Re-checks all invariants after field mutation.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_id(self.uuid)?;
        check_non_empty("gratitude_text", &self.gratitude_text)?;
        Ok(())
    }
}
