//! Emergency calming session domain model.
//!
//! Recorded when the user reaches for the panic/grounding flow rather
//! than a scheduled exercise.

use super::{check_id, check_non_empty, check_scale, EntryId, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One emergency calming session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencySession {
    pub uuid: EntryId,
    /// Session start in epoch milliseconds.
    pub recorded_at: i64,
    /// Emotion that triggered the session.
    pub trigger_emotion: String,
    pub intensity_before: u8,
    /// Calming techniques the user went through, in order.
    pub techniques_used: Vec<String>,
    /// Elapsed session time in seconds.
    pub duration_secs: u32,
    pub intensity_after: u8,
    /// Free-form notes. Treated as sensitive; never logged.
    pub notes: Option<String>,
}

impl EmergencySession {
    /// Starts an emergency session record with a generated stable id.
    ///
    /// `intensity_after` starts equal to `intensity_before` until
    /// `finish` records the outcome.
    ///
    /// # Errors
    /// - `ValidationError::EmptyField` when the trigger emotion is blank.
    /// - `ValidationError::ScaleOutOfRange` when the intensity exceeds 10.
    pub fn new(
        recorded_at: i64,
        trigger_emotion: impl Into<String>,
        intensity_before: u8,
    ) -> Result<Self, ValidationError> {
        let session = Self {
            uuid: Uuid::new_v4(),
            recorded_at,
            trigger_emotion: trigger_emotion.into(),
            intensity_before,
            techniques_used: Vec::new(),
            duration_secs: 0,
            intensity_after: intensity_before,
            notes: None,
        };
        session.validate()?;
        Ok(session)
    }

    /// Records the session outcome.
    ///
    /// # Errors
    /// - `ValidationError::ScaleOutOfRange` when `intensity_after` > 10.
    pub fn finish(&mut self, duration_secs: u32, intensity_after: u8) -> Result<(), ValidationError> {
        check_scale("intensity_after", intensity_after)?;
        self.duration_secs = duration_secs;
        self.intensity_after = intensity_after;
        Ok(())
    }

    /// How much the reported intensity dropped over the session.
    /// Negative when the session did not help.
    pub fn relief(&self) -> i16 {
        i16::from(self.intensity_before) - i16::from(self.intensity_after)
    }

    /// Re-checks all invariants after field mutation.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_id(self.uuid)?;
        check_non_empty("trigger_emotion", &self.trigger_emotion)?;
        check_scale("intensity_before", self.intensity_before)?;
        check_scale("intensity_after", self.intensity_after)?;
        Ok(())
    }
}
