//! Guided breathing session domain model.
//!
//! # Invariants
//! - `completion_percent` stays within 0..=100; constructors clamp rather
//!   than reject, because partial sessions are a normal outcome.
//! - `mood_before`/`mood_after` stay within 0..=10.

use super::{check_id, check_scale, EntryId, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Completion ceiling for a breathing session.
pub const MAX_COMPLETION_PERCENT: u8 = 100;

/// Named guided-breathing technique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreathingPattern {
    /// Equal four-count inhale/hold/exhale/hold.
    Box,
    /// 4s inhale, 7s hold, 8s exhale.
    FourSevenEight,
    /// Slow diaphragmatic breathing.
    DeepBelly,
    /// Five-second inhale/exhale cadence.
    Coherent,
    /// Breathing at measured resonance frequency.
    Resonance,
}

/// One completed or abandoned guided breathing session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreathingSession {
    pub uuid: EntryId,
    /// Session start in epoch milliseconds.
    pub recorded_at: i64,
    pub pattern: BreathingPattern,
    /// Elapsed session time in seconds.
    pub duration_secs: u32,
    /// How much of the guided exercise was finished, 0..=100.
    pub completion_percent: u8,
    pub mood_before: u8,
    pub mood_after: u8,
    /// Optional back-link to the mood check-in this session belonged to.
    pub mood_entry_id: Option<EntryId>,
}

impl BreathingSession {
    /// Creates a session with a generated stable id.
    ///
    /// `completion_percent` above 100 is clamped to 100.
    ///
    /// # Errors
    /// - `ValidationError::ScaleOutOfRange` when a mood rating exceeds 10.
    pub fn new(
        recorded_at: i64,
        pattern: BreathingPattern,
        duration_secs: u32,
        completion_percent: u8,
        mood_before: u8,
        mood_after: u8,
    ) -> Result<Self, ValidationError> {
        let session = Self {
            uuid: Uuid::new_v4(),
            recorded_at,
            pattern,
            duration_secs,
            completion_percent: completion_percent.min(MAX_COMPLETION_PERCENT),
            mood_before,
            mood_after,
            mood_entry_id: None,
        };
        session.validate()?;
        Ok(session)
    }

    /// Re-checks all invariants after field mutation.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_id(self.uuid)?;
        check_scale("mood_before", self.mood_before)?;
        check_scale("mood_after", self.mood_after)?;
        if self.completion_percent > MAX_COMPLETION_PERCENT {
            return Err(ValidationError::ScaleOutOfRange {
                field: "completion_percent",
                value: self.completion_percent,
            });
        }
        Ok(())
    }

    /// Returns whether the guided exercise ran to the end.
    pub fn is_complete(&self) -> bool {
        self.completion_percent == MAX_COMPLETION_PERCENT
    }
}
