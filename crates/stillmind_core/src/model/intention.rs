//! Daily intention domain model.

use super::{check_id, check_non_empty, EntryId, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Focus area an intention belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentionCategory {
    Mindfulness,
    Connection,
    Growth,
    Rest,
    Courage,
}

/// One daily intention with an optional evening reflection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyIntention {
    pub uuid: EntryId,
    /// The day the intention was set, in epoch milliseconds.
    pub recorded_at: i64,
    pub intention_text: String,
    pub category: IntentionCategory,
    pub is_completed: bool,
    /// Reflection written when the user closes out the day.
    pub reflection: Option<String>,
}

impl DailyIntention {
    /// Creates an intention with a generated stable id.
    ///
    /// # Errors
    /// - `ValidationError::EmptyField` when the intention text is blank.
    pub fn new(
        recorded_at: i64,
        intention_text: impl Into<String>,
        category: IntentionCategory,
    ) -> Result<Self, ValidationError> {
        let intention = Self {
            uuid: Uuid::new_v4(),
            recorded_at,
            intention_text: intention_text.into(),
            category,
            is_completed: false,
            reflection: None,
        };
        intention.validate()?;
        Ok(intention)
    }

    /// Marks the intention done, optionally recording a reflection.
    pub fn complete(&mut self, reflection: Option<String>) {
        self.is_completed = true;
        if reflection.is_some() {
            self.reflection = reflection;
        }
    }

    /// Re-checks all invariants after field mutation.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_id(self.uuid)?;
        check_non_empty("intention_text", &self.intention_text)?;
        Ok(())
    }
}
