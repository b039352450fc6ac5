//! Cognitive-behavioral thought record domain model.
//!
//! A thought record captures a situation, the automatic thought it
//! triggered, the distortion patterns the user identified, and the
//! reframed ("balanced") thought with before/after intensity ratings.

use super::{check_id, check_non_empty, check_scale, EntryId, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Named cognitive distortion pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CognitiveDistortion {
    AllOrNothing,
    Overgeneralization,
    MentalFilter,
    Catastrophizing,
    MindReading,
    FortuneTelling,
    EmotionalReasoning,
    ShouldStatements,
    Labeling,
    Personalization,
}

/// One structured CBT journaling entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThoughtRecord {
    pub uuid: EntryId,
    /// Entry timestamp in epoch milliseconds.
    pub recorded_at: i64,
    /// What happened. Treated as sensitive; never logged.
    pub situation: String,
    /// The unexamined first thought.
    pub automatic_thought: String,
    pub emotion_before: String,
    pub intensity_before: u8,
    /// Distortion patterns the user identified in the automatic thought.
    pub cognitive_distortions: Vec<CognitiveDistortion>,
    /// The reframed thought. Empty until the user finishes the exercise.
    pub balanced_thought: String,
    pub emotion_after: Option<String>,
    pub intensity_after: Option<u8>,
    /// Concrete next step the user committed to, if any.
    pub action_plan: Option<String>,
}

impl ThoughtRecord {
    /// Creates a thought record with a generated stable id.
    ///
    /// The reframing fields start empty; `reframe` fills them once the
    /// user completes the exercise.
    ///
    /// # Errors
    /// - `ValidationError::EmptyField` for a blank situation or thought.
    /// - `ValidationError::ScaleOutOfRange` when `intensity_before` > 10.
    pub fn new(
        recorded_at: i64,
        situation: impl Into<String>,
        automatic_thought: impl Into<String>,
        emotion_before: impl Into<String>,
        intensity_before: u8,
    ) -> Result<Self, ValidationError> {
        let record = Self {
            uuid: Uuid::new_v4(),
            recorded_at,
            situation: situation.into(),
            automatic_thought: automatic_thought.into(),
            emotion_before: emotion_before.into(),
            intensity_before,
            cognitive_distortions: Vec::new(),
            balanced_thought: String::new(),
            emotion_after: None,
            intensity_after: None,
            action_plan: None,
        };
        record.validate()?;
        Ok(record)
    }

    /// Records the balanced thought and after-state of the exercise.
    ///
    /// # Errors
    /// - `ValidationError::EmptyField` for a blank balanced thought.
    /// - `ValidationError::ScaleOutOfRange` when `intensity_after` > 10.
    pub fn reframe(
        &mut self,
        balanced_thought: impl Into<String>,
        emotion_after: impl Into<String>,
        intensity_after: u8,
    ) -> Result<(), ValidationError> {
        let balanced = balanced_thought.into();
        check_non_empty("balanced_thought", &balanced)?;
        check_scale("intensity_after", intensity_after)?;
        self.balanced_thought = balanced;
        self.emotion_after = Some(emotion_after.into());
        self.intensity_after = Some(intensity_after);
        Ok(())
    }

    /// Re-checks all invariants after field mutation.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_id(self.uuid)?;
        check_non_empty("situation", &self.situation)?;
        check_non_empty("automatic_thought", &self.automatic_thought)?;
        check_scale("intensity_before", self.intensity_before)?;
        if let Some(after) = self.intensity_after {
            check_scale("intensity_after", after)?;
        }
        Ok(())
    }
}
