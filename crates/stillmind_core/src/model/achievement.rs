//! Achievement (usage milestone) domain model.
//!
//! # Invariants
//! - `progress <= required_progress` always holds; progress writes clamp.
//! - `is_unlocked` is true exactly when `progress >= required_progress`.
//! - `date_earned` is set once at the moment of unlock and never cleared.

use super::{check_id, check_non_empty, EntryId, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What kind of usage milestone an achievement tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementType {
    /// Consecutive-day usage runs.
    Streak,
    /// One-off firsts and totals.
    Milestone,
    /// Trying distinct features or techniques.
    Exploration,
    /// Sustained regular practice.
    Consistency,
}

/// Gamification record tracking progress toward one usage milestone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub uuid: EntryId,
    pub title: String,
    pub description: String,
    pub achievement_type: AchievementType,
    pub is_unlocked: bool,
    pub progress: u32,
    pub required_progress: u32,
    /// Epoch milliseconds of first unlock. Never cleared once set.
    pub date_earned: Option<i64>,
}

impl Achievement {
    /// Creates a locked achievement at zero progress.
    ///
    /// # Errors
    /// - `ValidationError::EmptyField` when the title is blank.
    /// - `ValidationError::ZeroRequiredProgress` when `required_progress`
    ///   is zero.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        achievement_type: AchievementType,
        required_progress: u32,
    ) -> Result<Self, ValidationError> {
        let achievement = Self {
            uuid: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            achievement_type,
            is_unlocked: false,
            progress: 0,
            required_progress,
            date_earned: None,
        };
        achievement.validate()?;
        Ok(achievement)
    }

    /// Creates an achievement with starting progress, clamped to the
    /// requirement. Unlocks immediately (earned at `now_ms`) when the
    /// clamped progress already meets the requirement.
    pub fn with_progress(
        title: impl Into<String>,
        description: impl Into<String>,
        achievement_type: AchievementType,
        required_progress: u32,
        progress: u32,
        now_ms: i64,
    ) -> Result<Self, ValidationError> {
        let mut achievement = Self::new(title, description, achievement_type, required_progress)?;
        achievement.record_progress(progress, now_ms);
        Ok(achievement)
    }

    /// Adds progress steps, clamping at the requirement.
    ///
    /// Sets `is_unlocked` and stamps `date_earned` exactly once, the
    /// first time the requirement is reached. Returns the new progress.
    pub fn record_progress(&mut self, amount: u32, now_ms: i64) -> u32 {
        self.progress = self
            .progress
            .saturating_add(amount)
            .min(self.required_progress);
        if self.progress >= self.required_progress && !self.is_unlocked {
            self.is_unlocked = true;
            if self.date_earned.is_none() {
                self.date_earned = Some(now_ms);
            }
        }
        self.progress
    }

    /// Re-checks all invariants after field mutation.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_id(self.uuid)?;
        check_non_empty("title", &self.title)?;
        if self.required_progress == 0 {
            return Err(ValidationError::ZeroRequiredProgress);
        }
        if self.progress > self.required_progress {
            return Err(ValidationError::ProgressExceedsRequired {
                progress: self.progress,
                required: self.required_progress,
            });
        }
        if self.is_unlocked != (self.progress >= self.required_progress) {
            return Err(ValidationError::UnlockFlagMismatch {
                progress: self.progress,
                required: self.required_progress,
            });
        }
        if self.is_unlocked && self.date_earned.is_none() {
            return Err(ValidationError::UnlockedWithoutDate);
        }
        Ok(())
    }
}
