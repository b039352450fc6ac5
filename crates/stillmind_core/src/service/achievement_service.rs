//! Achievement catalog seeding and progress recording.
//!
//! # Invariants
//! - Seeding is idempotent: an achievement whose title already exists in
//!   the store is never staged again.
//! - Progress goes through `Achievement::record_progress`, so the clamp
//!   and unlock-once rules hold on every path.

use crate::model::achievement::{Achievement, AchievementType};
use crate::model::EntryId;
use crate::store::{Record, SaveOutcome, Store, StoreError, StoreResult};

/// Use-case wrapper for milestone tracking.
pub struct AchievementService<'a> {
    store: &'a mut Store,
}

impl<'a> AchievementService<'a> {
    pub fn new(store: &'a mut Store) -> Self {
        Self { store }
    }

    /// Stages every default achievement not yet present, keyed by title.
    ///
    /// Returns how many were staged. The caller commits.
    pub fn seed_catalog(&mut self) -> StoreResult<usize> {
        let mut staged = 0;
        for achievement in default_catalog()? {
            if self
                .store
                .achievements()
                .by_title(&achievement.title)?
                .is_some()
            {
                continue;
            }
            self.store.stage(Record::Achievement(achievement))?;
            staged += 1;
        }
        Ok(staged)
    }

    /// Adds progress to a stored achievement and stages the update.
    ///
    /// Returns the updated record. The caller commits.
    ///
    /// # Errors
    /// - `StoreError::NotFound` when no achievement has this id.
    pub fn record_progress(
        &mut self,
        id: EntryId,
        amount: u32,
        now_ms: i64,
    ) -> StoreResult<Achievement> {
        let mut achievement = self
            .store
            .achievements()
            .get(id)?
            .ok_or(StoreError::NotFound(id))?;
        achievement.record_progress(amount, now_ms);
        self.store.stage(Record::Achievement(achievement.clone()))?;
        Ok(achievement)
    }

    /// Commits everything staged so far.
    pub fn commit(&mut self) -> StoreResult<SaveOutcome> {
        self.store.save()
    }
}

/// The built-in milestone set every fresh store is seeded with.
pub fn default_catalog() -> StoreResult<Vec<Achievement>> {
    let catalog = [
        (
            "First Check-In",
            "Record your first mood entry.",
            AchievementType::Milestone,
            1,
        ),
        (
            "Seven-Day Streak",
            "Check in seven days in a row.",
            AchievementType::Streak,
            7,
        ),
        (
            "Steady Breather",
            "Complete five guided breathing sessions.",
            AchievementType::Milestone,
            5,
        ),
        (
            "Grateful Heart",
            "Write ten gratitude entries.",
            AchievementType::Consistency,
            10,
        ),
        (
            "Thought Detective",
            "Finish three thought records.",
            AchievementType::Exploration,
            3,
        ),
        (
            "Pattern Explorer",
            "Try every breathing technique once.",
            AchievementType::Exploration,
            5,
        ),
    ];

    catalog
        .into_iter()
        .map(|(title, description, kind, required)| {
            Achievement::new(title, description, kind, required).map_err(StoreError::Validation)
        })
        .collect()
}
