//! Read-only reminder schedule surface.
//!
//! The notification collaborator consumes this and nothing else: it
//! reads `UserPreferences.reminder_times` and `notifications_enabled`
//! and never mutates domain records.

use crate::model::preferences::check_reminder_time;
use crate::store::{Store, StoreResult};

/// Read-only view resolving the reminder schedule from preferences.
pub struct ReminderService<'a> {
    store: &'a Store,
}

impl<'a> ReminderService<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Returns the reminder times sorted ascending.
    ///
    /// Empty when notifications are disabled or no preferences exist.
    /// Times are zero-padded `HH:MM`, so lexicographic order is clock
    /// order.
    pub fn schedule(&self) -> StoreResult<Vec<String>> {
        let Some(preferences) = self.store.preferences().load()? else {
            return Ok(Vec::new());
        };
        if !preferences.notifications_enabled {
            return Ok(Vec::new());
        }
        let mut times = preferences.reminder_times;
        times.sort();
        Ok(times)
    }

    /// Returns the next reminder strictly after `now`, wrapping to the
    /// first of the next day. `None` when the schedule is empty.
    ///
    /// # Errors
    /// - `StoreError::Validation` when `now` is not zero-padded `HH:MM`;
    ///   an unpadded clock value would compare out of order against the
    ///   stored times.
    pub fn next_after(&self, now: &str) -> StoreResult<Option<String>> {
        check_reminder_time(now)?;
        let times = self.schedule()?;
        if times.is_empty() {
            return Ok(None);
        }
        let next = times
            .iter()
            .find(|time| time.as_str() > now)
            .or_else(|| times.first())
            .cloned();
        Ok(next)
    }
}
