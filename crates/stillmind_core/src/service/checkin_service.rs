//! Mood check-in and emergency flow service.
//!
//! # Responsibility
//! - Stage mood entries, optionally paired with the breathing session
//!   completed during the same check-in.
//! - Stage emergency calming sessions.
//!
//! # Invariants
//! - A paired check-in links both records to each other before staging,
//!   so one save commits the pair atomically (the link foreign keys are
//!   deferred to commit).

use crate::model::breathing::BreathingSession;
use crate::model::emergency::EmergencySession;
use crate::model::mood::MoodEntry;
use crate::model::EntryId;
use crate::store::{Record, SaveOutcome, Store, StoreResult};

/// Use-case wrapper for the check-in flows.
pub struct CheckinService<'a> {
    store: &'a mut Store,
}

impl<'a> CheckinService<'a> {
    pub fn new(store: &'a mut Store) -> Self {
        Self { store }
    }

    /// Stages a standalone mood entry. Returns its stable id.
    pub fn log_mood(&mut self, entry: MoodEntry) -> StoreResult<EntryId> {
        self.store.stage(Record::Mood(entry))
    }

    /// Stages a mood entry paired with its breathing session.
    ///
    /// Links the two records in both directions before staging. Returns
    /// `(mood_id, session_id)`.
    pub fn log_checkin_with_breathing(
        &mut self,
        mut entry: MoodEntry,
        mut session: BreathingSession,
    ) -> StoreResult<(EntryId, EntryId)> {
        entry.breathing_session_id = Some(session.uuid);
        session.mood_entry_id = Some(entry.uuid);

        let mood_id = self.store.stage(Record::Mood(entry))?;
        let session_id = self.store.stage(Record::Breathing(session))?;
        Ok((mood_id, session_id))
    }

    /// Stages a standalone breathing session. Returns its stable id.
    pub fn log_breathing(&mut self, session: BreathingSession) -> StoreResult<EntryId> {
        self.store.stage(Record::Breathing(session))
    }

    /// Stages an emergency calming session. Returns its stable id.
    pub fn log_emergency(&mut self, session: EmergencySession) -> StoreResult<EntryId> {
        self.store.stage(Record::Emergency(session))
    }

    /// Commits everything staged so far.
    pub fn commit(&mut self) -> StoreResult<SaveOutcome> {
        self.store.save()
    }
}
