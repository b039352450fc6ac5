//! Persistence gateway: the staged-save store handle.
//!
//! # Responsibility
//! - Own the one long-lived SQLite connection per process.
//! - Track pending record changes in memory and flush them in a single
//!   transaction on explicit save.
//! - Expose per-area read views for query-by-predicate access.
//!
//! # Invariants
//! - `save()` with nothing pending is a no-op and performs no I/O.
//! - A failed save rolls back completely: persisted data is untouched
//!   and the pending set stays intact for retry or discard.
//! - Records are validated when staged; invalid records never enter the
//!   pending set.
//! - The handle is explicitly constructed and explicitly passed; there
//!   is no hidden global context.

use crate::db::{open_db_in_memory, open_db_with_recovery, DbError, SchemaRecovery};
use crate::model::achievement::Achievement;
use crate::model::breathing::BreathingSession;
use crate::model::emergency::EmergencySession;
use crate::model::gratitude::GratitudeEntry;
use crate::model::intention::DailyIntention;
use crate::model::mood::MoodEntry;
use crate::model::preferences::UserPreferences;
use crate::model::thought::ThoughtRecord;
use crate::model::{EntryId, ValidationError};
use crate::repo::achievement_repo::AchievementRepository;
use crate::repo::breathing_repo::BreathingRepository;
use crate::repo::emergency_repo::EmergencyRepository;
use crate::repo::journal_repo::JournalRepository;
use crate::repo::mood_repo::MoodRepository;
use crate::repo::preferences_repo::PreferencesRepository;
use log::{error, info};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::time::Instant;

pub type StoreResult<T> = Result<T, StoreError>;

/// Gateway error for persistence and query operations.
///
/// Storage failures surface here as recoverable typed results; the
/// gateway never terminates the process on a failed save.
#[derive(Debug)]
pub enum StoreError {
    Validation(ValidationError),
    Db(DbError),
    NotFound(EntryId),
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// One persistable record of any entity type.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Mood(MoodEntry),
    Breathing(BreathingSession),
    Gratitude(GratitudeEntry),
    Intention(DailyIntention),
    Thought(ThoughtRecord),
    Preferences(UserPreferences),
    Emergency(EmergencySession),
    Achievement(Achievement),
}

impl Record {
    /// Stable id of the wrapped record.
    pub fn id(&self) -> EntryId {
        match self {
            Self::Mood(entry) => entry.uuid,
            Self::Breathing(session) => session.uuid,
            Self::Gratitude(entry) => entry.uuid,
            Self::Intention(intention) => intention.uuid,
            Self::Thought(record) => record.uuid,
            Self::Preferences(preferences) => preferences.uuid,
            Self::Emergency(session) => session.uuid,
            Self::Achievement(achievement) => achievement.uuid,
        }
    }

    /// Entity type of the wrapped record.
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::Mood(_) => RecordKind::Mood,
            Self::Breathing(_) => RecordKind::Breathing,
            Self::Gratitude(_) => RecordKind::Gratitude,
            Self::Intention(_) => RecordKind::Intention,
            Self::Thought(_) => RecordKind::Thought,
            Self::Preferences(_) => RecordKind::Preferences,
            Self::Emergency(_) => RecordKind::Emergency,
            Self::Achievement(_) => RecordKind::Achievement,
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Self::Mood(entry) => entry.validate(),
            Self::Breathing(session) => session.validate(),
            Self::Gratitude(entry) => entry.validate(),
            Self::Intention(intention) => intention.validate(),
            Self::Thought(record) => record.validate(),
            Self::Preferences(preferences) => preferences.validate(),
            Self::Emergency(session) => session.validate(),
            Self::Achievement(achievement) => achievement.validate(),
        }
    }
}

/// Entity type tag used for staged deletions and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Mood,
    Breathing,
    Gratitude,
    Intention,
    Thought,
    Preferences,
    Emergency,
    Achievement,
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Mood => "mood_entry",
            Self::Breathing => "breathing_session",
            Self::Gratitude => "gratitude_entry",
            Self::Intention => "daily_intention",
            Self::Thought => "thought_record",
            Self::Preferences => "user_preferences",
            Self::Emergency => "emergency_session",
            Self::Achievement => "achievement",
        };
        f.write_str(name)
    }
}

/// One pending change awaiting the next save.
#[derive(Debug, Clone, PartialEq)]
enum Change {
    Upsert(Record),
    Delete { kind: RecordKind, id: EntryId },
}

/// Result of an explicit save call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Nothing was pending; no transaction was opened.
    NoChanges,
    /// All pending changes were committed in one transaction.
    Saved { written: usize },
}

/// Long-lived persistence handle for the wellness record store.
///
/// Single-writer model: one `Store` is created at process start, owned
/// by the application entry point, and passed explicitly to every
/// collaborator. Writes require `&mut self`; there is no background
/// mutation.
#[derive(Debug)]
pub struct Store {
    conn: Connection,
    pending: Vec<Change>,
}

impl Store {
    /// Opens (or creates) the store file, refusing destructive recovery.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::open_with_recovery(path, SchemaRecovery::Fail)
    }

    /// Opens the store file with an explicit schema recovery policy.
    ///
    /// `SchemaRecovery::ConfirmedReset` discards an incompatible store
    /// and recreates it empty. Callers must only pass it after the user
    /// explicitly confirmed the data loss.
    pub fn open_with_recovery(
        path: impl AsRef<Path>,
        recovery: SchemaRecovery,
    ) -> StoreResult<Self> {
        let conn = open_db_with_recovery(path, recovery)?;
        Ok(Self {
            conn,
            pending: Vec::new(),
        })
    }

    /// Opens an ephemeral in-memory store. Test and preview contexts.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = open_db_in_memory()?;
        Ok(Self {
            conn,
            pending: Vec::new(),
        })
    }

    /// Validates a record and queues it for upsert on the next save.
    ///
    /// Returns the record's stable id. Both creation and mutation go
    /// through staging; the later of two staged upserts for the same id
    /// wins.
    ///
    /// # Errors
    /// - `StoreError::Validation` when the record breaks a domain
    ///   invariant; nothing is staged in that case.
    pub fn stage(&mut self, record: Record) -> StoreResult<EntryId> {
        record.validate()?;
        let id = record.id();
        self.pending.push(Change::Upsert(record));
        Ok(id)
    }

    /// Queues an explicit deletion for the next save.
    ///
    /// Deleting an id that does not exist at save time fails the whole
    /// save with `StoreError::NotFound`.
    pub fn stage_delete(&mut self, kind: RecordKind, id: EntryId) {
        self.pending.push(Change::Delete { kind, id });
    }

    /// Number of changes awaiting the next save.
    pub fn pending_changes(&self) -> usize {
        self.pending.len()
    }

    /// Returns whether any changes await the next save.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Drops all staged changes without touching storage.
    pub fn discard_pending(&mut self) {
        self.pending.clear();
    }

    /// Flushes all pending changes in one all-or-nothing transaction.
    ///
    /// # Contract
    /// - No pending changes: returns `SaveOutcome::NoChanges` without
    ///   opening a transaction.
    /// - On success: every staged change is durably committed and the
    ///   pending set is cleared.
    /// - On failure: the transaction is rolled back, persisted data is
    ///   exactly as before the call, the pending set is kept, and the
    ///   error is returned to the caller.
    pub fn save(&mut self) -> StoreResult<SaveOutcome> {
        if self.pending.is_empty() {
            return Ok(SaveOutcome::NoChanges);
        }

        let started_at = Instant::now();
        let staged = self.pending.len();

        let tx = self.conn.transaction()?;
        for change in &self.pending {
            if let Err(err) = apply_change(&tx, change) {
                // Dropping the transaction rolls it back.
                drop(tx);
                error!(
                    "event=save module=store status=error changes={staged} duration_ms={} error={err}",
                    started_at.elapsed().as_millis()
                );
                return Err(err);
            }
        }
        if let Err(err) = tx.commit() {
            // Deferred foreign keys are checked here; a failed commit has
            // already rolled back.
            error!(
                "event=save module=store status=error changes={staged} duration_ms={} error={err}",
                started_at.elapsed().as_millis()
            );
            return Err(err.into());
        }

        self.pending.clear();
        info!(
            "event=save module=store status=ok changes={staged} duration_ms={}",
            started_at.elapsed().as_millis()
        );
        Ok(SaveOutcome::Saved { written: staged })
    }

    /// Deletes every persisted row and all pending changes.
    ///
    /// Ephemeral/test contexts only; normal operation never calls this.
    pub fn reset(&mut self) -> StoreResult<()> {
        let tx = self.conn.transaction()?;
        tx.execute_batch(
            "DELETE FROM mood_entries;
             DELETE FROM breathing_sessions;
             DELETE FROM gratitude_entries;
             DELETE FROM daily_intentions;
             DELETE FROM thought_records;
             DELETE FROM user_preferences;
             DELETE FROM emergency_sessions;
             DELETE FROM achievements;",
        )?;
        tx.commit()?;
        self.pending.clear();
        info!("event=store_reset module=store status=ok");
        Ok(())
    }

    /// Read view over mood entries.
    pub fn moods(&self) -> MoodRepository<'_> {
        MoodRepository::new(&self.conn)
    }

    /// Read view over breathing sessions.
    pub fn breathing(&self) -> BreathingRepository<'_> {
        BreathingRepository::new(&self.conn)
    }

    /// Read view over gratitude entries, intentions, and thought records.
    pub fn journal(&self) -> JournalRepository<'_> {
        JournalRepository::new(&self.conn)
    }

    /// Read view over the singleton preferences row.
    pub fn preferences(&self) -> PreferencesRepository<'_> {
        PreferencesRepository::new(&self.conn)
    }

    /// Read view over emergency sessions.
    pub fn emergencies(&self) -> EmergencyRepository<'_> {
        EmergencyRepository::new(&self.conn)
    }

    /// Read view over achievements.
    pub fn achievements(&self) -> AchievementRepository<'_> {
        AchievementRepository::new(&self.conn)
    }
}

fn apply_change(conn: &Connection, change: &Change) -> StoreResult<()> {
    match change {
        Change::Upsert(Record::Mood(entry)) => MoodRepository::new(conn).upsert(entry),
        Change::Upsert(Record::Breathing(session)) => {
            BreathingRepository::new(conn).upsert(session)
        }
        Change::Upsert(Record::Gratitude(entry)) => {
            JournalRepository::new(conn).upsert_gratitude(entry)
        }
        Change::Upsert(Record::Intention(intention)) => {
            JournalRepository::new(conn).upsert_intention(intention)
        }
        Change::Upsert(Record::Thought(record)) => {
            JournalRepository::new(conn).upsert_thought(record)
        }
        Change::Upsert(Record::Preferences(preferences)) => {
            PreferencesRepository::new(conn).upsert(preferences)
        }
        Change::Upsert(Record::Emergency(session)) => {
            EmergencyRepository::new(conn).upsert(session)
        }
        Change::Upsert(Record::Achievement(achievement)) => {
            AchievementRepository::new(conn).upsert(achievement)
        }
        Change::Delete { kind, id } => match kind {
            RecordKind::Mood => MoodRepository::new(conn).delete(*id),
            RecordKind::Breathing => BreathingRepository::new(conn).delete(*id),
            RecordKind::Gratitude => JournalRepository::new(conn).delete_gratitude(*id),
            RecordKind::Intention => JournalRepository::new(conn).delete_intention(*id),
            RecordKind::Thought => JournalRepository::new(conn).delete_thought(*id),
            RecordKind::Preferences => PreferencesRepository::new(conn).delete(*id),
            RecordKind::Emergency => EmergencyRepository::new(conn).delete(*id),
            RecordKind::Achievement => AchievementRepository::new(conn).delete(*id),
        },
    }
}
