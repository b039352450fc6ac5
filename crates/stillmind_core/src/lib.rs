//! Core domain record store for the stillmind wellness app.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use db::SchemaRecovery;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::achievement::{Achievement, AchievementType};
pub use model::breathing::{BreathingPattern, BreathingSession, MAX_COMPLETION_PERCENT};
pub use model::emergency::EmergencySession;
pub use model::gratitude::{GratitudeCategory, GratitudeEntry};
pub use model::intention::{DailyIntention, IntentionCategory};
pub use model::mood::{MoodEntry, MoodScales};
pub use model::preferences::{PrivacyLevel, Theme, UserPreferences};
pub use model::thought::{CognitiveDistortion, ThoughtRecord};
pub use model::{EntryId, ValidationError, MAX_SCALE};
pub use repo::achievement_repo::AchievementQuery;
pub use repo::breathing_repo::BreathingQuery;
pub use repo::emergency_repo::EmergencyQuery;
pub use repo::journal_repo::{GratitudeQuery, IntentionQuery, ThoughtQuery};
pub use repo::mood_repo::MoodQuery;
pub use service::achievement_service::{default_catalog, AchievementService};
pub use service::checkin_service::CheckinService;
pub use service::reminder_service::ReminderService;
pub use store::{Record, RecordKind, SaveOutcome, Store, StoreError, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
