use stillmind_core::{
    Achievement, AchievementType, BreathingPattern, BreathingSession, DailyIntention,
    EmergencySession, GratitudeCategory, GratitudeEntry, IntentionCategory, MoodEntry, MoodScales,
    ThoughtRecord, UserPreferences, ValidationError,
};

const NOW_MS: i64 = 1_756_000_000_000;

fn scales(emotion_intensity: u8) -> MoodScales {
    MoodScales {
        emotion_intensity,
        energy_level: 5,
        stress_level: 4,
        sleep_quality: 6,
    }
}

#[test]
fn mood_entry_rejects_out_of_range_intensity() {
    let err = MoodEntry::new(NOW_MS, "anxious", scales(12)).unwrap_err();
    assert_eq!(
        err,
        ValidationError::ScaleOutOfRange {
            field: "emotion_intensity",
            value: 12,
        }
    );
}

#[test]
fn mood_entry_rejects_blank_emotion() {
    let err = MoodEntry::new(NOW_MS, "   ", scales(5)).unwrap_err();
    assert_eq!(
        err,
        ValidationError::EmptyField {
            field: "primary_emotion",
        }
    );
}

#[test]
fn mood_entry_validate_catches_post_construction_mutation() {
    let mut entry = MoodEntry::new(NOW_MS, "calm", scales(3)).unwrap();
    entry.stress_level = 11;
    let err = entry.validate().unwrap_err();
    assert_eq!(
        err,
        ValidationError::ScaleOutOfRange {
            field: "stress_level",
            value: 11,
        }
    );
}

#[test]
fn breathing_session_clamps_completion_percent() {
    let session =
        BreathingSession::new(NOW_MS, BreathingPattern::Box, 240, 180, 4, 7).unwrap();
    assert_eq!(session.completion_percent, 100);
    assert!(session.is_complete());
}

#[test]
fn breathing_session_rejects_out_of_range_mood() {
    let err = BreathingSession::new(NOW_MS, BreathingPattern::Coherent, 240, 80, 11, 7)
        .unwrap_err();
    assert_eq!(
        err,
        ValidationError::ScaleOutOfRange {
            field: "mood_before",
            value: 11,
        }
    );
}

#[test]
fn gratitude_entry_rejects_blank_text() {
    let err = GratitudeEntry::new(NOW_MS, "", GratitudeCategory::People, "warmth").unwrap_err();
    assert_eq!(
        err,
        ValidationError::EmptyField {
            field: "gratitude_text",
        }
    );
}

#[test]
fn intention_complete_sets_flag_and_keeps_reflection() {
    let mut intention =
        DailyIntention::new(NOW_MS, "one mindful walk", IntentionCategory::Mindfulness).unwrap();
    assert!(!intention.is_completed);

    intention.complete(Some("walked at lunch".to_string()));
    assert!(intention.is_completed);
    assert_eq!(intention.reflection.as_deref(), Some("walked at lunch"));

    // Completing again without a reflection keeps the earlier one.
    intention.complete(None);
    assert_eq!(intention.reflection.as_deref(), Some("walked at lunch"));
}

#[test]
fn thought_record_reframe_validates_inputs() {
    let mut record =
        ThoughtRecord::new(NOW_MS, "missed a deadline", "I always fail", "shame", 8).unwrap();

    let err = record.reframe("", "relief", 3).unwrap_err();
    assert_eq!(
        err,
        ValidationError::EmptyField {
            field: "balanced_thought",
        }
    );
    assert!(record.balanced_thought.is_empty());

    let err = record.reframe("One deadline is one deadline", "relief", 11).unwrap_err();
    assert_eq!(
        err,
        ValidationError::ScaleOutOfRange {
            field: "intensity_after",
            value: 11,
        }
    );

    record
        .reframe("One deadline is one deadline", "relief", 3)
        .unwrap();
    assert_eq!(record.intensity_after, Some(3));
    assert_eq!(record.emotion_after.as_deref(), Some("relief"));
}

#[test]
fn emergency_session_finish_validates_intensity() {
    let mut session = EmergencySession::new(NOW_MS, "panic", 9).unwrap();
    assert_eq!(session.intensity_after, 9);

    let err = session.finish(300, 11).unwrap_err();
    assert_eq!(
        err,
        ValidationError::ScaleOutOfRange {
            field: "intensity_after",
            value: 11,
        }
    );

    session.finish(300, 4).unwrap();
    assert_eq!(session.relief(), 5);
}

#[test]
fn preferences_reject_malformed_reminder_times() {
    let mut preferences = UserPreferences::new();

    let err = preferences
        .set_reminder_times(vec!["08:30".to_string(), "25:00".to_string()])
        .unwrap_err();
    assert_eq!(
        err,
        ValidationError::InvalidReminderTime {
            value: "25:00".to_string(),
        }
    );
    // Failed replacement leaves the schedule untouched.
    assert!(preferences.reminder_times.is_empty());

    preferences
        .set_reminder_times(vec!["08:30".to_string(), "21:05".to_string()])
        .unwrap();
    assert_eq!(preferences.reminder_times.len(), 2);

    let err = preferences
        .set_reminder_times(vec!["9:30".to_string()])
        .unwrap_err();
    assert!(matches!(err, ValidationError::InvalidReminderTime { .. }));
}

#[test]
fn achievement_requires_nonzero_requirement() {
    let err = Achievement::new("Impossible", "zero steps", AchievementType::Milestone, 0)
        .unwrap_err();
    assert_eq!(err, ValidationError::ZeroRequiredProgress);
}

#[test]
fn achievement_progress_clamps_and_unlocks_once() {
    let mut achievement =
        Achievement::new("Seven-Day Streak", "seven in a row", AchievementType::Streak, 7)
            .unwrap();

    assert_eq!(achievement.record_progress(3, NOW_MS), 3);
    assert!(!achievement.is_unlocked);
    assert_eq!(achievement.date_earned, None);

    // Overshooting clamps at the requirement and unlocks.
    assert_eq!(achievement.record_progress(10, NOW_MS), 7);
    assert!(achievement.is_unlocked);
    assert_eq!(achievement.date_earned, Some(NOW_MS));

    // Further progress never moves the earned date.
    assert_eq!(achievement.record_progress(1, NOW_MS + 86_400_000), 7);
    assert_eq!(achievement.date_earned, Some(NOW_MS));
    achievement.validate().unwrap();
}

#[test]
fn achievement_with_excess_starting_progress_clamps_and_unlocks() {
    let achievement = Achievement::with_progress(
        "First Check-In",
        "first mood entry",
        AchievementType::Milestone,
        1,
        3,
        NOW_MS,
    )
    .unwrap();

    assert_eq!(achievement.progress, 1);
    assert_eq!(achievement.required_progress, 1);
    assert!(achievement.is_unlocked);
    assert_eq!(achievement.date_earned, Some(NOW_MS));
    achievement.validate().unwrap();
}

#[test]
fn achievement_validate_rejects_inconsistent_unlock_state() {
    let mut achievement =
        Achievement::new("Grateful Heart", "ten entries", AchievementType::Consistency, 10)
            .unwrap();

    achievement.progress = 12;
    assert_eq!(
        achievement.validate().unwrap_err(),
        ValidationError::ProgressExceedsRequired {
            progress: 12,
            required: 10,
        }
    );

    achievement.progress = 10;
    assert_eq!(
        achievement.validate().unwrap_err(),
        ValidationError::UnlockFlagMismatch {
            progress: 10,
            required: 10,
        }
    );

    achievement.is_unlocked = true;
    assert_eq!(
        achievement.validate().unwrap_err(),
        ValidationError::UnlockedWithoutDate
    );

    achievement.date_earned = Some(NOW_MS);
    achievement.validate().unwrap();
}
