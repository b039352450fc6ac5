use stillmind_core::{
    GratitudeCategory, GratitudeEntry, MoodEntry, MoodQuery, MoodScales, Record, RecordKind,
    SaveOutcome, Store, StoreError, ValidationError,
};
use uuid::Uuid;

const NOW_MS: i64 = 1_756_000_000_000;
const HOUR_MS: i64 = 3_600_000;

fn mood(recorded_at: i64, emotion: &str) -> MoodEntry {
    MoodEntry::new(
        recorded_at,
        emotion,
        MoodScales {
            emotion_intensity: 6,
            energy_level: 5,
            stress_level: 4,
            sleep_quality: 7,
        },
    )
    .unwrap()
}

#[test]
fn save_without_pending_changes_is_a_noop() {
    let mut store = Store::open_in_memory().unwrap();
    assert!(!store.has_pending());
    assert_eq!(store.save().unwrap(), SaveOutcome::NoChanges);
    assert_eq!(store.save().unwrap(), SaveOutcome::NoChanges);
}

#[test]
fn create_save_query_roundtrip_preserves_fields() {
    let mut store = Store::open_in_memory().unwrap();

    let mut entry = mood(NOW_MS, "hopeful");
    entry.notes = Some("slept well, slow morning".to_string());
    entry.triggers = vec!["work email".to_string(), "coffee".to_string()];
    entry.weather_impact = Some("sunny helped".to_string());
    let expected = entry.clone();

    let id = store.stage(Record::Mood(entry)).unwrap();
    assert_eq!(store.pending_changes(), 1);
    assert_eq!(store.save().unwrap(), SaveOutcome::Saved { written: 1 });
    assert!(!store.has_pending());

    let loaded = store.moods().get(id).unwrap().unwrap();
    assert_eq!(loaded, expected);
}

#[test]
fn one_save_commits_a_batch_of_mixed_records() {
    let mut store = Store::open_in_memory().unwrap();

    store.stage(Record::Mood(mood(NOW_MS, "steady"))).unwrap();
    store
        .stage(Record::Gratitude(
            GratitudeEntry::new(NOW_MS, "quiet evening", GratitudeCategory::SimplePleasures, "calm")
                .unwrap(),
        ))
        .unwrap();
    store.stage(Record::Mood(mood(NOW_MS + HOUR_MS, "tired"))).unwrap();

    assert_eq!(store.save().unwrap(), SaveOutcome::Saved { written: 3 });
    assert_eq!(store.moods().list(&MoodQuery::default()).unwrap().len(), 2);
    assert_eq!(
        store
            .journal()
            .list_gratitude(&Default::default())
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn staging_an_invalid_record_rejects_without_staging() {
    let mut store = Store::open_in_memory().unwrap();

    let mut entry = mood(NOW_MS, "wired");
    entry.emotion_intensity = 12;
    let err = store.stage(Record::Mood(entry)).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation(ValidationError::ScaleOutOfRange {
            field: "emotion_intensity",
            value: 12,
        })
    ));

    assert!(!store.has_pending());
    assert_eq!(store.save().unwrap(), SaveOutcome::NoChanges);
    assert!(store.moods().list(&MoodQuery::default()).unwrap().is_empty());
}

#[test]
fn failed_save_rolls_back_and_keeps_pending() {
    let mut store = Store::open_in_memory().unwrap();

    let committed = mood(NOW_MS, "fine");
    store.stage(Record::Mood(committed.clone())).unwrap();
    store.save().unwrap();
    let before = store.moods().list(&MoodQuery::default()).unwrap();

    // A batch where the second change targets a missing row.
    store.stage(Record::Mood(mood(NOW_MS + HOUR_MS, "later"))).unwrap();
    let missing = Uuid::new_v4();
    store.stage_delete(RecordKind::Mood, missing);

    let err = store.save().unwrap_err();
    assert!(matches!(err, StoreError::NotFound(id) if id == missing));

    // Persisted data is exactly the pre-save state.
    let after = store.moods().list(&MoodQuery::default()).unwrap();
    assert_eq!(after, before);

    // The pending set is intact for retry or discard.
    assert_eq!(store.pending_changes(), 2);
    store.discard_pending();
    assert_eq!(store.save().unwrap(), SaveOutcome::NoChanges);
}

#[test]
fn later_staged_upsert_for_the_same_id_wins() {
    let mut store = Store::open_in_memory().unwrap();

    let mut entry = mood(NOW_MS, "draft");
    let id = store.stage(Record::Mood(entry.clone())).unwrap();
    entry.primary_emotion = "settled".to_string();
    store.stage(Record::Mood(entry)).unwrap();

    assert_eq!(store.save().unwrap(), SaveOutcome::Saved { written: 2 });
    let loaded = store.moods().get(id).unwrap().unwrap();
    assert_eq!(loaded.primary_emotion, "settled");
    assert_eq!(store.moods().list(&MoodQuery::default()).unwrap().len(), 1);
}

#[test]
fn staged_delete_removes_a_committed_record() {
    let mut store = Store::open_in_memory().unwrap();

    let entry = mood(NOW_MS, "passing");
    let id = store.stage(Record::Mood(entry)).unwrap();
    store.save().unwrap();

    store.stage_delete(RecordKind::Mood, id);
    assert_eq!(store.save().unwrap(), SaveOutcome::Saved { written: 1 });
    assert!(store.moods().get(id).unwrap().is_none());
}

#[test]
fn list_orders_newest_first_with_window() {
    let mut store = Store::open_in_memory().unwrap();

    for (offset, emotion) in [(0, "first"), (1, "second"), (2, "third")] {
        store
            .stage(Record::Mood(mood(NOW_MS + offset * HOUR_MS, emotion)))
            .unwrap();
    }
    store.save().unwrap();

    let all = store.moods().list(&MoodQuery::default()).unwrap();
    let emotions: Vec<&str> = all.iter().map(|e| e.primary_emotion.as_str()).collect();
    assert_eq!(emotions, ["third", "second", "first"]);

    let windowed = store
        .moods()
        .list(&MoodQuery {
            limit: Some(1),
            offset: 1,
            ..MoodQuery::default()
        })
        .unwrap();
    assert_eq!(windowed.len(), 1);
    assert_eq!(windowed[0].primary_emotion, "second");

    let filtered = store
        .moods()
        .list(&MoodQuery {
            emotion: Some("second".to_string()),
            ..MoodQuery::default()
        })
        .unwrap();
    assert_eq!(filtered.len(), 1);
}

#[test]
fn reset_wipes_rows_and_pending_changes() {
    let mut store = Store::open_in_memory().unwrap();

    store.stage(Record::Mood(mood(NOW_MS, "kept"))).unwrap();
    store.save().unwrap();
    store.stage(Record::Mood(mood(NOW_MS, "staged"))).unwrap();

    store.reset().unwrap();
    assert!(!store.has_pending());
    assert!(store.moods().list(&MoodQuery::default()).unwrap().is_empty());
}
