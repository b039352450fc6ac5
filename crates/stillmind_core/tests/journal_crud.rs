use stillmind_core::{
    CognitiveDistortion, DailyIntention, GratitudeCategory, GratitudeEntry, GratitudeQuery,
    IntentionCategory, IntentionQuery, Record, RecordKind, Store, ThoughtQuery, ThoughtRecord,
};

const NOW_MS: i64 = 1_756_000_000_000;
const DAY_MS: i64 = 86_400_000;

#[test]
fn gratitude_queries_exclude_private_entries_by_default() {
    let mut store = Store::open_in_memory().unwrap();

    let open_entry =
        GratitudeEntry::new(NOW_MS, "morning walk", GratitudeCategory::Nature, "peace").unwrap();
    let mut private_entry =
        GratitudeEntry::new(NOW_MS + 1, "a hard conversation", GratitudeCategory::People, "relief")
            .unwrap();
    private_entry.is_private = true;
    let private_id = private_entry.uuid;

    store.stage(Record::Gratitude(open_entry)).unwrap();
    store.stage(Record::Gratitude(private_entry)).unwrap();
    store.save().unwrap();

    let visible = store.journal().list_gratitude(&GratitudeQuery::default()).unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].gratitude_text, "morning walk");

    let all = store
        .journal()
        .list_gratitude(&GratitudeQuery {
            include_private: true,
            ..GratitudeQuery::default()
        })
        .unwrap();
    assert_eq!(all.len(), 2);

    // Get-by-id still reaches the private entry directly.
    assert!(store.journal().get_gratitude(private_id).unwrap().is_some());
}

#[test]
fn gratitude_category_filter_matches_exactly() {
    let mut store = Store::open_in_memory().unwrap();

    for (text, category) in [
        ("tea", GratitudeCategory::SimplePleasures),
        ("sister called", GratitudeCategory::People),
        ("long sleep", GratitudeCategory::Health),
    ] {
        store
            .stage(Record::Gratitude(
                GratitudeEntry::new(NOW_MS, text, category, "warmth").unwrap(),
            ))
            .unwrap();
    }
    store.save().unwrap();

    let people = store
        .journal()
        .list_gratitude(&GratitudeQuery {
            category: Some(GratitudeCategory::People),
            ..GratitudeQuery::default()
        })
        .unwrap();
    assert_eq!(people.len(), 1);
    assert_eq!(people[0].gratitude_text, "sister called");
}

#[test]
fn intention_completion_filter_and_update_roundtrip() {
    let mut store = Store::open_in_memory().unwrap();

    let mut done =
        DailyIntention::new(NOW_MS - DAY_MS, "call a friend", IntentionCategory::Connection)
            .unwrap();
    done.complete(Some("we talked an hour".to_string()));
    let open = DailyIntention::new(NOW_MS, "no phone after nine", IntentionCategory::Rest).unwrap();
    let open_id = open.uuid;

    store.stage(Record::Intention(done)).unwrap();
    store.stage(Record::Intention(open)).unwrap();
    store.save().unwrap();

    let completed = store
        .journal()
        .list_intentions(&IntentionQuery {
            completed: Some(true),
            ..IntentionQuery::default()
        })
        .unwrap();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].reflection.as_deref(), Some("we talked an hour"));

    // Close out the open intention and verify the update persists.
    let mut closing = store.journal().get_intention(open_id).unwrap().unwrap();
    closing.complete(None);
    store.stage(Record::Intention(closing)).unwrap();
    store.save().unwrap();

    let still_open = store
        .journal()
        .list_intentions(&IntentionQuery {
            completed: Some(false),
            ..IntentionQuery::default()
        })
        .unwrap();
    assert!(still_open.is_empty());
}

#[test]
fn thought_record_reframe_roundtrip_preserves_distortions() {
    let mut store = Store::open_in_memory().unwrap();

    let mut record =
        ThoughtRecord::new(NOW_MS, "silence after my message", "They are ignoring me", "worry", 7)
            .unwrap();
    record.cognitive_distortions =
        vec![CognitiveDistortion::MindReading, CognitiveDistortion::Catastrophizing];
    record
        .reframe("They are probably busy today", "ease", 3)
        .unwrap();
    record.action_plan = Some("wait until tomorrow before following up".to_string());
    let expected = record.clone();

    let id = store.stage(Record::Thought(record)).unwrap();
    store.save().unwrap();

    let loaded = store.journal().get_thought(id).unwrap().unwrap();
    assert_eq!(loaded, expected);
}

#[test]
fn thought_distortion_filter_matches_the_pattern_list() {
    let mut store = Store::open_in_memory().unwrap();

    let mut labeled =
        ThoughtRecord::new(NOW_MS, "burnt dinner", "I am a failure", "shame", 6).unwrap();
    labeled.cognitive_distortions = vec![CognitiveDistortion::Labeling];
    let mut filtered =
        ThoughtRecord::new(NOW_MS + 1, "one typo in the report", "The whole report is bad", "dread", 5)
            .unwrap();
    filtered.cognitive_distortions = vec![CognitiveDistortion::MentalFilter];

    store.stage(Record::Thought(labeled)).unwrap();
    store.stage(Record::Thought(filtered)).unwrap();
    store.save().unwrap();

    let hits = store
        .journal()
        .list_thoughts(&ThoughtQuery {
            distortion: Some(CognitiveDistortion::MentalFilter),
            ..ThoughtQuery::default()
        })
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].situation, "one typo in the report");
}

#[test]
fn journal_lists_are_newest_first_within_a_time_window() {
    let mut store = Store::open_in_memory().unwrap();

    for day in 0..3_i64 {
        store
            .stage(Record::Gratitude(
                GratitudeEntry::new(
                    NOW_MS + day * DAY_MS,
                    format!("day {day}"),
                    GratitudeCategory::Experiences,
                    "joy",
                )
                .unwrap(),
            ))
            .unwrap();
    }
    store.save().unwrap();

    let windowed = store
        .journal()
        .list_gratitude(&GratitudeQuery {
            from: Some(NOW_MS + DAY_MS),
            ..GratitudeQuery::default()
        })
        .unwrap();
    let texts: Vec<&str> = windowed.iter().map(|e| e.gratitude_text.as_str()).collect();
    assert_eq!(texts, ["day 2", "day 1"]);
}

#[test]
fn explicit_journal_deletes_remove_rows() {
    let mut store = Store::open_in_memory().unwrap();

    let entry =
        GratitudeEntry::new(NOW_MS, "to be removed", GratitudeCategory::Personal, "calm").unwrap();
    let intention =
        DailyIntention::new(NOW_MS, "to be removed", IntentionCategory::Growth).unwrap();
    let gratitude_id = store.stage(Record::Gratitude(entry)).unwrap();
    let intention_id = store.stage(Record::Intention(intention)).unwrap();
    store.save().unwrap();

    store.stage_delete(RecordKind::Gratitude, gratitude_id);
    store.stage_delete(RecordKind::Intention, intention_id);
    store.save().unwrap();

    assert!(store.journal().get_gratitude(gratitude_id).unwrap().is_none());
    assert!(store.journal().get_intention(intention_id).unwrap().is_none());
}
