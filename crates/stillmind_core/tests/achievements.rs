use stillmind_core::{
    default_catalog, AchievementQuery, AchievementService, AchievementType, SaveOutcome, Store,
    StoreError,
};
use uuid::Uuid;

const NOW_MS: i64 = 1_756_000_000_000;

#[test]
fn seeding_the_catalog_is_idempotent() {
    let mut store = Store::open_in_memory().unwrap();
    let expected = default_catalog().unwrap().len();

    let mut service = AchievementService::new(&mut store);
    assert_eq!(service.seed_catalog().unwrap(), expected);
    service.commit().unwrap();

    // A second seeding pass finds everything already present.
    let mut service = AchievementService::new(&mut store);
    assert_eq!(service.seed_catalog().unwrap(), 0);
    assert_eq!(service.commit().unwrap(), SaveOutcome::NoChanges);

    let all = store.achievements().list(&AchievementQuery::default()).unwrap();
    assert_eq!(all.len(), expected);
    assert!(all.iter().all(|a| !a.is_unlocked && a.progress == 0));
}

#[test]
fn recording_progress_unlocks_at_threshold_and_persists() {
    let mut store = Store::open_in_memory().unwrap();
    let mut service = AchievementService::new(&mut store);
    service.seed_catalog().unwrap();
    service.commit().unwrap();

    let first_checkin = store
        .achievements()
        .by_title("First Check-In")
        .unwrap()
        .unwrap();

    let mut service = AchievementService::new(&mut store);
    let updated = service
        .record_progress(first_checkin.uuid, 1, NOW_MS)
        .unwrap();
    assert!(updated.is_unlocked);
    assert_eq!(updated.date_earned, Some(NOW_MS));
    service.commit().unwrap();

    let loaded = store
        .achievements()
        .get(first_checkin.uuid)
        .unwrap()
        .unwrap();
    assert!(loaded.is_unlocked);
    assert_eq!(loaded.progress, 1);
    assert_eq!(loaded.date_earned, Some(NOW_MS));
}

#[test]
fn overshooting_progress_clamps_and_keeps_first_earned_date() {
    let mut store = Store::open_in_memory().unwrap();
    let mut service = AchievementService::new(&mut store);
    service.seed_catalog().unwrap();
    service.commit().unwrap();

    let streak = store
        .achievements()
        .by_title("Seven-Day Streak")
        .unwrap()
        .unwrap();

    let mut service = AchievementService::new(&mut store);
    let updated = service.record_progress(streak.uuid, 20, NOW_MS).unwrap();
    assert_eq!(updated.progress, updated.required_progress);
    assert_eq!(updated.date_earned, Some(NOW_MS));
    service.commit().unwrap();

    // Progress after unlock never exceeds the requirement or moves the date.
    let mut service = AchievementService::new(&mut store);
    let later = service
        .record_progress(streak.uuid, 5, NOW_MS + 86_400_000)
        .unwrap();
    assert_eq!(later.progress, later.required_progress);
    assert_eq!(later.date_earned, Some(NOW_MS));
    service.commit().unwrap();

    let loaded = store.achievements().get(streak.uuid).unwrap().unwrap();
    assert_eq!(loaded.date_earned, Some(NOW_MS));
}

#[test]
fn recording_progress_for_unknown_id_is_not_found() {
    let mut store = Store::open_in_memory().unwrap();
    let missing = Uuid::new_v4();

    let mut service = AchievementService::new(&mut store);
    let err = service.record_progress(missing, 1, NOW_MS).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(id) if id == missing));
}

#[test]
fn list_filters_by_unlock_state_and_type() {
    let mut store = Store::open_in_memory().unwrap();
    let mut service = AchievementService::new(&mut store);
    service.seed_catalog().unwrap();
    service.commit().unwrap();

    let first_checkin = store
        .achievements()
        .by_title("First Check-In")
        .unwrap()
        .unwrap();
    let mut service = AchievementService::new(&mut store);
    service.record_progress(first_checkin.uuid, 1, NOW_MS).unwrap();
    service.commit().unwrap();

    let unlocked = store
        .achievements()
        .list(&AchievementQuery {
            unlocked: Some(true),
            ..AchievementQuery::default()
        })
        .unwrap();
    assert_eq!(unlocked.len(), 1);
    assert_eq!(unlocked[0].title, "First Check-In");

    let streaks = store
        .achievements()
        .list(&AchievementQuery {
            achievement_type: Some(AchievementType::Streak),
            ..AchievementQuery::default()
        })
        .unwrap();
    assert!(!streaks.is_empty());
    assert!(streaks
        .iter()
        .all(|a| a.achievement_type == AchievementType::Streak));
}
