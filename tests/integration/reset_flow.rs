//! Weekly reset transitions against a real temp database: archive snapshot
//! integrity, idempotence, and boundary inclusivity at Wednesday 10:00.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use housepoints_app_lib::db::DbPool;
use housepoints_app_lib::models::house::{AcademicYear, Category, Department, House};
use housepoints_app_lib::services::ledger_service::{LedgerService, RecordPointsInput};
use housepoints_app_lib::services::reset_service::ResetService;
use housepoints_app_lib::services::state_store::StateStore;
use tempfile::{tempdir, TempDir};

fn setup() -> (LedgerService, Arc<ResetService>, Arc<StateStore>, TempDir) {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let db = DbPool::new(temp_dir.path().join("test.db")).expect("Failed to create test database");
    let store = Arc::new(StateStore::new(db).expect("Failed to create state store"));
    let ledger = LedgerService::new(Arc::clone(&store));
    let reset = Arc::new(ResetService::new(Arc::clone(&store)));
    (ledger, reset, store, temp_dir)
}

fn entry(house: House, points: i64, name: &str) -> RecordPointsInput {
    RecordPointsInput {
        house,
        points,
        category: Category::Attendance,
        department: Department::Cse,
        year: AcademicYear::First,
        student_name: name.to_string(),
    }
}

/// 2024-07-03 and 2024-07-10 are consecutive Wednesdays.
fn prior_wednesday_ten_millis() -> i64 {
    Utc.with_ymd_and_hms(2024, 7, 3, 10, 0, 0)
        .single()
        .unwrap()
        .timestamp_millis()
}

fn record_example_week(ledger: &LedgerService) {
    ledger.record_points(entry(House::Bosco, 10, "Asha")).unwrap();
    ledger.record_points(entry(House::Savio, 10, "Ravi")).unwrap();
    ledger.record_points(entry(House::Bosco, -5, "Asha")).unwrap();
}

#[test]
fn archive_snapshot_integrity() {
    let (ledger, reset, store, _temp_dir) = setup();
    record_example_week(&ledger);

    let championship_before = store.snapshot().unwrap().championship_points.clone();

    store
        .update(|state| state.last_reset_timestamp = prior_wednesday_ten_millis())
        .unwrap();

    let now = Utc.with_ymd_and_hms(2024, 7, 10, 10, 0, 0).single().unwrap();
    let winner = reset
        .check_and_reset_at(now)
        .unwrap()
        .expect("reset should be due at the boundary instant");

    assert_eq!(winner.winner, House::Savio);
    assert_eq!(winner.runner, House::Bosco);
    // Ruva and Thomas tie at 0; declaration order decides.
    assert_eq!(winner.second_runner, House::Ruva);
    assert_eq!(winner.scores.get(&House::Bosco), Some(&5));
    assert_eq!(winner.scores.get(&House::Savio), Some(&10));
    assert_eq!(winner.scores.get(&House::Ruva), Some(&0));
    assert_eq!(winner.scores.get(&House::Thomas), Some(&0));

    let state = store.snapshot().unwrap();
    for house in House::ALL {
        assert_eq!(state.weekly_score(house), 0, "weekly zeroed for {house}");
    }
    assert_eq!(state.championship_points, championship_before);
    assert_eq!(state.history.len(), 3, "history is untouched by a reset");
    assert_eq!(state.weekly_winners.len(), 1);
    assert_eq!(state.weekly_winners[0], winner);
    assert_eq!(state.last_reset_timestamp, now.timestamp_millis());
}

#[test]
fn boundary_is_inclusive_at_the_exact_instant() {
    let (_ledger, reset, store, _temp_dir) = setup();

    store
        .update(|state| state.last_reset_timestamp = prior_wednesday_ten_millis())
        .unwrap();

    // Exactly Wednesday 10:00:00.000 one week later.
    let now = Utc.with_ymd_and_hms(2024, 7, 10, 10, 0, 0).single().unwrap();
    let outcome = reset.check_and_reset_at(now).unwrap();
    assert!(outcome.is_some(), "reset must be due at the boundary itself");
}

#[test]
fn no_reset_before_the_boundary() {
    let (_ledger, reset, store, _temp_dir) = setup();

    store
        .update(|state| state.last_reset_timestamp = prior_wednesday_ten_millis())
        .unwrap();

    // Wednesday 09:59, still inside the previous week.
    let now = Utc.with_ymd_and_hms(2024, 7, 10, 9, 59, 0).single().unwrap();
    let outcome = reset.check_and_reset_at(now).unwrap();
    assert!(outcome.is_none());

    let state = store.snapshot().unwrap();
    assert!(state.weekly_winners.is_empty());
    assert_eq!(state.last_reset_timestamp, prior_wednesday_ten_millis());
}

#[test]
fn double_trigger_archives_once() {
    let (ledger, reset, store, _temp_dir) = setup();
    record_example_week(&ledger);

    store
        .update(|state| state.last_reset_timestamp = prior_wednesday_ten_millis())
        .unwrap();

    let now = Utc.with_ymd_and_hms(2024, 7, 10, 12, 0, 0).single().unwrap();
    let first = reset.check_and_reset_at(now).unwrap();
    let second = reset.check_and_reset_at(now).unwrap();

    assert!(first.is_some());
    assert!(second.is_none(), "second trigger must be a no-op");

    let state = store.snapshot().unwrap();
    assert_eq!(state.weekly_winners.len(), 1);
}

#[test]
fn manual_reset_archives_immediately() {
    let (ledger, reset, store, _temp_dir) = setup();
    record_example_week(&ledger);

    // Make sure the init timestamp is strictly in the past.
    store
        .update(|state| state.last_reset_timestamp -= 10)
        .unwrap();

    let winner = reset
        .reset_now()
        .unwrap()
        .expect("manual reset archives regardless of the weekly boundary");
    assert_eq!(winner.winner, House::Savio);

    let state = store.snapshot().unwrap();
    assert_eq!(state.weekly_winners.len(), 1);
    for house in House::ALL {
        assert_eq!(state.weekly_score(house), 0);
    }
}

#[test]
fn consecutive_weeks_stack_newest_first() {
    let (ledger, reset, store, _temp_dir) = setup();

    store
        .update(|state| state.last_reset_timestamp = prior_wednesday_ten_millis())
        .unwrap();

    ledger.record_points(entry(House::Ruva, 10, "Kiran")).unwrap();
    let week_one = Utc.with_ymd_and_hms(2024, 7, 10, 10, 0, 0).single().unwrap();
    reset.check_and_reset_at(week_one).unwrap().expect("week one");

    ledger.record_points(entry(House::Thomas, 10, "Meena")).unwrap();
    let week_two = Utc.with_ymd_and_hms(2024, 7, 17, 10, 0, 0).single().unwrap();
    reset.check_and_reset_at(week_two).unwrap().expect("week two");

    let state = store.snapshot().unwrap();
    assert_eq!(state.weekly_winners.len(), 2);
    assert_eq!(state.weekly_winners[0].winner, House::Thomas, "newest first");
    assert_eq!(state.weekly_winners[1].winner, House::Ruva);

    // Championship keeps accumulating across resets.
    assert_eq!(state.championship_score(House::Ruva), 10);
    assert_eq!(state.championship_score(House::Thomas), 10);
}

#[test]
fn reset_survives_restart() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("test.db");

    {
        let db = DbPool::new(&db_path).expect("Failed to create test database");
        let store = Arc::new(StateStore::new(db).expect("Failed to create state store"));
        let ledger = LedgerService::new(Arc::clone(&store));
        let reset = ResetService::new(Arc::clone(&store));

        ledger.record_points(entry(House::Savio, 10, "Ravi")).unwrap();
        store
            .update(|state| state.last_reset_timestamp = prior_wednesday_ten_millis())
            .unwrap();
        let now = Utc.with_ymd_and_hms(2024, 7, 10, 11, 0, 0).single().unwrap();
        reset.check_and_reset_at(now).unwrap().expect("reset due");
    }

    let db = DbPool::new(&db_path).expect("Failed to reopen test database");
    let store = StateStore::new(db).expect("Failed to reload state store");
    let state = store.snapshot().unwrap();

    assert_eq!(state.weekly_winners.len(), 1);
    assert_eq!(state.weekly_winners[0].winner, House::Savio);
    assert_eq!(state.weekly_score(House::Savio), 0);
    assert_eq!(state.championship_score(House::Savio), 10);
}
