//! Admin-facing flows: login gating, roster upload, suggestion lists and
//! certificate data.

use std::sync::Arc;

use housepoints_app_lib::db::DbPool;
use housepoints_app_lib::error::AppError;
use housepoints_app_lib::models::house::{AcademicYear, Category, Department, House};
use housepoints_app_lib::services::auth_service::AuthService;
use housepoints_app_lib::services::ledger_service::{LedgerService, RecordPointsInput};
use housepoints_app_lib::services::leaderboard_service::LeaderboardService;
use housepoints_app_lib::services::roster_service::RosterService;
use housepoints_app_lib::services::state_store::StateStore;
use tempfile::{tempdir, TempDir};

struct Harness {
    ledger: LedgerService,
    leaderboards: LeaderboardService,
    roster: RosterService,
    _temp_dir: TempDir,
}

fn setup() -> Harness {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let db = DbPool::new(temp_dir.path().join("test.db")).expect("Failed to create test database");
    let store = Arc::new(StateStore::new(db).expect("Failed to create state store"));
    Harness {
        ledger: LedgerService::new(Arc::clone(&store)),
        leaderboards: LeaderboardService::new(Arc::clone(&store)),
        roster: RosterService::new(Arc::clone(&store)),
        _temp_dir: temp_dir,
    }
}

fn entry(house: House, points: i64, department: Department, name: &str) -> RecordPointsInput {
    RecordPointsInput {
        house,
        points,
        category: Category::ExtraActivities,
        department,
        year: AcademicYear::Second,
        student_name: name.to_string(),
    }
}

#[test]
fn login_accepts_each_department_key() {
    let auth = AuthService::new();

    let session = auth.login(Department::Ece, "ECE@DBPC", None).unwrap();
    assert_eq!(session.department, Department::Ece);

    let admin = auth.login(Department::Admin, "Admin@DBPC", None).unwrap();
    assert!(admin.is_admin());
}

#[test]
fn login_rejection_names_the_department() {
    let auth = AuthService::new();
    match auth.login(Department::Civil, "wrong", None) {
        Err(AppError::AuthRejected { reason }) => {
            assert!(reason.contains("Civil Engineering"), "reason: {reason}");
        }
        other => panic!("expected AuthRejected, got {other:?}"),
    }
}

#[test]
fn roster_upload_feeds_suggestions() {
    let harness = setup();

    harness
        .roster
        .replace_from_csv(
            Department::Cse,
            "Name,Reg No\nAsha,23CS001\nRavi,23CS002\n",
        )
        .unwrap();

    let suggestions = harness
        .leaderboards
        .name_suggestions(Department::Cse)
        .unwrap();
    assert_eq!(suggestions, vec!["Asha".to_string(), "Ravi".to_string()]);
}

#[test]
fn suggestions_merge_roster_with_history() {
    let harness = setup();

    harness
        .roster
        .replace_from_csv(Department::Cse, "Asha\n")
        .unwrap();
    harness
        .ledger
        .record_points(entry(House::Ruva, 10, Department::Cse, "Kiran"))
        .unwrap();
    // Already on the roster; must not be suggested twice.
    harness
        .ledger
        .record_points(entry(House::Bosco, 10, Department::Cse, "Asha"))
        .unwrap();

    let suggestions = harness
        .leaderboards
        .name_suggestions(Department::Cse)
        .unwrap();
    assert_eq!(suggestions, vec!["Asha".to_string(), "Kiran".to_string()]);
}

#[test]
fn roster_replace_is_not_a_merge() {
    let harness = setup();

    harness
        .roster
        .replace_from_csv(Department::Mech, "Old1\nOld2\n")
        .unwrap();
    let state = harness
        .roster
        .replace_from_csv(Department::Mech, "New\n")
        .unwrap();

    assert_eq!(
        state.student_names.get(&Department::Mech),
        Some(&vec!["New".to_string()])
    );
}

#[test]
fn certificates_cover_department_ranks_and_overall_topper() {
    let harness = setup();

    harness
        .ledger
        .record_points(entry(House::Bosco, 10, Department::Cse, "Asha"))
        .unwrap();
    harness
        .ledger
        .record_points(entry(House::Savio, 20, Department::Cse, "Ravi"))
        .unwrap();
    harness
        .ledger
        .record_points(entry(House::Thomas, 15, Department::Mech, "Meena"))
        .unwrap();

    let certificates = harness.leaderboards.certificates().unwrap();

    // Two CSE ranks, one Mech rank, one overall topper.
    assert_eq!(certificates.len(), 4);

    let overall = certificates
        .iter()
        .find(|cert| cert.rank == "Overall Topper")
        .expect("overall topper certificate");
    assert_eq!(overall.student, "Ravi");
    assert_eq!(overall.department, Department::Cse);

    let cse_first = certificates
        .iter()
        .find(|cert| cert.department == Department::Cse && cert.rank == "First Place")
        .expect("cse first place");
    assert_eq!(cse_first.student, "Ravi");
    assert_eq!(cse_first.house, House::Savio);
}

#[test]
fn weekly_and_championship_leaderboards_agree_before_reset() {
    let harness = setup();

    harness
        .ledger
        .record_points(entry(House::Thomas, 10, Department::Eee, "Lakshmi"))
        .unwrap();

    let weekly = harness.leaderboards.weekly_leaderboard().unwrap();
    let championship = harness.leaderboards.championship_leaderboard().unwrap();

    assert_eq!(weekly, championship);
    assert_eq!(weekly[0].house, House::Thomas);
    assert_eq!(weekly[0].score, 10);
}
