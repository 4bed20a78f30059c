//! Reply logic behind the bot commands, exercised against real store files.

#![expect(clippy::expect_used, reason = "Test failure should panic with context")]

use chrono::NaiveDate;
use runlog_core::{DateRange, Variant, WorkoutDetails, YearMonth};
use runlog_telegram::report;
use runlog_telegram::{PasswordCheck, Tracker};
use tempfile::TempDir;

const GROUP: i64 = -100_200;
const ALICE: i64 = 7;
const BOB: i64 = 8;

fn open_tracker(dir: &TempDir, password: &str) -> Tracker {
    Tracker::open(
        dir.path().join("workouts.json"),
        dir.path().join("users.json"),
        password.to_string(),
    )
    .expect("open tracker")
}

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, day).expect("valid date")
}

fn register(tracker: &Tracker, user_id: i64, name: &str) {
    assert!(tracker.register(user_id, name).starts_with("Welcome"));
}

fn log(tracker: &Tracker, user_id: i64, date: NaiveDate, distance: &str) {
    let reply = tracker.log_workout(GROUP, user_id, &details(date, distance));
    assert!(reply.starts_with("Workout logged!"), "{reply}");
}

fn details(date: NaiveDate, distance: &str) -> WorkoutDetails {
    WorkoutDetails {
        variant: Variant::AppleWorkout,
        date,
        distance: distance.to_string(),
        pace: "5'30\"/KM".to_string(),
        total_time: None,
        calories: None,
    }
}

#[test]
fn password_gate() {
    let dir = TempDir::new().expect("tempdir");
    let open = open_tracker(&dir, "hunter2");
    assert_eq!(open.check_password(" hunter2 "), PasswordCheck::Accepted);
    assert_eq!(open.check_password("hunter"), PasswordCheck::Rejected);

    let closed = open_tracker(&TempDir::new().expect("tempdir"), "");
    assert_eq!(closed.check_password(""), PasswordCheck::Disabled);
}

#[test]
fn registration_authorizes_and_keeps_first_name() {
    let dir = TempDir::new().expect("tempdir");
    let tracker = open_tracker(&dir, "pw");

    assert!(!tracker.is_authorized(ALICE));
    assert!(tracker.register(ALICE, "Alice").starts_with("Welcome Alice!"));
    assert!(tracker.is_authorized(ALICE));

    assert_eq!(
        tracker.register(ALICE, "Mallory"),
        report::already_registered("Alice")
    );
    assert_eq!(tracker.display_name(ALICE), "Alice");
    assert_eq!(tracker.display_name(BOB), "8");
}

#[test]
fn logged_workouts_show_in_history() {
    let dir = TempDir::new().expect("tempdir");
    let tracker = open_tracker(&dir, "pw");
    register(&tracker, ALICE, "Alice");

    assert_eq!(tracker.group_history(GROUP), report::NO_GROUP_HISTORY);

    let reply = tracker.log_workout(GROUP, ALICE, &details(date(5, 1), "5.20"));
    assert!(reply.starts_with("Workout logged!"));
    assert!(reply.contains("Distance: 5.20KM"));

    let history = tracker.user_history(GROUP, ALICE);
    assert!(history.contains("Workouts for Alice"));
    assert!(history.contains("Date: 2024-05-01\n- Distance: 5.20KM"));

    assert_eq!(tracker.user_history(GROUP, BOB), report::NO_USER_HISTORY);
    assert!(tracker.group_history(GROUP).contains("User: Alice"));
}

#[test]
fn incomplete_workout_is_not_logged() {
    let dir = TempDir::new().expect("tempdir");
    let tracker = open_tracker(&dir, "pw");

    let reply = tracker.log_workout(GROUP, ALICE, &details(date(5, 1), ""));
    assert_eq!(reply, report::INCOMPLETE_WORKOUT);
    assert!(tracker.workouts().is_empty());
}

#[test]
fn delete_replies() {
    let dir = TempDir::new().expect("tempdir");
    let tracker = open_tracker(&dir, "pw");
    log(&tracker, ALICE, date(5, 1), "5.00");

    assert_eq!(tracker.delete(GROUP, ALICE, date(5, 2)), report::NOTHING_TO_DELETE);
    assert_eq!(tracker.delete(GROUP, ALICE, date(5, 1)), report::DELETED);
    assert!(tracker.workouts().is_empty());
}

#[test]
fn totals_use_names_and_zero_fill() {
    let dir = TempDir::new().expect("tempdir");
    let tracker = open_tracker(&dir, "pw");
    register(&tracker, ALICE, "Alice");
    log(&tracker, ALICE, date(5, 1), "5.00");
    log(&tracker, ALICE, date(5, 15), "3.00");
    log(&tracker, BOB, date(6, 1), "4.00");

    let range = DateRange::new(date(5, 1), date(5, 10)).expect("valid range");
    assert_eq!(
        tracker.range_totals(GROUP, range),
        "Total Distance for each user:\nAlice: 5.00KM\n8: 0.00KM\n"
    );

    let may = YearMonth::new(2024, 5).expect("valid month");
    assert_eq!(
        tracker.month_totals(GROUP, may),
        "Total Distance for each user in MAY 2024:\nAlice: 8.00KM\n8: 0.00KM\n"
    );

    assert_eq!(tracker.month_totals(-1, may), report::NO_GROUP_HISTORY);
}

#[test]
fn state_survives_reopen() {
    let dir = TempDir::new().expect("tempdir");
    {
        let tracker = open_tracker(&dir, "pw");
        register(&tracker, ALICE, "Alice");
        log(&tracker, ALICE, date(5, 1), "5.00");
    }

    let reopened = open_tracker(&dir, "pw");
    assert!(reopened.is_authorized(ALICE));
    assert_eq!(reopened.workouts().len(), 1);
}
