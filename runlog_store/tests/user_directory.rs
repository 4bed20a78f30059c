//! Integration tests for the user directory.

#![expect(clippy::expect_used, reason = "Test failure should panic with context")]

use runlog_store::{DirectoryError, UserDirectory};

#[test]
fn register_resolve_and_authorize() {
    let dir = tempfile::tempdir().expect("tempdir");
    let users = UserDirectory::open(dir.path().join("users.json")).expect("open");

    assert!(!users.is_authorized(7));
    users.register(7, "Alice").expect("first registration");

    assert!(users.is_authorized(7));
    assert_eq!(users.resolve(7).expect("registered"), "Alice");
    assert_eq!(users.len(), 1);
}

#[test]
fn second_registration_conflicts_and_keeps_first_name() {
    let dir = tempfile::tempdir().expect("tempdir");
    let users = UserDirectory::open(dir.path().join("users.json")).expect("open");

    users.register(7, "Alice").expect("first registration");
    let second = users.register(7, "Mallory");

    assert!(matches!(second, Err(DirectoryError::AlreadyExists(7))));
    assert_eq!(users.resolve(7).expect("registered"), "Alice");
}

#[test]
fn unknown_user_is_not_found() {
    let dir = tempfile::tempdir().expect("tempdir");
    let users = UserDirectory::open(dir.path().join("users.json")).expect("open");

    assert!(matches!(users.resolve(9), Err(DirectoryError::NotFound(9))));
}

#[test]
fn registrations_survive_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("users.json");
    {
        let users = UserDirectory::open(&path).expect("open");
        users.register(7, "Alice").expect("register");
        users.register(8, "Bob").expect("register");
    }

    let content = std::fs::read_to_string(&path).expect("read users file");
    let raw: serde_json::Value = serde_json::from_str(&content).expect("users file is JSON");
    assert_eq!(
        raw,
        serde_json::json!({ "users": { "7": "Alice", "8": "Bob" } })
    );

    let reopened = UserDirectory::open(&path).expect("reopen");
    assert_eq!(reopened.resolve(8).expect("registered"), "Bob");
    assert!(matches!(
        reopened.register(8, "Robert"),
        Err(DirectoryError::AlreadyExists(8))
    ));
}

#[test]
fn directory_file_is_independent_of_workouts() {
    let dir = tempfile::tempdir().expect("tempdir");
    let users = UserDirectory::open(dir.path().join("users.json")).expect("open");
    let workouts =
        runlog_store::WorkoutStore::open(dir.path().join("workouts.json")).expect("open");

    users.register(7, "Alice").expect("register");
    assert!(workouts.is_empty());
    assert_ne!(users.path(), workouts.path());
}

#[test]
fn failed_save_does_not_register() {
    let dir = tempfile::tempdir().expect("tempdir");
    let users = UserDirectory::open(dir.path().join("users.json")).expect("open");
    users.register(7, "Alice").expect("register");
    std::fs::create_dir(dir.path().join("users.json.tmp")).expect("create blocking dir");

    let result = users.register(8, "Bob");
    assert!(matches!(result, Err(DirectoryError::Persist(_))));
    assert_eq!(users.len(), 1);
    assert!(matches!(users.resolve(8), Err(DirectoryError::NotFound(8))));
    assert!(!users.is_authorized(8));

    let reopened = UserDirectory::open(dir.path().join("users.json")).expect("reopen");
    assert_eq!(reopened.len(), 1);
}
