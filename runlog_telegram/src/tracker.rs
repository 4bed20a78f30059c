use chrono::NaiveDate;
use runlog_core::{DateRange, GroupId, UserId, WorkoutDetails, YearMonth};
use runlog_store::{DirectoryError, StoreError, UserDirectory, WorkoutStore};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::report;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PasswordCheck {
    Accepted,
    Rejected,
    /// No password configured; nobody can register.
    Disabled,
}

/// Store-backed command logic. Every method is synchronous and may block on
/// file I/O, and each returns the reply to send.
pub struct Tracker {
    workouts: WorkoutStore,
    users: UserDirectory,
    password: String,
}

impl Tracker {
    #[must_use]
    pub const fn new(workouts: WorkoutStore, users: UserDirectory, password: String) -> Self {
        Self {
            workouts,
            users,
            password,
        }
    }

    pub fn open(
        workouts_path: impl Into<PathBuf>,
        users_path: impl Into<PathBuf>,
        password: String,
    ) -> crate::Result<Self> {
        let workouts = WorkoutStore::open(workouts_path)?;
        let users = UserDirectory::open(users_path)?;
        info!(
            "Loaded {} workout entries and {} users",
            workouts.len(),
            users.len()
        );
        Ok(Self::new(workouts, users, password))
    }

    #[must_use]
    pub const fn workouts(&self) -> &WorkoutStore {
        &self.workouts
    }

    #[must_use]
    pub const fn users(&self) -> &UserDirectory {
        &self.users
    }

    #[must_use]
    pub fn is_authorized(&self, user_id: UserId) -> bool {
        self.users.is_authorized(user_id)
    }

    #[must_use]
    pub fn check_password(&self, given: &str) -> PasswordCheck {
        if self.password.is_empty() {
            PasswordCheck::Disabled
        } else if given.trim() == self.password {
            PasswordCheck::Accepted
        } else {
            PasswordCheck::Rejected
        }
    }

    /// Registered name, or the numeric id for users missing from the directory.
    #[must_use]
    pub fn display_name(&self, user_id: UserId) -> String {
        self.users
            .resolve(user_id)
            .unwrap_or_else(|_| user_id.to_string())
    }

    #[must_use]
    pub fn register(&self, user_id: UserId, name: &str) -> String {
        match self.users.register(user_id, name) {
            Ok(()) => report::welcome(name),
            Err(DirectoryError::AlreadyExists(_)) => {
                report::already_registered(&self.display_name(user_id))
            }
            Err(e) => {
                warn!("Error registering user {user_id}: {e}");
                report::SAVE_FAILED.to_string()
            }
        }
    }

    #[must_use]
    pub fn log_workout(&self, group_id: GroupId, user_id: UserId, details: &WorkoutDetails) -> String {
        match self
            .workouts
            .insert(group_id, user_id, details.date, details.entry())
        {
            Ok(true) => report::workout_logged(details),
            Ok(false) => {
                warn!("Invalid workout details. No insertion performed into database.");
                report::INCOMPLETE_WORKOUT.to_string()
            }
            Err(e) => {
                warn!("Error saving workout data: {e}");
                report::SAVE_FAILED.to_string()
            }
        }
    }

    #[must_use]
    pub fn user_history(&self, group_id: GroupId, user_id: UserId) -> String {
        match self.workouts.get(group_id, user_id) {
            Ok(workouts) => report::user_history(&self.display_name(user_id), &workouts),
            Err(e) => query_failed(group_id, &e, report::NO_USER_HISTORY),
        }
    }

    #[must_use]
    pub fn group_history(&self, group_id: GroupId) -> String {
        match self.workouts.get_all(group_id) {
            Ok(workouts) => report::group_history(&workouts, |id| self.display_name(id)),
            Err(e) => query_failed(group_id, &e, report::NO_GROUP_HISTORY),
        }
    }

    #[must_use]
    pub fn delete(&self, group_id: GroupId, user_id: UserId, date: NaiveDate) -> String {
        match self.workouts.delete(group_id, user_id, date) {
            Ok(true) => report::DELETED.to_string(),
            Ok(false) => report::NOTHING_TO_DELETE.to_string(),
            Err(e) => {
                warn!("Error deleting workout for user {user_id} in group {group_id}: {e}");
                report::SAVE_FAILED.to_string()
            }
        }
    }

    #[must_use]
    pub fn range_totals(&self, group_id: GroupId, range: DateRange) -> String {
        match self.workouts.aggregate_by_range(group_id, range) {
            Ok(totals) => report::range_totals(&totals, |id| self.display_name(id)),
            Err(e) => totals_failed(group_id, &e),
        }
    }

    #[must_use]
    pub fn month_totals(&self, group_id: GroupId, month: YearMonth) -> String {
        match self.workouts.aggregate_by_month(group_id, month) {
            Ok(totals) => report::month_totals(month, &totals, |id| self.display_name(id)),
            Err(e) => totals_failed(group_id, &e),
        }
    }
}

fn query_failed(group_id: GroupId, error: &StoreError, not_found: &str) -> String {
    if let StoreError::GroupNotFound(_) = error {
        warn!("Workouts do not exist for group {group_id}");
        return not_found.to_string();
    }
    warn!("Error reading workouts for group {group_id}: {error}");
    report::STORE_FAILED.to_string()
}

fn totals_failed(group_id: GroupId, error: &StoreError) -> String {
    if let StoreError::GroupNotFound(_) = error {
        return query_failed(group_id, error, report::NO_GROUP_HISTORY);
    }
    warn!("Error getting total distance for group {group_id}: {error}");
    report::TOTALS_FAILED.to_string()
}
