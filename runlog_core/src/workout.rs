use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::num::ParseFloatError;

/// Chat scope under which workouts are recorded.
pub type GroupId = i64;

pub type UserId = i64;

/// One persisted workout for a (group, user, date) key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutEntry {
    /// Bare decimal kilometres, e.g. `5.20`.
    pub distance: String,
    /// Display-only, stored exactly as recognized.
    pub pace: String,
}

impl WorkoutEntry {
    #[must_use]
    pub fn new(distance: impl Into<String>, pace: impl Into<String>) -> Self {
        Self {
            distance: distance.into(),
            pace: pace.into(),
        }
    }

    /// Both fields must be non-empty for the entry to be stored.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.distance.is_empty() && !self.pace.is_empty()
    }

    pub fn distance_km(&self) -> Result<f64, ParseFloatError> {
        self.distance.parse()
    }
}

/// Source-app screen layout a piece of recognized text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    AppleWorkout,
    RunKeeper,
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AppleWorkout => write!(f, "Apple Workout"),
            Self::RunKeeper => write!(f, "RunKeeper"),
        }
    }
}

/// Everything extracted from one screenshot.
///
/// Only `distance` and `pace` are persisted; the rest is shown back to the
/// user when the workout is logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutDetails {
    pub variant: Variant,
    pub date: NaiveDate,
    pub distance: String,
    pub pace: String,
    pub total_time: Option<String>,
    pub calories: Option<String>,
}

impl WorkoutDetails {
    #[must_use]
    pub fn entry(&self) -> WorkoutEntry {
        WorkoutEntry::new(self.distance.clone(), self.pace.clone())
    }
}
