#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Write-through JSON persistence for workout records and registered users.
//!
//! Each store owns one JSON document and one mutex. Every operation holds the
//! mutex for its whole duration, including the disk write, so the file on
//! disk always equals the result of some completed operation.

mod error;
mod persist;
mod users;
mod workouts;

pub use error::{DirectoryError, PersistError, Result, StoreError};
pub use users::UserDirectory;
pub use workouts::{DistanceTotals, GroupWorkouts, UserWorkouts, WorkoutStore};
