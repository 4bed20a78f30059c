use chrono::NaiveDate;
use runlog_core::{GroupId, UserId};
use std::num::ParseFloatError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no workouts found for group: {0}")]
    GroupNotFound(GroupId),

    #[error("invalid distance {distance:?} for user {user_id} on {date}: {source}")]
    InvalidDistance {
        user_id: UserId,
        date: NaiveDate,
        distance: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("invalid date key {key:?} in {}", path.display())]
    InvalidDate { path: PathBuf, key: String },

    #[error(transparent)]
    Persist(#[from] PersistError),
}

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("user already exists: {0}")]
    AlreadyExists(UserId),

    #[error("user not found: {0}")]
    NotFound(UserId),

    #[error(transparent)]
    Persist(#[from] PersistError),
}
