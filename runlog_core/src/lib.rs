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

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod calendar;
pub mod workout;

pub use calendar::{DateError, DateRange, YearMonth, format_date, parse_date};
pub use workout::{GroupId, UserId, Variant, WorkoutDetails, WorkoutEntry};

#[derive(Debug, Error)]
pub enum RecognizeError {
    #[error("image not found: {}", .0.display())]
    MissingImage(PathBuf),

    #[error("failed to run text recognizer: {0}")]
    Io(#[from] std::io::Error),

    #[error("text recognition failed: {0}")]
    Failed(String),
}

/// Turns an image on disk into the flat text recognized in it.
///
/// Implementations are never retried by callers; a failure is reported to the
/// user as-is.
#[async_trait]
pub trait TextRecognizer: Send + Sync {
    async fn recognize(&self, image: &Path) -> Result<String, RecognizeError>;
}
