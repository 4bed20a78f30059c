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

//! Turning recognized screenshot text into a workout record.
//!
//! Text is first classified by keyword profile, then the matching variant's
//! field rules pull out distance and pace (plus time and calories where the
//! layout has them).

pub mod classifier;
mod error;
pub mod fields;
mod pipeline;
pub mod profile;

pub use classifier::FormatClassifier;
pub use error::{ExtractError, Field};
pub use fields::normalize_distance;
pub use pipeline::{ExtractionConfig, Pipeline, WorkoutExtractor};
pub use profile::{FormatProfile, default_profiles};
