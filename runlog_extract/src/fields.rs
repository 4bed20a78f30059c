//! Per-variant field rules.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use runlog_core::{Variant, WorkoutDetails};
use tracing::{debug, warn};

use crate::error::{ExtractError, Field};

#[expect(
    clippy::expect_used,
    reason = "Static regex patterns are guaranteed to be valid"
)]
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("Static regex pattern is guaranteed to be valid")
}

/// Decimal number with any unit letters glued to it, e.g. `5.20km`.
static APPLE_DISTANCE: Lazy<Regex> = Lazy::new(|| compile(r"[0-9]+\.[0-9]+[a-zA-Z]*"));

/// Pace such as `5'30"/km` or `5:30/km`.
static APPLE_PACE: Lazy<Regex> = Lazy::new(|| compile(r#"[0-9]{1,2}[':][0-9]{2}"?/[a-zA-Z]*"#));

static RUN_KEEPER_DISTANCE: Lazy<Regex> = Lazy::new(|| compile(r"\b[0-9]+\.[0-9]+\b"));

static RUN_KEEPER_TIME: Lazy<Regex> = Lazy::new(|| compile(r"\b[0-9]{1,2}:[0-9]{2}\b"));

static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| compile(r"\b[0-9]+\b"));

static ALPHA_RUN: Lazy<Regex> = Lazy::new(|| compile(r"[a-zA-Z]+"));

/// Strip a trailing comma and every run of letters, leaving a bare decimal.
#[must_use]
pub fn normalize_distance(raw: &str) -> String {
    let trimmed = raw.strip_suffix(',').unwrap_or(raw);
    let normalized = ALPHA_RUN.replace_all(trimmed, "").into_owned();
    debug!("Normalized distance {raw:?} to {normalized:?}");
    normalized
}

/// Apply `variant`'s rules to `text`, stamping the result with `date`.
pub fn extract(
    variant: Variant,
    text: &str,
    date: NaiveDate,
) -> Result<WorkoutDetails, ExtractError> {
    let details = match variant {
        Variant::AppleWorkout => extract_apple_workout(text, date),
        Variant::RunKeeper => extract_run_keeper(text, date),
    };
    if let Err(e) = &details {
        warn!("Error extracting workout details: {e}");
    }
    details
}

const fn missing(variant: Variant, field: Field) -> ExtractError {
    ExtractError::MissingField { variant, field }
}

fn extract_apple_workout(text: &str, date: NaiveDate) -> Result<WorkoutDetails, ExtractError> {
    const VARIANT: Variant = Variant::AppleWorkout;

    let distance = APPLE_DISTANCE
        .find(text)
        .map(|m| normalize_distance(m.as_str()))
        .filter(|d| !d.is_empty())
        .ok_or_else(|| missing(VARIANT, Field::Distance))?;
    let pace = APPLE_PACE
        .find(text)
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| missing(VARIANT, Field::Pace))?;

    debug!("Distance: {distance}, Pace: {pace}");
    Ok(WorkoutDetails {
        variant: VARIANT,
        date,
        distance,
        pace,
        total_time: None,
        calories: None,
    })
}

fn extract_run_keeper(text: &str, date: NaiveDate) -> Result<WorkoutDetails, ExtractError> {
    const VARIANT: Variant = Variant::RunKeeper;

    let distance = RUN_KEEPER_DISTANCE
        .find(text)
        .map(|m| normalize_distance(m.as_str()))
        .ok_or_else(|| missing(VARIANT, Field::Distance))?;

    // First clock-like token is the pace, the second the elapsed time.
    let mut times = RUN_KEEPER_TIME.find_iter(text).map(|m| m.as_str());
    let pace = times.next().ok_or_else(|| missing(VARIANT, Field::Pace))?;
    let total_time = times.next().ok_or_else(|| missing(VARIANT, Field::TotalTime))?;

    // First whole-word digit run, wherever it sits.
    let calories = DIGIT_RUN
        .find(text)
        .map(|m| m.as_str())
        .ok_or_else(|| missing(VARIANT, Field::Calories))?;

    debug!("Distance: {distance}, Pace: {pace}, Total Time: {total_time}, Calories: {calories}");
    Ok(WorkoutDetails {
        variant: VARIANT,
        date,
        distance,
        pace: pace.to_string(),
        total_time: Some(total_time.to_string()),
        calories: Some(calories.to_string()),
    })
}
