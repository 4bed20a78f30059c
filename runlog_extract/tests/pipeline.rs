//! Integration tests for the image-to-workout pipeline.
//!
//! A fake recognizer stands in for OCR so the tests exercise classification
//! and extraction over realistic screenshot text.

#![expect(clippy::expect_used, reason = "Test failure should panic with context")]

use async_trait::async_trait;
use chrono::NaiveDate;
use runlog_core::{RecognizeError, TextRecognizer, Variant};
use runlog_extract::{ExtractError, ExtractionConfig, FormatProfile, Pipeline};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const APPLE_SCREEN: &str = "\
Outdoor Run
Workout Time      Elapsed Time
0:32:10           0:33:02
Distance          Active Kilocalories
5.20KM            312KCAL
Total Kilocalories  Avg. Heart Rate
365KCAL           151BPM
Avg. Pace
6'11\"/KM
";

const RUN_KEEPER_SCREEN: &str = "\
Running
412 Calories
5.23 km
Distance
5:30 min/km
Avg pace
28:45 time
";

struct FakeRecognizer {
    screens: HashMap<PathBuf, &'static str>,
}

impl FakeRecognizer {
    fn new(screens: &[(&str, &'static str)]) -> Self {
        Self {
            screens: screens
                .iter()
                .map(|(path, text)| (PathBuf::from(path), *text))
                .collect(),
        }
    }
}

#[async_trait]
impl TextRecognizer for FakeRecognizer {
    async fn recognize(&self, image: &Path) -> Result<String, RecognizeError> {
        self.screens
            .get(image)
            .map(|text| (*text).to_string())
            .ok_or_else(|| RecognizeError::MissingImage(image.to_path_buf()))
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date")
}

fn pipeline() -> Pipeline<FakeRecognizer> {
    Pipeline::new(
        FakeRecognizer::new(&[
            ("apple.jpg", APPLE_SCREEN),
            ("runkeeper.jpg", RUN_KEEPER_SCREEN),
            ("cat.jpg", "a photo of a cat"),
        ]),
        &ExtractionConfig::default(),
    )
}

#[tokio::test]
async fn apple_screenshot_yields_normalized_entry() {
    let details = pipeline()
        .process_image(Path::new("apple.jpg"), today())
        .await
        .expect("apple screenshot extracts");

    assert_eq!(details.variant, Variant::AppleWorkout);
    assert_eq!(details.date, today());
    assert_eq!(details.distance, "5.20");
    assert_eq!(details.pace, "6'11\"/KM");

    let entry = details.entry();
    assert_eq!(entry.distance, "5.20");
    assert!(entry.is_complete());
}

#[tokio::test]
async fn run_keeper_screenshot_yields_all_fields() {
    let details = pipeline()
        .process_image(Path::new("runkeeper.jpg"), today())
        .await
        .expect("runkeeper screenshot extracts");

    assert_eq!(details.variant, Variant::RunKeeper);
    assert_eq!(details.distance, "5.23");
    assert_eq!(details.pace, "5:30");
    assert_eq!(details.total_time.as_deref(), Some("28:45"));
    assert_eq!(details.calories.as_deref(), Some("412"));
}

#[tokio::test]
async fn unrelated_image_is_unrecognized() {
    let result = pipeline()
        .process_image(Path::new("cat.jpg"), today())
        .await;
    assert!(matches!(result, Err(ExtractError::UnrecognizedFormat)));
}

#[tokio::test]
async fn recognizer_failure_is_surfaced() {
    let result = pipeline()
        .process_image(Path::new("missing.jpg"), today())
        .await;
    assert!(matches!(
        result,
        Err(ExtractError::Recognize(RecognizeError::MissingImage(_)))
    ));
}

#[test]
fn configured_profiles_replace_defaults() {
    let config: ExtractionConfig = serde_json::from_str(
        r#"{"profiles":[{"variant":"run_keeper","keywords":["Calories"]}]}"#,
    )
    .expect("valid config");
    assert_eq!(
        config.profiles,
        vec![FormatProfile::new(Variant::RunKeeper, &["Calories"])]
    );

    let pipeline = Pipeline::new(FakeRecognizer::new(&[]), &config);
    let details = pipeline
        .process_text("700 Calories 10.01 km 4:59 50:01", today())
        .expect("custom profile matches");
    assert_eq!(details.variant, Variant::RunKeeper);
    assert_eq!(details.distance, "10.01");
    assert_eq!(details.calories.as_deref(), Some("700"));
}

#[test]
fn missing_profiles_key_uses_defaults() {
    let config: ExtractionConfig = serde_json::from_str("{}").expect("valid config");
    assert_eq!(config, ExtractionConfig::default());
}
