use chrono::NaiveDate;
use runlog_core::{TextRecognizer, WorkoutDetails};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::classifier::FormatClassifier;
use crate::error::ExtractError;
use crate::fields;
use crate::profile::{FormatProfile, default_profiles};

/// Configuration for the extraction pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Layout profiles in priority order.
    #[serde(default = "default_profiles")]
    pub profiles: Vec<FormatProfile>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            profiles: default_profiles(),
        }
    }
}

/// Classification followed by field extraction, on already-recognized text.
#[derive(Debug, Clone, Default)]
pub struct WorkoutExtractor {
    classifier: FormatClassifier,
}

impl WorkoutExtractor {
    #[must_use]
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            classifier: FormatClassifier::new(config.profiles.clone()),
        }
    }

    #[must_use]
    pub const fn classifier(&self) -> &FormatClassifier {
        &self.classifier
    }

    /// Extract a workout recorded on `date` from `text`.
    pub fn extract(&self, text: &str, date: NaiveDate) -> Result<WorkoutDetails, ExtractError> {
        let Some(variant) = self.classifier.classify(text) else {
            warn!("No extractable workout format found");
            return Err(ExtractError::UnrecognizedFormat);
        };
        fields::extract(variant, text, date)
    }
}

/// Image path in, workout details out.
pub struct Pipeline<R> {
    recognizer: R,
    extractor: WorkoutExtractor,
}

impl<R: TextRecognizer> Pipeline<R> {
    #[must_use]
    pub fn new(recognizer: R, config: &ExtractionConfig) -> Self {
        Self {
            recognizer,
            extractor: WorkoutExtractor::new(config),
        }
    }

    #[must_use]
    pub const fn extractor(&self) -> &WorkoutExtractor {
        &self.extractor
    }

    /// Recognize the image and extract a workout dated `today`.
    ///
    /// Recognition failures are returned as-is and never retried.
    pub async fn process_image(
        &self,
        image: &Path,
        today: NaiveDate,
    ) -> Result<WorkoutDetails, ExtractError> {
        info!("Processing image: {}", image.display());
        let text = self.recognizer.recognize(image).await.map_err(|e| {
            warn!("Error reading text from image: {e}");
            e
        })?;
        debug!("Text extracted from image: {text}");
        self.process_text(&text, today)
    }

    pub fn process_text(&self, text: &str, today: NaiveDate) -> Result<WorkoutDetails, ExtractError> {
        self.extractor.extract(text, today)
    }
}
