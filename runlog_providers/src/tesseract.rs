use async_trait::async_trait;
use runlog_core::{RecognizeError, TextRecognizer};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::command_runner::{build_command, recognize_command};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcrConfig {
    /// Program invoked as `<command> <image> stdout -l <language>`.
    #[serde(default = "default_command")]
    pub command: String,

    #[serde(default = "default_language")]
    pub language: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_command() -> String {
    "tesseract".to_string()
}

fn default_language() -> String {
    "eng".to_string()
}

const fn default_timeout_secs() -> u64 {
    60
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
            language: default_language(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Runs the tesseract CLI once per image.
pub struct TesseractRecognizer {
    command: String,
    language: String,
    timeout: Duration,
}

impl TesseractRecognizer {
    #[must_use]
    pub fn new(config: &OcrConfig) -> Self {
        info!(
            "Creating TesseractRecognizer: command={}, language={}",
            config.command, config.language
        );
        Self {
            command: config.command.clone(),
            language: config.language.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

#[async_trait]
impl TextRecognizer for TesseractRecognizer {
    async fn recognize(&self, image: &Path) -> Result<String, RecognizeError> {
        if !tokio::fs::try_exists(image).await? {
            return Err(RecognizeError::MissingImage(image.to_path_buf()));
        }

        debug!("Running {} on {}", self.command, image.display());
        let spec = recognize_command(&self.command, image, &self.language);
        let output = tokio::time::timeout(self.timeout, build_command(&spec).output())
            .await
            .map_err(|_| {
                RecognizeError::Failed(format!(
                    "{} timed out after {} seconds",
                    self.command,
                    self.timeout.as_secs()
                ))
            })??;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let exit_code = output.status.code().unwrap_or(-1);
            warn!("{} exited with code {exit_code}", self.command);
            return Err(RecognizeError::Failed(format!(
                "exit code {exit_code}: {}",
                stderr.trim()
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!("Recognized {} characters", text.len());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recognizer(command: &str) -> TesseractRecognizer {
        TesseractRecognizer::new(&OcrConfig {
            command: command.to_string(),
            ..OcrConfig::default()
        })
    }

    #[tokio::test]
    async fn test_missing_image() {
        let result = recognizer("tesseract")
            .recognize(Path::new("/nonexistent/runlog/photo.jpg"))
            .await;
        assert!(matches!(result, Err(RecognizeError::MissingImage(_))));
    }

    #[tokio::test]
    async fn test_missing_program_is_io_error() {
        let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
        let image = dir.path().join("photo.jpg");
        std::fs::write(&image, b"jpeg").unwrap_or_else(|e| panic!("write: {e}"));

        let result = recognizer("runlog-no-such-ocr-program")
            .recognize(&image)
            .await;
        assert!(matches!(result, Err(RecognizeError::Io(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_stdout_is_returned() {
        let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
        let image = dir.path().join("photo.jpg");
        std::fs::write(&image, b"jpeg").unwrap_or_else(|e| panic!("write: {e}"));

        let text = recognizer("echo")
            .recognize(&image)
            .await
            .unwrap_or_else(|e| panic!("echo should succeed: {e}"));
        assert!(text.contains("stdout -l eng"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_is_failure() {
        let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
        let image = dir.path().join("photo.jpg");
        std::fs::write(&image, b"jpeg").unwrap_or_else(|e| panic!("write: {e}"));

        let result = recognizer("false").recognize(&image).await;
        assert!(matches!(result, Err(RecognizeError::Failed(_))));
    }

    #[test]
    fn test_config_defaults_fill_missing_keys() {
        let config: OcrConfig = serde_json::from_str(r#"{"language":"deu"}"#)
            .unwrap_or_else(|e| panic!("valid config: {e}"));
        assert_eq!(config.command, "tesseract");
        assert_eq!(config.language, "deu");
        assert_eq!(config.timeout_secs, 60);
    }
}
