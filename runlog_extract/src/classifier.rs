use runlog_core::Variant;
use tracing::debug;

use crate::profile::{FormatProfile, default_profiles};

/// Picks the field ruleset for a piece of recognized text.
#[derive(Debug, Clone)]
pub struct FormatClassifier {
    profiles: Vec<FormatProfile>,
}

impl Default for FormatClassifier {
    fn default() -> Self {
        Self::new(default_profiles())
    }
}

impl FormatClassifier {
    /// Profiles are tried in order; the first full match wins.
    #[must_use]
    pub const fn new(profiles: Vec<FormatProfile>) -> Self {
        Self { profiles }
    }

    #[must_use]
    pub fn profiles(&self) -> &[FormatProfile] {
        &self.profiles
    }

    /// `None` means the text matches no known layout, which is ordinary user
    /// input rather than an error condition.
    #[must_use]
    pub fn classify(&self, text: &str) -> Option<Variant> {
        for profile in &self.profiles {
            match profile.missing_keyword(text) {
                None => {
                    debug!("Text classified as {}", profile.variant);
                    return Some(profile.variant);
                }
                Some(keyword) => {
                    debug!("Not {}: keyword {keyword:?} not found", profile.variant);
                }
            }
        }
        None
    }
}
