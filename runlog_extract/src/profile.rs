//! Keyword profiles that identify source-app layouts.
//!
//! Profiles are plain configuration data so a new layout's keywords can be
//! changed without touching the field rules.

use runlog_core::Variant;
use serde::{Deserialize, Serialize};

/// Required literal substrings for one layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatProfile {
    /// Which field rules to apply when this profile matches.
    pub variant: Variant,

    /// All must appear in the text, case-sensitive.
    pub keywords: Vec<String>,
}

impl FormatProfile {
    #[must_use]
    pub fn new(variant: Variant, keywords: &[&str]) -> Self {
        Self {
            variant,
            keywords: keywords.iter().map(ToString::to_string).collect(),
        }
    }

    /// The first required keyword absent from `text`, if any.
    #[must_use]
    pub fn missing_keyword(&self, text: &str) -> Option<&str> {
        self.keywords
            .iter()
            .map(String::as_str)
            .find(|keyword| !text.contains(keyword))
    }

    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        self.missing_keyword(text).is_none()
    }
}

/// Default profiles in priority order: Apple Workout before RunKeeper.
#[must_use]
pub fn default_profiles() -> Vec<FormatProfile> {
    vec![apple_workout_profile(), run_keeper_profile()]
}

fn apple_workout_profile() -> FormatProfile {
    FormatProfile::new(
        Variant::AppleWorkout,
        &[
            "Workout",
            "Time",
            "Distance",
            "Active Kilocalories",
            "Total Kilocalories",
        ],
    )
}

fn run_keeper_profile() -> FormatProfile {
    FormatProfile::new(Variant::RunKeeper, &["km", "time", "min/km", "Calories"])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_keywords_are_required() {
        let profile = run_keeper_profile();
        assert!(profile.matches("5.0 km time 5:30 min/km 300 Calories"));
        assert_eq!(
            profile.missing_keyword("5.0 km time 5:30 min/km 300 calories"),
            Some("Calories")
        );
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn profiles_deserialize_from_config() {
        let json = r#"{"variant":"run_keeper","keywords":["km","min/km"]}"#;
        let profile: FormatProfile = serde_json::from_str(json).expect("valid profile JSON");
        assert_eq!(profile.variant, Variant::RunKeeper);
        assert_eq!(profile.keywords, vec!["km", "min/km"]);
    }

    #[test]
    fn defaults_put_apple_first() {
        let variants: Vec<Variant> = default_profiles().iter().map(|p| p.variant).collect();
        assert_eq!(variants, vec![Variant::AppleWorkout, Variant::RunKeeper]);
    }
}
