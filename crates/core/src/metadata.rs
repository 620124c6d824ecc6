//! Shared data shapes: the generated video metadata and the content niche.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Structured result returned by the model for one analysis.
///
/// Every field is required on the wire; a payload missing any of them is
/// rejected as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoMetadata {
    pub titles: Vec<String>,
    pub hashtags: Vec<String>,
    pub description: String,
    pub best_time: String,
    pub target_audience: String,
    pub keywords: Vec<String>,
    pub engagement_tips: Vec<String>,
}

/// Content niche the video targets. Only used as prompt context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContentNiche {
    #[default]
    TechReview,
    Gaming,
    Tutorial,
    AppShowcase,
    News,
}

impl ContentNiche {
    /// All niches in selector order.
    pub const ALL: [ContentNiche; 5] = [
        ContentNiche::TechReview,
        ContentNiche::Gaming,
        ContentNiche::Tutorial,
        ContentNiche::AppShowcase,
        ContentNiche::News,
    ];

    /// Human-readable label, inserted verbatim into the prompt.
    pub fn label(self) -> &'static str {
        match self {
            ContentNiche::TechReview => "Android Tech Review",
            ContentNiche::Gaming => "Android Gaming",
            ContentNiche::Tutorial => "Android How-To/Tutorial",
            ContentNiche::AppShowcase => "App Showcase",
            ContentNiche::News => "Android News/Updates",
        }
    }

    /// Short kebab-case key accepted on the command line.
    pub fn key(self) -> &'static str {
        match self {
            ContentNiche::TechReview => "tech-review",
            ContentNiche::Gaming => "gaming",
            ContentNiche::Tutorial => "tutorial",
            ContentNiche::AppShowcase => "app-showcase",
            ContentNiche::News => "news",
        }
    }
}

impl fmt::Display for ContentNiche {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ContentNiche {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|n| n.key().eq_ignore_ascii_case(needle) || n.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| {
                let keys: Vec<_> = Self::ALL.iter().map(|n| n.key()).collect();
                AppError::Validation(format!("unknown niche '{}', expected one of: {}", needle, keys.join(", ")))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_niche_is_tech_review() {
        assert_eq!(ContentNiche::default(), ContentNiche::TechReview);
        assert_eq!(ContentNiche::default().label(), "Android Tech Review");
    }

    #[test]
    fn niche_parses_from_key_or_label() {
        assert_eq!("gaming".parse::<ContentNiche>().unwrap(), ContentNiche::Gaming);
        assert_eq!("App-Showcase".parse::<ContentNiche>().unwrap(), ContentNiche::AppShowcase);
        assert_eq!(
            "android how-to/tutorial".parse::<ContentNiche>().unwrap(),
            ContentNiche::Tutorial
        );
        assert!("cooking".parse::<ContentNiche>().is_err());
    }

    #[test]
    fn metadata_uses_camel_case_wire_names() {
        let json = r##"{
            "titles": ["a"],
            "hashtags": ["#Android"],
            "description": "d",
            "bestTime": "Friday 6 PM",
            "targetAudience": "Pixel owners",
            "keywords": ["pixel 9"],
            "engagementTips": ["Ask a question"]
        }"##;
        let parsed: VideoMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.best_time, "Friday 6 PM");
        assert_eq!(parsed.target_audience, "Pixel owners");
        assert_eq!(parsed.engagement_tips, vec!["Ask a question"]);
    }

    #[test]
    fn metadata_rejects_missing_fields() {
        let json = r#"{ "titles": [], "hashtags": [] }"#;
        assert!(serde_json::from_str::<VideoMetadata>(json).is_err());
    }
}
