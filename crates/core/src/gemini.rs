//! Gemini request construction and structured-output parsing.
//!
//! Each analysis is a single `generateContent` call carrying a fixed system
//! instruction, the user content (text, or inline attachment plus text), and
//! a response schema that constrains the model to return [`VideoMetadata`]
//! as JSON.

use crate::attachment::Attachment;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::metadata::{ContentNiche, VideoMetadata};
use futures::future::BoxFuture;
use gemini_rust::{Blob, Content, Gemini, Message, Part, Role};
use serde_json::{Value, json};
use tracing::{debug, info, instrument};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/";

/// Persona and goal handed to the model with every request.
pub const SYSTEM_INSTRUCTION: &str = "You are a world-class YouTube Growth Expert specializing in the Android tech niche.
Your goal is to analyze a video concept or frame and generate high-engagement metadata.
Focus on \"Viral potential\" for Android-related content (e.g., Pixel phones, Samsung Galaxy, App development, customization).";

/// Everything needed for one analysis call.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub prompt: String,
    pub niche: ContentNiche,
    pub attachment: Option<Attachment>,
}

impl AnalysisRequest {
    pub fn new(prompt: impl Into<String>, niche: ContentNiche) -> Self {
        Self {
            prompt: prompt.into(),
            niche,
            attachment: None,
        }
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    /// The text part of the user message.
    pub fn user_text(&self) -> String {
        format!(
            "Analyze this video concept for the {} niche: {}",
            self.niche.label(),
            self.prompt
        )
    }

    /// Builds the user message: the inline attachment first when present, then the text.
    pub fn to_message(&self) -> Message {
        let mut parts = Vec::with_capacity(2);

        if let Some(attachment) = &self.attachment {
            parts.push(Part::InlineData {
                inline_data: Blob {
                    mime_type: attachment.mime_type.clone(),
                    data: attachment.data.clone(),
                },
                media_resolution: None,
            });
        }

        parts.push(Part::Text {
            text: self.user_text(),
            thought: None,
            thought_signature: None,
        });

        Message {
            role: Role::User,
            content: Content {
                role: Some(Role::User),
                parts: Some(parts),
            },
        }
    }
}

/// Output schema declared to the model.
///
/// The item counts in the descriptions are hints for the model; nothing
/// enforces them locally.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "titles": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "5 viral, click-worthy titles specifically for Android viewers."
            },
            "hashtags": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "10 high-traffic hashtags (including #Android, #Tech, etc.)."
            },
            "description": {
                "type": "STRING",
                "description": "A comprehensive SEO-optimized description with placeholders for links."
            },
            "bestTime": {
                "type": "STRING",
                "description": "The absolute best time of day and week to upload this specific content for maximum Android audience reach."
            },
            "targetAudience": {
                "type": "STRING",
                "description": "Detailed description of who will watch this."
            },
            "keywords": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Low-competition, high-volume SEO keywords."
            },
            "engagementTips": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Actionable tips to increase comments and likes."
            }
        },
        "required": [
            "titles",
            "hashtags",
            "description",
            "bestTime",
            "targetAudience",
            "keywords",
            "engagementTips"
        ]
    })
}

/// Parses the model's JSON text into [`VideoMetadata`].
///
/// Any mismatch (malformed JSON, a missing field, an empty body) is a
/// [`AppError::Parse`]; no partial result is ever returned.
pub fn parse_metadata(text: &str) -> Result<VideoMetadata> {
    let body = text.trim();
    let body = if body.is_empty() { "{}" } else { body };
    serde_json::from_str(body).map_err(|e| AppError::parse(e.to_string()))
}

/// Something that turns an [`AnalysisRequest`] into [`VideoMetadata`].
pub trait MetadataAnalyzer: Send + Sync {
    fn analyze(&self, request: AnalysisRequest) -> BoxFuture<'_, Result<VideoMetadata>>;
}

pub struct GeminiClient {
    client: Gemini,
    model_name: String,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Result<Self> {
        // Explicit base URL avoids the BadScheme error from the default model URL
        let base_url = url::Url::parse(BASE_URL)
            .map_err(|e| AppError::Config(format!("Invalid base URL: {}", e)))?;

        let model_name = qualified_model_name(&config.model_name);
        let model_url = format!("{}{}", BASE_URL, model_name);

        let client = Gemini::with_model_and_base_url(&config.gemini_api_key, model_url, base_url)
            .map_err(|e| AppError::Config(format!("Failed to create Gemini client: {}", e)))?;

        Ok(Self { client, model_name })
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Sends one structured-output request and parses the reply.
    #[instrument(
        skip(self, request),
        fields(model = %self.model_name, niche = %request.niche, has_attachment = request.attachment.is_some())
    )]
    pub async fn generate_metadata(&self, request: AnalysisRequest) -> Result<VideoMetadata> {
        info!("requesting video metadata");

        let response = self
            .client
            .generate_content()
            .with_system_prompt(SYSTEM_INSTRUCTION)
            .with_messages(vec![request.to_message()])
            .with_response_mime_type("application/json")
            .with_response_schema(response_schema())
            .execute()
            .await
            .map_err(|e| AppError::transport(e.to_string()))?;

        let text = response.text();
        debug!(chars = text.len(), "response received");

        let metadata = parse_metadata(&text)?;
        info!(
            titles = metadata.titles.len(),
            hashtags = metadata.hashtags.len(),
            "metadata parsed"
        );
        Ok(metadata)
    }
}

impl MetadataAnalyzer for GeminiClient {
    fn analyze(&self, request: AnalysisRequest) -> BoxFuture<'_, Result<VideoMetadata>> {
        Box::pin(self.generate_metadata(request))
    }
}

fn qualified_model_name(model: &str) -> String {
    if model.starts_with("models/") {
        model.to_string()
    } else {
        format!("models/{}", model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r##"{
            "titles": ["Pixel 9 Camera: Brutally Honest", "Is the Pixel 9 Camera Worth It?"],
            "hashtags": ["#Android", "#Pixel9", "#Tech"],
            "description": "Full review.\n\nLinks: [LINK]",
            "bestTime": "Thursday 5-7 PM EST",
            "targetAudience": "Mobile photographers weighing an upgrade.",
            "keywords": ["pixel 9 camera review"],
            "engagementTips": ["Pin a poll comment", "Ask viewers for their samples"]
        }"##
    }

    #[test]
    fn text_only_request_has_single_text_part() {
        let request = AnalysisRequest::new("Pixel 9 camera review", ContentNiche::TechReview);
        let message = request.to_message();
        let parts = message.content.parts.expect("parts");

        assert_eq!(parts.len(), 1);
        match &parts[0] {
            Part::Text { text, .. } => assert_eq!(
                text,
                "Analyze this video concept for the Android Tech Review niche: Pixel 9 camera review"
            ),
            other => panic!("expected text part, got {:?}", other),
        }
    }

    #[test]
    fn attachment_is_sent_before_text() {
        let attachment = Attachment::from_data_url("data:image/jpeg;base64,/9j/4AAQ").unwrap();
        let request = AnalysisRequest::new("Galaxy S25 battery test", ContentNiche::Gaming)
            .with_attachment(attachment);
        let parts = request.to_message().content.parts.expect("parts");

        assert_eq!(parts.len(), 2);
        match &parts[0] {
            Part::InlineData {
                inline_data,
                media_resolution,
            } => {
                assert_eq!(inline_data.mime_type, "image/jpeg");
                assert_eq!(inline_data.data, "/9j/4AAQ");
                assert!(media_resolution.is_none());
            }
            other => panic!("expected inline data, got {:?}", other),
        }
        match &parts[1] {
            Part::Text { text, .. } => assert_eq!(
                text,
                "Analyze this video concept for the Android Gaming niche: Galaxy S25 battery test"
            ),
            other => panic!("expected text part, got {:?}", other),
        }
    }

    #[test]
    fn schema_requires_all_seven_fields() {
        let schema = response_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(
            required,
            [
                "titles",
                "hashtags",
                "description",
                "bestTime",
                "targetAudience",
                "keywords",
                "engagementTips"
            ]
        );

        let properties = schema["properties"].as_object().unwrap();
        assert_eq!(properties.len(), 7);
        for (name, property) in properties {
            assert!(property["description"].is_string(), "{} lacks a description", name);
        }
        assert_eq!(schema["properties"]["titles"]["items"]["type"], "STRING");
    }

    #[test]
    fn parse_keeps_order_and_text() {
        let metadata = parse_metadata(sample_json()).unwrap();
        assert_eq!(metadata.titles[0], "Pixel 9 Camera: Brutally Honest");
        assert_eq!(metadata.hashtags, vec!["#Android", "#Pixel9", "#Tech"]);
        assert_eq!(metadata.description, "Full review.\n\nLinks: [LINK]");
    }

    #[test]
    fn parse_failures_are_parse_errors() {
        assert!(matches!(parse_metadata("not json"), Err(AppError::Parse(_))));
        assert!(matches!(parse_metadata(""), Err(AppError::Parse(_))));
        assert!(matches!(
            parse_metadata(r#"{"titles": ["only titles"]}"#),
            Err(AppError::Parse(_))
        ));
    }

    #[test]
    fn model_names_get_prefixed_once() {
        assert_eq!(qualified_model_name("gemini-3-pro-preview"), "models/gemini-3-pro-preview");
        assert_eq!(qualified_model_name("models/gemini-flash-latest"), "models/gemini-flash-latest");
    }
}
