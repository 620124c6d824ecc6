use crate::error::{AppError, Result};
use dotenvy::dotenv;
use std::env;

/// Model used when `GEMINI_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";

#[derive(Clone, Debug)]
pub struct Config {
    pub gemini_api_key: String,
    pub model_name: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load .env file if it exists, ignore if it doesn't
        let _ = dotenv();

        let api_key = env::var("GEMINI_API_KEY")
            .or_else(|_| env::var("API_KEY"))
            .map_err(|_| AppError::MissingEnvVar("GEMINI_API_KEY".to_string()))?;

        let model_name = env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Self::builder()
            .with_api_key(api_key)
            .with_model(model_name)
            .build()
    }

    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

#[derive(Default, Debug)]
pub struct ConfigBuilder {
    api_key: Option<String>,
    model: Option<String>,
}

impl ConfigBuilder {
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn build(self) -> Result<Config> {
        let gemini_api_key = self
            .api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| AppError::config("an API key is required"))?;

        let model_name = self
            .model
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Ok(Config {
            gemini_api_key,
            model_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_requires_api_key() {
        let err = Config::builder().with_model("gemini-flash-latest").build();
        assert!(matches!(err, Err(AppError::Config(_))));

        let blank = Config::builder().with_api_key("   ").build();
        assert!(matches!(blank, Err(AppError::Config(_))));
    }

    #[test]
    fn builder_defaults_model() {
        let config = Config::builder().with_api_key("key").build().unwrap();
        assert_eq!(config.model_name, DEFAULT_MODEL);
        assert_eq!(config.gemini_api_key, "key");
    }

    #[test]
    fn builder_keeps_explicit_model() {
        let config = Config::builder()
            .with_api_key("key")
            .with_model("gemini-flash-latest")
            .build()
            .unwrap();
        assert_eq!(config.model_name, "gemini-flash-latest");
    }
}
