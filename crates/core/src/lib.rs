//! ViralTube Core Library
//!
//! This library generates YouTube metadata for Android tech videos using
//! Google's Gemini models. A short concept (and optionally a frame or clip)
//! goes in; titles, hashtags, an SEO description, a posting-time suggestion,
//! an audience description, keywords and engagement tips come out.
//!
//! # Overview
//!
//! - **Metadata**: the structured result and the content niche via [`metadata`]
//! - **Attachments**: file to inline base64 payload via [`attachment`]
//! - **AI Integration**: structured-output requests to Gemini via [`gemini`]
//! - **Session**: form state and the analysis lifecycle via [`session`]
//! - **Presentation**: the pure results view via [`view`], copy feedback via [`clipboard`]
//! - **User Interface**: the desktop analyzer window via [`ui`]
//!
//! # Quick Start
//!
//! ```ignore
//! use viraltube_core::{ContentNiche, ViralTube};
//!
//! let app = ViralTube::new()?;
//! let metadata = app
//!     .analyze("Pixel 9 camera review", ContentNiche::TechReview, None)
//!     .await?;
//! println!("{}", metadata.titles[0]);
//! ```

pub mod attachment;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod gemini;
pub mod metadata;
pub mod session;
pub mod ui;
pub mod view;

// Re-export primary types for convenience
pub use attachment::Attachment;
pub use clipboard::{ClipboardSink, CopyFeedback, CopyTarget, SystemClipboard};
pub use config::Config;
pub use error::{AppError, Result};
pub use gemini::{AnalysisRequest, GeminiClient, MetadataAnalyzer};
pub use metadata::{ContentNiche, VideoMetadata};
pub use session::{AnalysisSession, AnalysisState};
pub use view::ResultView;

use std::path::Path;

/// Main entry point for the ViralTube application.
///
/// Wraps configuration and the Gemini client so front ends only deal with
/// prompts, niches and results.
pub struct ViralTube {
    config: Config,
    client: GeminiClient,
}

impl ViralTube {
    /// Creates an instance from environment configuration (including `.env` files).
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is configured or the client cannot be built.
    pub fn new() -> Result<Self> {
        Self::with_config(Config::load()?)
    }

    /// Creates an instance with custom configuration.
    pub fn with_config(config: Config) -> Result<Self> {
        let client = GeminiClient::new(&config)?;
        Ok(Self { config, client })
    }

    /// Runs one analysis: encodes the attachment if given, then asks the model.
    ///
    /// An empty or whitespace-only prompt is rejected with
    /// [`AppError::Validation`] before any request is made.
    pub async fn analyze(
        &self,
        prompt: &str,
        niche: ContentNiche,
        attachment: Option<&Path>,
    ) -> Result<VideoMetadata> {
        if prompt.trim().is_empty() {
            return Err(AppError::empty_prompt());
        }
        session::run_analysis(&self.client, prompt.to_string(), niche, attachment).await
    }

    /// Opens the desktop analyzer window.
    pub fn run_interactive(&self) -> Result<()> {
        ui::run_analyzer_ui(self.config.clone())
    }

    /// Returns a reference to the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Initializes the library by loading environment variables.
///
/// Call this once at application startup before using any other functions.
pub fn init() {
    let _ = dotenvy::dotenv();
}
