//! Form state and the lifecycle of a single analysis.
//!
//! ```text
//! Idle | Success | Failure --submit(blank prompt)--> Failure(validation)
//! Idle | Success | Failure --submit--> Analyzing
//! Analyzing --resolved--> Success
//! Analyzing --rejected--> Failure
//! ```
//!
//! Each submission is stamped with a [`Ticket`]. Only the outcome for the
//! most recent ticket is applied, so a slow earlier response can never
//! overwrite a newer one.

use crate::attachment::{Attachment, detect_mime_type, is_accepted_media_type};
use crate::error::{AppError, Result};
use crate::gemini::{AnalysisRequest, MetadataAnalyzer};
use crate::metadata::{ContentNiche, VideoMetadata};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

const SNIFF_LEN: u64 = 8192;

/// Display mode of the form. Exactly one is active at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AnalysisState {
    #[default]
    Idle,
    Analyzing,
    Success(VideoMetadata),
    Failure(String),
}

impl AnalysisState {
    pub fn is_analyzing(&self) -> bool {
        matches!(self, AnalysisState::Analyzing)
    }

    pub fn result(&self) -> Option<&VideoMetadata> {
        match self {
            AnalysisState::Success(metadata) => Some(metadata),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            AnalysisState::Failure(message) => Some(message),
            _ => None,
        }
    }
}

/// Identifies one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// A validated request, handed to whoever performs the async work.
#[derive(Debug, Clone)]
pub struct Submission {
    pub ticket: Ticket,
    pub prompt: String,
    pub niche: ContentNiche,
    pub attachment_path: Option<PathBuf>,
}

/// Form input plus the current [`AnalysisState`].
#[derive(Debug, Default)]
pub struct AnalysisSession {
    pub prompt: String,
    pub niche: ContentNiche,
    attachment_path: Option<PathBuf>,
    state: AnalysisState,
    latest: u64,
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AnalysisState {
        &self.state
    }

    pub fn attachment_path(&self) -> Option<&Path> {
        self.attachment_path.as_deref()
    }

    /// Selects a file to attach, replacing any previous choice.
    ///
    /// Returns `false` if the file's type falls outside the image/video
    /// accept filter. The file is still kept; the filter is only a hint.
    pub fn select_attachment(&mut self, path: impl Into<PathBuf>) -> bool {
        let path = path.into();
        let mime = detect_mime_type(&sniff_head(&path), Some(&path));
        let accepted = is_accepted_media_type(&mime);
        if !accepted {
            warn!(path = %path.display(), mime_type = %mime, "attachment is not an image or video");
        }
        self.attachment_path = Some(path);
        accepted
    }

    pub fn clear_attachment(&mut self) {
        self.attachment_path = None;
    }

    /// Starts an analysis if the prompt is not blank.
    ///
    /// On a blank prompt the state becomes a validation failure and `None`
    /// is returned; no request may be started.
    pub fn submit(&mut self) -> Option<Submission> {
        // Any action supersedes whatever is still in flight
        self.latest += 1;

        if self.prompt.trim().is_empty() {
            self.state = AnalysisState::Failure(AppError::empty_prompt().user_message());
            return None;
        }

        let ticket = Ticket(self.latest);
        self.state = AnalysisState::Analyzing;
        info!(ticket = ticket.0, niche = %self.niche, "analysis submitted");

        Some(Submission {
            ticket,
            prompt: self.prompt.clone(),
            niche: self.niche,
            attachment_path: self.attachment_path.clone(),
        })
    }

    /// Applies the outcome of a submission.
    ///
    /// Returns `false` (and leaves the state untouched) when the ticket has
    /// been superseded by a later submission.
    pub fn complete(&mut self, ticket: Ticket, outcome: Result<VideoMetadata>) -> bool {
        if ticket.0 != self.latest {
            debug!(ticket = ticket.0, latest = self.latest, "discarding stale outcome");
            return false;
        }

        self.state = match outcome {
            Ok(metadata) => AnalysisState::Success(metadata),
            Err(err) => {
                warn!(error = %err, "analysis failed");
                AnalysisState::Failure(err.user_message())
            }
        };
        true
    }
}

/// Reads just enough of a file to recognise its magic bytes.
fn sniff_head(path: &Path) -> Vec<u8> {
    let mut head = Vec::with_capacity(SNIFF_LEN as usize);
    if let Ok(file) = File::open(path) {
        let _ = file.take(SNIFF_LEN).read_to_end(&mut head);
    }
    head
}

/// Encodes the attachment (if any) and runs the analyzer for one submission.
#[instrument(skip_all, fields(niche = %niche))]
pub async fn run_analysis(
    analyzer: &dyn MetadataAnalyzer,
    prompt: String,
    niche: ContentNiche,
    attachment_path: Option<&Path>,
) -> Result<VideoMetadata> {
    let mut request = AnalysisRequest::new(prompt, niche);

    if let Some(path) = attachment_path {
        request = request.with_attachment(Attachment::load(path).await?);
    }

    analyzer.analyze(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EMPTY_PROMPT_MESSAGE, PARSE_FAILURE_MESSAGE};

    fn metadata(title: &str) -> VideoMetadata {
        VideoMetadata {
            titles: vec![title.to_string()],
            hashtags: vec!["#Android".to_string()],
            description: "desc".to_string(),
            best_time: "Sunday 10 AM".to_string(),
            target_audience: "Tinkerers".to_string(),
            keywords: vec!["root".to_string()],
            engagement_tips: vec!["Reply to early comments".to_string()],
        }
    }

    #[test]
    fn starts_idle_with_default_niche() {
        let session = AnalysisSession::new();
        assert_eq!(session.state(), &AnalysisState::Idle);
        assert_eq!(session.niche, ContentNiche::TechReview);
        assert!(session.attachment_path().is_none());
    }

    #[test]
    fn blank_prompts_are_rejected() {
        for prompt in ["", "   ", "\n\t "] {
            let mut session = AnalysisSession::new();
            session.prompt = prompt.to_string();
            assert!(session.submit().is_none());
            assert_eq!(session.state().error(), Some(EMPTY_PROMPT_MESSAGE));
        }
    }

    #[test]
    fn non_blank_prompt_enters_analyzing() {
        let mut session = AnalysisSession::new();
        session.prompt = "  Pixel 9 camera review  ".to_string();
        let submission = session.submit().expect("submission");
        assert!(session.state().is_analyzing());
        assert_eq!(submission.prompt, "  Pixel 9 camera review  ");
        assert_eq!(submission.niche, ContentNiche::TechReview);
    }

    #[test]
    fn success_replaces_previous_error() {
        let mut session = AnalysisSession::new();
        session.submit();
        assert!(session.state().error().is_some());

        session.prompt = "Galaxy unboxing".to_string();
        let submission = session.submit().unwrap();
        assert!(session.complete(submission.ticket, Ok(metadata("Unboxed"))));
        assert_eq!(session.state().result(), Some(&metadata("Unboxed")));
        assert!(session.state().error().is_none());
    }

    #[test]
    fn failure_shows_user_message() {
        let mut session = AnalysisSession::new();
        session.prompt = "Launcher tour".to_string();
        let submission = session.submit().unwrap();
        session.complete(submission.ticket, Err(AppError::parse("eof")));
        assert_eq!(session.state().error(), Some(PARSE_FAILURE_MESSAGE));
        assert!(session.state().result().is_none());
    }

    #[test]
    fn stale_outcomes_are_ignored() {
        let mut session = AnalysisSession::new();
        session.prompt = "first".to_string();
        let first = session.submit().unwrap();
        session.prompt = "second".to_string();
        let second = session.submit().unwrap();

        assert!(session.complete(second.ticket, Ok(metadata("second"))));
        assert!(!session.complete(first.ticket, Ok(metadata("first"))));
        assert_eq!(session.state().result(), Some(&metadata("second")));
    }

    #[test]
    fn blank_resubmit_supersedes_request_in_flight() {
        let mut session = AnalysisSession::new();
        session.prompt = "Pixel 9 camera review".to_string();
        let in_flight = session.submit().unwrap();

        session.prompt.clear();
        assert!(session.submit().is_none());

        assert!(!session.complete(in_flight.ticket, Ok(metadata("late"))));
        assert_eq!(session.state().error(), Some(EMPTY_PROMPT_MESSAGE));
        assert!(session.state().result().is_none());
    }

    #[test]
    fn selecting_a_new_file_replaces_the_old_one() {
        let dir = tempfile::tempdir().unwrap();
        let png = dir.path().join("a.png");
        let notes = dir.path().join("b.txt");
        std::fs::write(&png, [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]).unwrap();
        std::fs::write(&notes, "plain text").unwrap();

        let mut session = AnalysisSession::new();
        assert!(session.select_attachment(&png));
        assert!(!session.select_attachment(&notes));
        assert_eq!(session.attachment_path(), Some(notes.as_path()));

        session.clear_attachment();
        assert!(session.attachment_path().is_none());
    }
}
