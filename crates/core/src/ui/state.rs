//! Event definitions passed from the background worker to the UI thread.

use crate::error::AppError;
use crate::metadata::VideoMetadata;
use crate::session::Ticket;

/// Outcome of one submission, sent exactly once per background task.
pub(crate) struct AnalysisEvent {
    pub ticket: Ticket,
    pub outcome: Result<VideoMetadata, AppError>,
}
